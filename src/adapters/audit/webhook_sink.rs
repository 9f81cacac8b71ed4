//! Webhook audit sink.
//!
//! Posts each audit event as a single embed to an incoming webhook in a
//! private moderation channel. One attempt per event; the caller decides
//! what a failure means.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::adapters::discord::payloads::{Embed, EmbedAuthor, EmbedField};
use crate::config::AuditConfig;
use crate::domain::verification::AuditEvent;
use crate::ports::{AuditError, AuditSink};

/// Embed field values are capped at 1024 characters.
const MAX_FIELD_VALUE_CHARS: usize = 1024;

#[derive(Debug, Serialize)]
struct WebhookMessage {
    embeds: Vec<Embed>,
}

pub struct WebhookAuditSink {
    http_client: reqwest::Client,
    webhook_url: SecretString,
}

impl WebhookAuditSink {
    pub fn new(config: &AuditConfig, timeout: Duration) -> Result<Self, AuditError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuditError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            webhook_url: config.webhook_url.clone(),
        })
    }
}

/// Renders an audit event as the embed posted to the sink.
pub fn audit_embed(event: &AuditEvent) -> Embed {
    let fields = event
        .answers
        .iter()
        .map(|answer| EmbedField {
            name: answer.label.clone(),
            value: field_value(&answer.value),
            inline: false,
        })
        .collect();

    Embed {
        title: Some(event.title().to_string()),
        description: Some(event.description()),
        color: Some(event.severity.color()),
        author: Some(EmbedAuthor {
            name: event.applicant_tag.clone(),
            icon_url: Some(event.avatar_url.clone()),
        }),
        fields,
        timestamp: Some(event.occurred_at.to_rfc3339()),
    }
}

/// Embed field values may not be empty.
fn field_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "(no answer)".to_string();
    }
    trimmed.chars().take(MAX_FIELD_VALUE_CHARS).collect()
}

#[async_trait]
impl AuditSink for WebhookAuditSink {
    async fn deliver(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let body = WebhookMessage {
            embeds: vec![audit_embed(event)],
        };

        let response = self
            .http_client
            .post(self.webhook_url.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuditError::Unreachable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            applicant_id = %event.applicant_id,
            outcome = %event.outcome,
            "Audit event delivered"
        );
        Ok(())
    }
}
