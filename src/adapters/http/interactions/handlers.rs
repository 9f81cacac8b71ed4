//! HTTP handlers for the interactions endpoint.
//!
//! Every request is signature-checked first. Triggers are answered with the
//! verification modal; modal submissions are claimed inline, acknowledged
//! with a deferred ephemeral response, and processed on a spawned task.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use thiserror::Error;

use crate::adapters::discord::payloads::Modal;
use crate::application::handlers::verification::replies;
use crate::application::{IssuePromptCommand, SubmitVerificationCommand, VerificationContext};
use crate::domain::foundation::{GuildId, Timestamp, ValidationError};
use crate::domain::verification::{Applicant, ReplyHandle, VerificationError, TRIGGER_ID};

use super::dto::{
    interaction_type, ErrorResponse, HealthResponse, Interaction, InteractionResponse,
};
use super::signature::{InteractionVerifier, SignatureError, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Shared state for the interactions router.
#[derive(Clone)]
pub struct InteractionAppState {
    pub context: VerificationContext,
    pub verifier: Arc<InteractionVerifier>,
}

impl InteractionAppState {
    pub fn new(context: VerificationContext, verifier: InteractionVerifier) -> Self {
        Self {
            context,
            verifier: Arc::new(verifier),
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// POST /interactions
pub async fn handle_interaction(
    State(state): State<InteractionAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, InteractionApiError> {
    let signature = header(&headers, SIGNATURE_HEADER)?;
    let timestamp = header(&headers, TIMESTAMP_HEADER)?;
    state
        .verifier
        .verify(signature, timestamp, &body, chrono::Utc::now().timestamp())?;

    let interaction: Interaction = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable interaction");
        InteractionApiError::Malformed(e.to_string())
    })?;

    tracing::debug!(interaction_id = %interaction.id, kind = interaction.kind, "Interaction received");

    let response = match interaction.kind {
        interaction_type::PING => InteractionResponse::pong(),
        interaction_type::MESSAGE_COMPONENT if interaction.custom_id() == Some(TRIGGER_ID) => {
            issue_prompt(&state.context, &interaction).await?
        }
        interaction_type::MODAL_SUBMIT if is_verification_form(&interaction) => {
            submit_verification(&state.context, interaction).await?
        }
        kind => {
            tracing::debug!(kind, custom_id = ?interaction.custom_id(), "Unhandled interaction");
            return Err(InteractionApiError::Unsupported(kind));
        }
    };

    Ok(Json(response))
}

async fn issue_prompt(
    context: &VerificationContext,
    interaction: &Interaction,
) -> Result<InteractionResponse, InteractionApiError> {
    let applicant = applicant(interaction)?;
    let cmd = IssuePromptCommand {
        applicant_id: applicant.id,
        guild_id: guild_id(interaction),
        requested_at: Timestamp::now(),
    };

    match context.issue_prompt().handle(cmd).await {
        Ok(form) => Ok(InteractionResponse::modal(Modal::from(&form))),
        Err(e) => Ok(refusal(context, e)),
    }
}

async fn submit_verification(
    context: &VerificationContext,
    interaction: Interaction,
) -> Result<InteractionResponse, InteractionApiError> {
    let applicant = applicant(&interaction)?;
    let member = interaction
        .member
        .as_ref()
        .map(|m| m.to_domain(&applicant.id))
        .transpose()?;

    let cmd = SubmitVerificationCommand {
        guild_id: guild_id(&interaction),
        form_custom_id: interaction.custom_id().unwrap_or_default().to_string(),
        values: interaction.submitted_values(),
        member,
        reply: ReplyHandle::new(interaction.token.clone()),
        submitted_at: Timestamp::now(),
        applicant,
    };

    let handler = context.submit_verification();
    match handler.accept(cmd).await {
        Ok(submission) => {
            tokio::spawn(async move { handler.handle(submission).await });
            Ok(InteractionResponse::deferred_ephemeral())
        }
        Err(e) => Ok(refusal(context, e)),
    }
}

/// Answers a refused interaction in place.
fn refusal(context: &VerificationContext, error: VerificationError) -> InteractionResponse {
    let reply = replies::for_error(&error);
    if error.is_fatal() {
        context.fatal.raise(error);
    } else {
        tracing::info!(error = %error, "Interaction refused");
    }
    InteractionResponse::ephemeral(reply)
}

fn is_verification_form(interaction: &Interaction) -> bool {
    interaction
        .custom_id()
        .is_some_and(|id| id.starts_with(TRIGGER_ID))
}

fn applicant(interaction: &Interaction) -> Result<Applicant, InteractionApiError> {
    let user = interaction
        .invoker()
        .ok_or_else(|| InteractionApiError::Malformed("interaction has no user".to_string()))?;
    Ok(user.to_applicant()?)
}

fn guild_id(interaction: &Interaction) -> Option<GuildId> {
    interaction
        .guild_id
        .as_deref()
        .and_then(|id| GuildId::new(id).ok())
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or(SignatureError::MissingHeader(name))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Rejections that never reach the verification pipeline.
#[derive(Debug, Error)]
pub enum InteractionApiError {
    #[error("invalid request signature: {0}")]
    Signature(#[from] SignatureError),

    #[error("malformed interaction: {0}")]
    Malformed(String),

    #[error("unsupported interaction type {0}")]
    Unsupported(u8),
}

impl From<ValidationError> for InteractionApiError {
    fn from(err: ValidationError) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl IntoResponse for InteractionApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self {
            InteractionApiError::Signature(_) => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
            InteractionApiError::Malformed(_) => (StatusCode::BAD_REQUEST, "MALFORMED_INTERACTION"),
            InteractionApiError::Unsupported(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_INTERACTION")
            }
        };

        let body = ErrorResponse::new(error_code, self.to_string());
        (status, Json(body)).into_response()
    }
}
