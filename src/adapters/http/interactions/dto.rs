//! Request and response DTOs for the interactions endpoint.

use serde::{Deserialize, Serialize};

use crate::adapters::discord::payloads::{ComponentDto, MemberDto, Modal, UserDto};

/// Inbound interaction types.
pub mod interaction_type {
    pub const PING: u8 = 1;
    pub const MESSAGE_COMPONENT: u8 = 3;
    pub const MODAL_SUBMIT: u8 = 5;
}

/// Outbound response types.
pub mod response_type {
    pub const PONG: u8 = 1;
    pub const CHANNEL_MESSAGE: u8 = 4;
    pub const DEFERRED_CHANNEL_MESSAGE: u8 = 5;
    pub const MODAL: u8 = 9;
}

/// Message flag: visible only to the invoking user.
pub const EPHEMERAL: u64 = 1 << 6;

// ════════════════════════════════════════════════════════════════════════════════
// Request
// ════════════════════════════════════════════════════════════════════════════════

/// An interaction delivered by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    pub id: String,
    pub application_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Present for interactions inside a guild.
    #[serde(default)]
    pub member: Option<MemberDto>,
    /// Present for interactions outside a guild.
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

impl Interaction {
    /// The invoking user, wherever the interaction came from.
    pub fn invoker(&self) -> Option<&UserDto> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref()?.custom_id.as_deref()
    }

    /// Every `(custom_id, value)` pair submitted in a modal, in form order.
    pub fn submitted_values(&self) -> Vec<(String, String)> {
        let Some(data) = &self.data else {
            return Vec::new();
        };

        let mut inputs = Vec::new();
        for component in &data.components {
            component.flatten(&mut inputs);
        }

        inputs
            .into_iter()
            .filter_map(|c| Some((c.custom_id.clone()?, c.value.clone()?)))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub component_type: Option<u8>,
    /// Action rows of a submitted modal.
    #[serde(default)]
    pub components: Vec<ComponentDto>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Message(MessageData),
    Modal(Modal),
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub flags: u64,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: response_type::PONG,
            data: None,
        }
    }

    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: response_type::MODAL,
            data: Some(ResponseData::Modal(modal)),
        }
    }

    /// Provisional "thinking" acknowledgement, later finalized in place.
    pub fn deferred_ephemeral() -> Self {
        Self {
            kind: response_type::DEFERRED_CHANNEL_MESSAGE,
            data: Some(ResponseData::Message(MessageData {
                content: None,
                flags: EPHEMERAL,
            })),
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: response_type::CHANNEL_MESSAGE,
            data: Some(ResponseData::Message(MessageData {
                content: Some(content.into()),
                flags: EPHEMERAL,
            })),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn modal_submit() -> serde_json::Value {
        json!({
            "type": 5,
            "id": "9001",
            "application_id": "1100000000000000000",
            "token": "tok",
            "guild_id": "100",
            "member": {
                "user": {"id": "4242", "username": "applicant", "discriminator": "0", "avatar": null},
                "roles": []
            },
            "data": {
                "custom_id": "age-verification:5a1f0a4e-2d3b-4c7e-9f11-0b7c3e2d1a99",
                "components": [
                    {"type": 1, "components": [{"type": 4, "custom_id": "birthday", "value": "01/01/2000"}]},
                    {"type": 1, "components": [{"type": 4, "custom_id": "how-find", "value": "A friend"}]}
                ]
            }
        })
    }

    #[test]
    fn modal_values_are_collected_in_order() {
        let interaction: Interaction = serde_json::from_value(modal_submit()).unwrap();

        assert_eq!(
            interaction.submitted_values(),
            vec![
                ("birthday".to_string(), "01/01/2000".to_string()),
                ("how-find".to_string(), "A friend".to_string()),
            ]
        );
        assert_eq!(interaction.invoker().unwrap().id, "4242");
    }

    #[test]
    fn ping_needs_no_data() {
        let interaction: Interaction = serde_json::from_value(json!({
            "type": 1,
            "id": "1",
            "application_id": "2"
        }))
        .unwrap();

        assert_eq!(interaction.kind, interaction_type::PING);
        assert!(interaction.custom_id().is_none());
        assert!(interaction.submitted_values().is_empty());
    }

    #[test]
    fn direct_message_invoker_comes_from_user() {
        let interaction: Interaction = serde_json::from_value(json!({
            "type": 3,
            "id": "1",
            "application_id": "2",
            "user": {"id": "77", "username": "dm"},
            "data": {"custom_id": "age-verification", "component_type": 2}
        }))
        .unwrap();

        assert_eq!(interaction.invoker().unwrap().id, "77");
        assert!(interaction.guild_id.is_none());
    }

    #[test]
    fn deferred_ack_is_ephemeral() {
        let body = serde_json::to_value(InteractionResponse::deferred_ephemeral()).unwrap();

        assert_eq!(body, json!({"type": 5, "data": {"flags": 64}}));
    }

    #[test]
    fn pong_has_no_data() {
        let body = serde_json::to_value(InteractionResponse::pong()).unwrap();

        assert_eq!(body, json!({"type": 1}));
    }
}
