//! The structured prompt presented to an applicant.
//!
//! Every form is bound to one session: its custom id embeds the session
//! token, so a submission can always be traced back to the applicant and
//! round trip that produced it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionToken;

use super::age::DateInputPolicy;

/// Custom id of the call-to-action control and prefix of every form id.
pub const TRIGGER_ID: &str = "age-verification";

/// Field id of the mandatory birthdate input.
pub const BIRTHDATE_FIELD_ID: &str = "birthday";

/// The platform caps a form at five inputs, one of which is the birthdate.
pub const MAX_SUPPLEMENTARY_FIELDS: usize = 4;

/// The platform caps text inputs at 4000 characters.
pub const MAX_FIELD_LENGTH: u16 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStyle {
    /// Single-line input.
    #[default]
    Short,
    /// Multi-line input.
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub style: FieldStyle,
    pub required: bool,
    pub min_length: Option<u16>,
    pub max_length: Option<u16>,
}

impl FormField {
    /// The mandatory birthdate input. Length bounds follow the date policy.
    pub fn birthdate(policy: DateInputPolicy) -> Self {
        let (min_length, max_length) = match policy {
            DateInputPolicy::Strict => (10, 10),
            DateInputPolicy::Lenient => (8, 10),
        };
        Self {
            id: BIRTHDATE_FIELD_ID.to_string(),
            label: format!(
                "What is your birthday in {} format?",
                policy.expected_format()
            ),
            style: FieldStyle::Short,
            required: true,
            min_length: Some(min_length),
            max_length: Some(max_length),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationForm {
    pub custom_id: String,
    pub title: String,
    pub fields: Vec<FormField>,
}

impl VerificationForm {
    /// Builds the form for one session: birthdate first, then the
    /// configured supplementary fields in order.
    pub fn for_session(
        token: &SessionToken,
        title: impl Into<String>,
        policy: DateInputPolicy,
        supplementary: &[FormField],
    ) -> Self {
        let mut fields = Vec::with_capacity(1 + supplementary.len());
        fields.push(FormField::birthdate(policy));
        fields.extend(supplementary.iter().cloned());

        Self {
            custom_id: form_custom_id(token),
            title: title.into(),
            fields,
        }
    }
}

/// `age-verification:<token>`
pub fn form_custom_id(token: &SessionToken) -> String {
    format!("{}:{}", TRIGGER_ID, token)
}

/// Recovers the session token from a submitted form's custom id.
pub fn session_token_from_custom_id(custom_id: &str) -> Option<SessionToken> {
    let (prefix, token) = custom_id.split_once(':')?;
    if prefix != TRIGGER_ID {
        return None;
    }
    token.parse().ok()
}
