//! Applicant-facing reply texts. Every reply is ephemeral.

use crate::domain::verification::{DateInputPolicy, VerificationError};

pub const UNDERAGE: &str = "You are not old enough to join this server.";
pub const VERIFIED: &str = "You have been verified. Welcome!";
pub const STALE_FORM: &str =
    "This verification form has expired or was already submitted. Please press the button again.";
pub const IN_PROGRESS: &str =
    "Your previous verification is still being processed. Please wait a moment.";
pub const WRONG_GUILD: &str = "Age verification is not available here.";
pub const UNEXPECTED_FAILURE: &str =
    "Something went wrong while verifying you. Please try again later.";

/// Corrective reply for a birthdate that did not parse.
pub fn invalid_format(raw: &str, policy: DateInputPolicy) -> String {
    format!(
        "`{}` does not appear to be in the correct format. Please use {} format.",
        sanitize(raw),
        policy.expected_format().to_lowercase()
    )
}

/// Reply for an interaction that was refused before any decision.
pub fn for_error(error: &VerificationError) -> &'static str {
    match error {
        VerificationError::StaleSubmission => STALE_FORM,
        VerificationError::InProgress(_) => IN_PROGRESS,
        VerificationError::WrongGuild => WRONG_GUILD,
        VerificationError::Configuration(_) | VerificationError::Platform(_) => UNEXPECTED_FAILURE,
    }
}

/// Keeps user input from breaking out of the inline code span.
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '`').take(64).collect();
    if cleaned.is_empty() {
        "(empty)".to_string()
    } else {
        cleaned
    }
}
