//! Verification module - the age gate's core domain.
//!
//! Pure pieces of the trigger → prompt → submission → decision → action →
//! audit state machine: the age calculator, the decision engine, sessions,
//! forms, announcements and audit records. Everything with side effects
//! lives behind the ports.

mod age;
mod announcement;
mod audit;
mod decision;
mod errors;
mod form;
mod resources;
mod session;

pub use age::{calculate_age, parse_birthdate, AgeInYears, DateInputPolicy};
pub use announcement::Announcement;
pub use audit::{AuditEvent, Severity};
pub use decision::{Decision, DecisionEngine, Outcome, DEFAULT_MINIMUM_AGE};
pub use errors::{UnresolvedResource, VerificationError};
pub use form::{
    form_custom_id, session_token_from_custom_id, FieldStyle, FormField, VerificationForm,
    BIRTHDATE_FIELD_ID, MAX_FIELD_LENGTH, MAX_SUPPLEMENTARY_FIELDS, TRIGGER_ID,
};
pub use resources::{Channel, ChannelMessage, Guild, GuildMember, Role};
pub use session::{Applicant, ReplyHandle, Submission, SupplementaryAnswer, VerificationSession};
