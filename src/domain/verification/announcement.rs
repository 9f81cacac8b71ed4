//! The call-to-action posted in the announcement channel.

use super::form::TRIGGER_ID;

pub const DEFAULT_TITLE: &str = "Age Verification";
pub const DEFAULT_DESCRIPTION: &str = "This server is intended for members of 18 years in age or older. To gain access to this server, you'll need to provide your birthday through this system. Your birthday will be logged in a private logging channel in this server, for our own safety.";
pub const DEFAULT_BUTTON_LABEL: &str = "Enter Your Age";
pub const DEFAULT_BUTTON_EMOJI: &str = "🔞";

/// Explanatory notice plus a single activatable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    pub button_label: String,
    pub button_emoji: Option<String>,
}

impl Announcement {
    /// Custom id carried by the control; activating it is the trigger.
    pub fn trigger_id(&self) -> &'static str {
        TRIGGER_ID
    }
}

impl Default for Announcement {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            button_emoji: Some(DEFAULT_BUTTON_EMOJI.to_string()),
        }
    }
}
