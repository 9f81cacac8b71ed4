//! Announcement message configuration

use serde::Deserialize;

use crate::domain::verification::Announcement;

/// Text of the call-to-action posted in the announcement channel.
/// Every field falls back to the built-in notice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementConfig {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub button_label: Option<String>,

    /// Set to an empty string to post the button without an emoji
    #[serde(default)]
    pub button_emoji: Option<String>,
}

impl AnnouncementConfig {
    pub fn to_announcement(&self) -> Announcement {
        let defaults = Announcement::default();
        Announcement {
            title: self.title.clone().unwrap_or(defaults.title),
            description: self.description.clone().unwrap_or(defaults.description),
            button_label: self.button_label.clone().unwrap_or(defaults.button_label),
            button_emoji: match &self.button_emoji {
                Some(emoji) if emoji.is_empty() => None,
                Some(emoji) => Some(emoji.clone()),
                None => defaults.button_emoji,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_notice() {
        assert_eq!(
            AnnouncementConfig::default().to_announcement(),
            Announcement::default()
        );
    }

    #[test]
    fn test_overrides() {
        let config = AnnouncementConfig {
            title: Some("Welcome".to_string()),
            button_emoji: Some(String::new()),
            ..Default::default()
        };
        let announcement = config.to_announcement();
        assert_eq!(announcement.title, "Welcome");
        assert_eq!(announcement.button_emoji, None);
        assert_eq!(announcement.button_label, "Enter Your Age");
    }
}
