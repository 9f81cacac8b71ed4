//! Platform resources the gate resolves and acts upon.

use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, MessageId, RoleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// An applicant's membership in the gated guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub applicant_id: ApplicantId,
    pub role_ids: Vec<RoleId>,
}

impl GuildMember {
    pub fn has_role(&self, role: &RoleId) -> bool {
        self.role_ids.iter().any(|r| r == role)
    }
}

/// A message already present in a channel, reduced to what the
/// announcement check needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub id: MessageId,
    pub author_id: String,
    /// Custom ids of every interactive control attached to the message.
    pub control_ids: Vec<String>,
}

impl ChannelMessage {
    pub fn has_control(&self, custom_id: &str) -> bool {
        self.control_ids.iter().any(|id| id == custom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_role_lookup() {
        let role = RoleId::new("10").unwrap();
        let member = GuildMember {
            applicant_id: ApplicantId::new("1").unwrap(),
            role_ids: vec![role.clone()],
        };
        assert!(member.has_role(&role));
        assert!(!member.has_role(&RoleId::new("11").unwrap()));
    }

    #[test]
    fn message_control_lookup() {
        let message = ChannelMessage {
            id: MessageId::new("5").unwrap(),
            author_id: "99".to_string(),
            control_ids: vec!["age-verification".to_string()],
        };
        assert!(message.has_control("age-verification"));
        assert!(!message.has_control("other"));
    }
}
