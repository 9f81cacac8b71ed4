//! Discord wire types.
//!
//! Inbound objects are decoded leniently (unknown fields ignored, optional
//! fields defaulted). Outbound objects skip `None` fields so the platform
//! applies its own defaults.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, MessageId, RoleId, ValidationError};
use crate::domain::verification::{
    Announcement, Applicant, Channel, ChannelMessage, FieldStyle, FormField, Guild, GuildMember,
    Role, VerificationForm,
};

const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Message component kinds.
pub mod component_type {
    pub const ACTION_ROW: u8 = 1;
    pub const BUTTON: u8 = 2;
    pub const TEXT_INPUT: u8 = 4;
}

const BUTTON_STYLE_PRIMARY: u8 = 1;
const TEXT_INPUT_STYLE_SHORT: u8 = 1;
const TEXT_INPUT_STYLE_PARAGRAPH: u8 = 2;

// ════════════════════════════════════════════════════════════════════════════════
// Inbound
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserDto {
    /// `name` for migrated accounts, `name#1234` for legacy ones.
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if !d.is_empty() && d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }

    /// Uploaded avatar if set, otherwise the platform's default avatar.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("{}/avatars/{}/{}.png", CDN_BASE_URL, self.id, hash),
            None => {
                let index = match self.discriminator.as_deref() {
                    Some(d) if !d.is_empty() && d != "0" => {
                        d.parse::<u64>().map(|n| n % 5).unwrap_or(0)
                    }
                    _ => self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0),
                };
                format!("{}/embed/avatars/{}.png", CDN_BASE_URL, index)
            }
        }
    }

    pub fn to_applicant(&self) -> Result<Applicant, ValidationError> {
        Ok(Applicant {
            id: ApplicantId::new(self.id.as_str())?,
            tag: self.tag(),
            avatar_url: self.avatar_url(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildDto {
    pub id: String,
    pub name: String,
}

impl GuildDto {
    pub fn into_domain(self) -> Result<Guild, ValidationError> {
        Ok(Guild {
            id: GuildId::new(self.id)?,
            name: self.name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDto {
    pub id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ChannelDto {
    pub fn into_domain(self) -> Result<Channel, ValidationError> {
        Ok(Channel {
            id: ChannelId::new(self.id)?,
            guild_id: self.guild_id.map(GuildId::new).transpose()?,
            name: self.name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
}

impl RoleDto {
    pub fn into_domain(self) -> Result<Role, ValidationError> {
        Ok(Role {
            id: RoleId::new(self.id)?,
            name: self.name,
        })
    }
}

/// Guild member. `user` is absent when the member is embedded in an
/// interaction, where the user is sent alongside.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberDto {
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl MemberDto {
    pub fn to_domain(&self, applicant_id: &ApplicantId) -> Result<GuildMember, ValidationError> {
        let role_ids = self
            .roles
            .iter()
            .map(|id| RoleId::new(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GuildMember {
            applicant_id: applicant_id.clone(),
            role_ids,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentDto {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentDto>,
}

impl ComponentDto {
    /// Depth-first walk over this component and its children.
    pub fn flatten<'a>(&'a self, out: &mut Vec<&'a ComponentDto>) {
        out.push(self);
        for child in &self.components {
            child.flatten(out);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub author: UserDto,
    #[serde(default)]
    pub components: Vec<ComponentDto>,
}

impl MessageDto {
    pub fn into_domain(self) -> Result<ChannelMessage, ValidationError> {
        let mut all = Vec::new();
        for row in &self.components {
            row.flatten(&mut all);
        }
        let control_ids = all
            .into_iter()
            .filter_map(|c| c.custom_id.clone())
            .collect();

        Ok(ChannelMessage {
            id: MessageId::new(self.id)?,
            author_id: self.author.id,
            control_ids,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Outbound
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Emoji {
    pub name: String,
}

/// An outbound component: action rows, buttons and text inputs share one
/// shape on the wire.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl Component {
    pub fn action_row(components: Vec<Component>) -> Self {
        Self {
            kind: component_type::ACTION_ROW,
            components,
            ..Default::default()
        }
    }

    pub fn text_input(field: &FormField) -> Self {
        let style = match field.style {
            FieldStyle::Short => TEXT_INPUT_STYLE_SHORT,
            FieldStyle::Paragraph => TEXT_INPUT_STYLE_PARAGRAPH,
        };
        Self {
            kind: component_type::TEXT_INPUT,
            custom_id: Some(field.id.clone()),
            style: Some(style),
            label: Some(field.label.clone()),
            required: Some(field.required),
            min_length: field.min_length,
            max_length: field.max_length,
            ..Default::default()
        }
    }
}

/// Body of `POST /channels/{id}/messages`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateMessage {
    pub embeds: Vec<Embed>,
    pub components: Vec<Component>,
}

impl From<&Announcement> for CreateMessage {
    fn from(announcement: &Announcement) -> Self {
        let button = Component {
            kind: component_type::BUTTON,
            custom_id: Some(announcement.trigger_id().to_string()),
            style: Some(BUTTON_STYLE_PRIMARY),
            label: Some(announcement.button_label.clone()),
            emoji: announcement
                .button_emoji
                .as_ref()
                .map(|name| Emoji { name: name.clone() }),
            ..Default::default()
        };

        Self {
            embeds: vec![Embed {
                title: Some(announcement.title.clone()),
                description: Some(announcement.description.clone()),
                ..Default::default()
            }],
            components: vec![Component::action_row(vec![button])],
        }
    }
}

/// Modal payload: one action row per text input.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<Component>,
}

impl From<&VerificationForm> for Modal {
    fn from(form: &VerificationForm) -> Self {
        Self {
            custom_id: form.custom_id.clone(),
            title: form.title.clone(),
            components: form
                .fields
                .iter()
                .map(|field| Component::action_row(vec![Component::text_input(field)]))
                .collect(),
        }
    }
}

/// Body of the "edit original response" call.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessage<'a> {
    pub content: &'a str,
}

/// Body of `PUT /guilds/{g}/bans/{u}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBan {
    pub delete_message_seconds: u32,
}
