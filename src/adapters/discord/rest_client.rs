//! Discord REST adapter.
//!
//! Implements every chat-platform port over the Discord HTTP API:
//!
//! | Port | Endpoint |
//! |------|----------|
//! | `GuildDirectory::guild` | `GET /guilds/{g}` |
//! | `GuildDirectory::channel` | `GET /channels/{c}` |
//! | `GuildDirectory::role` | `GET /guilds/{g}/roles` |
//! | `GuildDirectory::member` | `GET /guilds/{g}/members/{u}` |
//! | `MemberModeration::grant_role` | `PUT /guilds/{g}/members/{u}/roles/{r}` |
//! | `MemberModeration::ban` | `PUT /guilds/{g}/bans/{u}` |
//! | `MemberModeration::kick` | `DELETE /guilds/{g}/members/{u}` |
//! | `ChannelMessenger::recent_messages` | `GET /channels/{c}/messages` |
//! | `ChannelMessenger::post_announcement` | `POST /channels/{c}/messages` |
//! | `InteractionResponder::finalize` | `PATCH /webhooks/{app}/{token}/messages/@original` |
//!
//! A 404 from a lookup is reported as `Ok(None)`.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::DiscordConfig;
use crate::domain::foundation::{ApplicantId, ChannelId, GuildId, MessageId, RoleId};
use crate::domain::verification::{
    Announcement, Channel, ChannelMessage, Guild, GuildMember, ReplyHandle, Role,
};
use crate::ports::{
    ChannelMessenger, GuildDirectory, InteractionResponder, MemberModeration, PlatformError,
};

use super::payloads::{
    ChannelDto, CreateBan, CreateMessage, EditMessage, GuildDto, MemberDto, MessageDto, RoleDto,
};

const AUDIT_LOG_REASON: &str = "X-Audit-Log-Reason";

/// Discord limits audit-log reasons to 512 characters.
const MAX_REASON_CHARS: usize = 512;

const USER_AGENT: &str = concat!(
    "DiscordBot (age-gate, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Discord REST client.
pub struct DiscordRestClient {
    http_client: reqwest::Client,
    api_base_url: String,
    bot_token: SecretString,
    application_id: String,
}

impl DiscordRestClient {
    /// Create a new client from the platform configuration.
    pub fn new(config: &DiscordConfig) -> Result<Self, PlatformError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PlatformError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            application_id: config.application_id.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("Bot {}", self.bot_token.expose_secret()),
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PlatformError> {
        request
            .send()
            .await
            .map_err(|e| PlatformError::network(e.to_string()))
    }

    /// GET that maps 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, PlatformError> {
        let response = self
            .send(self.authorized(self.http_client.get(self.url(path))))
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(path, "Discord resource not found");
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        let body = response
            .json::<T>()
            .await
            .map_err(|e| PlatformError::decode(e.to_string()))?;
        Ok(Some(body))
    }

    async fn moderate(&self, request: RequestBuilder, reason: &str) -> Result<(), PlatformError> {
        let request = self
            .authorized(request)
            .header(AUDIT_LOG_REASON, encode_audit_reason(reason));
        let response = self.send(request).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), body = %body, "Discord API error");
    Err(PlatformError::api(status.as_u16(), body))
}

/// Percent-encodes an audit-log reason so non-ASCII input survives the
/// header, after truncating it to the platform limit.
pub fn encode_audit_reason(reason: &str) -> String {
    let truncated: String = reason.chars().take(MAX_REASON_CHARS).collect();
    let mut encoded = String::with_capacity(truncated.len());
    for byte in truncated.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[async_trait]
impl GuildDirectory for DiscordRestClient {
    async fn guild(&self, id: &GuildId) -> Result<Option<Guild>, PlatformError> {
        let dto: Option<GuildDto> = self.get_optional(&format!("/guilds/{}", id)).await?;
        dto.map(GuildDto::into_domain)
            .transpose()
            .map_err(|e| PlatformError::decode(e.to_string()))
    }

    async fn channel(
        &self,
        guild: &GuildId,
        id: &ChannelId,
    ) -> Result<Option<Channel>, PlatformError> {
        let dto: Option<ChannelDto> = self.get_optional(&format!("/channels/{}", id)).await?;
        let channel = dto
            .map(ChannelDto::into_domain)
            .transpose()
            .map_err(|e| PlatformError::decode(e.to_string()))?;

        Ok(channel.filter(|c| c.guild_id.as_ref() == Some(guild)))
    }

    async fn role(&self, guild: &GuildId, id: &RoleId) -> Result<Option<Role>, PlatformError> {
        let roles: Option<Vec<RoleDto>> =
            self.get_optional(&format!("/guilds/{}/roles", guild)).await?;

        roles
            .unwrap_or_default()
            .into_iter()
            .find(|r| r.id == id.as_str())
            .map(RoleDto::into_domain)
            .transpose()
            .map_err(|e| PlatformError::decode(e.to_string()))
    }

    async fn member(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
    ) -> Result<Option<GuildMember>, PlatformError> {
        let dto: Option<MemberDto> = self
            .get_optional(&format!("/guilds/{}/members/{}", guild, applicant))
            .await?;

        dto.map(|m| m.to_domain(applicant))
            .transpose()
            .map_err(|e| PlatformError::decode(e.to_string()))
    }
}

#[async_trait]
impl MemberModeration for DiscordRestClient {
    async fn grant_role(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        role: &RoleId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let url = self.url(&format!(
            "/guilds/{}/members/{}/roles/{}",
            guild, applicant, role
        ));
        self.moderate(self.http_client.put(url), reason).await
    }

    async fn ban(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let url = self.url(&format!("/guilds/{}/bans/{}", guild, applicant));
        let request = self.http_client.put(url).json(&CreateBan {
            delete_message_seconds: 0,
        });
        self.moderate(request, reason).await
    }

    async fn kick(
        &self,
        guild: &GuildId,
        applicant: &ApplicantId,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let url = self.url(&format!("/guilds/{}/members/{}", guild, applicant));
        self.moderate(self.http_client.delete(url), reason).await
    }
}

#[async_trait]
impl ChannelMessenger for DiscordRestClient {
    async fn recent_messages(
        &self,
        channel: &ChannelId,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, PlatformError> {
        let url = self.url(&format!("/channels/{}/messages", channel));
        let request = self
            .authorized(self.http_client.get(url))
            .query(&[("limit", limit.clamp(1, 100))]);
        let response = ensure_success(self.send(request).await?).await?;

        let messages: Vec<MessageDto> = response
            .json()
            .await
            .map_err(|e| PlatformError::decode(e.to_string()))?;

        messages
            .into_iter()
            .map(MessageDto::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PlatformError::decode(e.to_string()))
    }

    async fn post_announcement(
        &self,
        channel: &ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, PlatformError> {
        let url = self.url(&format!("/channels/{}/messages", channel));
        let request = self
            .authorized(self.http_client.post(url))
            .json(&CreateMessage::from(announcement));
        let response = ensure_success(self.send(request).await?).await?;

        let message: MessageDto = response
            .json()
            .await
            .map_err(|e| PlatformError::decode(e.to_string()))?;

        MessageId::new(message.id).map_err(|e| PlatformError::decode(e.to_string()))
    }
}

#[async_trait]
impl InteractionResponder for DiscordRestClient {
    async fn finalize(&self, reply: &ReplyHandle, content: &str) -> Result<(), PlatformError> {
        // Interaction webhooks authenticate with the token in the path.
        let url = self.url(&format!(
            "/webhooks/{}/{}/messages/@original",
            self.application_id,
            reply.as_str()
        ));
        let request = self.http_client.patch(url).json(&EditMessage { content });
        ensure_success(self.send(request).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_keeps_unreserved_characters() {
        assert_eq!(encode_audit_reason("Age-verification_ok.~"), "Age-verification_ok.~");
    }

    #[test]
    fn reason_encodes_spaces_and_punctuation() {
        assert_eq!(
            encode_audit_reason("failed: 01/01/2010 (14 years old)"),
            "failed%3A%2001%2F01%2F2010%20%2814%20years%20old%29"
        );
    }

    #[test]
    fn reason_encodes_multibyte_characters() {
        assert_eq!(encode_audit_reason("é"), "%C3%A9");
    }

    #[test]
    fn reason_is_truncated_to_platform_limit() {
        let long = "a".repeat(600);
        assert_eq!(encode_audit_reason(&long).len(), MAX_REASON_CHARS);
    }

    #[test]
    fn client_trims_trailing_slash_from_base_url() {
        let config = DiscordConfig {
            api_base_url: "http://localhost:9999/api/".to_string(),
            application_id: "11".to_string(),
            ..Default::default()
        };
        let client = DiscordRestClient::new(&config).unwrap();
        assert_eq!(client.url("/guilds/1"), "http://localhost:9999/api/guilds/1");
    }
}
