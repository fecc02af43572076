//! Discord REST implementation of [`ChatClient`].

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::chat::{Channel, ChatClient, Message};
use crate::error::{ChatError, ChatResult};

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Minimal Discord API client authenticated as a bot.
pub struct DiscordClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl DiscordClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: DISCORD_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Build `{base_url}/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> ChatResult<Url> {
        let invalid_base = || ChatError::Other(format!("invalid API base {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a resource, mapping 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> ChatResult<Option<T>> {
        let resp = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .send()
            .await
            .map_err(ChatError::Http)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%url, "Discord resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(%url, error = %e, "Failed to read Discord error body");
                    String::new()
                }
            };
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await.map_err(ChatError::Http)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(ChatError::Decode)
    }
}

/// Discord ids are snowflakes: non-empty runs of ASCII digits.
fn snowflake(id: &str) -> ChatResult<&str> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id)
    } else {
        Err(ChatError::InvalidId { id: id.to_string() })
    }
}

#[async_trait]
impl ChatClient for DiscordClient {
    async fn fetch_channel(&self, channel_id: &str) -> ChatResult<Option<Channel>> {
        let url = self.endpoint(&["channels", snowflake(channel_id)?])?;
        self.get_optional(url).await
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: &str,
    ) -> ChatResult<Option<Message>> {
        let url = self.endpoint(&[
            "channels",
            snowflake(&channel.id)?,
            "messages",
            snowflake(message_id)?,
        ])?;
        self.get_optional(url).await
    }
}
