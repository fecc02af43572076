//! Chat platform abstraction.
//!
//! The repair run only ever reads from the platform: it looks up a channel,
//! then a message within it, and pulls an image URL off the message.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatResult;

/// A channel resolved on the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
}

impl Channel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default)]
    pub image: Option<EmbedImage>,
}

/// A message with the parts the repair run cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub embeds: Vec<Embed>,
}

impl Message {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attachments: Vec::new(),
            embeds: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachments.push(Attachment { url: url.into() });
        self
    }

    pub fn with_embed_image(mut self, url: impl Into<String>) -> Self {
        self.embeds.push(Embed {
            image: Some(EmbedImage { url: url.into() }),
        });
        self
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// First attachment URL, falling back to the first embed's image.
    pub fn image_url(&self) -> Option<&str> {
        if let Some(attachment) = self.attachments.first() {
            return Some(attachment.url.as_str());
        }

        self.embeds
            .first()
            .and_then(|embed| embed.image.as_ref())
            .map(|image| image.url.as_str())
    }
}

/// Read access to a chat platform.
///
/// `Ok(None)` means the platform answered but the object does not exist;
/// `Err` is reserved for transport and protocol failures.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn fetch_channel(&self, channel_id: &str) -> ChatResult<Option<Channel>>;

    async fn fetch_message(&self, channel: &Channel, message_id: &str)
        -> ChatResult<Option<Message>>;
}
