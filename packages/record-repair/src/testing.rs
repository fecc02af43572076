//! Testing utilities including mock implementations.
//!
//! Useful for exercising the repair run without a live chat platform.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

type MessageHook = Arc<dyn Fn(&Channel, &str) + Send + Sync>;

use crate::chat::{Channel, ChatClient, Message};
use crate::error::{ChatError, ChatResult};
use crate::logger::Logger;

/// A mock chat client with canned channels and messages.
///
/// # Example
///
/// ```rust
/// use record_repair::testing::MockChatClient;
/// use record_repair::{Channel, Message};
///
/// let client = MockChatClient::new()
///     .with_channel(Channel::new("42"))
///     .with_message("42", Message::new("7").with_attachment("https://cdn.example/a.png"));
/// ```
#[derive(Default)]
pub struct MockChatClient {
    channels: Arc<RwLock<HashMap<String, Channel>>>,
    /// Messages keyed by (channel id, message id)
    messages: Arc<RwLock<HashMap<(String, String), Message>>>,
    failing_channels: Arc<RwLock<HashSet<String>>>,
    failing_messages: Arc<RwLock<HashSet<String>>>,
    channel_calls: Arc<RwLock<Vec<String>>>,
    message_calls: Arc<RwLock<Vec<(String, String)>>>,
    on_fetch_message: Option<MessageHook>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        self.channels
            .write()
            .unwrap()
            .insert(channel.id.clone(), channel);
        self
    }

    /// Add a message to a channel. The channel itself must be added
    /// separately with [`with_channel`](Self::with_channel).
    pub fn with_message(self, channel_id: &str, message: Message) -> Self {
        self.messages
            .write()
            .unwrap()
            .insert((channel_id.to_string(), message.id.clone()), message);
        self
    }

    /// Make `fetch_channel` return an error for this channel id.
    pub fn failing_channel(self, channel_id: &str) -> Self {
        self.failing_channels
            .write()
            .unwrap()
            .insert(channel_id.to_string());
        self
    }

    /// Make `fetch_message` return an error for this message id.
    pub fn failing_message(self, message_id: &str) -> Self {
        self.failing_messages
            .write()
            .unwrap()
            .insert(message_id.to_string());
        self
    }

    /// Run `hook` at the start of every `fetch_message` call, e.g. to change
    /// the filesystem while a repair run is in flight.
    pub fn on_fetch_message(
        mut self,
        hook: impl Fn(&Channel, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_fetch_message = Some(Arc::new(hook));
        self
    }

    pub fn channel_calls(&self) -> Vec<String> {
        self.channel_calls.read().unwrap().clone()
    }

    pub fn message_calls(&self) -> Vec<(String, String)> {
        self.message_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn fetch_channel(&self, channel_id: &str) -> ChatResult<Option<Channel>> {
        self.channel_calls
            .write()
            .unwrap()
            .push(channel_id.to_string());

        if self.failing_channels.read().unwrap().contains(channel_id) {
            return Err(ChatError::Other(format!(
                "mock failure fetching channel {}",
                channel_id
            )));
        }

        Ok(self.channels.read().unwrap().get(channel_id).cloned())
    }

    async fn fetch_message(
        &self,
        channel: &Channel,
        message_id: &str,
    ) -> ChatResult<Option<Message>> {
        self.message_calls
            .write()
            .unwrap()
            .push((channel.id.clone(), message_id.to_string()));

        if let Some(hook) = &self.on_fetch_message {
            hook(channel, message_id);
        }

        if self.failing_messages.read().unwrap().contains(message_id) {
            return Err(ChatError::Other(format!(
                "mock failure fetching message {}",
                message_id
            )));
        }

        Ok(self
            .messages
            .read()
            .unwrap()
            .get(&(channel.id.clone(), message_id.to_string()))
            .cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub detail: Option<String>,
}

/// Logger that keeps every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: RwLock<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().unwrap().clone()
    }

    pub fn at_level(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    fn push(&self, level: LogLevel, message: &str, detail: Option<&str>) {
        self.records.write().unwrap().push(LogRecord {
            level,
            message: message.to_string(),
            detail: detail.map(str::to_string),
        });
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str, detail: Option<&str>) {
        self.push(LogLevel::Info, message, detail);
    }

    fn warn(&self, message: &str, detail: Option<&str>) {
        self.push(LogLevel::Warn, message, detail);
    }

    fn error(&self, message: &str, detail: Option<&str>) {
        self.push(LogLevel::Error, message, detail);
    }
}
