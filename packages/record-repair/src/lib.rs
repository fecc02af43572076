//! Record store repair.
//!
//! Backfills the `url` field of record store entries that were captured
//! with only a chat message reference. Each incomplete entry is resolved
//! through a [`ChatClient`], the first attachment (or embedded image) URL
//! is written back, and the store file is rewritten once if anything was
//! repaired.
//!
//! # Example
//!
//! ```rust,ignore
//! use record_repair::{repair_missing_urls, DiscordClient, TracingLogger, DEFAULT_STORE_PATH};
//!
//! let client = DiscordClient::new(token);
//! let report = repair_missing_urls(DEFAULT_STORE_PATH, &client, &TracingLogger).await;
//! println!("fixed {} of {}", report.fixed, report.candidates);
//! ```
//!
//! # Modules
//!
//! - [`store`] - JSON record store load/save and candidate selection
//! - [`chat`] - Chat platform trait and message model
//! - [`discord`] - Discord REST implementation of [`ChatClient`]
//! - [`logger`] - Logger collaborator and its tracing implementation
//! - [`repair`] - The repair run itself
//! - [`testing`] - Mock implementations for testing

pub mod chat;
pub mod config;
pub mod discord;
pub mod error;
pub mod logger;
pub mod repair;
pub mod store;
pub mod testing;

pub use chat::{Attachment, Channel, ChatClient, Embed, EmbedImage, Message};
pub use config::RepairConfig;
pub use discord::DiscordClient;
pub use error::{ChatError, ChatResult, StoreError, StoreResult};
pub use logger::{Logger, TracingLogger};
pub use repair::{repair_missing_urls, RepairReport};
pub use store::{Candidate, RecordStore, DEFAULT_STORE_PATH};
