use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::discord::DISCORD_API_BASE;
use crate::store::DEFAULT_STORE_PATH;

/// Repair configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RepairConfig {
    pub discord_bot_token: String,
    pub store_path: PathBuf,
    pub discord_api_base: String,
}

impl RepairConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            discord_bot_token: lookup("DISCORD_BOT_TOKEN")
                .filter(|token| !token.is_empty())
                .context("DISCORD_BOT_TOKEN must be set")?,
            store_path: lookup("RECORD_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            discord_api_base: lookup("DISCORD_API_BASE")
                .unwrap_or_else(|| DISCORD_API_BASE.to_string()),
        })
    }
}
