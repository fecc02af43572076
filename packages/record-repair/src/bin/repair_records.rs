use anyhow::{Context, Result};
use record_repair::{repair_missing_urls, DiscordClient, RepairConfig, TracingLogger};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,record_repair=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RepairConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(store_path = %config.store_path.display(), "Configuration loaded");

    let client = DiscordClient::new(config.discord_bot_token.clone())
        .with_base_url(config.discord_api_base.clone());

    let report = repair_missing_urls(&config.store_path, &client, &TracingLogger).await;

    tracing::debug!(
        candidates = report.candidates,
        fixed = report.fixed,
        failed = report.failed,
        saved = report.saved,
        "Repair run finished"
    );

    Ok(())
}
