//! The repair run: load, resolve each candidate, save if anything changed.

use std::path::Path;
use thiserror::Error;

use crate::chat::ChatClient;
use crate::error::ChatError;
use crate::logger::Logger;
use crate::store::{Candidate, RecordStore};

/// Counters from one repair run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Entries that were eligible for repair
    pub candidates: usize,
    /// Entries that got a URL
    pub fixed: usize,
    /// Entries that could not be resolved
    pub failed: usize,
    /// Whether the store file was rewritten
    pub saved: bool,
}

/// Why a single candidate could not be repaired.
#[derive(Debug, Error)]
enum EntryFailure {
    #[error("channel {channel_id} not found")]
    ChannelNotFound { channel_id: String },

    #[error("message {message_id} not found in channel {channel_id}")]
    MessageNotFound {
        channel_id: String,
        message_id: String,
    },

    #[error("message {message_id} has no attachment or embedded image")]
    NoImage { message_id: String },

    #[error("chat client error: {0}")]
    Client(#[from] ChatError),
}

/// Backfill missing `url` fields in the store at `store_path`.
///
/// Never fails: a missing store is a no-op, and every other problem ends in
/// a log line. The file is only rewritten when at least one entry was
/// repaired.
pub async fn repair_missing_urls<C, L>(
    store_path: impl AsRef<Path>,
    client: &C,
    logger: &L,
) -> RepairReport
where
    C: ChatClient + ?Sized,
    L: Logger + ?Sized,
{
    let store_path = store_path.as_ref();
    let mut report = RepairReport::default();

    let mut store = match RecordStore::load(store_path).await {
        Ok(Some(store)) => store,
        Ok(None) => return report,
        Err(e) => {
            logger.error("Failed to load record store", Some(&e.to_string()));
            return report;
        }
    };

    let candidates = store.candidates();
    if candidates.is_empty() {
        return report;
    }

    report.candidates = candidates.len();
    logger.info(
        &format!("Found {} entries missing a url", candidates.len()),
        None,
    );

    for candidate in &candidates {
        match resolve_image_url(client, candidate).await {
            Ok(url) => {
                store.set_url(&candidate.key, url);
                report.fixed += 1;
            }
            Err(failure) => {
                report.failed += 1;
                logger.warn(
                    &format!("Could not repair entry {}", candidate.key),
                    Some(&failure.to_string()),
                );
            }
        }
    }

    if report.fixed > 0 {
        match store.save(store_path).await {
            Ok(()) => {
                report.saved = true;
                logger.info(
                    &format!(
                        "Repaired {} of {} entries ({} failed)",
                        report.fixed, report.candidates, report.failed
                    ),
                    None,
                );
            }
            Err(e) => {
                logger.error("Failed to write repaired record store", Some(&e.to_string()));
            }
        }
    } else if report.failed > 0 {
        logger.warn(
            &format!("No entries repaired; {} failed", report.failed),
            None,
        );
    }

    report
}

async fn resolve_image_url<C>(client: &C, candidate: &Candidate) -> Result<String, EntryFailure>
where
    C: ChatClient + ?Sized,
{
    let channel = client
        .fetch_channel(&candidate.channel_id)
        .await?
        .ok_or_else(|| EntryFailure::ChannelNotFound {
            channel_id: candidate.channel_id.clone(),
        })?;

    let message = client
        .fetch_message(&channel, &candidate.message_id)
        .await?
        .ok_or_else(|| EntryFailure::MessageNotFound {
            channel_id: candidate.channel_id.clone(),
            message_id: candidate.message_id.clone(),
        })?;

    message
        .image_url()
        .map(str::to_string)
        .ok_or_else(|| EntryFailure::NoImage {
            message_id: candidate.message_id.clone(),
        })
}
