//! High-level pipeline: probe → create-or-update for a single daily log.
//!
//! This module provides the top-level orchestration for publishing one
//! member's log file to the hub repository:
//!   - Derives the repository-relative path from the log record
//!   - Probes the remote path for an existing file (version token)
//!   - Writes the file through [`contract::ContentStore`], supplying the token
//!     when the file already exists
//!   - Returns a [`PublishReport`] for downstream reporting/audit.
//!
//! # Error Handling
//! Each failed step (probe, upload) returns immediately with a formatted
//! error; callers log and surface these to users/test logs. A failed probe is
//! fatal: the pipeline never falls back to an unconditional create.
//!
//! # Callable From
//! Used by the CLI crate and by integration tests with a mocked store.

use tracing::{debug, error, info};

use chrono::NaiveDate;

use crate::config::HubConfig;
use crate::contract::{ContentStore, LogRecord, PublishRequest, PublishedLog, RemoteFileStatus};

/// Result of a completed publish run.
#[derive(Debug)]
pub struct PublishReport {
    /// Repository-relative path the log was written to.
    pub remote_path: String,
    /// True when the file did not exist remotely before this run.
    pub created: bool,
    /// Details reported by the content API for the write.
    pub log: PublishedLog,
}

/// Repository-relative path for a member's log on a given date.
pub fn remote_log_path(team_dir: &str, member_id: &str, date: NaiveDate) -> String {
    format!(
        "成员日志 members/{}/{}/{}_log.md",
        team_dir,
        member_id,
        date.format("%Y-%m-%d")
    )
}

/// Commit message recorded in the hub repository for a day's log.
pub fn commit_message(member_id: &str, date: NaiveDate) -> String {
    format!("📝 [{}] Sync log for {}", member_id, date.format("%Y-%m-%d"))
}

pub async fn publish_log<S>(
    config: &HubConfig,
    store: &S,
    record: &LogRecord,
) -> Result<PublishReport, String>
where
    S: ContentStore + Sync,
{
    info!(
        member_id = %record.member_id,
        team_dir = %record.team_dir,
        date = %record.date,
        repo = %config.repo,
        "[PUBLISH] Starting log publish pipeline"
    );

    let path = remote_log_path(&record.team_dir, &record.member_id, record.date);
    debug!(path = %path, "[PUBLISH] Resolved remote path");

    // --- Step 1: probe for an existing file (version token) ---
    let status = match store.fetch_version(&path).await {
        Ok(status) => {
            info!(path = %path, status = ?status, "[PUBLISH] Remote probe succeeded");
            status
        }
        Err(e) => {
            error!(path = %path, error = ?e, "[PUBLISH][ERROR] Remote probe failed");
            return Err(format!("Failed to probe remote file {path}: {e}"));
        }
    };

    let version = match &status {
        RemoteFileStatus::Found { sha } => Some(sha.as_str()),
        RemoteFileStatus::Absent => None,
    };

    // --- Step 2: create or update ---
    let message = commit_message(&record.member_id, record.date);
    let request = PublishRequest {
        path: &path,
        message: &message,
        content: record.content.as_bytes(),
        version,
    };
    let published = match store.publish(request).await {
        Ok(published) => {
            info!(
                path = %path,
                commit_sha = %published.commit_sha,
                "[PUBLISH] Upload succeeded"
            );
            match serde_json::to_string_pretty(&published) {
                Ok(json) => {
                    debug!(json = %json, "[PUBLISH][DEBUG] Published log as JSON")
                }
                Err(e) => {
                    error!(error = ?e, "[PUBLISH][DEBUG] Failed to serialize published log")
                }
            }
            published
        }
        Err(e) => {
            error!(path = %path, error = ?e, "[PUBLISH][ERROR] Upload failed");
            return Err(format!("Failed to publish {path}: {e}"));
        }
    };

    Ok(PublishReport {
        remote_path: path,
        created: matches!(status, RemoteFileStatus::Absent),
        log: published,
    })
}
