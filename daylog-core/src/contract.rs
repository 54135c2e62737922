//! # contract: interface between the publish pipeline and a content store
//!
//! This module defines a single trait (`ContentStore`) and the concrete
//! supporting types for probing and writing one file in a remote
//! version-controlled repository via a content API, a local stand-in, or a
//! mock/test implementation.
//!
//! ## Interface & Extensibility
//! - Implement the [`ContentStore`] trait to create new store clients (API,
//!   file-based, mock).
//! - All methods are async, returning results and using boxed error types.
//! - Meant for both production code and deterministic mocking in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate mocks for
//!   unit/integration tests (exported behind the `test-export-mocks` feature).

use async_trait::async_trait;

use mockall::automock;

use chrono::NaiveDate;

/// A member's daily log, assembled once per run from environment and
/// filesystem state. Immutable thereafter.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Member identifier; used only to compose the remote path, not validated.
    pub member_id: String,
    /// Team directory label; used only to compose the remote path.
    pub team_dir: String,
    /// The day this log is published under.
    pub date: NaiveDate,
    /// Raw log text, read as UTF-8.
    pub content: String,
}

/// Outcome of probing the remote path for an existing file.
///
/// A failed probe is never collapsed into `Absent`: transport and auth
/// failures surface as errors, so the caller cannot turn an update into a
/// blind create attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFileStatus {
    /// The file exists; `sha` must accompany the update so the API can reject
    /// a conflicting overwrite.
    Found { sha: String },
    /// The API reported the path as not found.
    Absent,
}

/// Minimal data needed to create or update the remote log file.
pub struct PublishRequest<'a> {
    /// Repository-relative path of the file.
    pub path: &'a str,
    /// Commit message recorded by the content API.
    pub message: &'a str,
    /// Raw file bytes; the transport encodes them as the API requires.
    pub content: &'a [u8],
    /// Version token of the existing file. Must be `Some` when the file
    /// already exists remotely.
    pub version: Option<&'a str>,
}

/// Details of the created/updated file as reported by the content API.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublishedLog {
    /// Version token of the file content after the write.
    pub content_sha: String,
    /// The commit the write produced.
    pub commit_sha: String,
    /// Browser URL of that commit, when the API reports one.
    pub commit_url: Option<String>,
}

/// Error type for ContentStore implementations (boxed transport errors).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for probing and writing a single file in a remote repository.
/// The implementor is responsible for connecting to a backing content API.
///
/// The trait is `Send` + `Sync` and intended for async/await usage. It is
/// implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Probe `path` for an existing file and return its version token.
    ///
    /// `Absent` means the API positively reported the path as missing; any
    /// other failure must be returned as an error.
    async fn fetch_version(&self, path: &str) -> Result<RemoteFileStatus, StoreError>;

    /// Create or update the file at `req.path`.
    ///
    /// Implementor is responsible for content encoding and required API
    /// fields; errors carry the API status in their message.
    async fn publish<'a>(&self, req: PublishRequest<'a>) -> Result<PublishedLog, StoreError>;
}
