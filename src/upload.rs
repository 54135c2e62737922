//! Hub client: bridges the core [`ContentStore`] abstraction to the real
//! contents API of the team hub repository.
//!
//! - Construct [`HubClient`] from the environment (`GITHUB_PAT_TEAM_HUB`);
//!   construction fails before any network call when the credential is
//!   absent or blank.
//! - The two trait methods map to the API's conditional GET (version token)
//!   and create-or-update PUT on `/repos/{repo}/contents/{path}`.
//! - All transport, serialization, and error handling are encapsulated here.
//!
//! For the trait contract and request/response types, see core's `contract`
//! module.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use daylog_core::config::HubConfig;
use daylog_core::contract::{
    ContentStore, PublishRequest, PublishedLog, RemoteFileStatus, StoreError,
};

/// Environment variable holding the hub personal access token.
pub const CREDENTIAL_VAR: &str = "GITHUB_PAT_TEAM_HUB";

/// The API imposes no timeout of its own; an unbounded hang is worse.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HubClient {
    client: reqwest::Client,
    config: HubConfig,
    token: String,
}

/// Contents-API read response; only the version token is of interest.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutPayload<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
    commit: PutCommit,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutCommit {
    sha: String,
    html_url: Option<String>,
}

impl HubClient {
    /// Build a client for the given hub from the environment. Fails when
    /// `GITHUB_PAT_TEAM_HUB` is absent or blank, before any network call.
    pub fn new_from_env(config: HubConfig) -> Result<Self, StoreError> {
        dotenvy::dotenv().ok(); // loads environment variables from .env if present
        let token = match env::var(CREDENTIAL_VAR) {
            Ok(t) if !t.trim().is_empty() => t.trim().to_string(),
            Ok(_) => {
                tracing::error!(var = CREDENTIAL_VAR, "Credential variable is blank");
                return Err(
                    format!("{CREDENTIAL_VAR} is blank; a hub personal access token is required")
                        .into(),
                );
            }
            Err(e) => {
                tracing::error!(error = ?e, var = CREDENTIAL_VAR, "Credential variable missing in environment");
                return Err(format!(
                    "{CREDENTIAL_VAR} missing in environment; a hub personal access token is required"
                )
                .into());
            }
        };

        // The API rejects requests without a User-Agent.
        let client = reqwest::Client::builder()
            .user_agent("daylog")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        tracing::info!(
            repo = %config.repo,
            api_base = %config.api_base,
            "Initialized HubClient from environment"
        );
        Ok(HubClient {
            client,
            config,
            token,
        })
    }

    /// Base64 (standard alphabet) encoding used for the PUT `content` field.
    pub fn encode_content(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.repo,
            path
        )
    }

    fn auth_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("token {}", self.token))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

#[async_trait]
impl ContentStore for HubClient {
    async fn fetch_version(&self, path: &str) -> Result<RemoteFileStatus, StoreError> {
        let url = self.contents_url(path);
        tracing::info!(url = %url, "Probing hub for an existing log file");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::info!(path = %path, "No existing file at remote path");
            return Ok(RemoteFileStatus::Absent);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            tracing::error!(status = %status, path = %path, "Hub probe returned an error");
            return Err(format!("probe of {path} failed: HTTP {status}: {body}").into());
        }

        let parsed: ContentsResponse = response.json().await?;
        tracing::info!(path = %path, sha = %parsed.sha, "Found existing file");
        Ok(RemoteFileStatus::Found { sha: parsed.sha })
    }

    async fn publish<'a>(&self, req: PublishRequest<'a>) -> Result<PublishedLog, StoreError> {
        let url = self.contents_url(req.path);
        tracing::info!(
            url = %url,
            update = req.version.is_some(),
            "Uploading log file to hub"
        );

        let payload = PutPayload {
            message: req.message,
            content: Self::encode_content(req.content),
            branch: &self.config.branch,
            sha: req.version,
        };
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();

        if status != StatusCode::OK && status != StatusCode::CREATED {
            // Best-effort decode for the operator; the API usually returns a
            // JSON body with a "message" field here.
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .map(|v| v.to_string())
                .unwrap_or(body);
            tracing::error!(status = %status, path = %req.path, "Hub upload failed");
            return Err(format!("upload of {} failed: HTTP {status}: {detail}", req.path).into());
        }

        let parsed: PutResponse = response.json().await?;
        tracing::info!(
            path = %req.path,
            status = %status,
            commit_sha = %parsed.commit.sha,
            "Hub upload succeeded"
        );
        Ok(PublishedLog {
            content_sha: parsed.content.sha,
            commit_sha: parsed.commit.sha,
            commit_url: parsed.commit.html_url,
        })
    }
}
