//! Environment resolution: maps process environment variables, with team
//! defaults for the unset case, into the member identity and [`HubConfig`]
//! used by the rest of the CLI.
//!
//! This is the only place defaults live. Values are taken as-is: member and
//! team strings are not validated or escaped here; URL escaping is the
//! transport's concern.

use std::env;

use daylog_core::config::HubConfig;
use tracing::info;

pub const DEFAULT_MEMBER_ID: &str = "金倩如";
pub const DEFAULT_TEAM_DIR: &str = "中国团队 china-team";
pub const DEFAULT_HUB_REPO: &str = "AIEC-Team/AIEC-agent-hub";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Member identity plus hub coordinates, resolved once per run.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub member_id: String,
    pub team_dir: String,
    pub hub: HubConfig,
}

/// Blank values fall back to the default, same as unset ones.
fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Resolve member identity and hub settings from the environment.
pub fn resolve_env() -> EnvConfig {
    let member_id = env_or("MEMBER_ID", DEFAULT_MEMBER_ID);
    let team_dir = env_or("TEAM_DIR", DEFAULT_TEAM_DIR);
    let hub = HubConfig {
        repo: env_or("HUB_REPO", DEFAULT_HUB_REPO),
        api_base: env_or("HUB_API_BASE", DEFAULT_API_BASE),
        branch: "main".to_string(),
    };

    info!(
        member_id = %member_id,
        team_dir = %team_dir,
        "Resolved member identity from environment"
    );
    hub.trace_loaded();

    EnvConfig {
        member_id,
        team_dir,
        hub,
    }
}
