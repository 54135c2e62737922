use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where logs are published: repository slug, content-API base URL and the
/// branch commits land on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub repo: String,
    pub api_base: String,
    pub branch: String,
}

impl HubConfig {
    pub fn trace_loaded(&self) {
        info!(
            repo = %self.repo,
            api_base = %self.api_base,
            branch = %self.branch,
            "Loaded HubConfig"
        );
        debug!(?self, "HubConfig loaded (full debug)");
    }
}
