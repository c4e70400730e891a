use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_DISK_USAGE_TTL_SECS: u64 = 300;

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    pub base_url: String,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// How long aggregate disk usage may be served from cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_usage_ttl_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            version: 1,
            base_url: base_url.into(),
            api_prefix: default_api_prefix(),
            token: None,
            disk_usage_ttl_secs: None,
            timeout_secs: None,
        }
    }

    pub fn disk_usage_ttl(&self) -> Duration {
        Duration::from_secs(
            self.disk_usage_ttl_secs
                .unwrap_or(DEFAULT_DISK_USAGE_TTL_SECS),
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Base URL joined with the API prefix, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return base.to_string();
        }
        if prefix.starts_with('/') {
            format!("{}{}", base, prefix)
        } else {
            format!("{}/{}", base, prefix)
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocalState {
    pub version: u32,

    /// Case guids already listed once; anything else is flagged as new.
    #[serde(default)]
    pub seen_cases: BTreeSet<String>,
}
