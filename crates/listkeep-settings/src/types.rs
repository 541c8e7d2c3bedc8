//! Settings types with compiled defaults.

use serde::{Deserialize, Serialize};

/// Client settings.
///
/// Every field has a compiled default, so a partial (or absent) settings
/// file is always valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the remote API.
    pub api_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            timeout_ms: 30_000,
        }
    }
}
