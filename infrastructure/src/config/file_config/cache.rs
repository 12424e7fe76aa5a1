//! Cache configuration from TOML (`[cache]` section)
//!
//! Accepted so existing configuration files keep loading. No result cache is
//! wired in, so enabling it only produces a validation warning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub enabled: bool,
    /// Entry lifetime in seconds
    pub ttl: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: 3600,
        }
    }
}
