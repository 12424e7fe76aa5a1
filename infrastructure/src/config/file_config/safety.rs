//! Safety configuration from TOML (`[safety]` section)

use arclang_mcp_domain::SafetyStandard;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSafetyConfig {
    /// Standard used when a call does not name one (default: "iso26262")
    pub default_standard: String,
    /// Default for `arclang_validate`'s `strict` argument
    pub strict_validation: bool,
}

impl Default for FileSafetyConfig {
    fn default() -> Self {
        Self {
            default_standard: SafetyStandard::default().to_string(),
            strict_validation: true,
        }
    }
}

impl FileSafetyConfig {
    /// Parsed default standard; unknown names fall back to ISO 26262.
    pub fn standard(&self) -> SafetyStandard {
        self.default_standard
            .trim()
            .to_lowercase()
            .parse()
            .unwrap_or_default()
    }
}
