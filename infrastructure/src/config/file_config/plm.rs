//! PLM integration configuration from TOML (`[plm]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlmConfig {
    /// Allow `arclang_plm_sync` (default: false)
    pub enabled: bool,
}
