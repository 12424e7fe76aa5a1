//! Compiler configuration from TOML (`[compiler]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompilerConfig {
    /// Program name or path of the `arclang` binary (default: "arclang")
    pub path: String,
    /// Wall-clock budget per invocation in seconds (default: 30)
    pub timeout: u64,
}

impl Default for FileCompilerConfig {
    fn default() -> Self {
        Self {
            path: "arclang".to_string(),
            timeout: 30,
        }
    }
}
