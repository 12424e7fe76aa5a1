//! Workspace configuration from TOML (`[workspace]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// Workspace root; relative values are resolved against the directory
    /// the server was started for. Unset means that directory itself.
    pub root: Option<PathBuf>,
    /// Default export directory, relative to the root
    pub build_dir: PathBuf,
}

impl Default for FileWorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            build_dir: PathBuf::from("build"),
        }
    }
}
