//! Settings for the facades and the dispatcher.

use arclang_mcp_domain::RequestDefaults;
use std::path::PathBuf;
use std::time::Duration;

/// How and where the compiler binary is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Program name or path of the compiler
    pub binary: String,
    /// Wall-clock budget for one invocation
    pub timeout: Duration,
    /// Relative model paths are resolved against this directory.
    pub workspace_root: PathBuf,
    /// Directory (relative to the workspace) for default export outputs
    pub build_dir: PathBuf,
    /// `plm_sync` is refused unless set
    pub plm_enabled: bool,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            binary: "arclang".to_string(),
            timeout: Duration::from_secs(30),
            workspace_root: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            plm_enabled: false,
        }
    }
}

impl CompilerSettings {
    // ==================== Builder Methods ====================

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    pub fn with_plm_enabled(mut self, enabled: bool) -> Self {
        self.plm_enabled = enabled;
        self
    }
}

/// Model parameters for backend generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.3,
            max_tokens: 2048,
        }
    }
}

/// Everything the use cases read from configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerSettings {
    pub compiler: CompilerSettings,
    pub generation: GenerationSettings,
    pub defaults: RequestDefaults,
}
