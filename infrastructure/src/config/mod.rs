//! Configuration file loading for arclang-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ARCLANG_BINARY`, `ANTHROPIC_API_KEY`, `ARCLANG_WORKSPACE`
//! 2. `ARCLANG_MCP_<SECTION>__<KEY>` environment variables
//! 3. `--config <path>` specified file
//! 4. Workspace: `<workspace>/.arclang-mcp.toml`
//! 5. Global: `~/.config/arclang-mcp/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAiConfig, FileCacheConfig, FileCompilerConfig, FileConfig, FilePlmConfig,
    FileSafetyConfig, FileWorkspaceConfig,
};
pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX, WORKSPACE_CONFIG_FILE};
