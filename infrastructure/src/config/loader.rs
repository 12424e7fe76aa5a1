//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Workspace-level config file name
pub const WORKSPACE_CONFIG_FILE: &str = ".arclang-mcp.toml";

/// Prefix for `ARCLANG_MCP_<SECTION>__<KEY>` overrides
pub const ENV_PREFIX: &str = "ARCLANG_MCP_";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Well-known environment variables (`ARCLANG_BINARY`, `ANTHROPIC_API_KEY`,
    ///    `ARCLANG_WORKSPACE`)
    /// 2. `ARCLANG_MCP_<SECTION>__<KEY>` environment variables
    /// 3. Explicit config path (if provided)
    /// 4. Workspace: `<workspace>/.arclang-mcp.toml`
    /// 5. Global: `~/.config/arclang-mcp/config.toml`
    /// 6. Default values
    pub fn load(workspace: &Path, config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let global = Self::global_config_path();
        let figment = Self::file_figment(global.as_deref(), workspace, config_path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;
        Self::apply_env_overrides(&mut config, env_var);
        Ok(config)
    }

    /// Defaults plus environment, no files (for `--no-config`)
    pub fn load_without_files() -> Result<FileConfig, ConfigError> {
        let mut config: FileConfig = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;
        Self::apply_env_overrides(&mut config, env_var);
        Ok(config)
    }

    /// Defaults merged with the config files, without any environment.
    pub fn file_figment(
        global: Option<&Path>,
        workspace: &Path,
        config_path: Option<&Path>,
    ) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let workspace_file = workspace.join(WORKSPACE_CONFIG_FILE);
        if workspace_file.exists() {
            figment = figment.merge(Toml::file(&workspace_file));
        }

        // Explicit config path (highest priority for files)
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// Apply the well-known environment variables on top of a loaded config.
    pub fn apply_env_overrides(config: &mut FileConfig, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(binary) = non_empty("ARCLANG_BINARY") {
            config.compiler.path = binary;
        }
        if let Some(key) = non_empty("ANTHROPIC_API_KEY") {
            config.ai.api_key = Some(key);
        }
        if let Some(root) = non_empty("ARCLANG_WORKSPACE") {
            config.workspace.root = Some(PathBuf::from(root));
        }
    }

    /// Directory the server works for: the CLI value, else
    /// `ARCLANG_WORKSPACE`, else the current directory.
    pub fn resolve_workspace(cli: Option<&Path>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        if let Some(root) = env_var("ARCLANG_WORKSPACE").filter(|v| !v.trim().is_empty()) {
            return PathBuf::from(root);
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/arclang-mcp/config.toml` when set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("arclang-mcp").join("config.toml"))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(workspace: &Path, config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] ARCLANG_BINARY, ANTHROPIC_API_KEY, ARCLANG_WORKSPACE");
        println!("  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let tag = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", tag, path.display());
        }

        let workspace_file = workspace.join(WORKSPACE_CONFIG_FILE);
        if workspace_file.exists() {
            println!("  [FOUND] Workspace: {}", workspace_file.display());
        } else {
            println!("  [     ] Workspace: {}", workspace_file.display());
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(ConfigLoader::file_figment(None, dir.path(), None).unwrap());
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_workspace_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(
            &global,
            "[compiler]\npath = \"/global/arclang\"\ntimeout = 90\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[compiler]\npath = \"/workspace/arclang\"\n",
        )
        .unwrap();

        let config = extract(
            ConfigLoader::file_figment(Some(global.as_path()), dir.path(), None).unwrap(),
        );

        assert_eq!(config.compiler.path, "/workspace/arclang");
        // Keys not repeated in the workspace file survive from the global one
        assert_eq!(config.compiler.timeout, 90);
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[safety]\ndefault_standard = \"do178c\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "[safety]\ndefault_standard = \"iec61508\"\n").unwrap();

        let config = extract(
            ConfigLoader::file_figment(None, dir.path(), Some(explicit.as_path())).unwrap(),
        );
        assert_eq!(config.safety.default_standard, "iec61508");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ConfigLoader::file_figment(None, dir.path(), Some(missing.as_path())),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            "[compiler]\ntimeout = \"soon\"\n",
        )
        .unwrap();

        let figment = ConfigLoader::file_figment(None, dir.path(), None).unwrap();
        assert!(figment.extract::<FileConfig>().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ARCLANG_BINARY", "/usr/local/bin/arclang"),
            ("ANTHROPIC_API_KEY", "sk-env"),
            ("ARCLANG_WORKSPACE", "/srv/models"),
        ]
        .into_iter()
        .collect();

        let mut config = FileConfig::default();
        ConfigLoader::apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.compiler.path, "/usr/local/bin/arclang");
        assert_eq!(config.ai.api_key(), Some("sk-env"));
        assert_eq!(config.workspace.root, Some(PathBuf::from("/srv/models")));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = FileConfig::default();
        ConfigLoader::apply_env_overrides(&mut config, |_| Some("  ".to_string()));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("arclang-mcp"));
    }

    #[test]
    fn test_resolve_workspace_prefers_cli() {
        let path = ConfigLoader::resolve_workspace(Some(Path::new("/cli/ws")));
        assert_eq!(path, PathBuf::from("/cli/ws"));
    }
}
