//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is `#[serde(default)]`, so a partial file (or none at all)
//! yields a complete configuration.

mod ai;
mod cache;
mod compiler;
mod plm;
mod safety;
mod workspace;

pub use ai::{FileAiConfig, SUPPORTED_PROVIDERS};
pub use cache::FileCacheConfig;
pub use compiler::FileCompilerConfig;
pub use plm::FilePlmConfig;
pub use safety::FileSafetyConfig;
pub use workspace::FileWorkspaceConfig;

use arclang_mcp_application::config::{CompilerSettings, GenerationSettings, ServerSettings};
use arclang_mcp_domain::{ConfigIssue, RequestDefaults, SafetyStandard};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub workspace: FileWorkspaceConfig,
    pub compiler: FileCompilerConfig,
    /// Text backend settings
    pub ai: FileAiConfig,
    pub cache: FileCacheConfig,
    pub safety: FileSafetyConfig,
    pub plm: FilePlmConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Only errors should stop the server; warnings describe settings that
    /// are accepted but will not behave as written.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.compiler.timeout == 0 {
            issues.push(ConfigIssue::error(
                "compiler.timeout",
                "timeout cannot be 0",
            ));
        }

        if self.compiler.path.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "compiler.path",
                "compiler path cannot be empty",
            ));
        }

        if !(0.0..=1.0).contains(&self.ai.temperature) {
            issues.push(ConfigIssue::warning(
                "ai.temperature",
                format!(
                    "temperature {} is outside 0.0..=1.0; the backend may reject requests",
                    self.ai.temperature
                ),
            ));
        }

        if !self.ai.is_supported_provider() {
            issues.push(ConfigIssue::warning(
                "ai.provider",
                format!(
                    "unknown provider '{}', generation will use templates (supported: {})",
                    self.ai.provider,
                    SUPPORTED_PROVIDERS.join(", ")
                ),
            ));
        }

        if self
            .safety
            .default_standard
            .trim()
            .to_lowercase()
            .parse::<SafetyStandard>()
            .is_err()
        {
            issues.push(ConfigIssue::warning(
                "safety.default_standard",
                format!(
                    "unknown standard '{}', falling back to '{}' (valid: {})",
                    self.safety.default_standard,
                    SafetyStandard::default(),
                    SafetyStandard::VALUES.join(", ")
                ),
            ));
        }

        if self.cache.enabled {
            issues.push(ConfigIssue::warning(
                "cache.enabled",
                "[cache] is enabled but no result cache is implemented; results are never cached",
            ));
        }

        issues
    }

    /// Workspace root: `workspace.root` resolved against `base`, or `base`.
    pub fn workspace_root(&self, base: &Path) -> PathBuf {
        match &self.workspace.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        }
    }

    /// Convert into the settings consumed by the application layer.
    pub fn to_settings(&self, base: &Path) -> ServerSettings {
        ServerSettings {
            compiler: CompilerSettings {
                binary: self.compiler.path.clone(),
                timeout: Duration::from_secs(self.compiler.timeout),
                workspace_root: self.workspace_root(base),
                build_dir: self.workspace.build_dir.clone(),
                plm_enabled: self.plm.enabled,
            },
            generation: GenerationSettings {
                model: self.ai.model.clone(),
                temperature: self.ai.temperature,
                max_tokens: self.ai.max_tokens,
            },
            defaults: RequestDefaults {
                strict_validation: self.safety.strict_validation,
                safety_standard: self.safety.standard(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arclang_mcp_domain::Severity;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[workspace]
root = "models"
build_dir = "out"

[compiler]
path = "/opt/arclang/bin/arclang"
timeout = 45

[ai]
model = "claude-3-5-haiku-20241022"
temperature = 0.2
api_key = "sk-test"

[safety]
default_standard = "do178c"
strict_validation = false

[plm]
enabled = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workspace.root, Some(PathBuf::from("models")));
        assert_eq!(config.compiler.path, "/opt/arclang/bin/arclang");
        assert_eq!(config.compiler.timeout, 45);
        assert_eq!(config.ai.api_key(), Some("sk-test"));
        assert_eq!(config.safety.standard(), SafetyStandard::Do178c);
        assert!(config.plm.enabled);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[compiler]
timeout = 10
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.compiler.timeout, 10);
        // Defaults should apply
        assert_eq!(config.compiler.path, "arclang");
        assert_eq!(config.ai.model, "claude-3-5-sonnet-20241022");
        assert!(config.safety.strict_validation);
        assert!(!config.plm.enabled);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.ai.api_key().is_none());
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = FileConfig::default();
        config.compiler.timeout = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].field, "compiler.timeout");
    }

    #[test]
    fn test_warnings() {
        let mut config = FileConfig::default();
        config.ai.temperature = 1.5;
        config.safety.default_standard = "iso9001".to_string();
        config.cache.enabled = true;

        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["ai.temperature", "safety.default_standard", "cache.enabled"]
        );
        assert!(issues.iter().all(|i| !i.is_error()));
        assert_eq!(config.safety.standard(), SafetyStandard::Iso26262);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let mut config = FileConfig::default();
        config.ai.api_key = Some("   ".to_string());
        assert!(config.ai.api_key().is_none());
    }

    #[test]
    fn test_to_settings() {
        let mut config = FileConfig::default();
        config.workspace.root = Some(PathBuf::from("models"));
        config.safety.strict_validation = false;

        let settings = config.to_settings(Path::new("/work"));
        assert_eq!(settings.compiler.workspace_root, PathBuf::from("/work/models"));
        assert_eq!(settings.compiler.timeout, Duration::from_secs(30));
        assert_eq!(settings.compiler.build_dir, PathBuf::from("build"));
        assert!(!settings.defaults.strict_validation);
        assert_eq!(settings.generation.max_tokens, 2048);
    }

    #[test]
    fn test_absolute_workspace_root_wins() {
        let mut config = FileConfig::default();
        config.workspace.root = Some(PathBuf::from("/srv/models"));
        assert_eq!(
            config.workspace_root(Path::new("/work")),
            PathBuf::from("/srv/models")
        );
    }
}
