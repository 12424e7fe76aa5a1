//! Text backend configuration from TOML (`[ai]` section)

use serde::{Deserialize, Serialize};

/// Backend providers this build can talk to
pub const SUPPORTED_PROVIDERS: &[&str] = &["anthropic"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAiConfig {
    /// Backend provider (default: "anthropic")
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// API key; usually supplied through `ANTHROPIC_API_KEY` instead.
    /// Without a key, generation uses templates.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Default for FileAiConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.3,
            max_tokens: 2048,
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            request_timeout: 60,
        }
    }
}

impl FileAiConfig {
    /// The API key when one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn is_supported_provider(&self) -> bool {
        SUPPORTED_PROVIDERS.contains(&self.provider.to_lowercase().as_str())
    }
}
