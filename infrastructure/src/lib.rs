//! Infrastructure layer for arclang-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the subprocess runner, the Anthropic text
//! backend, configuration file loading, JSON Schema conversion for the tool
//! catalogue and the MCP stdio server.

pub mod backend;
pub mod config;
pub mod mcp;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use backend::{AnthropicBackend, AnthropicSettings};
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use mcp::{McpServer, ServerError};
pub use process::TokioProcessRunner;
pub use tools::JsonSchemaToolConverter;
