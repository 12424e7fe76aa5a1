//! MCP server over stdio
//!
//! - [`protocol`]: JSON-RPC frame types and MCP constants
//! - [`server`]: the serving loop

pub mod protocol;
pub mod server;

pub use server::{McpServer, ServerError};
