//! Tool domain module
//!
//! This module defines the closed catalogue of tools exposed to agents and
//! everything needed to turn a raw call into a typed request without I/O.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ ToolCall     │───▶│ ToolSpec     │───▶│ ValidatedArgs │───▶│ ToolRequest  │
//! │ (raw JSON)   │    │ (catalogue)  │    │ (defaults in) │    │ (typed)      │
//! └──────────────┘    └──────────────┘    └───────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolName`]: closed enum over the catalogue; routing matches on it exhaustively
//! - [`ToolDefinition`] / [`ToolParameter`]: declared schema per tool
//! - [`ToolValidator`]: pure validation, fails before any side effect
//! - [`ToolRequest`]: typed request handed to the facades
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolDispatcher`): validates, routes, renders reports
//! - **Infrastructure** (`JsonSchemaToolConverter`): publishes the schema over MCP

pub mod catalogue;
pub mod entities;
pub mod request;
pub mod traits;
pub mod value_objects;

pub use catalogue::{default_tool_spec, definition};
pub use entities::{ParamType, ToolCall, ToolDefinition, ToolFamily, ToolName, ToolParameter, ToolSpec};
pub use request::{RequestDefaults, ToolRequest};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{UnknownToolError, ValidatedArgs, ValidationError};
