//! Use cases
//!
//! - [`compiler_facade`]: one method per compiler operation
//! - [`generation_facade`]: backend generation with template fallback
//! - [`dispatch_tool`]: validation, routing and rendering of tool calls
//! - [`report`]: the text report format shared by all tools

pub mod compiler_facade;
pub mod dispatch_tool;
pub mod generation_facade;
pub mod report;
