//! Application layer for arclang-mcp
//!
//! This crate contains the use cases (compiler facade, generation facade,
//! tool dispatcher), the ports they drive, and the application settings.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CompilerSettings, GenerationSettings, ServerSettings};
pub use ports::{
    process_runner::ProcessRunner,
    text_backend::{BackendError, CompletionRequest, TextBackend},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::compiler_facade::CompilerFacade;
pub use use_cases::dispatch_tool::{DispatchError, RenderedReport, ToolDispatcher};
pub use use_cases::generation_facade::{GenerationCapability, GenerationFacade};
