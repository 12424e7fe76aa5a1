//! Domain layer for arclang-mcp
//!
//! This crate contains the tool catalogue, the contract with the external
//! `arclang` compiler, and the deterministic generation templates.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A closed catalogue ([`ToolName`]) of operations exposed to agents. Raw
//! calls are validated against declared schemas and turned into typed
//! [`ToolRequest`]s before anything runs.
//!
//! ## Compiler contract
//!
//! - [`CompilerCommand`] builds the argument vector for one operation
//! - [`ProcessResult`] is the raw capture of one invocation
//! - [`compiler::parsing`] scrapes labelled output into [`ParsedMetrics`]
//! - [`OperationOutcome`] is the normalized result
//!
//! ## Generation
//!
//! [`GeneratedArtifact`]s are tagged with the [`GenerationMode`] that produced
//! them so callers can tell backend output from a fallback placeholder.

pub mod compiler;
pub mod config;
pub mod generation;
pub mod modeling;
pub mod prompt;
pub mod resource;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use compiler::{
    CompilerCommand, Hazard, IssueSeverity, OperationOutcome, OutcomeDetails, ParsedMetrics,
    ProcessResult, SafetyIssue, Termination, TraceGaps,
};
pub use config::{ConfigIssue, Severity};
pub use generation::{
    ArchitectureRequest, ArtifactKind, ComponentRequest, GeneratedArtifact, GenerationMode,
    GenerationRequest, RequirementRequest,
};
pub use modeling::{
    ApplicationDomain, ComponentType, ExportFormat, PlmSystem, Priority, SafetyLevel,
    SafetyStandard, SyncOperation,
};
pub use prompt::PromptTemplate;
pub use resource::{RESOURCES, StaticResource, find_resource};
pub use tool::{
    DefaultToolValidator, RequestDefaults, ToolCall, ToolDefinition, ToolFamily, ToolName,
    ToolParameter, ToolRequest, ToolSpec, ToolValidator, UnknownToolError, ValidatedArgs,
    ValidationError, default_tool_spec,
};
