//! Port definitions
//!
//! Ports are the seams between the use cases and the outside world. Adapters
//! implementing them live in the infrastructure layer.

pub mod process_runner;
pub mod text_backend;
pub mod tool_schema;
