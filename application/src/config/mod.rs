//! Application-level configuration.
//!
//! Settings consumed by the use cases. They are built once at startup by the
//! infrastructure config loader and never change afterwards:
//!
//! - [`CompilerSettings`]: compiler binary, time budget, workspace layout
//! - [`GenerationSettings`]: model parameters for the text backend
//! - [`ServerSettings`]: container handed to the dispatcher

pub mod settings;

pub use settings::{CompilerSettings, GenerationSettings, ServerSettings};
