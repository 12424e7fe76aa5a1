//! Prompt domain
//!
//! Kind-specific prompts sent to the text backend.

mod template;

pub use template::PromptTemplate;
