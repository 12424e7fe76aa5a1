//! Text backend adapters

mod anthropic;

pub use anthropic::{AnthropicBackend, AnthropicSettings};
