//! Generation domain
//!
//! Requests for requirement, component and architecture text, the artifact
//! they produce, and the deterministic templates used when no backend is
//! available.

pub mod entities;
pub mod fallback;

pub use entities::{
    ArchitectureRequest, ArchitectureSuggestion, ArtifactKind, ComponentRequest,
    GeneratedArtifact, GenerationMode, GenerationRequest, RequirementRequest, SuggestedComponent,
};
