//! Generation requests and artifacts

use crate::modeling::{ApplicationDomain, ComponentType, Priority, SafetyLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of text block was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Requirement,
    Component,
    ArchitectureSuggestion,
}

/// How an artifact was produced.
///
/// Callers use this to tell authoritative output from a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    BackendGenerated,
    FallbackTemplate,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::BackendGenerated => "backend-generated",
            GenerationMode::FallbackTemplate => "fallback-template",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text block in the modeling language plus its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub content: String,
    pub mode: GenerationMode,
    /// Identifier synthesized by the fallback template, when one was needed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl GeneratedArtifact {
    pub fn backend(kind: ArtifactKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            mode: GenerationMode::BackendGenerated,
            identifier: None,
        }
    }

    pub fn fallback(kind: ArtifactKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            mode: GenerationMode::FallbackTemplate,
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.mode == GenerationMode::FallbackTemplate
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequirementRequest {
    pub description: String,
    pub safety_level: Option<SafetyLevel>,
    pub priority: Priority,
}

impl RequirementRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            safety_level: None,
            priority: Priority::default(),
        }
    }

    pub fn with_safety_level(mut self, level: SafetyLevel) -> Self {
        self.safety_level = Some(level);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRequest {
    pub description: String,
    pub component_type: ComponentType,
    /// Free text; components accept any integrity label
    pub safety_level: Option<String>,
}

impl ComponentRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            component_type: ComponentType::default(),
            safety_level: None,
        }
    }

    pub fn with_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    pub fn with_safety_level(mut self, level: impl Into<String>) -> Self {
        self.safety_level = Some(level.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureRequest {
    pub requirements: Vec<String>,
    pub domain: ApplicationDomain,
}

impl ArchitectureRequest {
    pub fn new(requirements: Vec<String>) -> Self {
        Self {
            requirements,
            domain: ApplicationDomain::default(),
        }
    }

    pub fn with_domain(mut self, domain: ApplicationDomain) -> Self {
        self.domain = domain;
        self
    }
}

/// Any of the three generation requests
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Requirement(RequirementRequest),
    Component(ComponentRequest),
    Architecture(ArchitectureRequest),
}

impl GenerationRequest {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            GenerationRequest::Requirement(_) => ArtifactKind::Requirement,
            GenerationRequest::Component(_) => ArtifactKind::Component,
            GenerationRequest::Architecture(_) => ArtifactKind::ArchitectureSuggestion,
        }
    }
}

/// One component in an architecture suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestedComponent {
    pub name: String,
    pub component_type: String,
    pub description: String,
    pub safety_level: Option<String>,
}

/// Components plus recommended patterns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchitectureSuggestion {
    pub components: Vec<SuggestedComponent>,
    pub patterns: Vec<String>,
}

impl ArchitectureSuggestion {
    /// Numbered component list followed by the pattern list.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, component) in self.components.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({})\n   - Purpose: {}\n",
                i + 1,
                component.name,
                component.component_type,
                component.description
            ));
            if let Some(level) = &component.safety_level {
                out.push_str(&format!("   - Safety: {}\n", level));
            }
        }
        if !self.patterns.is_empty() {
            out.push_str("\nRecommended patterns:\n");
            for pattern in &self.patterns {
                out.push_str(&format!("  - {}\n", pattern));
            }
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(GenerationMode::FallbackTemplate.as_str(), "fallback-template");
        assert_eq!(
            serde_json::to_string(&GenerationMode::BackendGenerated).unwrap(),
            "\"backend-generated\""
        );
    }

    #[test]
    fn test_request_defaults() {
        let req = RequirementRequest::new("x");
        assert_eq!(req.priority, Priority::High);
        assert!(req.safety_level.is_none());

        let comp = ComponentRequest::new("x");
        assert_eq!(comp.component_type, ComponentType::Logical);

        let arch = ArchitectureRequest::new(vec![]);
        assert_eq!(arch.domain, ApplicationDomain::Automotive);
    }

    #[test]
    fn test_suggestion_render() {
        let suggestion = ArchitectureSuggestion {
            components: vec![SuggestedComponent {
                name: "Brake ECU".to_string(),
                component_type: "Physical".to_string(),
                description: "Runs control".to_string(),
                safety_level: Some("ASIL_D".to_string()),
            }],
            patterns: vec!["Redundancy".to_string()],
        };

        let text = suggestion.render();
        assert!(text.starts_with("1. Brake ECU (Physical)"));
        assert!(text.contains("   - Safety: ASIL_D"));
        assert!(text.contains("  - Redundancy"));
    }

    #[test]
    fn test_empty_suggestion_renders_empty() {
        assert_eq!(ArchitectureSuggestion::default().render(), "");
    }
}
