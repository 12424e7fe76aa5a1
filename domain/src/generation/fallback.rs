//! Deterministic, network-free templates
//!
//! Used whenever the text backend is absent or fails. Nothing here performs
//! I/O or can fail, and every block follows the mandatory syntax published in
//! the syntax-rules resource.

use super::entities::{
    ArchitectureRequest, ArchitectureSuggestion, ArtifactKind, ComponentRequest,
    GeneratedArtifact, GenerationRequest, RequirementRequest, SuggestedComponent,
};
use crate::util::truncate_str;

const TITLE_MAX_BYTES: usize = 60;

/// Initials of the first two words, uppercased; `GEN` when there are none.
///
/// A word contributes its first alphanumeric character, so punctuation never
/// leaks into an identifier.
pub fn initials(description: &str) -> String {
    let letters: String = description
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "GEN".to_string()
    } else {
        letters
    }
}

/// `<prefix>-<initials>-NNN`, picking the first sequence number that does not
/// already occur in `text` so the identifier appears in the block exactly once.
pub fn synthesize_identifier(prefix: &str, description: &str, text: &str) -> String {
    let stem = format!("{}-{}", prefix, initials(description));
    (1..)
        .map(|n| format!("{}-{:03}", stem, n))
        .find(|id| !text.contains(id.as_str()))
        .unwrap_or(stem)
}

/// Escape a value for a double-quoted string literal on a single line.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' | '\t' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

fn title(description: &str, empty: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return empty.to_string();
    }
    let cut = truncate_str(trimmed, TITLE_MAX_BYTES);
    if cut.len() < trimmed.len() {
        format!("{}...", cut.trim_end())
    } else {
        cut.to_string()
    }
}

/// `CamelCase` identifier from the first three words. Falls back to
/// `GeneratedComponent` and never starts with a digit.
pub fn component_name(description: &str) -> String {
    let name: String = description
        .split_whitespace()
        .take(3)
        .map(|word| {
            let mut chars = word.chars().filter(|c| c.is_alphanumeric());
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    match name.chars().next() {
        None => "GeneratedComponent".to_string(),
        Some(c) if c.is_numeric() => format!("Component{}", name),
        Some(_) => name,
    }
}

fn is_bare_word(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn requirement(request: &RequirementRequest) -> GeneratedArtifact {
    let description = escape(&request.description);
    let identifier = synthesize_identifier("REQ", &request.description, &description);
    let title = escape(&title(&request.description, "Generated requirement"));

    let mut block = String::from("requirements system {\n");
    block.push_str(&format!("    req {} \"{}\" {{\n", identifier, title));
    block.push_str(&format!("        description: \"{}\"\n", description));
    block.push_str(&format!("        priority: {}\n", request.priority));
    if let Some(level) = request.safety_level {
        block.push_str(&format!("        safety_level: {}\n", level));
    }
    block.push_str("    }\n}");

    GeneratedArtifact::fallback(ArtifactKind::Requirement, block).with_identifier(identifier)
}

pub fn component(request: &ComponentRequest) -> GeneratedArtifact {
    let description = escape(&request.description);
    let identifier = synthesize_identifier("LC", &request.description, &description);
    let name = component_name(&request.description);
    let display = escape(&title(&request.description, "Generated component"));

    let mut block = format!(
        "architecture {} {{\n",
        request.component_type.layer_keyword()
    );
    block.push_str(&format!("    component {} \"{}\" {{\n", name, display));
    block.push_str(&format!("        id: \"{}\"\n", identifier));
    block.push_str(&format!("        description: \"{}\"\n", description));
    if let Some(level) = request.safety_level.as_deref().map(str::trim)
        && !level.is_empty()
    {
        if is_bare_word(level) {
            block.push_str(&format!("        safety_level: {}\n", level));
        } else {
            block.push_str(&format!("        safety_level: \"{}\"\n", escape(level)));
        }
    }
    block.push_str(&format!("        provides interface I{} {{\n", name));
    block.push_str("            signals: [\"Output: Data\"]\n");
    block.push_str("        }\n    }\n}");

    GeneratedArtifact::fallback(ArtifactKind::Component, block).with_identifier(identifier)
}

/// Generic sense/control/actuate catalogue, independent of the input.
pub fn default_architecture() -> ArchitectureSuggestion {
    let component = |name: &str, description: &str| SuggestedComponent {
        name: name.to_string(),
        component_type: "Logical".to_string(),
        description: description.to_string(),
        safety_level: None,
    };
    ArchitectureSuggestion {
        components: vec![
            component("Sensor Interface", "Handles sensor data"),
            component("Controller", "Main control logic"),
            component("Actuator Interface", "Controls actuators"),
        ],
        patterns: vec![
            "Layered Architecture".to_string(),
            "Sense-Process-Actuate".to_string(),
        ],
    }
}

pub fn architecture(_request: &ArchitectureRequest) -> GeneratedArtifact {
    GeneratedArtifact::fallback(
        ArtifactKind::ArchitectureSuggestion,
        default_architecture().render(),
    )
}

/// Template for any request kind.
pub fn generate(request: &GenerationRequest) -> GeneratedArtifact {
    match request {
        GenerationRequest::Requirement(r) => requirement(r),
        GenerationRequest::Component(c) => component(c),
        GenerationRequest::Architecture(a) => architecture(a),
    }
}
