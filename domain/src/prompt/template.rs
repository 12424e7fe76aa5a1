//! Prompt templates for the text backend

use crate::generation::{
    ArchitectureRequest, ComponentRequest, GenerationRequest, RequirementRequest,
};

/// Templates for each generation kind
pub struct PromptTemplate;

impl PromptTemplate {
    pub fn for_request(request: &GenerationRequest) -> String {
        match request {
            GenerationRequest::Requirement(r) => Self::requirement(r),
            GenerationRequest::Component(c) => Self::component(c),
            GenerationRequest::Architecture(a) => Self::architecture(a),
        }
    }

    /// Prompt for a single requirement block
    pub fn requirement(request: &RequirementRequest) -> String {
        let safety = request
            .safety_level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "Not specified".to_string());
        let safety_line = match request.safety_level {
            Some(level) => format!("safety_level: {}", level),
            None => "// safety_level: TBD".to_string(),
        };

        format!(
            r#"Generate an ArcLang requirement based on this description:

Description: {description}
Safety Level: {safety}
Priority: {priority}

Generate a complete ArcLang requirement block following this format:

requirements system {{
    req REQ-XXX-001 "Short title" {{
        description: "..."
        priority: {priority}
        {safety_line}
    }}
}}

Important:
- Use a descriptive requirement ID (e.g., REQ-BRAKE-001)
- Use 'req ID "Title"', never 'requirement "ID"'
- Keep the description concise and verifiable
- Follow ISO 26262 / DO-178C conventions if a safety level is specified

Generate only the ArcLang code, no explanation."#,
            description = request.description,
            safety = safety,
            priority = request.priority,
            safety_line = safety_line,
        )
    }

    /// Prompt for a single component block
    pub fn component(request: &ComponentRequest) -> String {
        let safety = request.safety_level.as_deref().unwrap_or("Not specified");

        format!(
            r#"Generate an ArcLang component based on this description:

Description: {description}
Type: {component_type}
Safety Level: {safety}

Generate a complete ArcLang component block following this format:

architecture {layer} {{
    component ComponentName "Display Name" {{
        id: "LC-XXX-001"
        description: "..."
        provides interface IComponentName {{
            signals: ["Signal: Type"]
        }}
    }}
}}

Important:
- Component names are identifiers; display names are strings
- Component ID pattern: LC-<SUBSYSTEM>-<NUM>
- Use 'provides/requires interface', never 'port'
- Include realistic signals

Generate only the ArcLang code, no explanation."#,
            description = request.description,
            component_type = request.component_type,
            safety = safety,
            layer = request.component_type.layer_keyword(),
        )
    }

    /// Prompt for an architecture suggestion
    pub fn architecture(request: &ArchitectureRequest) -> String {
        let requirements = request
            .requirements
            .iter()
            .map(|r| format!("- {}", r))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Given these requirements for a {domain} system, suggest an appropriate architecture:

Requirements:
{requirements}

Suggest:
1. Main components (5-10 components)
2. Component types (Logical/Physical)
3. Safety levels if applicable
4. Recommended architectural patterns

Answer as a numbered list of components (name, type, purpose, safety level)
followed by a short list of recommended patterns."#,
            domain = request.domain,
            requirements = requirements,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::{ApplicationDomain, ComponentType, SafetyLevel};

    #[test]
    fn test_requirement_prompt() {
        let request =
            RequirementRequest::new("brake pressure limit").with_safety_level(SafetyLevel::AsilC);
        let prompt = PromptTemplate::requirement(&request);
        assert!(prompt.contains("Description: brake pressure limit"));
        assert!(prompt.contains("Safety Level: ASIL_C"));
        assert!(prompt.contains("safety_level: ASIL_C"));
        assert!(prompt.contains("priority: High"));
    }

    #[test]
    fn test_requirement_prompt_without_level() {
        let prompt = PromptTemplate::requirement(&RequirementRequest::new("x"));
        assert!(prompt.contains("Safety Level: Not specified"));
        assert!(prompt.contains("// safety_level: TBD"));
    }

    #[test]
    fn test_component_prompt_uses_layer() {
        let request = ComponentRequest::new("pump driver").with_type(ComponentType::Physical);
        let prompt = PromptTemplate::component(&request);
        assert!(prompt.contains("architecture physical {"));
        assert!(prompt.contains("Type: Physical"));
    }

    #[test]
    fn test_architecture_prompt_lists_requirements() {
        let request = ArchitectureRequest::new(vec!["a".to_string(), "b".to_string()])
            .with_domain(ApplicationDomain::Aerospace);
        let prompt = PromptTemplate::architecture(&request);
        assert!(prompt.contains("for a aerospace system"));
        assert!(prompt.contains("- a\n- b"));
    }
}
