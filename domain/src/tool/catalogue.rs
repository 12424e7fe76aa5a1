//! The static tool catalogue
//!
//! One [`ToolDefinition`] per [`ToolName`]. Descriptions and argument names
//! are part of the wire contract with agents and must stay stable.

use super::entities::{ParamType, ToolDefinition, ToolName, ToolParameter, ToolSpec};
use crate::modeling::{
    ApplicationDomain, ComponentType, ExportFormat, PlmSystem, Priority, SafetyLevel,
    SafetyStandard, SyncOperation,
};

/// Standards the hazard analysis subcommand understands.
pub const HARA_STANDARDS: &[&str] = &["iso26262", "iec61508"];

/// Build the complete tool registry.
pub fn default_tool_spec() -> ToolSpec {
    ToolName::ALL
        .into_iter()
        .fold(ToolSpec::new(), |spec, name| spec.register(definition(name)))
}

/// Definition for a single tool.
pub fn definition(name: ToolName) -> ToolDefinition {
    match name {
        ToolName::Compile => ToolDefinition::new(
            name,
            "Compile ArcLang model to Capella XML format. Validates syntax and semantics.",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(flag("validate", "Run validation checks", true))
        .with_parameter(flag("optimize", "Enable optimizations", false)),

        // `strict` has no schema default: the installation's
        // `safety.strict_validation` decides when the caller is silent.
        ToolName::Validate => ToolDefinition::new(
            name,
            "Validate ArcLang model syntax and semantics without compilation.",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(
            ToolParameter::new("strict", "Enable strict validation mode", false)
                .with_type(ParamType::Boolean),
        ),

        ToolName::TraceAnalysis => ToolDefinition::new(
            name,
            "Analyze traceability coverage and find gaps in requirements/component traces.",
        )
        .with_parameter(model_path("Path to .arc model file or directory"))
        .with_parameter(flag("show_gaps", "Show untraced elements", true))
        .with_parameter(flag("matrix", "Generate traceability matrix", false)),

        ToolName::ExportDiagram => ToolDefinition::new(
            name,
            "Generate architecture diagram from ArcLang model.",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(
            ToolParameter::new("format", "Output diagram format", false)
                .with_allowed(ExportFormat::VALUES)
                .with_default(ExportFormat::default().as_str()),
        )
        .with_parameter(ToolParameter::new(
            "output_path",
            "Output file path",
            false,
        )),

        ToolName::Info => ToolDefinition::new(
            name,
            "Get model metrics and statistics (requirements count, components, coverage, etc.).",
        )
        .with_parameter(model_path("Path to .arc model file or directory"))
        .with_parameter(flag("detailed", "Include detailed metrics", false)),

        ToolName::GenerateRequirement => ToolDefinition::new(
            name,
            "Generate ArcLang requirement from natural language description.\n\n\
             MANDATORY SYNTAX: Use 'req ID \"Title\" { }' format inside \
             'requirements stakeholder/system/safety { }' block.\n\
             CORRECT: requirements stakeholder { req STK-001 \"Title\" { description: \"Text\" } }\n\
             WRONG: requirement \"REQ-001\" { } or req { id: \"REQ-001\" }",
        )
        .with_parameter(ToolParameter::new(
            "description",
            "Natural language description of requirement",
            true,
        ))
        .with_parameter(
            ToolParameter::new("safety_level", "Safety integrity level", false)
                .with_allowed(SafetyLevel::VALUES),
        )
        .with_parameter(
            ToolParameter::new("priority", "Requirement priority", false)
                .with_allowed(Priority::VALUES)
                .with_default(Priority::default().as_str()),
        ),

        ToolName::GenerateComponent => ToolDefinition::new(
            name,
            "Generate ArcLang component architecture from description.\n\n\
             MANDATORY SYNTAX: Use 'component Name \"Display\" { }' inside \
             'architecture logical/physical { }' block.\n\
             CORRECT: component SensorSubsystem \"Sensor\" { provides interface IData { } }\n\
             WRONG: component \"Name\" { port \"input\" { } } or component { name: \"Name\" }",
        )
        .with_parameter(ToolParameter::new(
            "description",
            "Natural language description of component",
            true,
        ))
        .with_parameter(
            ToolParameter::new("component_type", "Component type", false)
                .with_allowed(ComponentType::VALUES)
                .with_default(ComponentType::default().as_str()),
        )
        .with_parameter(ToolParameter::new(
            "safety_level",
            "Safety integrity level (optional)",
            false,
        )),

        ToolName::SuggestArchitecture => ToolDefinition::new(
            name,
            "Get AI-powered architecture suggestions based on requirements.",
        )
        .with_parameter(
            ToolParameter::new("requirements", "List of requirement descriptions", true)
                .with_type(ParamType::StringArray),
        )
        .with_parameter(
            ToolParameter::new("domain", "Application domain", false)
                .with_allowed(ApplicationDomain::VALUES)
                .with_default(ApplicationDomain::default().as_str()),
        ),

        ToolName::SafetyCheck => ToolDefinition::new(
            name,
            "Validate model against safety standards (ISO 26262, DO-178C, IEC 61508).",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(
            ToolParameter::new("standard", "Safety standard to validate against", true)
                .with_allowed(SafetyStandard::VALUES),
        )
        .with_parameter(flag(
            "generate_report",
            "Generate detailed HTML report",
            false,
        )),

        // No schema default for `standard`: `safety.default_standard` fills it in.
        ToolName::HazardAnalysis => ToolDefinition::new(
            name,
            "Perform HARA (Hazard Analysis and Risk Assessment) on model.",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(
            ToolParameter::new("standard", "Safety standard", false).with_allowed(HARA_STANDARDS),
        ),

        ToolName::GitMerge => ToolDefinition::new(
            name,
            "Semantic merge assistance for ArcLang models (resolves conflicts by component ID).",
        )
        .with_parameter(ToolParameter::new("base_path", "Path to base version", true))
        .with_parameter(ToolParameter::new("ours_path", "Path to our version", true))
        .with_parameter(ToolParameter::new(
            "theirs_path",
            "Path to their version",
            true,
        )),

        ToolName::PlmSync => ToolDefinition::new(
            name,
            "Synchronize an ArcLang model with a PLM or requirements-management system.",
        )
        .with_parameter(model_path("Path to .arc model file"))
        .with_parameter(
            ToolParameter::new("system", "Target PLM system", true)
                .with_allowed(PlmSystem::VALUES),
        )
        .with_parameter(
            ToolParameter::new("operation", "Synchronization direction", false)
                .with_allowed(SyncOperation::VALUES)
                .with_default(SyncOperation::default().as_str()),
        ),
    }
}

fn model_path(description: &str) -> ToolParameter {
    ToolParameter::new("model_path", description, true)
}

fn flag(name: &str, description: &str, default: bool) -> ToolParameter {
    ToolParameter::new(name, description, false)
        .with_type(ParamType::Boolean)
        .with_default(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalogue_covers_every_tool() {
        let spec = default_tool_spec();
        assert_eq!(spec.len(), ToolName::ALL.len());
        for name in ToolName::ALL {
            assert_eq!(spec.get(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_every_tool_has_a_required_argument() {
        for name in ToolName::ALL {
            assert!(
                definition(name).required_parameters().count() > 0,
                "{name} declares no required argument"
            );
        }
    }

    #[test]
    fn test_enum_defaults_are_legal() {
        for name in ToolName::ALL {
            for param in definition(name).parameters {
                if let (Some(allowed), Some(default)) = (param.allowed, &param.default) {
                    let default = default.as_str().unwrap();
                    assert!(allowed.contains(&default), "{name}.{}", param.name);
                }
            }
        }
    }

    #[test]
    fn test_compile_defaults() {
        let compile = definition(ToolName::Compile);
        assert_eq!(
            compile.parameter("validate").unwrap().default,
            Some(json!(true))
        );
        assert_eq!(
            compile.parameter("optimize").unwrap().default,
            Some(json!(false))
        );
    }

    #[test]
    fn test_safety_check_requires_standard() {
        let check = definition(ToolName::SafetyCheck);
        let standard = check.parameter("standard").unwrap();
        assert!(standard.required);
        assert_eq!(standard.allowed, Some(SafetyStandard::VALUES));
    }

    #[test]
    fn test_hazard_analysis_restricts_standards() {
        let hara = definition(ToolName::HazardAnalysis);
        let standard = hara.parameter("standard").unwrap();
        assert!(!standard.required);
        assert!(standard.default.is_none());
        assert!(!HARA_STANDARDS.contains(&"do178c"));
    }
}
