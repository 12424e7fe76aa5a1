//! Tool domain traits
//!
//! Contains pure domain logic for tool argument validation.
//! The async execution ports are defined in the application layer.

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::{ValidatedArgs, ValidationError};
use serde_json::Value;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition, returning the arguments
    /// with declared defaults applied.
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<ValidatedArgs, ValidationError>;
}

/// Default implementation of ToolValidator
///
/// Parameters are checked in declaration order and the first failure wins.
/// An explicit `null` counts as absent. Arguments the schema does not declare
/// are dropped rather than rejected, since MCP clients routinely attach
/// extra keys.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<ValidatedArgs, ValidationError> {
        let mut resolved = std::collections::HashMap::new();

        for param in &definition.parameters {
            let provided = call.arguments.get(&param.name).filter(|v| !v.is_null());

            let value = match (provided, &param.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) if param.required => {
                    return Err(ValidationError::MissingArgument {
                        field: param.name.clone(),
                    });
                }
                (None, None) => continue,
            };

            if !param.param_type.accepts(&value) {
                return Err(ValidationError::InvalidType {
                    field: param.name.clone(),
                    expected: param.param_type.describe().to_string(),
                });
            }

            if let (Some(allowed), Value::String(s)) = (param.allowed, &value)
                && !allowed.contains(&s.as_str())
            {
                return Err(ValidationError::InvalidEnum {
                    field: param.name.clone(),
                    value: s.clone(),
                    allowed: allowed.iter().map(|a| a.to_string()).collect(),
                });
            }

            resolved.insert(param.name.clone(), value);
        }

        Ok(ValidatedArgs::new(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, ToolName, ToolParameter};
    use serde_json::json;

    fn definition() -> ToolDefinition {
        ToolDefinition::new(ToolName::ExportDiagram, "test tool")
            .with_parameter(ToolParameter::new("model_path", "Path", true))
            .with_parameter(
                ToolParameter::new("format", "Format", false)
                    .with_default("html")
                    .with_allowed(&["html", "pdf"]),
            )
            .with_parameter(
                ToolParameter::new("detailed", "Detail", false)
                    .with_type(ParamType::Boolean)
                    .with_default(false),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ToolCall::new("arclang_export_diagram");
        let err = DefaultToolValidator
            .validate(&call, &definition())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingArgument {
                field: "model_path".to_string()
            }
        );
    }

    #[test]
    fn test_validator_null_counts_as_missing() {
        let call = ToolCall::new("arclang_export_diagram").with_arg("model_path", Value::Null);
        let err = DefaultToolValidator
            .validate(&call, &definition())
            .unwrap_err();
        assert_eq!(err.field(), "model_path");
    }

    #[test]
    fn test_validator_invalid_enum() {
        let call = ToolCall::new("arclang_export_diagram")
            .with_arg("model_path", "a.arc")
            .with_arg("format", "svg");
        let err = DefaultToolValidator
            .validate(&call, &definition())
            .unwrap_err();
        match err {
            ValidationError::InvalidEnum {
                field,
                value,
                allowed,
            } => {
                assert_eq!(field, "format");
                assert_eq!(value, "svg");
                assert_eq!(allowed, vec!["html", "pdf"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validator_invalid_type() {
        let call = ToolCall::new("arclang_export_diagram")
            .with_arg("model_path", "a.arc")
            .with_arg("detailed", "yes");
        let err = DefaultToolValidator
            .validate(&call, &definition())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidType {
                field: "detailed".to_string(),
                expected: "boolean".to_string()
            }
        );
    }

    #[test]
    fn test_validator_first_failure_in_declaration_order() {
        let call = ToolCall::new("arclang_export_diagram")
            .with_arg("format", "svg")
            .with_arg("detailed", "yes");
        let err = DefaultToolValidator
            .validate(&call, &definition())
            .unwrap_err();
        assert_eq!(err.field(), "model_path");
    }

    #[test]
    fn test_validator_applies_defaults_and_drops_unknown() {
        let call = ToolCall::new("arclang_export_diagram")
            .with_arg("model_path", "a.arc")
            .with_arg("colour", "blue");
        let args = DefaultToolValidator.validate(&call, &definition()).unwrap();

        assert_eq!(args.str("model_path"), Some("a.arc"));
        assert_eq!(args.str("format"), Some("html"));
        assert_eq!(args.bool("detailed"), Some(false));
        assert!(!args.contains("colour"));
    }

    #[test]
    fn test_validator_valid_call() {
        let call = ToolCall::new("arclang_export_diagram")
            .with_arg("model_path", "a.arc")
            .with_arg("format", "pdf")
            .with_arg("detailed", json!(true));
        let args = DefaultToolValidator.validate(&call, &definition()).unwrap();
        assert_eq!(args.str("format"), Some("pdf"));
        assert_eq!(args.bool("detailed"), Some(true));
    }
}
