//! Typed tool requests
//!
//! A [`ToolRequest`] is built from arguments that already passed schema
//! validation. It is the only shape the facades ever see, so string
//! conventions stop at this boundary.

use super::catalogue::HARA_STANDARDS;
use super::entities::ToolName;
use super::value_objects::{ValidatedArgs, ValidationError};
use crate::generation::{ArchitectureRequest, ComponentRequest, RequirementRequest};
use crate::modeling::{
    ApplicationDomain, ComponentType, ExportFormat, PlmSystem, Priority, SafetyLevel,
    SafetyStandard, SyncOperation, UnknownVariant,
};
use std::str::FromStr;

/// Installation defaults for arguments the catalogue leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDefaults {
    pub strict_validation: bool,
    pub safety_standard: SafetyStandard,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            strict_validation: true,
            safety_standard: SafetyStandard::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    Compile {
        model_path: String,
        validate: bool,
        optimize: bool,
    },
    Validate {
        model_path: String,
        strict: bool,
    },
    TraceAnalysis {
        model_path: String,
        show_gaps: bool,
        matrix: bool,
    },
    ExportDiagram {
        model_path: String,
        format: ExportFormat,
        output_path: Option<String>,
    },
    Info {
        model_path: String,
        detailed: bool,
    },
    GenerateRequirement(RequirementRequest),
    GenerateComponent(ComponentRequest),
    SuggestArchitecture(ArchitectureRequest),
    SafetyCheck {
        model_path: String,
        standard: SafetyStandard,
        generate_report: bool,
    },
    HazardAnalysis {
        model_path: String,
        standard: SafetyStandard,
    },
    GitMerge {
        base_path: String,
        ours_path: String,
        theirs_path: String,
    },
    PlmSync {
        model_path: String,
        system: PlmSystem,
        operation: SyncOperation,
    },
}

impl ToolRequest {
    pub fn from_validated(
        name: ToolName,
        args: &ValidatedArgs,
        defaults: &RequestDefaults,
    ) -> Result<Self, ValidationError> {
        let request = match name {
            ToolName::Compile => ToolRequest::Compile {
                model_path: required(args, "model_path")?,
                validate: args.bool("validate").unwrap_or(true),
                optimize: args.bool("optimize").unwrap_or(false),
            },
            ToolName::Validate => ToolRequest::Validate {
                model_path: required(args, "model_path")?,
                strict: args.bool("strict").unwrap_or(defaults.strict_validation),
            },
            ToolName::TraceAnalysis => ToolRequest::TraceAnalysis {
                model_path: required(args, "model_path")?,
                show_gaps: args.bool("show_gaps").unwrap_or(true),
                matrix: args.bool("matrix").unwrap_or(false),
            },
            ToolName::ExportDiagram => ToolRequest::ExportDiagram {
                model_path: required(args, "model_path")?,
                format: vocabulary(args, "format")?.unwrap_or_default(),
                output_path: args
                    .str("output_path")
                    .filter(|p| !p.trim().is_empty())
                    .map(str::to_string),
            },
            ToolName::Info => ToolRequest::Info {
                model_path: required(args, "model_path")?,
                detailed: args.bool("detailed").unwrap_or(false),
            },
            ToolName::GenerateRequirement => {
                let mut request = RequirementRequest::new(required(args, "description")?)
                    .with_priority(vocabulary::<Priority>(args, "priority")?.unwrap_or_default());
                if let Some(level) = vocabulary::<SafetyLevel>(args, "safety_level")? {
                    request = request.with_safety_level(level);
                }
                ToolRequest::GenerateRequirement(request)
            }
            ToolName::GenerateComponent => {
                let mut request = ComponentRequest::new(required(args, "description")?).with_type(
                    vocabulary::<ComponentType>(args, "component_type")?.unwrap_or_default(),
                );
                if let Some(level) = args.str("safety_level") {
                    request = request.with_safety_level(level);
                }
                ToolRequest::GenerateComponent(request)
            }
            ToolName::SuggestArchitecture => {
                let requirements =
                    args.string_list("requirements")
                        .ok_or_else(|| ValidationError::MissingArgument {
                            field: "requirements".to_string(),
                        })?;
                ToolRequest::SuggestArchitecture(
                    ArchitectureRequest::new(requirements).with_domain(
                        vocabulary::<ApplicationDomain>(args, "domain")?.unwrap_or_default(),
                    ),
                )
            }
            ToolName::SafetyCheck => ToolRequest::SafetyCheck {
                model_path: required(args, "model_path")?,
                standard: vocabulary(args, "standard")?.ok_or_else(|| {
                    ValidationError::MissingArgument {
                        field: "standard".to_string(),
                    }
                })?,
                generate_report: args.bool("generate_report").unwrap_or(false),
            },
            ToolName::HazardAnalysis => ToolRequest::HazardAnalysis {
                model_path: required(args, "model_path")?,
                standard: vocabulary(args, "standard")?
                    .unwrap_or_else(|| hara_default(defaults.safety_standard)),
            },
            ToolName::GitMerge => ToolRequest::GitMerge {
                base_path: required(args, "base_path")?,
                ours_path: required(args, "ours_path")?,
                theirs_path: required(args, "theirs_path")?,
            },
            ToolName::PlmSync => ToolRequest::PlmSync {
                model_path: required(args, "model_path")?,
                system: vocabulary(args, "system")?.ok_or_else(|| {
                    ValidationError::MissingArgument {
                        field: "system".to_string(),
                    }
                })?,
                operation: vocabulary(args, "operation")?.unwrap_or_default(),
            },
        };
        Ok(request)
    }

    pub fn tool_name(&self) -> ToolName {
        match self {
            ToolRequest::Compile { .. } => ToolName::Compile,
            ToolRequest::Validate { .. } => ToolName::Validate,
            ToolRequest::TraceAnalysis { .. } => ToolName::TraceAnalysis,
            ToolRequest::ExportDiagram { .. } => ToolName::ExportDiagram,
            ToolRequest::Info { .. } => ToolName::Info,
            ToolRequest::GenerateRequirement(_) => ToolName::GenerateRequirement,
            ToolRequest::GenerateComponent(_) => ToolName::GenerateComponent,
            ToolRequest::SuggestArchitecture(_) => ToolName::SuggestArchitecture,
            ToolRequest::SafetyCheck { .. } => ToolName::SafetyCheck,
            ToolRequest::HazardAnalysis { .. } => ToolName::HazardAnalysis,
            ToolRequest::GitMerge { .. } => ToolName::GitMerge,
            ToolRequest::PlmSync { .. } => ToolName::PlmSync,
        }
    }
}

/// The HARA subcommand only knows a subset of the standards; an installation
/// default outside it falls back to ISO 26262.
fn hara_default(configured: SafetyStandard) -> SafetyStandard {
    if HARA_STANDARDS.contains(&configured.as_str()) {
        configured
    } else {
        SafetyStandard::Iso26262
    }
}

fn required(args: &ValidatedArgs, field: &str) -> Result<String, ValidationError> {
    args.str(field)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingArgument {
            field: field.to_string(),
        })
}

fn vocabulary<T>(args: &ValidatedArgs, field: &str) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = UnknownVariant>,
{
    args.str(field)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ValidationError::InvalidEnum {
                field: field.to_string(),
                value: e.value,
                allowed: e.allowed.iter().map(|a| a.to_string()).collect(),
            })
        })
        .transpose()
}
