//! Tool dispatcher use case
//!
//! Validates a raw [`ToolCall`] against the catalogue, turns it into a typed
//! [`ToolRequest`], routes it to exactly one facade method and renders the
//! result as text. Every call yields exactly one [`RenderedReport`]; nothing a
//! client sends can take the serving process down.

use crate::use_cases::compiler_facade::CompilerFacade;
use crate::use_cases::generation_facade::GenerationFacade;
use crate::use_cases::report::{Report, artifact_report, coverage_grade, outcome_report};
use arclang_mcp_domain::tool::ToolSpec;
use arclang_mcp_domain::{
    DefaultToolValidator, GenerationRequest, OperationOutcome, OutcomeDetails, RequestDefaults,
    SyncOperation, ToolCall, ToolName, ToolRequest, ToolValidator, UnknownToolError,
    ValidationError, default_tool_spec,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{error, info, warn};

/// Why a call was rejected or aborted
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownTool(#[from] UnknownToolError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error while running {tool}")]
    Internal { tool: String },
}

/// Text payload returned for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub text: String,
    /// Rejected calls and failed operations
    pub is_error: bool,
}

impl RenderedReport {
    pub fn error(error: impl std::fmt::Display) -> Self {
        Self {
            text: format!("Error: {}", error),
            is_error: true,
        }
    }

    fn from_report(report: Report, is_error: bool) -> Self {
        Self {
            text: report.render(),
            is_error,
        }
    }
}

pub struct ToolDispatcher {
    spec: ToolSpec,
    validator: DefaultToolValidator,
    defaults: RequestDefaults,
    compiler: CompilerFacade,
    generation: GenerationFacade,
}

impl ToolDispatcher {
    pub fn new(
        compiler: CompilerFacade,
        generation: GenerationFacade,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            spec: default_tool_spec(),
            validator: DefaultToolValidator,
            defaults,
            compiler,
            generation,
        }
    }

    /// The tool catalogue served by `tools/list`
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Resolve and validate a call without running anything.
    pub fn prepare(&self, call: &ToolCall) -> Result<ToolRequest, DispatchError> {
        let name: ToolName = call.tool_name.parse()?;
        let definition = self
            .spec
            .get(name)
            .ok_or_else(|| UnknownToolError(call.tool_name.clone()))?;
        let args = self.validator.validate(call, definition)?;
        Ok(ToolRequest::from_validated(name, &args, &self.defaults)?)
    }

    pub async fn dispatch(&self, call: &ToolCall) -> RenderedReport {
        let request = match self.prepare(call) {
            Ok(request) => request,
            Err(e) => {
                warn!(tool = %call.tool_name, error = %e, "Rejected tool call");
                return RenderedReport::error(e);
            }
        };

        let tool = request.tool_name();
        info!(tool = %tool, "Dispatching tool call");

        match AssertUnwindSafe(self.execute(&request)).catch_unwind().await {
            Ok(report) => {
                info!(tool = %tool, is_error = report.is_error, "Tool call finished");
                report
            }
            Err(_) => {
                error!(tool = %tool, "Tool call panicked");
                RenderedReport::error(DispatchError::Internal {
                    tool: tool.to_string(),
                })
            }
        }
    }

    async fn execute(&self, request: &ToolRequest) -> RenderedReport {
        match request {
            ToolRequest::Compile {
                model_path,
                validate,
                optimize,
            } => {
                let outcome = self.compiler.compile(model_path, *validate, *optimize).await;
                let mut context = vec![model(model_path)];
                if let Some(output) = &outcome.output_path {
                    context.push(("Output".to_string(), output.display().to_string()));
                }
                let steps = if outcome.success {
                    vec![
                        "Run arclang_trace_analysis to check traceability coverage".to_string(),
                        "Run arclang_export_diagram to visualize the architecture".to_string(),
                    ]
                } else {
                    fix_steps()
                };
                render("Compilation", context, &outcome, steps)
            }

            ToolRequest::Validate { model_path, strict } => {
                let outcome = self.compiler.validate(model_path, *strict).await;
                let mode = if *strict { "strict" } else { "lenient" };
                let context = vec![model(model_path), ("Mode".to_string(), mode.to_string())];
                let steps = if !outcome.success {
                    vec![
                        "Fix the errors listed above and validate again".to_string(),
                        "Read arclang://syntax-rules for the mandatory syntax".to_string(),
                    ]
                } else if !outcome.warnings.is_empty() {
                    vec![
                        "Review the warnings listed above".to_string(),
                        "Run arclang_compile to build the model".to_string(),
                    ]
                } else {
                    vec!["Run arclang_compile to build the model".to_string()]
                };
                let status = if outcome.success { "PASSED" } else { "FAILED" };
                RenderedReport::from_report(
                    outcome_report(format!("Validation: {}", status), context, &outcome, steps),
                    !outcome.success,
                )
            }

            ToolRequest::TraceAnalysis {
                model_path,
                show_gaps,
                matrix,
            } => {
                let outcome = self
                    .compiler
                    .trace_analysis(model_path, *show_gaps, *matrix)
                    .await;
                let mut context = vec![model(model_path)];
                let mut steps = Vec::new();
                if let OutcomeDetails::Trace { coverage, gaps } = &outcome.details {
                    context.push((
                        "Coverage".to_string(),
                        format!("{}% ({})", coverage, coverage_grade(*coverage)),
                    ));
                    if !gaps.is_empty() {
                        steps.push("Add traces for the elements listed under Findings".to_string());
                    } else if *coverage < 90 {
                        steps.push(
                            "Run with show_gaps=true to list the untraced elements".to_string(),
                        );
                    }
                }
                if outcome.success {
                    steps.push("Run arclang_safety_check to review safety compliance".to_string());
                } else {
                    steps.extend(fix_steps());
                }
                render("Traceability analysis", context, &outcome, steps)
            }

            ToolRequest::ExportDiagram {
                model_path,
                format,
                output_path,
            } => {
                let outcome = self
                    .compiler
                    .export_diagram(model_path, *format, output_path.as_deref())
                    .await;
                let mut context = vec![model(model_path), ("Format".to_string(), format.to_string())];
                let steps = match &outcome.output_path {
                    Some(output) => {
                        context.push(("Output".to_string(), output.display().to_string()));
                        vec![format!("Open {} to review the diagram", output.display())]
                    }
                    None => fix_steps(),
                };
                render("Export", context, &outcome, steps)
            }

            ToolRequest::Info {
                model_path,
                detailed,
            } => {
                let outcome = self.compiler.info(model_path, *detailed).await;
                let mut context = vec![model(model_path)];
                if let OutcomeDetails::Info { size_kb } = &outcome.details {
                    context.push(("Size".to_string(), format!("{:.1} KB", size_kb)));
                }
                let steps = if outcome.success {
                    vec!["Run arclang_validate to check the model".to_string()]
                } else {
                    fix_steps()
                };
                render("Model info", context, &outcome, steps)
            }

            ToolRequest::SafetyCheck {
                model_path,
                standard,
                generate_report,
            } => {
                let outcome = self
                    .compiler
                    .safety_check(model_path, *standard, *generate_report)
                    .await;
                let context = vec![
                    model(model_path),
                    ("Standard".to_string(), standard.to_string()),
                ];
                let steps = if outcome.success {
                    vec!["Run arclang_hazard_analysis to review hazards and ASIL ratings".to_string()]
                } else {
                    vec![
                        "Resolve the [ERROR] findings listed above".to_string(),
                        "Run arclang_safety_check again".to_string(),
                    ]
                };
                let status = if outcome.success { "PASSED" } else { "FAILED" };
                RenderedReport::from_report(
                    outcome_report(format!("Safety check: {}", status), context, &outcome, steps),
                    !outcome.success,
                )
            }

            ToolRequest::HazardAnalysis {
                model_path,
                standard,
            } => {
                let outcome = self.compiler.hazard_analysis(model_path, *standard).await;
                let mut context = vec![
                    model(model_path),
                    ("Standard".to_string(), standard.to_string()),
                ];
                if let OutcomeDetails::Hazards { hazards } = &outcome.details {
                    context.push(("Hazards".to_string(), hazards.len().to_string()));
                }
                let steps = if outcome.success {
                    vec![
                        "Assign safety levels to the components that mitigate the hazards above"
                            .to_string(),
                    ]
                } else {
                    fix_steps()
                };
                render("Hazard analysis", context, &outcome, steps)
            }

            ToolRequest::GitMerge {
                base_path,
                ours_path,
                theirs_path,
            } => {
                let outcome = self
                    .compiler
                    .semantic_merge(base_path, ours_path, theirs_path)
                    .await;
                let context = vec![
                    ("Base".to_string(), base_path.clone()),
                    ("Ours".to_string(), ours_path.clone()),
                    ("Theirs".to_string(), theirs_path.clone()),
                ];
                let steps = vec![
                    "Merge the models with a text merge tool".to_string(),
                    "Run arclang_validate on the merged model".to_string(),
                ];
                render("Semantic merge", context, &outcome, steps)
            }

            ToolRequest::PlmSync {
                model_path,
                system,
                operation,
            } => {
                let outcome = self
                    .compiler
                    .plm_sync(model_path, *system, *operation)
                    .await;
                let context = vec![
                    model(model_path),
                    ("System".to_string(), system.to_string()),
                    ("Operation".to_string(), operation.to_string()),
                ];
                let steps = match (outcome.success, operation) {
                    (false, _) => fix_steps(),
                    (true, SyncOperation::Pull) => {
                        vec!["Run arclang_validate on the synchronized model".to_string()]
                    }
                    (true, SyncOperation::Push) => {
                        vec![format!("Review the pushed changes in {}", system)]
                    }
                };
                render("PLM sync", context, &outcome, steps)
            }

            ToolRequest::GenerateRequirement(r) => {
                let artifact = self
                    .generation
                    .generate(&GenerationRequest::Requirement(r.clone()))
                    .await;
                let steps = vec![
                    "Add the block to a requirements section of a .arc model".to_string(),
                    "Run arclang_validate on the model".to_string(),
                ];
                RenderedReport::from_report(
                    artifact_report("Requirement generated", &artifact, steps),
                    false,
                )
            }

            ToolRequest::GenerateComponent(c) => {
                let artifact = self
                    .generation
                    .generate(&GenerationRequest::Component(c.clone()))
                    .await;
                let steps = vec![
                    "Add the block to the matching architecture section of a .arc model"
                        .to_string(),
                    "Trace the component to its requirements, then run arclang_validate"
                        .to_string(),
                ];
                RenderedReport::from_report(
                    artifact_report("Component generated", &artifact, steps),
                    false,
                )
            }

            ToolRequest::SuggestArchitecture(a) => {
                let artifact = self
                    .generation
                    .generate(&GenerationRequest::Architecture(a.clone()))
                    .await;
                let steps = vec![
                    "Generate each component with arclang_generate_component".to_string(),
                    "Run arclang_trace_analysis once the components are traced".to_string(),
                ];
                RenderedReport::from_report(
                    artifact_report("Architecture suggestion generated", &artifact, steps),
                    false,
                )
            }
        }
    }
}

fn model(model_path: &str) -> (String, String) {
    ("Model".to_string(), model_path.to_string())
}

fn fix_steps() -> Vec<String> {
    vec![
        "Fix the errors listed above".to_string(),
        "Run arclang_validate for detailed diagnostics".to_string(),
    ]
}

/// `<operation>: SUCCESS|FAILED` report for a compiler outcome.
fn render(
    operation: &str,
    context: Vec<(String, String)>,
    outcome: &OperationOutcome,
    steps: Vec<String>,
) -> RenderedReport {
    let status = if outcome.success { "SUCCESS" } else { "FAILED" };
    RenderedReport::from_report(
        outcome_report(format!("{}: {}", operation, status), context, outcome, steps),
        !outcome.success,
    )
}
