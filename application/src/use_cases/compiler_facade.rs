//! Compiler facade
//!
//! Maps each compiler operation to exactly one invocation of the compiler
//! binary, parses what comes back and normalizes it into an
//! [`OperationOutcome`].
//!
//! Exit status 0 means success. On success stdout is parsed for metrics and
//! operation-specific findings; on failure stderr becomes the error list.

use crate::config::CompilerSettings;
use crate::ports::process_runner::ProcessRunner;
use arclang_mcp_domain::compiler::parsing::{
    non_empty_lines, parse_changes, parse_coverage, parse_errors, parse_gaps, parse_hazards,
    parse_metrics, parse_output_path, parse_safety_issues, parse_warnings, scan_metrics,
};
use arclang_mcp_domain::{
    CompilerCommand, ExportFormat, OperationOutcome, OutcomeDetails, ParsedMetrics, PlmSystem,
    ProcessResult, SafetyStandard, SyncOperation, TraceGaps,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound of a coverage percentage
const MAX_COVERAGE: u32 = 100;

#[derive(Clone)]
pub struct CompilerFacade {
    runner: Arc<dyn ProcessRunner>,
    settings: CompilerSettings,
}

impl CompilerFacade {
    pub fn new(runner: Arc<dyn ProcessRunner>, settings: CompilerSettings) -> Self {
        Self { runner, settings }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Resolve a model path against the workspace root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.settings.workspace_root.join(path)
        }
    }

    /// Default export target: `<workspace>/<build_dir>/<stem>.<ext>`
    pub fn default_export_path(&self, model: &Path, format: ExportFormat) -> PathBuf {
        let stem = model
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        self.settings
            .workspace_root
            .join(&self.settings.build_dir)
            .join(format!("{}.{}", stem, format.extension()))
    }

    // ==================== Operations ====================

    pub async fn compile(&self, model_path: &str, validate: bool, optimize: bool) -> OperationOutcome {
        let model = self.resolve(model_path);
        let command = CompilerCommand::Build {
            model: model.clone(),
            validate,
            optimize,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        let output = parse_output_path(&result.stdout)
            .map(|p| self.resolve(&p))
            .unwrap_or_else(|| model.with_extension("xml"));

        OperationOutcome::succeeded()
            .with_metrics(self.scan(&command, &result.stdout))
            .with_warnings(collect_warnings(&result))
            .with_output_path(output)
    }

    pub async fn validate(&self, model_path: &str, strict: bool) -> OperationOutcome {
        let command = CompilerCommand::Check {
            model: self.resolve(model_path),
            strict,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        OperationOutcome::succeeded()
            .with_metrics(parse_metrics(&result.stdout))
            .with_warnings(collect_warnings(&result))
    }

    pub async fn trace_analysis(
        &self,
        model_path: &str,
        show_gaps: bool,
        matrix: bool,
    ) -> OperationOutcome {
        let command = CompilerCommand::Trace {
            model: self.resolve(model_path),
            gaps: show_gaps,
            matrix,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        let coverage = parse_coverage(&result.stdout).min(MAX_COVERAGE);
        let gaps = if show_gaps {
            parse_gaps(&result.stdout)
        } else {
            TraceGaps::default()
        };
        let metrics = ParsedMetrics {
            coverage,
            ..self.scan(&command, &result.stdout)
        };

        OperationOutcome::succeeded()
            .with_metrics(metrics)
            .with_warnings(collect_warnings(&result))
            .with_details(OutcomeDetails::Trace { coverage, gaps })
    }

    pub async fn export_diagram(
        &self,
        model_path: &str,
        format: ExportFormat,
        output_path: Option<&str>,
    ) -> OperationOutcome {
        let model = self.resolve(model_path);
        let output = match output_path {
            Some(path) => self.resolve(path),
            None => self.default_export_path(&model, format),
        };

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!(path = %parent.display(), error = %e, "Failed to create export directory");
            return OperationOutcome::failed(
                vec![format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                )],
                "Failed to create output directory",
            );
        }

        let command = CompilerCommand::Export {
            model,
            output: output.clone(),
            format,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        OperationOutcome::succeeded()
            .with_warnings(collect_warnings(&result))
            .with_output_path(output)
    }

    pub async fn info(&self, model_path: &str, detailed: bool) -> OperationOutcome {
        let model = self.resolve(model_path);
        let command = CompilerCommand::Info {
            model: model.clone(),
            detailed,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        let outcome = OperationOutcome::succeeded()
            .with_metrics(self.scan(&command, &result.stdout))
            .with_warnings(collect_warnings(&result));

        match tokio::fs::metadata(&model).await {
            Ok(meta) => outcome.with_details(OutcomeDetails::Info {
                size_kb: meta.len() as f64 / 1024.0,
            }),
            Err(e) => {
                debug!(path = %model.display(), error = %e, "Model size unavailable");
                outcome
            }
        }
    }

    pub async fn safety_check(
        &self,
        model_path: &str,
        standard: SafetyStandard,
        generate_report: bool,
    ) -> OperationOutcome {
        let command = CompilerCommand::Safety {
            model: self.resolve(model_path),
            standard,
            report: generate_report,
        };
        let result = self.invoke(&command).await;

        // The compiler exits non-zero when it finds errors, so findings are
        // collected from both streams either way.
        let mut issues = parse_safety_issues(&result.stdout);
        issues.extend(parse_safety_issues(&result.stderr));
        let details = OutcomeDetails::Safety { issues };

        if !result.is_success() {
            return failure(&command, &result).with_details(details);
        }

        OperationOutcome::succeeded()
            .with_metrics(parse_metrics(&result.stdout))
            .with_warnings(collect_warnings(&result))
            .with_details(details)
    }

    pub async fn hazard_analysis(&self, model_path: &str, standard: SafetyStandard) -> OperationOutcome {
        let command = CompilerCommand::Hara {
            model: self.resolve(model_path),
            standard,
        };
        let result = self.invoke(&command).await;
        let details = OutcomeDetails::Hazards {
            hazards: parse_hazards(&result.stdout),
        };

        if !result.is_success() {
            return failure(&command, &result).with_details(details);
        }

        OperationOutcome::succeeded()
            .with_warnings(collect_warnings(&result))
            .with_details(details)
    }

    /// The compiler has no merge subcommand; nothing is spawned.
    pub async fn semantic_merge(
        &self,
        base_path: &str,
        ours_path: &str,
        theirs_path: &str,
    ) -> OperationOutcome {
        info!(
            base = base_path,
            ours = ours_path,
            theirs = theirs_path,
            "Semantic merge requested but not supported"
        );
        OperationOutcome::failed(
            vec![format!(
                "Semantic merge is not available: the arclang compiler has no merge command. \
                 Merge {} and {} against {} manually, then run arclang_validate.",
                ours_path, theirs_path, base_path
            )],
            "Semantic merge is not available",
        )
    }

    pub async fn plm_sync(
        &self,
        model_path: &str,
        system: PlmSystem,
        operation: SyncOperation,
    ) -> OperationOutcome {
        if !self.settings.plm_enabled {
            info!(system = %system, "PLM sync requested while disabled");
            return OperationOutcome::failed(
                vec![
                    "PLM integration is disabled; set `enabled = true` in the [plm] section to use arclang_plm_sync"
                        .to_string(),
                ],
                "PLM integration is disabled",
            );
        }

        let command = CompilerCommand::Plm {
            model: self.resolve(model_path),
            system,
            operation,
        };
        let result = self.invoke(&command).await;
        if !result.is_success() {
            return failure(&command, &result);
        }

        OperationOutcome::succeeded()
            .with_warnings(collect_warnings(&result))
            .with_details(OutcomeDetails::Sync {
                changes: parse_changes(&result.stdout),
            })
    }

    // ==================== Helpers ====================

    async fn invoke(&self, command: &CompilerCommand) -> ProcessResult {
        let args = command.to_args();
        debug!(
            command = %self.settings.binary,
            subcommand = command.subcommand(),
            ?args,
            "Invoking compiler"
        );

        let result = self
            .runner
            .run(&self.settings.binary, &args, self.settings.timeout)
            .await;

        info!(
            subcommand = command.subcommand(),
            exit_status = result.exit_status,
            termination = ?result.termination,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Compiler finished"
        );
        result
    }

    /// Parse metrics and log when nothing in non-empty output was recognized.
    fn scan(&self, command: &CompilerCommand, stdout: &str) -> ParsedMetrics {
        let scan = scan_metrics(stdout);
        if scan.recognized.is_empty() && !stdout.trim().is_empty() {
            warn!(
                subcommand = command.subcommand(),
                "Compiler output contained no recognized metric labels"
            );
        }
        scan.metrics
    }
}

/// Warnings from both streams, stdout first.
fn collect_warnings(result: &ProcessResult) -> Vec<String> {
    let mut warnings = parse_warnings(&result.stdout);
    warnings.extend(parse_warnings(&result.stderr));
    warnings
}

/// Error list for a non-successful invocation: `error:` lines of stderr,
/// else every non-empty stderr line, else a synthesized status message.
fn failure(command: &CompilerCommand, result: &ProcessResult) -> OperationOutcome {
    let mut errors = parse_errors(&result.stderr);
    if errors.is_empty() {
        errors = non_empty_lines(&result.stderr);
    }
    let warnings = parse_warnings(&result.stderr);

    OperationOutcome::failed(
        errors,
        format!(
            "arclang {} exited with status {}",
            command.subcommand(),
            result.exit_status
        ),
    )
    .with_warnings(warnings)
}
