//! Argument vectors for the compiler binary
//!
//! The binary is always invoked as `<binary> <subcommand> <path> [flags]`
//! (`plm` puts the operation before the path). Vectors are passed to the
//! process runner as-is, never through a shell.

use crate::modeling::{ExportFormat, PlmSystem, SafetyStandard, SyncOperation};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerCommand {
    Build {
        model: PathBuf,
        validate: bool,
        optimize: bool,
    },
    Check {
        model: PathBuf,
        strict: bool,
    },
    Trace {
        model: PathBuf,
        gaps: bool,
        matrix: bool,
    },
    Export {
        model: PathBuf,
        output: PathBuf,
        format: ExportFormat,
    },
    Info {
        model: PathBuf,
        detailed: bool,
    },
    Safety {
        model: PathBuf,
        standard: SafetyStandard,
        report: bool,
    },
    Hara {
        model: PathBuf,
        standard: SafetyStandard,
    },
    Plm {
        model: PathBuf,
        system: PlmSystem,
        operation: SyncOperation,
    },
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl CompilerCommand {
    pub fn subcommand(&self) -> &'static str {
        match self {
            CompilerCommand::Build { .. } => "build",
            CompilerCommand::Check { .. } => "check",
            CompilerCommand::Trace { .. } => "trace",
            CompilerCommand::Export { .. } => "export",
            CompilerCommand::Info { .. } => "info",
            CompilerCommand::Safety { .. } | CompilerCommand::Hara { .. } => "safety",
            CompilerCommand::Plm { .. } => "plm",
        }
    }

    pub fn model(&self) -> &Path {
        match self {
            CompilerCommand::Build { model, .. }
            | CompilerCommand::Check { model, .. }
            | CompilerCommand::Trace { model, .. }
            | CompilerCommand::Export { model, .. }
            | CompilerCommand::Info { model, .. }
            | CompilerCommand::Safety { model, .. }
            | CompilerCommand::Hara { model, .. }
            | CompilerCommand::Plm { model, .. } => model,
        }
    }

    /// Arguments following the binary name
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.subcommand().to_string()];
        let flag = |args: &mut Vec<String>, on: bool, name: &str| {
            if on {
                args.push(name.to_string());
            }
        };

        match self {
            CompilerCommand::Build {
                model,
                validate,
                optimize,
            } => {
                args.push(path_arg(model));
                flag(&mut args, *validate, "--validate");
                flag(&mut args, *optimize, "--optimize");
            }
            CompilerCommand::Check { model, strict } => {
                args.push(path_arg(model));
                args.push("--lint".to_string());
                flag(&mut args, *strict, "--strict");
            }
            CompilerCommand::Trace {
                model,
                gaps,
                matrix,
            } => {
                args.push(path_arg(model));
                args.push("--validate".to_string());
                flag(&mut args, *gaps, "--gaps");
                flag(&mut args, *matrix, "--matrix");
            }
            CompilerCommand::Export {
                model,
                output,
                format,
            } => {
                args.push(path_arg(model));
                args.extend([
                    "-o".to_string(),
                    path_arg(output),
                    "-f".to_string(),
                    format.to_string(),
                ]);
            }
            CompilerCommand::Info { model, detailed } => {
                args.push(path_arg(model));
                args.push("--metrics".to_string());
                flag(&mut args, *detailed, "--detailed");
            }
            CompilerCommand::Safety {
                model,
                standard,
                report,
            } => {
                args.push(path_arg(model));
                args.extend(["--standard".to_string(), standard.to_string()]);
                flag(&mut args, *report, "--report");
            }
            CompilerCommand::Hara { model, standard } => {
                args.push(path_arg(model));
                args.extend([
                    "--hara".to_string(),
                    "--standard".to_string(),
                    standard.to_string(),
                ]);
            }
            CompilerCommand::Plm {
                model,
                system,
                operation,
            } => {
                args.push(operation.to_string());
                args.push(path_arg(model));
                args.extend(["--system".to_string(), system.to_string()]);
            }
        }
        args
    }
}
