//! Compiler domain
//!
//! The contract with the external `arclang` binary: how it is invoked
//! ([`CompilerCommand`]), what one invocation yields ([`ProcessResult`]), how
//! its text output is scraped ([`parsing`]), and the normalized
//! [`OperationOutcome`] handed back to the dispatcher.

pub mod command;
pub mod outcome;
pub mod parsing;
pub mod process;

pub use command::CompilerCommand;
pub use outcome::{
    Hazard, IssueSeverity, OperationOutcome, OutcomeDetails, ParsedMetrics, SafetyIssue,
    TraceGaps,
};
pub use parsing::MetricsScan;
pub use process::{ABNORMAL_EXIT, ProcessResult, Termination};
