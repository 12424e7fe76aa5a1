//! Normalized outcome of a compiler operation

use std::path::PathBuf;

/// Counts scraped from labelled compiler output. Absent metrics are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedMetrics {
    pub requirements: u64,
    pub components: u64,
    pub functions: u64,
    pub traces: u64,
    pub actors: u64,
    pub nodes: u64,
    /// Traceability coverage in percent
    pub coverage: u32,
    pub asil_a: u64,
    pub asil_b: u64,
    pub asil_c: u64,
    pub asil_d: u64,
}

impl ParsedMetrics {
    pub fn has_safety_counts(&self) -> bool {
        [self.asil_a, self.asil_b, self.asil_c, self.asil_d]
            .iter()
            .any(|n| *n > 0)
    }
}

/// Elements without traces in one direction or the other
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceGaps {
    pub untraced_requirements: Vec<String>,
    pub untraced_components: Vec<String>,
}

impl TraceGaps {
    pub fn is_empty(&self) -> bool {
        self.untraced_requirements.is_empty() && self.untraced_components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.untraced_requirements.len() + self.untraced_components.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One finding of a safety compliance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyIssue {
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
}

/// One row of a hazard analysis (HARA)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hazard {
    pub id: String,
    pub description: String,
    pub severity: Option<String>,
    pub exposure: Option<String>,
    pub controllability: Option<String>,
    pub asil: Option<String>,
}

/// Operation-specific payload of an outcome
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutcomeDetails {
    #[default]
    None,
    Trace { coverage: u32, gaps: TraceGaps },
    Safety { issues: Vec<SafetyIssue> },
    Hazards { hazards: Vec<Hazard> },
    Sync { changes: u64 },
    Info { size_kb: f64 },
}

/// Uniform success/failure record of one operation.
///
/// A failed outcome always carries at least one error; [`OperationOutcome::failed`]
/// enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    pub success: bool,
    pub metrics: Option<ParsedMetrics>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub output_path: Option<PathBuf>,
    pub details: OutcomeDetails,
}

impl OperationOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            metrics: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            output_path: None,
            details: OutcomeDetails::None,
        }
    }

    /// `fallback` is used when `errors` is empty.
    pub fn failed(mut errors: Vec<String>, fallback: impl Into<String>) -> Self {
        errors.retain(|e| !e.trim().is_empty());
        if errors.is_empty() {
            errors.push(fallback.into());
        }
        Self {
            success: false,
            metrics: None,
            warnings: Vec::new(),
            errors,
            output_path: None,
            details: OutcomeDetails::None,
        }
    }

    pub fn with_metrics(mut self, metrics: ParsedMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: OutcomeDetails) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_safety_counts_with_huge_values() {
        let metrics = ParsedMetrics {
            asil_a: u64::MAX,
            asil_b: 1,
            ..ParsedMetrics::default()
        };
        assert!(metrics.has_safety_counts());
        assert!(!ParsedMetrics::default().has_safety_counts());
    }

    #[test]
    fn test_failed_is_never_empty() {
        let outcome = OperationOutcome::failed(vec![], "compiler exited with status 3");
        assert!(!outcome.success);
        assert_eq!(outcome.errors, vec!["compiler exited with status 3"]);

        let outcome = OperationOutcome::failed(vec!["  ".to_string()], "fallback");
        assert_eq!(outcome.errors, vec!["fallback"]);
    }

    #[test]
    fn test_failed_keeps_given_errors() {
        let outcome = OperationOutcome::failed(vec!["error: boom".to_string()], "unused");
        assert_eq!(outcome.errors, vec!["error: boom"]);
    }

    #[test]
    fn test_trace_gaps_len() {
        let gaps = TraceGaps {
            untraced_requirements: vec!["REQ-1".to_string()],
            untraced_components: vec!["LC-1".to_string(), "LC-2".to_string()],
        };
        assert_eq!(gaps.len(), 3);
        assert!(!gaps.is_empty());
        assert!(TraceGaps::default().is_empty());
    }

    #[test]
    fn test_safety_counts() {
        let mut metrics = ParsedMetrics::default();
        assert!(!metrics.has_safety_counts());
        metrics.asil_c = 2;
        assert!(metrics.has_safety_counts());
    }
}
