//! Text reports returned to the client
//!
//! Every tool family renders the same fixed skeleton so agents can rely on
//! its shape:
//!
//! ```text
//! <Status line>
//! <Label>: <value>          (context lines, optional)
//!
//! Metrics: / Artifact:
//! Findings:                 (compiler families only)
//! Warnings:
//! Errors:
//! Next steps:
//! ```
//!
//! Empty sections print `(none)`. Long lists are capped and end with a
//! `... and N more` line.

use arclang_mcp_domain::{
    GeneratedArtifact, Hazard, IssueSeverity, OperationOutcome, OutcomeDetails, ParsedMetrics,
    SafetyIssue,
};

/// Warnings shown before the list is cut
pub const WARNING_CAP: usize = 5;
/// Errors shown before the list is cut
pub const ERROR_CAP: usize = 10;
/// Gaps, issues and hazards shown before the list is cut
pub const FINDING_CAP: usize = 10;

/// Coverage grade used by the trace report
pub fn coverage_grade(coverage: u32) -> &'static str {
    match coverage {
        90.. => "good",
        70..=89 => "moderate",
        _ => "low",
    }
}

#[derive(Debug, Clone)]
enum Body {
    Items(Vec<String>),
    Block(String),
    Steps(Vec<String>),
}

#[derive(Debug, Clone)]
struct Section {
    title: &'static str,
    body: Body,
}

/// Builder for one report
#[derive(Debug, Clone)]
pub struct Report {
    status: String,
    context: Vec<(String, String)>,
    sections: Vec<Section>,
}

impl Report {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            context: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn context(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((label.into(), value.into()));
        self
    }

    /// Bulleted list, cut after `cap` items.
    pub fn items(mut self, title: &'static str, items: &[String], cap: usize) -> Self {
        let mut lines: Vec<String> = items.iter().take(cap).cloned().collect();
        if items.len() > cap {
            lines.push(format!("... and {} more", items.len() - cap));
        }
        self.sections.push(Section {
            title,
            body: Body::Items(lines),
        });
        self
    }

    /// Verbatim text block.
    pub fn block(mut self, title: &'static str, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            title,
            body: Body::Block(text.into()),
        });
        self
    }

    pub fn next_steps(mut self, steps: Vec<String>) -> Self {
        self.sections.push(Section {
            title: "Next steps",
            body: Body::Steps(steps),
        });
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.status);
        out.push('\n');
        for (label, value) in &self.context {
            out.push_str(&format!("{}: {}\n", label, value));
        }

        for section in &self.sections {
            out.push('\n');
            out.push_str(section.title);
            out.push_str(":\n");
            match &section.body {
                Body::Items(lines) | Body::Steps(lines) if lines.is_empty() => {
                    out.push_str("  (none)\n");
                }
                Body::Items(lines) => {
                    for line in lines {
                        out.push_str(&format!("  - {}\n", line));
                    }
                }
                Body::Steps(lines) => {
                    for (i, line) in lines.iter().enumerate() {
                        out.push_str(&format!("  {}. {}\n", i + 1, line));
                    }
                }
                Body::Block(text) if text.trim().is_empty() => out.push_str("  (none)\n"),
                Body::Block(text) => {
                    out.push_str(text.trim_end());
                    out.push('\n');
                }
            }
        }

        out.trim_end().to_string()
    }
}

// ==================== Section builders ====================

/// Metric lines in a fixed order; ASIL counts only when any are present.
pub fn metric_lines(metrics: Option<&ParsedMetrics>) -> Vec<String> {
    let Some(m) = metrics else {
        return Vec::new();
    };
    let mut lines = vec![
        format!("Requirements: {}", m.requirements),
        format!("Components: {}", m.components),
        format!("Functions: {}", m.functions),
        format!("Traces: {}", m.traces),
        format!("Actors: {}", m.actors),
        format!("Nodes: {}", m.nodes),
    ];
    if m.has_safety_counts() {
        lines.push(format!("ASIL-A: {}", m.asil_a));
        lines.push(format!("ASIL-B: {}", m.asil_b));
        lines.push(format!("ASIL-C: {}", m.asil_c));
        lines.push(format!("ASIL-D: {}", m.asil_d));
    }
    lines
}

fn issue_line(issue: &SafetyIssue) -> String {
    let tag = match issue.severity {
        IssueSeverity::Error => "ERROR",
        IssueSeverity::Warning => "WARNING",
    };
    format!("[{}] {}: {}", tag, issue.title, issue.description)
}

fn hazard_line(hazard: &Hazard) -> String {
    let attributes: Vec<String> = [
        ("severity", &hazard.severity),
        ("exposure", &hazard.exposure),
        ("controllability", &hazard.controllability),
        ("asil", &hazard.asil),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{} {}", label, v)))
    .collect();

    if attributes.is_empty() {
        format!("{}: {}", hazard.id, hazard.description)
    } else {
        format!(
            "{}: {} ({})",
            hazard.id,
            hazard.description,
            attributes.join(", ")
        )
    }
}

/// Finding lines derived from operation-specific details.
pub fn finding_lines(details: &OutcomeDetails) -> Vec<String> {
    match details {
        OutcomeDetails::None | OutcomeDetails::Info { .. } => Vec::new(),
        OutcomeDetails::Trace { gaps, .. } => gaps
            .untraced_requirements
            .iter()
            .map(|id| format!("Requirement {} has no downstream traces", id))
            .chain(
                gaps.untraced_components
                    .iter()
                    .map(|id| format!("Component {} has no upstream traces", id)),
            )
            .collect(),
        OutcomeDetails::Safety { issues } => issues.iter().map(issue_line).collect(),
        OutcomeDetails::Hazards { hazards } => hazards.iter().map(hazard_line).collect(),
        OutcomeDetails::Sync { changes } => vec![format!("Changes: {}", changes)],
    }
}

/// Standard compiler-family report around a status line and context.
pub fn outcome_report(
    status: impl Into<String>,
    context: Vec<(String, String)>,
    outcome: &OperationOutcome,
    steps: Vec<String>,
) -> Report {
    let mut report = Report::new(status);
    for (label, value) in context {
        report = report.context(label, value);
    }
    report
        .items("Metrics", &metric_lines(outcome.metrics.as_ref()), usize::MAX)
        .items("Findings", &finding_lines(&outcome.details), FINDING_CAP)
        .items("Warnings", &outcome.warnings, WARNING_CAP)
        .items("Errors", &outcome.errors, ERROR_CAP)
        .next_steps(steps)
}

/// Generation-family report; fallback output is flagged as a placeholder.
pub fn artifact_report(
    status: impl Into<String>,
    artifact: &GeneratedArtifact,
    steps: Vec<String>,
) -> Report {
    let mut report = Report::new(status).context("Mode", artifact.mode.as_str());
    if let Some(id) = &artifact.identifier {
        report = report.context("Identifier", id.clone());
    }

    let warnings = if artifact.is_fallback() {
        vec![
            "No text backend was available; this is a template placeholder. Review and refine it before use."
                .to_string(),
        ]
    } else {
        Vec::new()
    };

    report
        .block("Artifact", artifact.content.clone())
        .items("Warnings", &warnings, WARNING_CAP)
        .items("Errors", &[], ERROR_CAP)
        .next_steps(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arclang_mcp_domain::{ArtifactKind, TraceGaps};

    #[test]
    fn test_coverage_grade_boundaries() {
        assert_eq!(coverage_grade(100), "good");
        assert_eq!(coverage_grade(90), "good");
        assert_eq!(coverage_grade(89), "moderate");
        assert_eq!(coverage_grade(70), "moderate");
        assert_eq!(coverage_grade(69), "low");
        assert_eq!(coverage_grade(0), "low");
    }

    #[test]
    fn test_empty_sections_render_none() {
        let text = Report::new("Validation: PASSED")
            .items("Warnings", &[], WARNING_CAP)
            .next_steps(Vec::new())
            .render();
        assert_eq!(text, "Validation: PASSED\n\nWarnings:\n  (none)\n\nNext steps:\n  (none)");
    }

    #[test]
    fn test_caps_add_more_line() {
        let warnings: Vec<String> = (1..=8).map(|i| format!("warning: w{}", i)).collect();
        let text = Report::new("x").items("Warnings", &warnings, WARNING_CAP).render();
        assert!(text.contains("  - warning: w5\n"));
        assert!(!text.contains("w6"));
        assert!(text.ends_with("  - ... and 3 more"));
    }

    #[test]
    fn test_outcome_report_sections_in_order() {
        let outcome = OperationOutcome::succeeded()
            .with_metrics(ParsedMetrics {
                requirements: 12,
                components: 5,
                ..ParsedMetrics::default()
            })
            .with_details(OutcomeDetails::Trace {
                coverage: 50,
                gaps: TraceGaps {
                    untraced_requirements: vec!["REQ-1".to_string()],
                    untraced_components: Vec::new(),
                },
            });
        let text = outcome_report(
            "Traceability: SUCCESS",
            vec![("Model".to_string(), "m.arc".to_string())],
            &outcome,
            vec!["Add traces".to_string()],
        )
        .render();

        let order: Vec<usize> = ["Metrics:", "Findings:", "Warnings:", "Errors:", "Next steps:"]
            .iter()
            .map(|s| text.find(s).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with("Traceability: SUCCESS\nModel: m.arc\n"));
        assert!(text.contains("  - Requirements: 12\n"));
        assert!(text.contains("  - Requirement REQ-1 has no downstream traces\n"));
        assert!(text.contains("  1. Add traces"));
        assert!(!text.contains("ASIL-A"));
    }

    #[test]
    fn test_hazard_line_attributes() {
        let hazard = Hazard {
            id: "H-1".to_string(),
            description: "Loss of braking".to_string(),
            severity: Some("S3".to_string()),
            asil: Some("ASIL_D".to_string()),
            ..Hazard::default()
        };
        assert_eq!(
            hazard_line(&hazard),
            "H-1: Loss of braking (severity S3, asil ASIL_D)"
        );
    }

    #[test]
    fn test_artifact_report_flags_fallback() {
        let artifact = GeneratedArtifact::fallback(ArtifactKind::Requirement, "req X \"t\" {}")
            .with_identifier("REQ-X-001");
        let text = artifact_report("Requirement generated", &artifact, Vec::new()).render();

        assert!(text.contains("Mode: fallback-template\n"));
        assert!(text.contains("Identifier: REQ-X-001\n"));
        assert!(text.contains("Artifact:\nreq X \"t\" {}\n"));
        assert!(text.contains("template placeholder"));
    }
}
