//! Scraping of the compiler's labelled text output
//!
//! Every function here is total: any input, including the empty string,
//! produces a value. Unrecognized lines are ignored and malformed values are
//! skipped, so a partial result is returned rather than none at all. The
//! label matching is deliberately permissive; [`MetricsScan::recognized`] lets
//! callers notice when the compiler's output format drifts.

use super::outcome::{Hazard, IssueSeverity, ParsedMetrics, SafetyIssue, TraceGaps};
use regex::Regex;
use std::sync::LazyLock;

/// Metric labels, in the order they are tried against each line.
const METRIC_LABELS: &[&str] = &[
    "Requirements:",
    "Components:",
    "Functions:",
    "Traces:",
    "Actors:",
    "Nodes:",
    "ASIL-A:",
    "ASIL-B:",
    "ASIL-C:",
    "ASIL-D:",
];

static COVERAGE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\.\d+)?\s*%?\s*$").expect("coverage regex is valid"));

static UNTRACED_REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Requirement\s+(\S+)\s+has no downstream traces").expect("gap regex is valid")
});

static UNTRACED_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Component\s+(\S+)\s+has no upstream traces").expect("gap regex is valid")
});

static SAFETY_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(ERROR|WARNING)\]\s*([^:]+?)\s*:\s*(.*?)\s*$")
        .expect("safety issue regex is valid")
});

static HAZARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Hazard\s+([A-Za-z0-9_.\-]+)\s*:\s*(.*)$").expect("hazard regex is valid")
});

/// Metrics plus the labels that actually matched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsScan {
    pub metrics: ParsedMetrics,
    pub recognized: Vec<&'static str>,
}

/// Trailing integer after the last `:` on the line.
fn trailing_integer(line: &str) -> Option<u64> {
    line.rsplit(':').next()?.trim().parse().ok()
}

/// Scan labelled count lines (`Requirements: 12`, `ASIL-D: 1`, ...).
///
/// The first label found on a line wins. Repeated labels overwrite earlier
/// values, matching the compiler's habit of printing a summary last.
pub fn scan_metrics(output: &str) -> MetricsScan {
    let mut scan = MetricsScan::default();
    let mut coverage_seen = false;

    for line in output.lines() {
        if !coverage_seen && let Some(coverage) = coverage_on_line(line) {
            scan.metrics.coverage = coverage;
            coverage_seen = true;
            scan.recognized.push("Coverage:");
            continue;
        }

        let Some(label) = METRIC_LABELS.iter().find(|l| line.contains(**l)) else {
            continue;
        };
        let Some(value) = trailing_integer(line) else {
            continue;
        };

        let m = &mut scan.metrics;
        let slot = match *label {
            "Requirements:" => &mut m.requirements,
            "Components:" => &mut m.components,
            "Functions:" => &mut m.functions,
            "Traces:" => &mut m.traces,
            "Actors:" => &mut m.actors,
            "Nodes:" => &mut m.nodes,
            "ASIL-A:" => &mut m.asil_a,
            "ASIL-B:" => &mut m.asil_b,
            "ASIL-C:" => &mut m.asil_c,
            _ => &mut m.asil_d,
        };
        *slot = value;
        if !scan.recognized.contains(label) {
            scan.recognized.push(*label);
        }
    }

    scan
}

pub fn parse_metrics(output: &str) -> ParsedMetrics {
    scan_metrics(output).metrics
}

fn coverage_on_line(line: &str) -> Option<u32> {
    let lower = line.to_ascii_lowercase();
    if !lower.contains("coverage:") && !line.contains("Traceability:") {
        return None;
    }
    let caps = COVERAGE_VALUE.captures(line)?;
    // Saturate absurd values; clamping to 100 happens in the facade.
    let digits = caps.get(1)?.as_str();
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Coverage percentage from the first coverage-bearing line; decimals are
/// truncated and a missing line yields 0.
pub fn parse_coverage(output: &str) -> u32 {
    output.lines().find_map(coverage_on_line).unwrap_or(0)
}

/// Lines containing `warning:` (case-insensitive).
pub fn parse_warnings(output: &str) -> Vec<String> {
    lines_containing(output, "warning:")
}

/// Lines containing `error:` (case-insensitive).
pub fn parse_errors(output: &str) -> Vec<String> {
    lines_containing(output, "error:")
}

fn lines_containing(output: &str, needle: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.to_lowercase().contains(needle))
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Non-empty lines, trimmed.
pub fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_gaps(output: &str) -> TraceGaps {
    let mut gaps = TraceGaps::default();
    for line in output.lines() {
        if let Some(caps) = UNTRACED_REQUIREMENT.captures(line) {
            gaps.untraced_requirements.push(caps[1].to_string());
        } else if let Some(caps) = UNTRACED_COMPONENT.captures(line) {
            gaps.untraced_components.push(caps[1].to_string());
        }
    }
    gaps
}

/// `[ERROR] title: description` / `[WARNING] title: description`
pub fn parse_safety_issues(output: &str) -> Vec<SafetyIssue> {
    output
        .lines()
        .filter_map(|line| {
            let caps = SAFETY_ISSUE.captures(line)?;
            let severity = match &caps[1] {
                "ERROR" => IssueSeverity::Error,
                _ => IssueSeverity::Warning,
            };
            Some(SafetyIssue {
                severity,
                title: caps[2].to_string(),
                description: caps[3].to_string(),
            })
        })
        .collect()
}

/// `Hazard H-1: description | severity: S3 | exposure: E4 | ...`
///
/// Attributes are optional and may come in any order; unknown ones are ignored.
pub fn parse_hazards(output: &str) -> Vec<Hazard> {
    output
        .lines()
        .filter_map(|line| {
            let caps = HAZARD.captures(line)?;
            let mut parts = caps[2].split('|');
            let mut hazard = Hazard {
                id: caps[1].to_string(),
                description: parts.next().unwrap_or_default().trim().to_string(),
                ..Hazard::default()
            };
            for part in parts {
                let Some((key, value)) = part.split_once(':') else {
                    continue;
                };
                let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                match key.trim().to_ascii_lowercase().as_str() {
                    "severity" => hazard.severity = value,
                    "exposure" => hazard.exposure = value,
                    "controllability" => hazard.controllability = value,
                    "asil" => hazard.asil = value,
                    _ => {}
                }
            }
            Some(hazard)
        })
        .collect()
}

/// Change count from a `Changes:` line, 0 when absent.
pub fn parse_changes(output: &str) -> u64 {
    output
        .lines()
        .filter(|line| line.contains("Changes:"))
        .find_map(trailing_integer)
        .unwrap_or(0)
}

/// Artifact path from an `Output:` line.
pub fn parse_output_path(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (_, rest) = line.split_once("Output:")?;
        Some(rest.trim().to_string()).filter(|p| !p.is_empty())
    })
}
