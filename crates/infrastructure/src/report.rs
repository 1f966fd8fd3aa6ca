//! Run report rendering.

use std::fmt::Write as _;

use harness_domain::{CaseReport, FailureReason, RunReport};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for report rendering.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders a report as JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, ReportError> {
    to_json_pretty(report)
}

fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Renders a report for the terminal.
///
/// One line per case, failure details indented beneath it, and a summary.
/// Setup failures are tagged so dependent failures can be read as
/// consequences.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "run {} started {}",
        report.run_id,
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for suite in &report.suites {
        let _ = writeln!(
            out,
            "\nsuite {} ({} cases, {}ms)",
            suite.name, suite.total, suite.duration_ms
        );
        for case in &suite.cases {
            write_case(&mut out, case);
        }
    }

    let _ = writeln!(
        out,
        "\n{} passed, {} failed ({} API, {} harness), {} total ({:.1}%) in {}ms",
        report.passed(),
        report.failed(),
        report.api_failures(),
        report.harness_failures(),
        report.total(),
        report.pass_rate(),
        report.duration_ms
    );
    out
}

fn write_case(out: &mut String, case: &CaseReport) {
    let tag = if case.is_setup_failure() { " [setup]" } else { "" };
    let _ = writeln!(
        out,
        "  {:<4}  {} ({}ms){tag}",
        case.state.label(),
        case.name,
        case.duration_ms
    );

    match case.reason() {
        None => {}
        Some(FailureReason::Assertions { failures }) => {
            for record in failures {
                let _ = writeln!(out, "        {record}");
            }
        }
        Some(reason) => {
            let _ = writeln!(out, "        {reason}");
        }
    }
}
