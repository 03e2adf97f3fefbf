//! Rich terminal output using oxc_diagnostics.

use super::source_map;
use crate::linter::LintResult;
use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use std::sync::Arc;

/// Format lint results as rich terminal output
pub fn format_text(results: &[LintResult], sources: &[(String, String)]) -> String {
    let mut output = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());
    let source_map = source_map(sources);

    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        let source = source_map
            .get(result.filename.as_str())
            .copied()
            .unwrap_or("");
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let report = diagnostic
                .clone()
                .into_oxc_diagnostic()
                .with_source_code(Arc::clone(&named_source));

            let mut buf = String::new();
            if handler.render_report(&mut buf, report.as_ref()).is_ok() {
                output.push_str(&buf);
                output.push('\n');
            }
        }
    }

    output
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let plural = |count: usize| if count == 1 { "" } else { "s" };
    let mut parts = Vec::with_capacity(2);

    if error_count > 0 {
        parts.push(format!("{error_count} error{}", plural(error_count)));
    }
    if warning_count > 0 {
        parts.push(format!("{warning_count} warning{}", plural(warning_count)));
    }

    if parts.is_empty() {
        format!("No problems found in {file_count} file{}", plural(file_count))
    } else {
        format!(
            "{} in {file_count} file{}",
            parts.join(", "),
            plural(file_count)
        )
    }
}
