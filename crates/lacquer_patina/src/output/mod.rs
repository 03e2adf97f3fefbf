//! Output formatters for lint diagnostics.

mod text;

pub use text::*;

use crate::diagnostic::{Fix, Severity};
use crate::linter::LintResult;
use lacquer_carton::{FxHashMap, LineIndex};
use serde::Serialize;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with colors and code snippets
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// Format lint results according to the specified format
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_text(results, sources),
        OutputFormat::Json => format_json(results, sources),
    }
}

/// Map of filename to source text
pub(crate) fn source_map(sources: &[(String, String)]) -> FxHashMap<&str, &str> {
    sources
        .iter()
        .map(|(filename, source)| (filename.as_str(), source.as_str()))
        .collect()
}

/// JSON output structure for a single file
#[derive(Debug, Serialize)]
pub struct JsonFileResult {
    pub file: String,
    pub messages: Vec<JsonMessage>,
    #[serde(rename = "errorCount")]
    pub error_count: usize,
    #[serde(rename = "warningCount")]
    pub warning_count: usize,
    #[serde(rename = "fixableCount")]
    pub fixable_count: usize,
}

/// JSON output structure for a single message
#[derive(Debug, Serialize)]
pub struct JsonMessage {
    #[serde(rename = "ruleId")]
    pub rule_id: &'static str,
    #[serde(rename = "messageId")]
    pub message_id: &'static str,
    pub severity: u8,
    pub message: String,
    pub line: u32,
    pub column: u32,
    #[serde(rename = "endLine")]
    pub end_line: u32,
    #[serde(rename = "endColumn")]
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<JsonFix>,
}

/// A fix as one replacement of `range` with `text`
#[derive(Debug, Serialize)]
pub struct JsonFix {
    pub range: [u32; 2],
    pub text: String,
}

impl JsonFix {
    /// Collapse the edits of `fix` into one replacement
    fn new(fix: &Fix, source: &str) -> Option<Self> {
        let (start, end) = fix.range()?;
        if end as usize > source.len() {
            return None;
        }
        let fixed = fix.apply(source);
        let tail = source.len() - end as usize;
        let text = fixed.get(start as usize..fixed.len().checked_sub(tail)?)?;
        Some(Self {
            range: [start, end],
            text: text.to_string(),
        })
    }
}

/// Format results as JSON
fn format_json(results: &[LintResult], sources: &[(String, String)]) -> String {
    let source_map = source_map(sources);

    let json_results: Vec<JsonFileResult> = results
        .iter()
        .map(|r| {
            let source = source_map.get(r.filename.as_str()).copied().unwrap_or("");
            let index = LineIndex::new(source);
            JsonFileResult {
                file: r.filename.clone(),
                messages: r
                    .diagnostics
                    .iter()
                    .map(|d| {
                        let (line, column) = index.line_col(d.start);
                        let (end_line, end_column) = index.line_col(d.end);
                        JsonMessage {
                            rule_id: d.rule_name,
                            message_id: d.message_id,
                            severity: match d.severity {
                                Severity::Error => 2,
                                Severity::Warning => 1,
                            },
                            message: d.message.to_string(),
                            line,
                            column,
                            end_line,
                            end_column,
                            fix: d.fix.as_ref().and_then(|fix| JsonFix::new(fix, source)),
                        }
                    })
                    .collect(),
                error_count: r.error_count,
                warning_count: r.warning_count,
                fixable_count: r.diagnostics.iter().filter(|d| d.has_fix()).count(),
            }
        })
        .collect();

    serde_json::to_string_pretty(&json_results).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::TextEdit;

    #[test]
    fn test_json_fix_collapses_edits() {
        let source = "abcdef";
        let fix = Fix {
            message: "test".to_string(),
            edits: vec![TextEdit::insert(1, "X"), TextEdit::replace(3, 4, "Y")],
        };
        let json = JsonFix::new(&fix, source).unwrap();
        assert_eq!(json.range, [1, 4]);
        assert_eq!(json.text, "XbcY");
    }

    #[test]
    fn test_json_fix_out_of_range() {
        let fix = Fix::new("test", TextEdit::replace(2, 10, "x"));
        assert!(JsonFix::new(&fix, "abc").is_none());
    }
}
