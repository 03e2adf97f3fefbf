//! Diagnostic types for lacquer_patina linter.
//!
//! Uses `CompactString` for efficient small string storage.

use lacquer_carton::CompactString;
use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::Serialize;

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single text replacement in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    #[serde(rename = "newText")]
    pub new_text: String,
}

impl TextEdit {
    #[inline]
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// Insert `text` at `offset`
    #[inline]
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(offset, offset, text)
    }

    /// Replace `start..end` with `text`
    #[inline]
    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self::new(start, end, text)
    }
}

/// A fix for a diagnostic, containing one or more text edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Description of the fix
    pub message: String,
    /// Text edits to apply
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Create a new fix with a single edit
    #[inline]
    pub fn new(message: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            message: message.into(),
            edits: vec![edit],
        }
    }

    /// Byte range covered by all edits of this fix
    pub fn range(&self) -> Option<(u32, u32)> {
        let start = self.edits.iter().map(|edit| edit.start).min()?;
        let end = self.edits.iter().map(|edit| edit.end).max()?;
        Some((start, end))
    }

    /// Apply the fix to a source string
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        // Apply edits in reverse order to preserve offsets
        let mut edits = self.edits.clone();
        edits.sort_by(|a, b| b.start.cmp(&a.start));

        for edit in edits {
            let start = edit.start as usize;
            let end = edit.end as usize;
            if start <= end && end <= result.len() {
                result.replace_range(start..end, &edit.new_text);
            }
        }
        result
    }
}

/// A lint diagnostic with rich information for display.
///
/// Uses `CompactString` for message storage - strings up to 24 bytes
/// are stored inline without heap allocation.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Identifier of the message template (e.g. `missingElementKey`)
    pub message_id: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Rendered message
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Auto-fix for this diagnostic (optional)
    pub fix: Option<Fix>,
}

impl LintDiagnostic {
    /// Create a new diagnostic
    #[inline]
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            message_id: "",
            severity,
            message: message.into(),
            start,
            end,
            fix: None,
        }
    }

    /// Create a new error diagnostic
    #[inline]
    pub fn error(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Error, message, start, end)
    }

    /// Create a new warning diagnostic
    #[inline]
    pub fn warn(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Warning, message, start, end)
    }

    #[inline]
    pub fn with_message_id(mut self, message_id: &'static str) -> Self {
        self.message_id = message_id;
        self
    }

    /// Add a fix for this diagnostic
    #[inline]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Check if this diagnostic has a fix
    #[inline]
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    /// Convert to OxcDiagnostic for rich rendering
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let message = format!("{}: {}", self.rule_name, self.message);
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(message),
            Severity::Warning => OxcDiagnostic::warn(message),
        };

        diag = diag.with_label(Span::new(self.start, self.end));

        // The fix description doubles as help text
        if let Some(fix) = self.fix {
            diag = diag.with_help(fix.message);
        }

        diag
    }
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn add(&mut self, diagnostic: &LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_apply_multiple_edits() {
        let fix = Fix {
            message: "wrap".to_string(),
            edits: vec![TextEdit::insert(0, "("), TextEdit::insert(3, ")")],
        };
        assert_eq!(fix.apply("a+b"), "(a+b)");
        assert_eq!(fix.range(), Some((0, 3)));
    }

    #[test]
    fn test_fix_out_of_range_edit_is_ignored() {
        let fix = Fix::new("bad", TextEdit::replace(2, 10, "x"));
        assert_eq!(fix.apply("abc"), "abc");
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = LintSummary::default();
        summary.add(&LintDiagnostic::error("r", "m", 0, 1));
        summary.add(&LintDiagnostic::warn("r", "m", 0, 1));
        summary.add(&LintDiagnostic::warn("r", "m", 0, 1));
        assert!(summary.has_errors());
        assert_eq!((summary.error_count, summary.warning_count), (1, 2));
    }
}
