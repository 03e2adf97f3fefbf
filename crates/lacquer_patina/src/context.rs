//! Lint context for rule execution.
//!
//! Holds everything a rule may consult while the visitor walks one source:
//! settings, pragmas, the callback-result table and the escape-hatch depth.

use crate::diagnostic::{Fix, LintDiagnostic, Severity};
use crate::rule::RuleMeta;
use crate::settings::{Pragmas, Settings};
use lacquer_carton::CompactString;
use lacquer_grain::{CallbackResults, FunctionKey};
use once_cell::sync::Lazy;
use oxc_ast::ast::Expression;
use oxc_span::Span;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("valid placeholder regex"));

/// Fill `{{name}}` placeholders from `data`; unknown placeholders stay as written.
pub fn render_message(template: &str, data: &[(&str, &str)]) -> CompactString {
    if data.is_empty() {
        return CompactString::from(template);
    }
    let rendered = PLACEHOLDER_RE.replace_all(template, |captures: &Captures| {
        let name = &captures[1];
        data.iter()
            .find(|(key, _)| *key == name)
            .map_or_else(|| captures[0].to_string(), |(_, value)| value.to_string())
    });
    CompactString::from(rendered.as_ref())
}

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    /// Shared settings
    settings: &'a Settings,
    /// JSX factory names in effect for this source
    pragmas: Pragmas,
    /// Collected diagnostics
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule (set by visitor before calling rule methods)
    current_rule: Option<&'static RuleMeta>,
    /// Severity the current rule reports with
    current_severity: Severity,
    /// Returned expressions of every closed function
    callbacks: CallbackResults<'a>,
    /// Nesting depth of `Children.toArray(...)` calls
    children_to_array_depth: u32,
}

impl<'a> LintContext<'a> {
    /// Initial capacity for diagnostics vector
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    /// Create a new lint context
    #[inline]
    pub fn new(source: &'a str, filename: &'a str, settings: &'a Settings, pragmas: Pragmas) -> Self {
        Self {
            source,
            filename,
            settings,
            pragmas,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: None,
            current_severity: Severity::Error,
            callbacks: CallbackResults::new(),
            children_to_array_depth: 0,
        }
    }

    /// Shared settings; the reference outlives the context borrow
    #[inline]
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    #[inline]
    pub fn pragmas(&self) -> &Pragmas {
        &self.pragmas
    }

    /// Set the rule subsequent reports are attributed to
    #[inline]
    pub fn enter_rule(&mut self, meta: &'static RuleMeta, severity: Severity) {
        self.current_rule = Some(meta);
        self.current_severity = severity;
    }

    #[inline]
    fn rule_name(&self) -> &'static str {
        self.current_rule.map_or("", |meta| meta.name)
    }

    /// Report a lint diagnostic
    #[inline]
    pub fn report(&mut self, diagnostic: LintDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report the current rule's `message_id` at `span`.
    ///
    /// The message is rendered from the rule's template with `data`.
    pub fn report_message(
        &mut self,
        message_id: &'static str,
        data: &[(&str, &str)],
        span: Span,
        fix: Option<Fix>,
    ) {
        let template = self
            .current_rule
            .and_then(|meta| meta.message(message_id))
            .unwrap_or(message_id);
        let mut diagnostic = LintDiagnostic::new(
            self.rule_name(),
            self.current_severity,
            render_message(template, data),
            span.start,
            span.end,
        )
        .with_message_id(message_id);
        if let Some(fix) = fix {
            diagnostic = diagnostic.with_fix(fix);
        }
        self.report(diagnostic);
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    // Code paths

    #[inline]
    pub fn open_code_path(&mut self) {
        self.callbacks.open();
    }

    #[inline]
    pub fn record_return(&mut self, argument: &'a Expression<'a>) {
        self.callbacks.record_return(argument);
    }

    #[inline]
    pub fn close_code_path(&mut self, key: FunctionKey, implicit: Option<&'a Expression<'a>>) {
        self.callbacks.close(key, implicit);
    }

    /// Expressions a callback literal may return, once its code path closed
    #[inline]
    pub fn callback_results(&self, callback: &Expression<'_>) -> Option<&[&'a Expression<'a>]> {
        self.callbacks.callback_results(callback)
    }

    // Escape hatch

    #[inline]
    pub fn enter_children_to_array(&mut self) {
        self.children_to_array_depth += 1;
    }

    #[inline]
    pub fn leave_children_to_array(&mut self) {
        self.children_to_array_depth = self.children_to_array_depth.saturating_sub(1);
    }

    /// Whether traversal is inside a `Children.toArray(...)` call
    #[inline]
    pub fn is_in_children_to_array(&self) -> bool {
        self.children_to_array_depth > 0
    }
}
