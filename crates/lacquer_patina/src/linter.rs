//! Main linter entry point.
//!
//! Parses a source with oxc, resolves its pragmas and runs every registered
//! rule in a single traversal.

use crate::config::{ConfigError, LintConfig};
use crate::context::LintContext;
use crate::diagnostic::{LintDiagnostic, LintSummary, Severity};
use crate::fixer::apply_fixes;
use crate::rule::RuleRegistry;
use crate::settings::{Pragmas, Settings};
use crate::visitor::LintVisitor;
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::{SourceType, Span};

/// Rule name used for sources that cannot be parsed
pub const SYNTAX_ERROR_RULE: &str = "syntax-error";

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics, sorted by position
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn from_diagnostics(filename: &str, diagnostics: Vec<LintDiagnostic>) -> Self {
        let mut summary = LintSummary::default();
        for diagnostic in &diagnostics {
            summary.add(diagnostic);
        }
        Self {
            filename: filename.to_string(),
            diagnostics,
            error_count: summary.error_count,
            warning_count: summary.warning_count,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Check if any diagnostic carries a fix
    #[inline]
    pub fn has_fixes(&self) -> bool {
        self.diagnostics.iter().any(LintDiagnostic::has_fix)
    }

    /// Keep only errors
    pub fn retain_errors(&mut self) {
        self.diagnostics
            .retain(|diagnostic| diagnostic.severity == Severity::Error);
        self.warning_count = 0;
    }
}

/// Source text after fixing, with the diagnostics that remain.
#[derive(Debug, Clone)]
pub struct FixedSource {
    pub output: String,
    /// Lint result of `output`
    pub result: LintResult,
    /// Number of fixes applied over all passes
    pub applied: usize,
}

/// Main linter struct.
pub struct Linter {
    registry: RuleRegistry,
    settings: Settings,
}

impl Linter {
    /// Fixes can enable further fixes; stop after this many rounds
    const MAX_FIX_PASSES: usize = 10;

    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            settings: Settings::default(),
        }
    }

    /// Create a linter from a loaded configuration
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: config.build_registry()?,
            settings: config.settings.clone(),
        })
    }

    /// Replace the shared settings
    #[inline]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the rule registry
    #[inline]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lint a source, choosing the dialect from the file extension.
    ///
    /// Unknown extensions are linted as JSX.
    #[inline]
    pub fn lint_source(&self, source: &str, filename: &str) -> LintResult {
        self.lint_with_source_type(source, filename, source_type_for(filename))
    }

    /// Lint a source with an explicit dialect
    pub fn lint_with_source_type(
        &self,
        source: &str,
        filename: &str,
        source_type: SourceType,
    ) -> LintResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type)
            .with_options(ParseOptions {
                preserve_parens: false,
                ..ParseOptions::default()
            })
            .parse();

        if ret.panicked {
            let message = ret
                .errors
                .first()
                .map_or_else(|| "Unrecoverable syntax error".to_string(), ToString::to_string);
            tracing::debug!(filename, %message, "parse failed");
            let diagnostic = LintDiagnostic::error(SYNTAX_ERROR_RULE, message, 0, 0)
                .with_message_id("syntaxError");
            return LintResult::from_diagnostics(filename, vec![diagnostic]);
        }
        for error in &ret.errors {
            tracing::warn!(filename, %error, "recoverable syntax error");
        }

        let comments = ret
            .program
            .comments
            .iter()
            .map(|comment| comment_body(source, comment.span));
        let pragmas = Pragmas::resolve(&self.settings.react, comments);

        let mut ctx = LintContext::new(source, filename, &self.settings, pragmas);
        let mut visitor = LintVisitor::new(&mut ctx, self.registry.rules());
        visitor.visit_program(&ret.program);

        let mut diagnostics = ctx.into_diagnostics();
        diagnostics.sort_by_key(|diagnostic| (diagnostic.start, diagnostic.end));
        tracing::debug!(filename, diagnostics = diagnostics.len(), "linted");
        LintResult::from_diagnostics(filename, diagnostics)
    }

    /// Lint multiple files and aggregate results
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        for (filename, source) in files {
            let result = self.lint_source(source, filename);
            summary.error_count += result.error_count;
            summary.warning_count += result.warning_count;
            results.push(result);
        }

        summary.file_count = files.len();
        (results, summary)
    }

    /// Apply fixes repeatedly until the source is stable.
    pub fn fix_source(&self, source: &str, filename: &str) -> FixedSource {
        let mut output = source.to_string();
        let mut result = self.lint_source(&output, filename);
        let mut applied = 0;

        for _ in 0..Self::MAX_FIX_PASSES {
            let outcome = apply_fixes(&output, &result.diagnostics);
            if !outcome.is_changed() {
                break;
            }
            applied += outcome.applied;
            output = outcome.output;
            result = self.lint_source(&output, filename);
        }

        FixedSource {
            output,
            result,
            applied,
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialect for a file name; anything unknown is treated as JSX.
pub fn source_type_for(filename: &str) -> SourceType {
    SourceType::from_path(filename).unwrap_or_else(|_| SourceType::jsx())
}

/// Comment text without its `//` or `/* */` delimiters
fn comment_body(source: &str, span: Span) -> &str {
    let text = source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default();
    if let Some(line) = text.strip_prefix("//") {
        return line;
    }
    match text.strip_prefix("/*") {
        Some(block) => block.strip_suffix("*/").unwrap_or(block),
        None => text,
    }
}
