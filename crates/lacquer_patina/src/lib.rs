//! # lacquer_patina
//!
//! Patina - The quality checker for Lacquer.
//! Linter for JSX sources.
//!
//! ## Name Origin
//!
//! **Patina** (/ˈpætɪnə/) is the layer that forms on a surface as it ages.
//! On lacquerware it is what an appraiser reads to judge the piece.
//! `lacquer_patina` reads JSX to judge what it will do at runtime.
//!
//! ## Features
//!
//! - Rich diagnostic output with code snippets and suggestions (like oxlint)
//! - eslint-plugin-react compatible rules, with autofixes where safe
//! - One traversal per file; every rule shares it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lacquer_patina::{format_results, Linter, OutputFormat};
//!
//! let linter = Linter::new();
//! let source = "items.map(item => <li>{item}</li>)";
//! let result = linter.lint_source(source, "list.jsx");
//!
//! if result.has_errors() {
//!     let sources = [("list.jsx".to_string(), source.to_string())];
//!     println!("{}", format_results(&[result], &sources, OutputFormat::Text));
//! }
//! ```
//!
//! ## Rules
//!
//! ### Recommended
//! - `react/jsx-key` - Require a `key` prop on elements in arrays and iterators
//! - `react/jsx-no-target-blank` - Disallow `target="_blank"` without `rel="noreferrer"`
//! - `react/no-danger-with-children` - Disallow children with `dangerouslySetInnerHTML`
//!
//! ### Opt-in
//! - `react/jsx-no-comment-textnodes` - Disallow comments as JSX text

pub mod config;
mod context;
mod diagnostic;
mod fixer;
mod linter;
pub mod output;
mod rule;
pub mod rules;
mod settings;
mod visitor;

pub use config::{config_schema, ConfigError, LintConfig, RuleSeverity, CONFIG_FILE_NAME};
pub use context::LintContext;
pub use diagnostic::{Fix, LintDiagnostic, LintSummary, Severity, TextEdit};
pub use fixer::{apply_fixes, FixOutcome};
pub use linter::{source_type_for, FixedSource, LintResult, Linter, SYNTAX_ERROR_RULE};
pub use output::{format_results, format_summary, OutputFormat};
pub use rule::{RegisteredRule, Rule, RuleCategory, RuleMeta, RuleRegistry};
pub use rules::{builtin_rules, RuleFactory};
pub use settings::{
    ComponentRecord, ComponentSetting, FormComponent, LinkComponent, Pragmas, ReactSettings,
    Settings,
};

/// Lint a JSX source with the recommended rules
///
/// This is a convenience function for simple use cases.
/// For more control, use `Linter::new()` directly.
pub fn lint(source: &str, filename: &str) -> LintResult {
    Linter::new().lint_source(source, filename)
}
