//! react/jsx-no-comment-textnodes
//!
//! Disallow comments written as JSX text.
//!
//! `<div>// note</div>` renders the text `// note`; a comment inside JSX
//! children has to be wrapped in braces.
//!
//! ## Examples
//!
//! ### Invalid
//! ```jsx
//! <div>// comment</div>;
//! <div>
//!   /* comment */
//! </div>;
//! ```
//!
//! ### Valid
//! ```jsx
//! <div>{/* comment */}</div>;
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use once_cell::sync::Lazy;
use oxc_ast::ast::JSXText;
use regex::Regex;
use serde::Deserialize;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "react/jsx-no-comment-textnodes",
    description: "Disallow comments from being inserted as text nodes",
    category: RuleCategory::Suspicious,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "putCommentInBraces",
        "Comments inside children section of tag should be placed inside braces.",
    )],
    schema: r#"{ "type": "object", "additionalProperties": false }"#,
};

static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(//|/\*)").expect("valid comment regex"));

/// Disallow comments as JSX text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsxNoCommentTextnodes {}

impl Rule for JsxNoCommentTextnodes {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_jsx_text<'a>(&self, ctx: &mut LintContext<'a>, text: &'a JSXText<'a>) {
        if COMMENT_RE.is_match(text.value.as_str()) {
            ctx.report_message("putCommentInBraces", &[], text.span, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;
    use lacquer_carton::LineIndex;

    fn create_linter() -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(JsxNoCommentTextnodes::default()));
        Linter::with_registry(registry)
    }

    #[test]
    fn test_valid_real_comments() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            <div>{/* comment */}</div>;
            <div /* comment */></div>;
            <div className={"foo" /* comment */}></div>;
            <div>see http://example.com</div>;
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_invalid_comment_text() {
        let linter = create_linter();
        let source = r#"
<div>// comment</div>;
<div>/* comment */</div>;
<div>
  // comment
</div>;
<div>
  /* comment */
</div>;
"#;
        let index = LineIndex::new(source);
        let result = linter.lint_source(source, "test.jsx");
        let lines: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| index.line_col(d.start).0)
            .collect();
        assert_eq!(lines, vec![2, 3, 4, 7]);
        assert_eq!(
            result.diagnostics[0].message,
            "Comments inside children section of tag should be placed inside braces."
        );
    }

    #[test]
    fn test_not_recommended() {
        assert!(!META.is_recommended());
    }
}
