//! react/jsx-no-target-blank
//!
//! Disallow `target="_blank"` on external links without `rel="noreferrer"`.
//!
//! A page opened with `target="_blank"` gets a handle to its opener unless the
//! link carries `rel="noreferrer"` (or `rel="noopener"`). The rule reports
//! only what it can prove may be unsafe: the link may be external, the target
//! may be `_blank` and `rel` may lack the keyword.
//!
//! ## Options
//!
//! - `allowReferrer` (default `false`): accept `noopener` without `noreferrer`
//! - `enforceDynamicLinks` (default `"always"`): treat `href={...}` as external
//! - `warnOnSpreadAttributes` (default `false`): assume a trailing
//!   `{...spread}` sets unsafe values
//! - `links` (default `true`): check link components (`a` by default)
//! - `forms` (default `false`): check form components (`form` by default)
//!
//! ## Examples
//!
//! ### Invalid
//! ```jsx
//! <a href="https://example.com" target="_blank">link</a>
//! <a href={url} target="_blank" rel="nofollow">link</a>
//! ```
//!
//! ### Valid
//! ```jsx
//! <a href="https://example.com" target="_blank" rel="noreferrer">link</a>
//! <a href="/relative" target="_blank">link</a>
//! ```

use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity, TextEdit};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use lacquer_grain::{
    element_name, find_attribute, last_spread_index, potential_values_of_attribute, resolve,
    spread_overrides,
};
use once_cell::sync::Lazy;
use oxc_ast::ast::{Expression, JSXAttributeItem, JSXAttributeValue, JSXOpeningElement};
use oxc_span::{GetSpan, Span};
use regex::Regex;
use serde::Deserialize;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "react/jsx-no-target-blank",
    description: "Disallow `target=\"_blank\"` without `rel=\"noreferrer\"` on external links",
    category: RuleCategory::Security,
    fixable: true,
    default_severity: Severity::Error,
    messages: &[
        (
            "noTargetBlankWithoutNoreferrer",
            r#"Using target="_blank" without rel="noreferrer" (which implies rel="noopener") is a security risk in older browsers: see https://mathiasbynens.github.io/rel-noopener/#recommendations"#,
        ),
        (
            "noTargetBlankWithoutNoopener",
            r#"Using target="_blank" without rel="noreferrer" or rel="noopener" (the former implies the latter and is preferred due to wider support) is a security risk: see https://mathiasbynens.github.io/rel-noopener/#recommendations"#,
        ),
    ],
    schema: r#"{
        "type": "object",
        "properties": {
            "allowReferrer": { "type": "boolean", "default": false },
            "enforceDynamicLinks": { "enum": ["always", "never"], "default": "always" },
            "warnOnSpreadAttributes": { "type": "boolean", "default": false },
            "links": { "type": "boolean", "default": true },
            "forms": { "type": "boolean", "default": false }
        },
        "additionalProperties": false
    }"#,
};

// RFC 1738 scheme characters, or a protocol-relative `//`
static EXTERNAL_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z0-9+-.]+:|//)").expect("valid external link regex"));

/// Whether `href={...}` counts as a possibly external link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforceDynamicLinks {
    #[default]
    Always,
    Never,
}

/// Disallow unsafe `target="_blank"`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct JsxNoTargetBlank {
    pub allow_referrer: bool,
    pub enforce_dynamic_links: EnforceDynamicLinks,
    pub warn_on_spread_attributes: bool,
    pub links: bool,
    pub forms: bool,
}

impl Default for JsxNoTargetBlank {
    fn default() -> Self {
        Self {
            allow_referrer: false,
            enforce_dynamic_links: EnforceDynamicLinks::Always,
            warn_on_spread_attributes: false,
            links: true,
            forms: false,
        }
    }
}

impl JsxNoTargetBlank {
    fn check<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        element: &'a JSXOpeningElement<'a>,
        url_attribute: &str,
    ) {
        let attributes: &[JSXAttributeItem<'a>] = &element.attributes;
        let spread = if self.warn_on_spread_attributes {
            last_spread_index(attributes)
        } else {
            None
        };

        if !self.may_have_unsafe_link(attributes, url_attribute, spread)
            || !may_have_target_blank(attributes, spread)
            || !self.may_have_unsafe_rel(attributes, spread)
        {
            return;
        }

        let message_id = if self.allow_referrer {
            "noTargetBlankWithoutNoopener"
        } else {
            "noTargetBlankWithoutNoreferrer"
        };
        let fix = rel_fix(ctx.source, attributes, spread);
        ctx.report_message(message_id, &[], element.span, fix);
    }

    fn may_have_unsafe_link(
        &self,
        attributes: &[JSXAttributeItem<'_>],
        url_attribute: &str,
        spread: Option<usize>,
    ) -> bool {
        let Some(link) = find_attribute(attributes, url_attribute) else {
            return spread.is_some();
        };
        if spread_overrides(spread, link.index) {
            return true;
        }
        match &link.attribute.value {
            Some(JSXAttributeValue::StringLiteral(literal)) => {
                EXTERNAL_LINK_RE.is_match(literal.value.as_str().trim())
            }
            Some(JSXAttributeValue::ExpressionContainer(_)) => {
                self.enforce_dynamic_links == EnforceDynamicLinks::Always
            }
            _ => false,
        }
    }

    fn may_have_unsafe_rel(&self, attributes: &[JSXAttributeItem<'_>], spread: Option<usize>) -> bool {
        let Some(rel) = find_attribute(attributes, "rel") else {
            return true;
        };
        if spread_overrides(spread, rel.index) || rel.attribute.value.is_none() {
            return true;
        }
        potential_values_of_attribute(rel.attribute.value.as_ref()).any(|leaf| {
            let resolution = resolve(leaf);
            !resolution
                .as_str()
                .is_some_and(|value| self.is_protective_rel(value))
        })
    }

    fn is_protective_rel(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        let mut keywords = value.split_whitespace();
        if self.allow_referrer {
            keywords.any(|keyword| keyword == "noreferrer" || keyword == "noopener")
        } else {
            keywords.any(|keyword| keyword == "noreferrer")
        }
    }
}

fn may_have_target_blank(attributes: &[JSXAttributeItem<'_>], spread: Option<usize>) -> bool {
    let Some(target) = find_attribute(attributes, "target") else {
        return spread.is_some();
    };
    if spread_overrides(spread, target.index) {
        return true;
    }
    potential_values_of_attribute(target.attribute.value.as_ref())
        .any(|leaf| resolve(leaf).as_str() == Some("_blank"))
}

/// Edit that makes `rel` contain `noreferrer`, when one can be derived safely.
fn rel_fix(source: &str, attributes: &[JSXAttributeItem<'_>], spread: Option<usize>) -> Option<Fix> {
    let last = attributes.last()?;
    let Some(rel) = find_attribute(attributes, "rel") else {
        if spread.is_some() {
            return None;
        }
        return Some(Fix::new(
            r#"Add `rel="noreferrer"`"#,
            TextEdit::insert(last.span().end, r#" rel="noreferrer""#),
        ));
    };
    if spread_overrides(spread, rel.index) {
        return None;
    }

    match &rel.attribute.value {
        None => Some(Fix::new(
            r#"Set `rel="noreferrer"`"#,
            TextEdit::replace(
                rel.attribute.span.start,
                rel.attribute.span.end,
                r#"rel="noreferrer""#,
            ),
        )),
        Some(JSXAttributeValue::StringLiteral(literal)) => append_noreferrer(source, literal.span),
        Some(JSXAttributeValue::ExpressionContainer(container)) => {
            match container.expression.as_expression()? {
                Expression::StringLiteral(literal) => append_noreferrer(source, literal.span),
                Expression::NumericLiteral(_)
                | Expression::BooleanLiteral(_)
                | Expression::NullLiteral(_)
                | Expression::BigIntLiteral(_)
                | Expression::RegExpLiteral(_) => Some(Fix::new(
                    r#"Set `rel="noreferrer"`"#,
                    TextEdit::replace(container.span.start, container.span.end, r#""noreferrer""#),
                )),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Insert ` noreferrer` before the closing quote of a string literal
fn append_noreferrer(source: &str, span: Span) -> Option<Fix> {
    let raw = source.get(span.start as usize..span.end as usize)?;
    let quote = raw.chars().last()?;
    let offset = span.end - quote.len_utf8() as u32;
    Some(Fix::new(
        "Add `noreferrer` to `rel`",
        TextEdit::insert(offset, " noreferrer"),
    ))
}

impl Rule for JsxNoTargetBlank {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_jsx_opening_element<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        element: &'a JSXOpeningElement<'a>,
    ) {
        let Some(tag) = element_name(&element.name) else {
            return;
        };
        let settings = ctx.settings();

        if self.links {
            if let Some(url_attribute) = settings.link_attribute(tag) {
                self.check(ctx, element, url_attribute);
            }
        }
        if self.forms {
            if let Some(url_attribute) = settings.form_attribute(tag) {
                self.check(ctx, element, url_attribute);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::Linter;
    use crate::rule::RuleRegistry;
    use crate::settings::Settings;
    use lacquer_carton::LineIndex;

    fn create_linter() -> Linter {
        create_linter_with(JsxNoTargetBlank::default())
    }

    fn create_linter_with(rule: JsxNoTargetBlank) -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(rule));
        Linter::with_registry(registry)
    }

    fn settings(json: &str) -> Settings {
        serde_json::from_str(json).unwrap()
    }

    /// 1-based lines of every diagnostic
    fn lines(linter: &Linter, source: &str) -> Vec<u32> {
        let index = LineIndex::new(source);
        linter
            .lint_source(source, "test.jsx")
            .diagnostics
            .iter()
            .map(|d| index.line_col(d.start).0)
            .collect()
    }

    #[test]
    fn test_valid_without_external_link_or_blank_target() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            <a></a>;
            <a href="https://example.com" />;
            <a target="_blank"></a>;
            <a target="_blank" href="relative/path/in/relative/url"></a>;
            <a target="_blank" href="/absolute/path/in/relative/url"></a>;
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_valid_with_noreferrer() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            <a href="https://example.com" target="_blank" rel="noreferrer noopener" />;
            <a href="https://example.com" target="_blank" rel="noreferrer" />;
            <a href="https://example.com" target="_blank" rel="NoReferrer" />;
            <a href={dynamicLink} target="_blank" rel={"noreferrer"} />;
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_valid_noopener_with_allow_referrer() {
        let linter = create_linter_with(JsxNoTargetBlank {
            allow_referrer: true,
            ..JsxNoTargetBlank::default()
        });
        let result = linter.lint_source(
            r#"
            <a href="https://example.com" target="_blank" rel="noopener" />;
            <a href="https://example.com" target="_blank" rel="noreferrer" />;
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_dynamic_links() {
        let source = r#"<a target="_blank" href={dynamicLink} />"#;
        assert_eq!(create_linter().lint_source(source, "test.jsx").error_count, 1);

        let linter = create_linter_with(JsxNoTargetBlank {
            enforce_dynamic_links: EnforceDynamicLinks::Never,
            ..JsxNoTargetBlank::default()
        });
        assert_eq!(linter.lint_source(source, "test.jsx").error_count, 0);
    }

    #[test]
    fn test_invalid_without_noreferrer() {
        let linter = create_linter();
        let source = r#"
<a href="https://example.com" target="_blank" />;
<a href="https://example.com" target="_blank" rel />;
<a href="https://example.com" target="_blank" rel="foo" />;
<a href="https://example.com" target="_blank" rel="noopener" />;
<a href="  HTTPS://example.com " target={"_blank"} />;
"#;
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(result.error_count, 5);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message_id == "noTargetBlankWithoutNoreferrer"));

        assert_eq!(
            linter.fix_source(source, "test.jsx").output,
            r#"
<a href="https://example.com" target="_blank" rel="noreferrer" />;
<a href="https://example.com" target="_blank" rel="noreferrer" />;
<a href="https://example.com" target="_blank" rel="foo noreferrer" />;
<a href="https://example.com" target="_blank" rel="noopener noreferrer" />;
<a href="  HTTPS://example.com " target={"_blank"} rel="noreferrer" />;
"#
        );
    }

    #[test]
    fn test_invalid_without_noopener_with_allow_referrer() {
        let linter = create_linter_with(JsxNoTargetBlank {
            allow_referrer: true,
            ..JsxNoTargetBlank::default()
        });
        let result = linter.lint_source(
            r#"<a href="https://example.com" target="_blank" rel="foo" />"#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.diagnostics[0].message_id,
            "noTargetBlankWithoutNoopener"
        );
    }

    #[test]
    fn test_rel_expressions() {
        let linter = create_linter();
        let source = r#"
<a href="https://example.com" target="_blank" rel={false} />;
<a href="https://example.com" target="_blank" rel={'foo'} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "foo" : "noreferrer"} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "noreferrer" : "noreferrer"} />;
<a href="https://example.com" target="_blank" rel={Math.random()} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "foo" : "foo"} />;
"#;
        assert_eq!(lines(&linter, source), vec![2, 3, 4, 6, 7]);
        assert_eq!(
            linter.fix_source(source, "test.jsx").output,
            r#"
<a href="https://example.com" target="_blank" rel="noreferrer" />;
<a href="https://example.com" target="_blank" rel={'foo noreferrer'} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "foo" : "noreferrer"} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "noreferrer" : "noreferrer"} />;
<a href="https://example.com" target="_blank" rel={Math.random()} />;
<a href="https://example.com" target="_blank" rel={Math.random() < 0.5 ? "foo" : "foo"} />;
"#
        );
    }

    #[test]
    fn test_target_branches() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            <a href="https://example.com" target={external ? "_blank" : "_self"} />;
            <a href="https://example.com" target={external && "_top"} />;
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_spread_attributes() {
        let linter = create_linter_with(JsxNoTargetBlank {
            warn_on_spread_attributes: true,
            ..JsxNoTargetBlank::default()
        });

        let safe = r#"
            <a {...foo} target="_self" />;
            <a {...foo} rel="noreferrer" />;
            <a {...foo} href="/safe/path" />;
        "#;
        assert_eq!(linter.lint_source(safe, "test.jsx").error_count, 0);

        let unsafe_source = r#"
<a {...foo} />;
<a target="_self" {...foo} />;
<a rel="noreferrer" {...foo} />;
<a href="/safe/path" {...foo} />;
"#;
        assert_eq!(lines(&linter, unsafe_source), vec![2, 3, 4, 5]);
        let fixed = linter.fix_source(unsafe_source, "test.jsx");
        assert_eq!(fixed.applied, 0);
        assert_eq!(fixed.output, unsafe_source);

        // Spreads are ignored unless asked for
        assert_eq!(
            create_linter()
                .lint_source(unsafe_source, "test.jsx")
                .error_count,
            0
        );
    }

    #[test]
    fn test_forms() {
        let source = r#"<form action="https://example.com" target="_blank" />"#;
        assert_eq!(create_linter().lint_source(source, "test.jsx").error_count, 0);

        let linter = create_linter_with(JsxNoTargetBlank {
            forms: true,
            ..JsxNoTargetBlank::default()
        });
        assert_eq!(
            linter.fix_source(source, "test.jsx").output,
            r#"<form action="https://example.com" target="_blank" rel="noreferrer" />"#
        );
    }

    #[test]
    fn test_links_disabled() {
        let linter = create_linter_with(JsxNoTargetBlank {
            links: false,
            ..JsxNoTargetBlank::default()
        });
        let result =
            linter.lint_source(r#"<a href="https://example.com" target="_blank" />"#, "test.jsx");
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_link_components_setting() {
        let source = r#"<a href="https://example.com" target="_blank" />"#;
        let linter = create_linter().with_settings(settings(
            r#"{ "linkComponents": [{ "name": "a", "linkAttribute": "test" }] }"#,
        ));
        assert_eq!(linter.lint_source(source, "test.jsx").error_count, 0);

        let linter = create_linter().with_settings(settings(
            r#"{ "linkComponents": ["link", { "name": "a", "linkAttribute": "test" }] }"#,
        ));
        let source = r#"
<link href="https://example.com" target="_blank" />;
<a test="https://example.com" target="_blank" />;
"#;
        assert_eq!(lines(&linter, source), vec![2, 3]);
        assert_eq!(
            linter.fix_source(source, "test.jsx").output,
            r#"
<link href="https://example.com" target="_blank" rel="noreferrer" />;
<a test="https://example.com" target="_blank" rel="noreferrer" />;
"#
        );
    }

    #[test]
    fn test_form_components_setting() {
        let linter = create_linter_with(JsxNoTargetBlank {
            forms: true,
            ..JsxNoTargetBlank::default()
        })
        .with_settings(settings(
            r#"{ "formComponents": ["custom-form", { "name": "form", "formAttribute": "test" }] }"#,
        ));
        let source = r#"
<custom-form action="https://example.com" target="_blank" />;
<form test="https://example.com" target="_blank" />;
<form action="https://example.com" target="_blank" />;
"#;
        assert_eq!(lines(&linter, source), vec![2, 3]);
    }

    #[test]
    fn test_member_tags_are_ignored() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"<ui.a href="https://example.com" target="_blank" />"#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }
}
