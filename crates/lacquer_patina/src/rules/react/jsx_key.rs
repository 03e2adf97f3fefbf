//! react/jsx-key
//!
//! Require a `key` prop on elements rendered in a list.
//!
//! Elements written directly in an array literal and elements returned from
//! `xs.map(...)` / `Array.from(xs, ...)` callbacks need a `key` so React can
//! reconcile them. Sibling keys that resolve to the same constant are
//! reported as duplicates.
//!
//! Everything inside `Children.toArray(...)` is skipped, as that call assigns
//! keys itself.
//!
//! ## Options
//!
//! - `checkFragmentShorthand` (default `false`): also report `<></>` in lists
//! - `checkKeyMustBeforeSpread` (default `false`): require `key` before the
//!   first `{...spread}`
//! - `warnOnDuplicates` (default `true`): report sibling keys with the same value
//!
//! ## Examples
//!
//! ### Invalid
//! ```jsx
//! [<li />, <li />];
//! items.map(item => <li>{item}</li>);
//! <ul><li key="a" /><li key="a" /></ul>;
//! ```
//!
//! ### Valid
//! ```jsx
//! [<li key="1" />, <li key="2" />];
//! items.map(item => <li key={item.id}>{item}</li>);
//! Children.toArray([<li />, <li />]);
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use lacquer_carton::{FxHashMap, SmallVec};
use lacquer_grain::{
    has_attribute, is_attribute_named, iteration_callback, potential_values,
    resolve_attribute_value, ValueKey, ValueNode,
};
use oxc_ast::ast::{
    ArrayExpression, CallExpression, Expression, JSXAttributeItem, JSXChild, JSXElement,
    JSXFragment,
};
use oxc_span::Span;
use serde::Deserialize;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "react/jsx-key",
    description: "Require a `key` prop on elements in arrays and iterators",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        (
            "missingElementKey",
            r#"Missing "key" prop for element in {{container}}."#,
        ),
        (
            "missingFragmentKey",
            r#"Missing "key" prop for element in {{container}}. Shorthand fragment tags do not support key props: use {{jsxFrag}} instead."#,
        ),
        (
            "keyBeforeSpread",
            r#""key" prop must appear before a spread ({...props})."#,
        ),
        ("nonUniqueKeys", r#""key" props must be unique."#),
    ],
    schema: r#"{
        "type": "object",
        "properties": {
            "checkFragmentShorthand": { "type": "boolean", "default": false },
            "checkKeyMustBeforeSpread": { "type": "boolean", "default": false },
            "warnOnDuplicates": { "type": "boolean", "default": true }
        },
        "additionalProperties": false
    }"#,
};

/// Require `key` on list elements
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct JsxKey {
    pub check_fragment_shorthand: bool,
    pub check_key_must_before_spread: bool,
    pub warn_on_duplicates: bool,
}

impl Default for JsxKey {
    fn default() -> Self {
        Self {
            check_fragment_shorthand: false,
            check_key_must_before_spread: false,
            warn_on_duplicates: true,
        }
    }
}

/// Where a list element was found, used in messages
#[derive(Debug, Clone, Copy)]
enum Container {
    Array,
    Iterator,
}

impl Container {
    fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Iterator => "iterator",
        }
    }
}

/// First key attribute seen for each key value in one sibling list.
#[derive(Default)]
struct DuplicateKeyTracker {
    seen: FxHashMap<ValueKey, FirstKey>,
}

struct FirstKey {
    span: Span,
    reported: bool,
}

impl DuplicateKeyTracker {
    /// Record a key attribute; returns the spans to report.
    ///
    /// A collision reports the first occurrence once and every later one.
    fn record(&mut self, key: ValueKey, span: Span) -> SmallVec<[Span; 2]> {
        let mut reports = SmallVec::new();
        match self.seen.get_mut(&key) {
            None => {
                self.seen.insert(
                    key,
                    FirstKey {
                        span,
                        reported: false,
                    },
                );
            }
            Some(first) => {
                if !first.reported {
                    first.reported = true;
                    reports.push(first.span);
                }
                reports.push(span);
            }
        }
        reports
    }
}

impl JsxKey {
    fn report_missing_key<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        node: ValueNode<'_, 'a>,
        container: Container,
    ) {
        if let Some(element) = node.as_jsx_element() {
            if !has_attribute(&element.opening_element.attributes, "key") {
                ctx.report_message(
                    "missingElementKey",
                    &[("container", container.as_str())],
                    element.span,
                    None,
                );
            }
        } else if let Some(fragment) = node.as_jsx_fragment() {
            if self.check_fragment_shorthand {
                let jsx_frag = ctx.pragmas().jsx_frag.clone();
                ctx.report_message(
                    "missingFragmentKey",
                    &[("container", container.as_str()), ("jsxFrag", jsx_frag.as_str())],
                    fragment.span,
                    None,
                );
            }
        }
    }

    fn report_duplicate_keys<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        elements: impl Iterator<Item = &'a JSXElement<'a>>,
    ) {
        if !self.warn_on_duplicates {
            return;
        }

        let mut tracker = DuplicateKeyTracker::default();
        for element in elements {
            for item in &element.opening_element.attributes {
                let JSXAttributeItem::Attribute(attribute) = item else {
                    continue;
                };
                if !is_attribute_named(item, "key") {
                    continue;
                }
                let Some(value) = resolve_attribute_value(attribute.value.as_ref()).into_value()
                else {
                    continue;
                };
                for span in tracker.record(value.key(), attribute.span) {
                    ctx.report_message("nonUniqueKeys", &[], span, None);
                }
            }
        }
    }

    fn check_children<'a>(&self, ctx: &mut LintContext<'a>, children: &'a [JSXChild<'a>]) {
        let elements = children.iter().filter_map(|child| match child {
            JSXChild::Element(element) => Some(&**element),
            _ => None,
        });
        self.report_duplicate_keys(ctx, elements);
    }
}

impl Rule for JsxKey {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_array_expression<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        array: &'a ArrayExpression<'a>,
    ) {
        if ctx.is_in_children_to_array() {
            return;
        }

        let entries = array
            .elements
            .iter()
            .filter_map(|element| element.as_expression());
        for entry in entries.clone() {
            self.report_missing_key(ctx, ValueNode::Expression(entry), Container::Array);
        }

        let elements = entries.filter_map(|entry| match entry {
            Expression::JSXElement(element) => Some(&**element),
            _ => None,
        });
        self.report_duplicate_keys(ctx, elements);
    }

    fn check_jsx_element<'a>(&self, ctx: &mut LintContext<'a>, element: &'a JSXElement<'a>) {
        if ctx.is_in_children_to_array() {
            return;
        }

        if self.check_key_must_before_spread {
            let first_key_or_spread = element.opening_element.attributes.iter().find(|item| {
                matches!(item, JSXAttributeItem::SpreadAttribute(_))
                    || is_attribute_named(item, "key")
            });
            if let Some(JSXAttributeItem::SpreadAttribute(_)) = first_key_or_spread {
                ctx.report_message("keyBeforeSpread", &[], element.span, None);
            }
        }

        self.check_children(ctx, &element.children);
    }

    fn check_jsx_fragment<'a>(&self, ctx: &mut LintContext<'a>, fragment: &'a JSXFragment<'a>) {
        if ctx.is_in_children_to_array() {
            return;
        }
        self.check_children(ctx, &fragment.children);
    }

    fn exit_call_expression<'a>(&self, ctx: &mut LintContext<'a>, call: &'a CallExpression<'a>) {
        if ctx.is_in_children_to_array() {
            return;
        }
        let Some(callback) = iteration_callback(call) else {
            return;
        };

        // Copied out so reporting can borrow the context mutably
        let results: SmallVec<[&'a Expression<'a>; 4]> = ctx
            .callback_results(callback)
            .map(|results| results.iter().copied().collect())
            .unwrap_or_default();
        for result in results {
            for node in potential_values(result) {
                self.report_missing_key(ctx, node, Container::Iterator);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;
    use crate::settings::Settings;
    use lacquer_carton::LineIndex;

    fn create_linter() -> Linter {
        create_linter_with(JsxKey::default())
    }

    fn create_linter_with(rule: JsxKey) -> Linter {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(rule));
        Linter::with_registry(registry)
    }

    /// (message id, 1-based line) of every diagnostic
    fn reports(result: &LintResult, source: &str) -> Vec<(&'static str, u32)> {
        let index = LineIndex::new(source);
        result
            .diagnostics
            .iter()
            .map(|d| (d.message_id, index.line_col(d.start).0))
            .collect()
    }

    #[test]
    fn test_valid_keyed_array() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"[<div key="1" />, <div key="2"/>, <div key="3" />]"#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_valid_children_to_array() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            Children.toArray([<div />, [1, 2].map(() => <div />)]);
            React.Children.toArray([<div />, [1, 2].map(() => <div />)]);
            Preact.Children.toArray([<div />, [1, 2].map(() => <div />)]);
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_nested_children_to_array() {
        let linter = create_linter();
        let source = r#"
Children.toArray([Children.toArray([<a />]), [<b />], [1].map(() => <c />)]);
[<d />];
"#;
        let result = linter.lint_source(source, "test.jsx");
        // Leaving the inner call must not end the outer exemption
        assert_eq!(reports(&result, source), vec![("missingElementKey", 3)]);
    }

    #[test]
    fn test_children_to_array_needs_plain_namespace() {
        let linter = create_linter();
        let source = r#"
a.b.Children.toArray([<div />]);
getReact().Children.toArray([<div />]);
this.Children.toArray([<div />]);
"#;
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(
            reports(&result, source),
            vec![
                ("missingElementKey", 2),
                ("missingElementKey", 3),
                ("missingElementKey", 4)
            ]
        );
    }

    #[test]
    fn test_invalid_array_without_keys() {
        let linter = create_linter();
        let source = "[\n  <div />,\n  <div key=\"1\" />,\n  <div />\n]";
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(
            reports(&result, source),
            vec![("missingElementKey", 2), ("missingElementKey", 4)]
        );
        assert_eq!(
            result.diagnostics[0].message,
            r#"Missing "key" prop for element in array."#
        );
    }

    #[test]
    fn test_invalid_map_callback() {
        let linter = create_linter();
        let result = linter.lint_source("[1, 2].map(() => <div />);", "test.jsx");
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.diagnostics[0].message,
            r#"Missing "key" prop for element in iterator."#
        );
    }

    #[test]
    fn test_invalid_returns_in_branches() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            items.map(function (item) {
                if (item.hidden) {
                    return null;
                }
                const render = () => <span key="inner" />;
                return item.big ? <b /> : (item.small && <small />);
            });
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 2);
    }

    #[test]
    fn test_invalid_array_from_callback() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            Array.from(items, (item) => { return <li>{item}</li>; });
            Array.from(items);
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 1);
    }

    #[test]
    fn test_valid_non_iteration_callbacks() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"
            items.forEach(() => <div />);
            items.map(renderItem);
            items.map((item) => <div key={item} />);
            "#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_fragment_shorthand() {
        let source = "[\n  <></>,\n  <></>\n]";

        let linter = create_linter();
        assert_eq!(linter.lint_source(source, "test.jsx").error_count, 0);

        let linter = create_linter_with(JsxKey {
            check_fragment_shorthand: true,
            ..JsxKey::default()
        });
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(
            reports(&result, source),
            vec![("missingFragmentKey", 2), ("missingFragmentKey", 3)]
        );
        assert_eq!(
            result.diagnostics[1].message,
            r#"Missing "key" prop for element in array. Shorthand fragment tags do not support key props: use React.Fragment instead."#
        );
    }

    #[test]
    fn test_fragment_pragma_comment_wins_over_settings() {
        let source = "/* @jsxFrag Preact.Fragment */\n[<></>, <></>]";
        let settings: Settings =
            serde_json::from_str(r#"{ "react": { "jsxFragmentFactory": "Other.Fragment" } }"#)
                .unwrap();
        let linter = create_linter_with(JsxKey {
            check_fragment_shorthand: true,
            ..JsxKey::default()
        })
        .with_settings(settings);
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(result.error_count, 2);
        assert!(result.diagnostics[0]
            .message
            .ends_with("use Preact.Fragment instead."));
    }

    #[test]
    fn test_fragment_pragma_settings() {
        let settings: Settings =
            serde_json::from_str(r#"{ "react": { "pragma": "Preact", "fragment": "Pfragment" } }"#)
                .unwrap();
        let linter = create_linter_with(JsxKey {
            check_fragment_shorthand: true,
            ..JsxKey::default()
        })
        .with_settings(settings);
        let result = linter.lint_source("[<></>]", "test.jsx");
        assert!(result.diagnostics[0]
            .message
            .ends_with("use Preact.Pfragment instead."));
    }

    #[test]
    fn test_duplicate_keys_in_children() {
        let linter = create_linter();
        let source = r#"<ul><li key="a" /><li key="b" /><li key="a" /><li key="a" /></ul>"#;
        let result = linter.lint_source(source, "test.jsx");
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message_id == "nonUniqueKeys"));
        // first occurrence once, then each later one
        assert_eq!(result.error_count, 3);
        let first = &result.diagnostics[0];
        assert_eq!(&source[first.start as usize..first.end as usize], r#"key="a""#);
        assert_eq!(first.start, source.find(r#"key="a""#).unwrap() as u32);
    }

    #[test]
    fn test_duplicate_keys_in_fragment_children() {
        let linter = create_linter();
        let source = r#"<><i key="a" /><i key="a" /></>"#;
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(result.error_count, 2);
        assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message_id == "nonUniqueKeys"));
    }

    #[test]
    fn test_duplicate_keys_resolve_templates() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"<>{[<i key={`k${1}`} />, <i key="k1" />, <i key={id} />, <i key={id} />]}</>"#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 2);
    }

    #[test]
    fn test_duplicate_keys_distinguish_types() {
        let linter = create_linter();
        let result = linter.lint_source(
            r#"<div><p key={1} /><p key="1" /><p key={true} /><p key="true" /></div>"#,
            "test.jsx",
        );
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_duplicates_can_be_disabled() {
        let linter = create_linter_with(JsxKey {
            warn_on_duplicates: false,
            ..JsxKey::default()
        });
        let result = linter.lint_source(r#"<div><p key="x" /><p key="x" /></div>"#, "test.jsx");
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_key_before_spread() {
        let source = r#"
            <div {...props} key="1" />;
            <div key="1" {...props} />;
            <div key="2" />;
            <div {...props} />;
        "#;

        let linter = create_linter();
        assert_eq!(linter.lint_source(source, "test.jsx").error_count, 0);

        let linter = create_linter_with(JsxKey {
            check_key_must_before_spread: true,
            ..JsxKey::default()
        });
        let result = linter.lint_source(source, "test.jsx");
        assert_eq!(
            reports(&result, source),
            vec![("keyBeforeSpread", 2), ("keyBeforeSpread", 5)]
        );
    }

    #[test]
    fn test_tracker_reports_first_once() {
        let mut tracker = DuplicateKeyTracker::default();
        let key = lacquer_grain::StaticValue::String("a".into()).key();
        assert!(tracker.record(key.clone(), Span::new(0, 1)).is_empty());
        assert_eq!(
            tracker.record(key.clone(), Span::new(2, 3)).as_slice(),
            &[Span::new(0, 1), Span::new(2, 3)]
        );
        assert_eq!(
            tracker.record(key, Span::new(4, 5)).as_slice(),
            &[Span::new(4, 5)]
        );
    }
}
