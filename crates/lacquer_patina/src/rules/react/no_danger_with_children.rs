//! react/no-danger-with-children
//!
//! Disallow setting both children and `dangerouslySetInnerHTML`.
//!
//! React throws when an element gets its content from both. Props are read
//! from named attributes and from spreads of object literals written inline;
//! spreads of variables are never followed. Element factory calls
//! (`React.createElement` or the configured factory) are checked when their
//! props argument is an object literal.
//!
//! ## Examples
//!
//! ### Invalid
//! ```jsx
//! <div dangerouslySetInnerHTML={{ __html: html }}>content</div>;
//! <div dangerouslySetInnerHTML={{ __html: html }} children="content" />;
//! React.createElement("div", { dangerouslySetInnerHTML: { __html: html } }, "content");
//! ```
//!
//! ### Valid
//! ```jsx
//! <div dangerouslySetInnerHTML={{ __html: html }} />;
//! <div dangerouslySetInnerHTML={{ __html: html }}>
//! </div>;
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use lacquer_grain::{attribute_name, callee_path};
use oxc_ast::ast::{
    CallExpression, Expression, JSXAttributeItem, JSXChild, JSXElement, JSXExpression,
    ObjectExpression, ObjectPropertyKind,
};
use serde::Deserialize;

pub(crate) static META: RuleMeta = RuleMeta {
    name: "react/no-danger-with-children",
    description: "Disallow using children together with `dangerouslySetInnerHTML`",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[(
        "dangerWithChildren",
        r#"Only set either "children" or "props.dangerouslySetInnerHTML", but not both."#,
    )],
    schema: r#"{ "type": "object", "additionalProperties": false }"#,
};

/// Disallow children alongside `dangerouslySetInnerHTML`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoDangerWithChildren {}

/// Which of the two content props were seen.
#[derive(Debug, Default)]
struct ContentProps {
    danger: bool,
    children: bool,
}

impl ContentProps {
    fn from_attributes(attributes: &[JSXAttributeItem<'_>]) -> Self {
        let mut props = Self::default();
        for item in attributes {
            match item {
                JSXAttributeItem::Attribute(attribute) => {
                    if let Some(name) = attribute_name(attribute) {
                        props.note(name);
                    }
                }
                JSXAttributeItem::SpreadAttribute(spread) => {
                    if let Expression::ObjectExpression(object) = &spread.argument {
                        props.add_object(object);
                    }
                }
            }
        }
        props
    }

    fn from_object(object: &ObjectExpression<'_>) -> Self {
        let mut props = Self::default();
        props.add_object(object);
        props
    }

    fn add_object(&mut self, object: &ObjectExpression<'_>) {
        for property in &object.properties {
            match property {
                ObjectPropertyKind::ObjectProperty(property) => {
                    if let Some(name) = property.key.static_name() {
                        self.note(&name);
                    }
                }
                ObjectPropertyKind::SpreadProperty(spread) => {
                    if let Expression::ObjectExpression(inner) = &spread.argument {
                        self.add_object(inner);
                    }
                }
            }
        }
    }

    #[inline]
    fn note(&mut self, name: &str) {
        match name {
            "dangerouslySetInnerHTML" => self.danger = true,
            "children" => self.children = true,
            _ => {}
        }
    }
}

/// Whether a JSX child renders content.
///
/// Whitespace spanning lines and `{/* comments */}` are dropped by JSX.
fn is_content_child(child: &JSXChild<'_>) -> bool {
    match child {
        JSXChild::Text(text) => {
            let value = text.value.as_str();
            !(value.trim().is_empty() && value.contains('\n'))
        }
        JSXChild::ExpressionContainer(container) => {
            !matches!(container.expression, JSXExpression::EmptyExpression(_))
        }
        _ => true,
    }
}

impl Rule for NoDangerWithChildren {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_jsx_element<'a>(&self, ctx: &mut LintContext<'a>, element: &'a JSXElement<'a>) {
        let props = ContentProps::from_attributes(&element.opening_element.attributes);
        if !props.danger {
            return;
        }
        if props.children || element.children.iter().any(is_content_child) {
            ctx.report_message("dangerWithChildren", &[], element.span, None);
        }
    }

    fn enter_call_expression<'a>(&self, ctx: &mut LintContext<'a>, call: &'a CallExpression<'a>) {
        if call.arguments.len() < 2 {
            return;
        }
        let Some(Expression::ObjectExpression(object)) = call.arguments[1].as_expression() else {
            return;
        };
        if callee_path(&call.callee).as_deref() != Some(ctx.pragmas().jsx.as_str()) {
            return;
        }

        let props = ContentProps::from_object(object);
        if props.danger && (props.children || call.arguments.len() > 2) {
            ctx.report_message("dangerWithChildren", &[], call.span, None);
        }
    }
}
