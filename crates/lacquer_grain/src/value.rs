//! Conservative static value resolution.
//!
//! [`resolve`] answers "is this node provably a single constant?". Only
//! literals, expression containers wrapping literals and template literals
//! whose interpolations all resolve are ever [`Resolution::Resolved`].

use lacquer_carton::CompactString;
use oxc_ast::ast::{
    Expression, JSXAttributeValue, JSXElement, JSXExpression, JSXFragment, TemplateLiteral,
};
use oxc_span::{GetSpan, Span};

/// A constant value proven for a node.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticValue {
    String(CompactString),
    Number(f64),
    Boolean(bool),
    Null,
}

impl StaticValue {
    /// Returns the string content if this is a string value
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Hashable identity under SameValueZero (`NaN` equals itself, `-0` equals `0`).
    pub fn key(&self) -> ValueKey {
        match self {
            Self::String(value) => ValueKey::String(value.clone()),
            Self::Number(value) if value.is_nan() => ValueKey::Number(f64::NAN.to_bits()),
            Self::Number(value) if *value == 0.0 => ValueKey::Number(0f64.to_bits()),
            Self::Number(value) => ValueKey::Number(value.to_bits()),
            Self::Boolean(value) => ValueKey::Boolean(*value),
            Self::Null => ValueKey::Null,
        }
    }

    /// Stringify the way a template literal interpolation would.
    ///
    /// Returns `None` for numbers whose decimal rendering would need
    /// exponent notation, so callers can stay unresolved instead of
    /// producing text that differs from the runtime.
    pub fn to_template_string(&self) -> Option<CompactString> {
        match self {
            Self::String(value) => Some(value.clone()),
            Self::Number(value) => number_to_string(*value),
            Self::Boolean(true) => Some(CompactString::const_new("true")),
            Self::Boolean(false) => Some(CompactString::const_new("false")),
            Self::Null => Some(CompactString::const_new("null")),
        }
    }
}

fn number_to_string(value: f64) -> Option<CompactString> {
    if value.is_nan() {
        return Some(CompactString::const_new("NaN"));
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return Some(CompactString::const_new(text));
    }
    if value == 0.0 {
        return Some(CompactString::const_new("0"));
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return None;
    }
    // Shortest round-trip rendering, which matches the runtime in this range
    Some(CompactString::from(value.to_string()))
}

/// Key of a [`StaticValue`] usable in hash maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    String(CompactString),
    Number(u64),
    Boolean(bool),
    Null,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(StaticValue),
    Unresolved,
}

impl Resolution {
    #[inline]
    pub fn value(&self) -> Option<&StaticValue> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved => None,
        }
    }

    #[inline]
    pub fn into_value(self) -> Option<StaticValue> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved => None,
        }
    }

    /// Resolved string content, if the value is a string
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(StaticValue::as_str)
    }
}

/// A node that may carry a value: a JS expression or a JSX attribute value.
///
/// `'b` is the borrow of the tree and `'a` its arena lifetime.
#[derive(Debug, Clone, Copy)]
pub enum ValueNode<'b, 'a> {
    Expression(&'b Expression<'a>),
    Attribute(&'b JSXAttributeValue<'a>),
}

impl<'b, 'a> ValueNode<'b, 'a> {
    /// The JSX element this node is, if any
    pub fn as_jsx_element(self) -> Option<&'b JSXElement<'a>> {
        match self {
            Self::Expression(Expression::JSXElement(element))
            | Self::Attribute(JSXAttributeValue::Element(element)) => Some(&**element),
            _ => None,
        }
    }

    /// The shorthand fragment this node is, if any
    pub fn as_jsx_fragment(self) -> Option<&'b JSXFragment<'a>> {
        match self {
            Self::Expression(Expression::JSXFragment(fragment))
            | Self::Attribute(JSXAttributeValue::Fragment(fragment)) => Some(&**fragment),
            _ => None,
        }
    }
}

impl GetSpan for ValueNode<'_, '_> {
    fn span(&self) -> Span {
        match self {
            Self::Expression(expression) => expression.span(),
            Self::Attribute(value) => value.span(),
        }
    }
}

impl<'b, 'a> From<&'b Expression<'a>> for ValueNode<'b, 'a> {
    #[inline]
    fn from(expression: &'b Expression<'a>) -> Self {
        Self::Expression(expression)
    }
}

impl<'b, 'a> From<&'b JSXAttributeValue<'a>> for ValueNode<'b, 'a> {
    #[inline]
    fn from(value: &'b JSXAttributeValue<'a>) -> Self {
        Self::Attribute(value)
    }
}

/// Resolve a value node to a constant, if provable.
pub fn resolve(node: ValueNode<'_, '_>) -> Resolution {
    match node {
        ValueNode::Expression(expression) => resolve_expression(expression),
        ValueNode::Attribute(value) => resolve_attribute_value(Some(value)),
    }
}

/// Resolve an attribute value; a valueless attribute is unresolved.
pub fn resolve_attribute_value(value: Option<&JSXAttributeValue<'_>>) -> Resolution {
    match value {
        Some(JSXAttributeValue::StringLiteral(literal)) => {
            Resolution::Resolved(StaticValue::String(literal.value.as_str().into()))
        }
        Some(JSXAttributeValue::ExpressionContainer(container)) => {
            resolve_jsx_expression(&container.expression)
        }
        _ => Resolution::Unresolved,
    }
}

fn resolve_jsx_expression(expression: &JSXExpression<'_>) -> Resolution {
    match expression.as_expression() {
        Some(expression) => resolve_expression(expression),
        None => Resolution::Unresolved,
    }
}

/// Resolve a JS expression.
pub fn resolve_expression(expression: &Expression<'_>) -> Resolution {
    match expression {
        Expression::StringLiteral(literal) => {
            Resolution::Resolved(StaticValue::String(literal.value.as_str().into()))
        }
        Expression::NumericLiteral(literal) => {
            Resolution::Resolved(StaticValue::Number(literal.value))
        }
        Expression::BooleanLiteral(literal) => {
            Resolution::Resolved(StaticValue::Boolean(literal.value))
        }
        Expression::NullLiteral(_) => Resolution::Resolved(StaticValue::Null),
        Expression::TemplateLiteral(template) => resolve_template(template),
        Expression::ParenthesizedExpression(parenthesized) => {
            resolve_expression(&parenthesized.expression)
        }
        // BigInt and RegExp literals have no representation in `StaticValue`
        _ => Resolution::Unresolved,
    }
}

fn resolve_template(template: &TemplateLiteral<'_>) -> Resolution {
    let mut text = String::new();
    for (index, quasi) in template.quasis.iter().enumerate() {
        let Some(cooked) = &quasi.value.cooked else {
            return Resolution::Unresolved;
        };
        text.push_str(cooked.as_str());
        if quasi.tail {
            break;
        }
        let Some(expression) = template.expressions.get(index) else {
            return Resolution::Unresolved;
        };
        let Some(part) = resolve_expression(expression)
            .into_value()
            .and_then(|value| value.to_template_string())
        else {
            return Resolution::Unresolved;
        };
        text.push_str(&part);
    }
    Resolution::Resolved(StaticValue::String(text.into()))
}
