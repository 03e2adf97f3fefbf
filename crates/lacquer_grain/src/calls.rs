//! Recognition of call shapes the rules care about.

use lacquer_carton::CompactString;
use oxc_ast::ast::{CallExpression, Expression};

/// Property name of a static member callee (`list.map` -> `map`).
#[inline]
pub fn member_property<'b>(callee: &'b Expression<'_>) -> Option<&'b str> {
    match callee {
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

/// Dotted path of a callee made of identifiers and static members.
///
/// `React.createElement` yields `"React.createElement"`; anything computed
/// or called yields `None`.
pub fn callee_path(callee: &Expression<'_>) -> Option<CompactString> {
    match callee {
        Expression::Identifier(identifier) => Some(identifier.name.as_str().into()),
        Expression::StaticMemberExpression(member) => {
            let mut path = callee_path(&member.object)?;
            path.push('.');
            path.push_str(member.property.name.as_str());
            Some(path)
        }
        _ => None,
    }
}

/// Whether `call` is `Children.toArray(...)` or `<ns>.Children.toArray(...)`.
///
/// Elements inside such a call are re-keyed by the runtime.
pub fn is_children_to_array_call(call: &CallExpression<'_>) -> bool {
    let Expression::StaticMemberExpression(member) = &call.callee else {
        return false;
    };
    if member.property.name.as_str() != "toArray" {
        return false;
    }
    match &member.object {
        Expression::Identifier(identifier) => identifier.name.as_str() == "Children",
        Expression::StaticMemberExpression(namespace) => {
            namespace.property.name.as_str() == "Children"
                && matches!(namespace.object, Expression::Identifier(_))
        }
        _ => false,
    }
}

/// Callback argument of an iteration call.
///
/// `xs.map(callback)` passes it first; `Array.from(xs, callback)` second.
pub fn iteration_callback<'b, 'a>(call: &'b CallExpression<'a>) -> Option<&'b Expression<'a>> {
    match member_property(&call.callee)? {
        "map" => call.arguments.first()?.as_expression(),
        "from" if call.arguments.len() >= 2 => call.arguments[1].as_expression(),
        _ => None,
    }
}
