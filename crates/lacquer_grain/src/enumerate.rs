//! Branch-aware enumeration of the values an expression may produce.
//!
//! `a || <b />`, `c ? <d /> : <e />` and `x = <f />` can each evaluate to
//! more than one node. [`potential_values`] walks those branches and yields
//! the leaves in left-to-right depth-first order. The test of a conditional
//! is never a candidate.

use lacquer_carton::SmallVec;
use oxc_ast::ast::{Expression, JSXAttributeValue};

use crate::value::ValueNode;

/// Lazy iterator over the leaves reachable from a node.
///
/// Each call to [`potential_values`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct PotentialValues<'b, 'a> {
    stack: SmallVec<[ValueNode<'b, 'a>; 4]>,
}

/// Enumerate the possible produced values of `node`.
pub fn potential_values<'b, 'a>(node: impl Into<ValueNode<'b, 'a>>) -> PotentialValues<'b, 'a> {
    let mut stack = SmallVec::new();
    stack.push(node.into());
    PotentialValues { stack }
}

/// Enumerate the possible values of an attribute; a valueless attribute yields nothing.
pub fn potential_values_of_attribute<'b, 'a>(
    value: Option<&'b JSXAttributeValue<'a>>,
) -> PotentialValues<'b, 'a> {
    PotentialValues {
        stack: value.map(ValueNode::Attribute).into_iter().collect(),
    }
}

impl<'b, 'a> Iterator for PotentialValues<'b, 'a> {
    type Item = ValueNode<'b, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                ValueNode::Attribute(JSXAttributeValue::ExpressionContainer(container)) => {
                    match container.expression.as_expression() {
                        Some(expression) => self.stack.push(ValueNode::Expression(expression)),
                        // `{/* empty */}` has nothing to descend into
                        None => return Some(node),
                    }
                }
                ValueNode::Expression(expression) => match expression {
                    Expression::LogicalExpression(logical) => {
                        self.stack.push(ValueNode::Expression(&logical.right));
                        self.stack.push(ValueNode::Expression(&logical.left));
                    }
                    Expression::ConditionalExpression(conditional) => {
                        self.stack.push(ValueNode::Expression(&conditional.alternate));
                        self.stack.push(ValueNode::Expression(&conditional.consequent));
                    }
                    Expression::AssignmentExpression(assignment) => {
                        self.stack.push(ValueNode::Expression(&assignment.right));
                    }
                    Expression::ParenthesizedExpression(parenthesized) => {
                        self.stack
                            .push(ValueNode::Expression(&parenthesized.expression));
                    }
                    _ => return Some(node),
                },
                ValueNode::Attribute(_) => return Some(node),
            }
        }
        None
    }
}
