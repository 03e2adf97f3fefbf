//! AST visitor for lint rule execution.
//!
//! Drives rules from `oxc_ast_visit::Visit`'s `enter_node` / `leave_node`
//! hooks. Besides dispatching node events it maintains the per-traversal
//! state the rules share: function code paths and the `Children.toArray`
//! nesting depth.

use crate::context::LintContext;
use crate::rule::{RegisteredRule, Rule};
use lacquer_grain::{implicit_return, is_children_to_array_call, FunctionKey};
use oxc_ast::AstKind;
use oxc_ast_visit::Visit;

/// Visit the AST and run all rules
pub struct LintVisitor<'a, 'ctx, 'rules> {
    ctx: &'ctx mut LintContext<'a>,
    rules: &'rules [RegisteredRule],
}

impl<'a, 'ctx, 'rules> LintVisitor<'a, 'ctx, 'rules> {
    /// Create a new visitor
    #[inline]
    pub fn new(ctx: &'ctx mut LintContext<'a>, rules: &'rules [RegisteredRule]) -> Self {
        Self { ctx, rules }
    }

    #[inline]
    fn run_rules(&mut self, mut check: impl FnMut(&dyn Rule, &mut LintContext<'a>)) {
        let rules = self.rules;
        for entry in rules {
            self.ctx.enter_rule(entry.rule.meta(), entry.severity);
            check(entry.rule.as_ref(), &mut *self.ctx);
        }
    }
}

impl<'a> Visit<'a> for LintVisitor<'a, '_, '_> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::Function(_) | AstKind::ArrowFunctionExpression(_) => {
                self.ctx.open_code_path();
            }
            AstKind::ReturnStatement(statement) => {
                if let Some(argument) = &statement.argument {
                    self.ctx.record_return(argument);
                }
            }
            AstKind::CallExpression(call) => {
                if is_children_to_array_call(call) {
                    self.ctx.enter_children_to_array();
                }
                self.run_rules(|rule, ctx| rule.enter_call_expression(ctx, call));
            }
            AstKind::ArrayExpression(array) => {
                self.run_rules(|rule, ctx| rule.check_array_expression(ctx, array));
            }
            AstKind::JSXElement(element) => {
                self.run_rules(|rule, ctx| rule.check_jsx_element(ctx, element));
            }
            AstKind::JSXOpeningElement(element) => {
                self.run_rules(|rule, ctx| rule.check_jsx_opening_element(ctx, element));
            }
            AstKind::JSXFragment(fragment) => {
                self.run_rules(|rule, ctx| rule.check_jsx_fragment(ctx, fragment));
            }
            AstKind::JSXText(text) => {
                self.run_rules(|rule, ctx| rule.check_jsx_text(ctx, text));
            }
            _ => {}
        }
    }

    fn leave_node(&mut self, kind: AstKind<'a>) {
        match kind {
            AstKind::Function(function) => {
                self.ctx
                    .close_code_path(FunctionKey::of_function(function), None);
            }
            AstKind::ArrowFunctionExpression(arrow) => {
                self.ctx
                    .close_code_path(FunctionKey::of_arrow(arrow), implicit_return(arrow));
            }
            AstKind::CallExpression(call) => {
                self.run_rules(|rule, ctx| rule.exit_call_expression(ctx, call));
                if is_children_to_array_call(call) {
                    self.ctx.leave_children_to_array();
                }
            }
            _ => {}
        }
    }
}
