//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use oxc_ast::ast::{
    ArrayExpression, CallExpression, JSXElement, JSXFragment, JSXOpeningElement, JSXText,
};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that catch runtime bugs
    Essential,
    /// Rules that catch security issues
    Security,
    /// Rules that catch code which probably does not do what was meant (opt-in)
    Suspicious,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "react/jsx-key")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
    /// Message templates by message id, with `{{slot}}` placeholders
    pub messages: &'static [(&'static str, &'static str)],
    /// JSON Schema of the rule's options object
    pub schema: &'static str,
}

impl RuleMeta {
    /// Message template for `message_id`
    #[inline]
    pub fn message(&self, message_id: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
    }

    /// Whether the rule is part of the recommended set
    #[inline]
    pub fn is_recommended(&self) -> bool {
        !matches!(self.category, RuleCategory::Suspicious)
    }
}

/// Rule trait for implementing lint rules
///
/// Rules implement visitor-like methods that are called during AST traversal.
/// Each method receives a mutable reference to LintContext for reporting diagnostics.
/// Nodes are borrowed for the lifetime of the syntax tree.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Called when entering a call expression
    #[allow(unused_variables)]
    fn enter_call_expression<'a>(&self, ctx: &mut LintContext<'a>, call: &'a CallExpression<'a>) {}

    /// Called when leaving a call expression, after its arguments' code paths closed
    #[allow(unused_variables)]
    fn exit_call_expression<'a>(&self, ctx: &mut LintContext<'a>, call: &'a CallExpression<'a>) {}

    /// Called for array literals
    #[allow(unused_variables)]
    fn check_array_expression<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        array: &'a ArrayExpression<'a>,
    ) {
    }

    /// Called when entering a JSX element
    #[allow(unused_variables)]
    fn check_jsx_element<'a>(&self, ctx: &mut LintContext<'a>, element: &'a JSXElement<'a>) {}

    /// Called for each JSX opening element
    #[allow(unused_variables)]
    fn check_jsx_opening_element<'a>(
        &self,
        ctx: &mut LintContext<'a>,
        element: &'a JSXOpeningElement<'a>,
    ) {
    }

    /// Called when entering a shorthand fragment (`<>...</>`)
    #[allow(unused_variables)]
    fn check_jsx_fragment<'a>(&self, ctx: &mut LintContext<'a>, fragment: &'a JSXFragment<'a>) {}

    /// Called for JSX text children
    #[allow(unused_variables)]
    fn check_jsx_text<'a>(&self, ctx: &mut LintContext<'a>, text: &'a JSXText<'a>) {}
}

/// A registered rule and the severity it reports with
pub struct RegisteredRule {
    pub rule: Box<dyn Rule>,
    pub severity: Severity,
}

/// Registry holding all enabled lint rules
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule with its default severity
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let severity = rule.meta().default_severity;
        self.register_with_severity(rule, severity);
    }

    /// Register a rule with an explicit severity
    pub fn register_with_severity(&mut self, rule: Box<dyn Rule>, severity: Severity) {
        self.rules.push(RegisteredRule { rule, severity });
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[RegisteredRule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Create registry with the recommended rules at their default severity
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();
        for factory in crate::rules::builtin_rules() {
            if factory.meta.is_recommended() {
                registry.register(factory.create_default());
            }
        }
        registry
    }

    /// Create registry with every built-in rule
    pub fn with_all() -> Self {
        let mut registry = Self::new();
        for factory in crate::rules::builtin_rules() {
            registry.register(factory.create_default());
        }
        registry
    }
}
