//! Values produced by functions, collected per code path.
//!
//! While a traversal walks the tree, every function opens a frame on entry.
//! `return <expr>` statements add a candidate to the innermost open frame,
//! and leaving the function publishes the frame under its [`FunctionKey`].
//! An arrow with an expression body contributes that body as its only
//! candidate. A consumer visiting `xs.map(callback)` on exit can then ask
//! what the callback may return.

use lacquer_carton::FxHashMap;
use oxc_ast::ast::{ArrowFunctionExpression, Expression, Function, Statement};
use oxc_span::Span;

/// Stable identity of a function node within one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionKey(Span);

impl FunctionKey {
    #[inline]
    pub fn of_function(function: &Function<'_>) -> Self {
        Self(function.span)
    }

    #[inline]
    pub fn of_arrow(arrow: &ArrowFunctionExpression<'_>) -> Self {
        Self(arrow.span)
    }

    /// Key of an expression that is a function or arrow literal
    pub fn of_callback(expression: &Expression<'_>) -> Option<Self> {
        match expression {
            Expression::FunctionExpression(function) => Some(Self::of_function(function)),
            Expression::ArrowFunctionExpression(arrow) => Some(Self::of_arrow(arrow)),
            Expression::ParenthesizedExpression(parenthesized) => {
                Self::of_callback(&parenthesized.expression)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn span(self) -> Span {
        self.0
    }
}

/// Body expression of an arrow written as `() => expr`.
pub fn implicit_return<'a>(arrow: &'a ArrowFunctionExpression<'a>) -> Option<&'a Expression<'a>> {
    if !arrow.expression {
        return None;
    }
    match arrow.body.statements.first() {
        Some(Statement::ExpressionStatement(statement)) => Some(&statement.expression),
        _ => None,
    }
}

/// Per-traversal table of function candidates.
#[derive(Debug, Default)]
pub struct CallbackResults<'a> {
    /// Open frames, innermost last
    open: Vec<Vec<&'a Expression<'a>>>,
    /// Published candidates by function
    published: FxHashMap<FunctionKey, Vec<&'a Expression<'a>>>,
}

impl<'a> CallbackResults<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a function's code path.
    #[inline]
    pub fn open(&mut self) {
        self.open.push(Vec::new());
    }

    /// Record `return <argument>` in the innermost open function.
    ///
    /// Ignored when no function is open.
    #[inline]
    pub fn record_return(&mut self, argument: &'a Expression<'a>) {
        if let Some(frame) = self.open.last_mut() {
            frame.push(argument);
        }
    }

    /// End the innermost function's code path and publish its candidates.
    pub fn close(&mut self, key: FunctionKey, implicit: Option<&'a Expression<'a>>) {
        let mut candidates = self.open.pop().unwrap_or_default();
        candidates.extend(implicit);
        tracing::trace!(
            start = key.span().start,
            candidates = candidates.len(),
            "code path closed"
        );
        self.published.entry(key).or_default().extend(candidates);
    }

    /// Candidates of a closed function.
    #[inline]
    pub fn results(&self, key: FunctionKey) -> Option<&[&'a Expression<'a>]> {
        self.published.get(&key).map(Vec::as_slice)
    }

    /// Candidates of a callback argument, if it is a closed function literal.
    #[inline]
    pub fn callback_results(&self, callback: &Expression<'_>) -> Option<&[&'a Expression<'a>]> {
        self.results(FunctionKey::of_callback(callback)?)
    }

    /// Number of currently open functions
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::with_program;
    use oxc_ast::AstKind;
    use oxc_ast_visit::Visit;
    use oxc_span::GetSpan;

    #[derive(Default)]
    struct Driver<'a> {
        results: CallbackResults<'a>,
        /// Functions in closing order
        closed: Vec<FunctionKey>,
    }

    impl<'a> Visit<'a> for Driver<'a> {
        fn enter_node(&mut self, kind: AstKind<'a>) {
            match kind {
                AstKind::Function(_) | AstKind::ArrowFunctionExpression(_) => {
                    self.results.open();
                }
                AstKind::ReturnStatement(statement) => {
                    if let Some(argument) = &statement.argument {
                        self.results.record_return(argument);
                    }
                }
                _ => {}
            }
        }

        fn leave_node(&mut self, kind: AstKind<'a>) {
            match kind {
                AstKind::Function(function) => {
                    let key = FunctionKey::of_function(function);
                    self.results.close(key, None);
                    self.closed.push(key);
                }
                AstKind::ArrowFunctionExpression(arrow) => {
                    let key = FunctionKey::of_arrow(arrow);
                    self.results.close(key, implicit_return(arrow));
                    self.closed.push(key);
                }
                _ => {}
            }
        }
    }

    /// Candidate source texts of every function, in closing order
    fn candidates(source: &str) -> Vec<Vec<String>> {
        with_program(source, |program| {
            let mut driver = Driver::default();
            driver.visit_program(program);
            assert_eq!(driver.results.depth(), 0);
            driver
                .closed
                .iter()
                .map(|key| {
                    driver
                        .results
                        .results(*key)
                        .unwrap()
                        .iter()
                        .map(|candidate| {
                            let span = candidate.span();
                            source[span.start as usize..span.end as usize].to_string()
                        })
                        .collect()
                })
                .collect()
        })
    }

    #[test]
    fn test_explicit_returns_in_order() {
        assert_eq!(
            candidates("items.map(function (item) { if (item) { return <a />; } return <b />; })"),
            vec![vec!["<a />", "<b />"]]
        );
    }

    #[test]
    fn test_implicit_arrow_body() {
        assert_eq!(
            candidates("const f = x => x ? <a /> : null;"),
            vec![vec!["x ? <a /> : null"]]
        );
    }

    #[test]
    fn test_nested_functions_have_independent_frames() {
        assert_eq!(
            candidates("function outer() { const inner = () => { return 1; }; return 2; }"),
            vec![vec!["1"], vec!["2"]]
        );
    }

    #[test]
    fn test_bare_return_is_not_a_candidate() {
        assert_eq!(
            candidates("function f() { return; }"),
            vec![Vec::<String>::new()]
        );
    }

    #[test]
    fn test_callback_lookup() {
        let source = "items.map(item => <li />)";
        with_program(source, |program| {
            let mut driver = Driver::default();
            driver.visit_program(program);
            let Some(Statement::ExpressionStatement(statement)) = program.body.first() else {
                unreachable!()
            };
            let Expression::CallExpression(call) = &statement.expression else {
                unreachable!()
            };
            let callback = call.arguments[0].as_expression().unwrap();
            let found = driver.results.callback_results(callback).unwrap();
            assert_eq!(found.len(), 1);
            assert!(matches!(found[0], Expression::JSXElement(_)));
        });
    }
}
