//! Parsing helpers shared by the unit tests of this crate.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, JSXElement, Program, Statement};
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;

pub fn with_program<R>(source: &str, f: impl FnOnce(&Program<'_>) -> R) -> R {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::jsx())
        .with_options(ParseOptions {
            preserve_parens: false,
            ..ParseOptions::default()
        })
        .parse();
    assert!(
        ret.errors.is_empty(),
        "unexpected parse errors in {source:?}: {:?}",
        ret.errors
    );
    f(&ret.program)
}

pub fn with_expression<R>(source: &str, f: impl FnOnce(&Expression<'_>) -> R) -> R {
    with_program(source, |program| match program.body.first() {
        Some(Statement::ExpressionStatement(statement)) => f(&statement.expression),
        _ => panic!("expected an expression statement in {source:?}"),
    })
}

pub fn with_element<R>(source: &str, f: impl FnOnce(&JSXElement<'_>) -> R) -> R {
    with_expression(source, |expression| match expression {
        Expression::JSXElement(element) => f(element),
        _ => panic!("expected a JSX element in {source:?}"),
    })
}
