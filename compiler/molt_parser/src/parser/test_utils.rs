//! Test utilities for the parser

// This module is only used for testing purposes
#![allow(dead_code)]

use molt_ast::{BinaryOperator, Comparator, Condition, Expression};
use molt_lexer::{tokenize, Token};

use super::error::ParseResult;
use super::token_stream::TokenStream;

/// Runs `parse` over `source` and checks every token was consumed
pub fn parse_all<T>(
    source: &str,
    parse: impl FnOnce(&mut TokenStream<'_>) -> ParseResult<T>,
) -> ParseResult<T> {
    let tokens: Vec<Token> = tokenize(source);
    let mut stream = TokenStream::new(&tokens);
    let result = parse(&mut stream)?;
    assert!(
        stream.is_empty(),
        "unconsumed tokens after parsing {source:?}: {:?}",
        stream.remaining()
    );
    Ok(result)
}

pub fn var(name: &str) -> Expression {
    Expression::variable(name)
}

pub fn num(value: f64) -> Expression {
    Expression::number(value)
}

pub fn union(left: Expression, right: Expression) -> Expression {
    Expression::union(left, right)
}

pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::binary(left, operator, right)
}

pub fn apply(function: &str, arguments: Vec<Expression>) -> Expression {
    Expression::application(var(function), arguments)
}

pub fn compare(left: Expression, comparator: Comparator, right: Expression) -> Condition {
    Condition::compare(left, comparator, right)
}
