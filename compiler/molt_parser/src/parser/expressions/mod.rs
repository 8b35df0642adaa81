//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing. From loosest to
//! tightest: `|`, then `&` and `\`, then `+` and `-`, then `*` and `/`, then
//! unary `-`, then `^` (right associative), then application `f(a)(b)`.
//! Comparison operators end an expression; they belong to conditions.

use molt_ast::{BinaryOperator, Expression};
use molt_lexer::TokenType;

use super::error::{ParseErrorKind, ParseResult};
use super::function_body::{parse_function_body_after_curly, SingletonPolicy};
use super::token_stream::{expect, TokenStream};

/// Parses one maximal expression.
pub fn parse_expression(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    parse_binary_expression(stream, 1)
}

/// The binary operator a token stands for, if any
fn binary_operator(token_type: &TokenType) -> Option<BinaryOperator> {
    match token_type {
        TokenType::Pipe => Some(BinaryOperator::Union),
        TokenType::Ampersand => Some(BinaryOperator::Intersection),
        TokenType::Backslash => Some(BinaryOperator::Difference),
        TokenType::Plus => Some(BinaryOperator::Add),
        TokenType::Minus => Some(BinaryOperator::Sub),
        TokenType::Star => Some(BinaryOperator::Mul),
        TokenType::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}

fn parse_binary_expression(
    stream: &mut TokenStream<'_>,
    min_precedence: u8,
) -> ParseResult<Expression> {
    let mut left = parse_unary(stream)?;

    while let Some(operator) = stream.peek_type().and_then(binary_operator) {
        let precedence = operator.precedence();
        if precedence < min_precedence {
            break;
        }
        stream.pop();
        // all of these are left associative
        let right = parse_binary_expression(stream, precedence + 1)?;
        left = Expression::binary(left, operator, right);
    }

    Ok(left)
}

fn parse_unary(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    if stream.pop_if(&TokenType::Minus).is_some() {
        let operand = stream.nested(parse_unary)?;
        return Ok(Expression::negation(operand));
    }
    parse_power(stream)
}

fn parse_power(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    let base = parse_postfix(stream)?;
    if stream.pop_if(&TokenType::Caret).is_some() {
        let exponent = stream.nested(parse_unary)?;
        return Ok(Expression::binary(base, BinaryOperator::Pow, exponent));
    }
    Ok(base)
}

fn parse_postfix(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    let mut expr = parse_primary(stream)?;
    while stream.pop_if(&TokenType::LeftParen).is_some() {
        let arguments = stream.nested(parse_arguments)?;
        expr = Expression::application(expr, arguments);
    }
    Ok(expr)
}

/// Parses `a, b, c)` after an opening parenthesis of an application.
fn parse_arguments(stream: &mut TokenStream<'_>) -> ParseResult<Vec<Expression>> {
    let mut arguments = Vec::new();
    if stream.pop_if(&TokenType::RightParen).is_some() {
        return Ok(arguments);
    }
    loop {
        arguments.push(parse_expression(stream)?);
        if stream.pop_if(&TokenType::Comma).is_none() {
            break;
        }
    }
    expect(stream, &TokenType::RightParen, ParseErrorKind::UnmatchedParen)?;
    Ok(arguments)
}

fn parse_primary(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    let token = match stream.peek() {
        Some(token) => token,
        None => return Err(stream.unexpected()),
    };

    match &token.token_type {
        TokenType::Number(value) => {
            stream.pop();
            Ok(Expression::number(*value))
        }
        TokenType::Identifier(name) => {
            stream.pop();
            Ok(Expression::variable(name.as_str()))
        }
        TokenType::LeftParen => {
            stream.pop();
            let inner = stream.nested(parse_expression)?;
            expect(stream, &TokenType::RightParen, ParseErrorKind::UnmatchedParen)?;
            Ok(inner)
        }
        TokenType::LeftBrace => {
            stream.pop();
            // inside an expression `{x}` is a one-element set
            stream.nested(|s| parse_function_body_after_curly(s, SingletonPolicy::FiniteSet))
        }
        _ => Err(stream.unexpected()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token_stream::MAX_NESTING_DEPTH;
    use molt_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Expression {
        let tokens = tokenize(source);
        let mut stream = TokenStream::new(&tokens);
        let expr = parse_expression(&mut stream).unwrap();
        assert!(stream.is_empty(), "unconsumed tokens in {source:?}");
        expr
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    #[test]
    fn stops_before_comparisons() {
        let tokens = tokenize("y | y < x");
        let mut stream = TokenStream::new(&tokens);
        let expr = parse_expression(&mut stream).unwrap();
        assert_eq!(expr, Expression::union(var("y"), var("y")));
        assert!(stream.peek_is(&TokenType::Less));
    }

    fn too_deep(source: &str) -> bool {
        let tokens = tokenize(source);
        let mut stream = TokenStream::new(&tokens);
        matches!(
            parse_expression(&mut stream),
            Err(err) if err.kind == ParseErrorKind::Expected {
                message: "expression is nested too deeply".to_string()
            }
        )
    }

    #[test]
    fn nesting_limit() {
        assert!(too_deep(&("-".repeat(MAX_NESTING_DEPTH + 10) + "1")));
        let parens = "(".repeat(300) + "1" + &")".repeat(300);
        assert!(too_deep(&parens));
    }

    #[test]
    fn brace_nesting_limit() {
        let braces = "{".repeat(300) + "1" + &"}".repeat(300);
        assert!(too_deep(&braces));

        let piecewise = "{ x = 1: ".repeat(300) + "0" + &", 0 }".repeat(300);
        assert!(too_deep(&piecewise));

        let shallow = "{".repeat(MAX_NESTING_DEPTH) + "1" + &"}".repeat(MAX_NESTING_DEPTH);
        assert!(matches!(parse(&shallow), Expression::FiniteSet(_)));
    }

    #[test]
    fn empty_argument_list() {
        assert_eq!(parse("f()"), Expression::application(var("f"), vec![]));
    }
}
