//! Function bodies and everything else that opens with `{`.
//!
//! Four forms share the lexical prefix `{ <expression>`:
//!
//! * `{ x | g(x) }` a bracketed expression (or a one-element set)
//! * `{ y | y, y }` a finite set
//! * `{ y | y < x, y > 0 }` set-builder notation
//! * `{ x = 2: 1, x = 3: 9, 0 }` a piecewise definition
//!
//! The body is read as an expression first. What follows it decides the form:
//! `}` closes a bracketed expression, `,` continues a finite set, and a
//! comparator turns the expression into the left side of a condition. After
//! that condition, `:` means piecewise while `,` or `}` means set-builder, in
//! which case the left side has to be taken apart again: `y | y < x` was read
//! as `(y | y) < x`, and the `y |` prefix is the bound variable.

use log::debug;
use molt_ast::{
    BinaryExpression, BinaryOperator, Condition, ConditionSet, Expression, PiecewiseBranch,
};
use molt_lexer::{Location, TokenType};

use super::conditions::{parse_condition, parse_condition_with_left, ProvisionalCondition};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::expressions::parse_expression;
use super::token_stream::{expect, TokenStream};

/// How to read a brace pair holding a single expression, such as `{ x }`.
///
/// The text alone cannot tell a bracketed expression from a one-element set,
/// so the caller decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonPolicy {
    /// `{ x }` is just `x`. Used for definition bodies.
    Expression,
    /// `{ x }` is the set containing `x`. Used inside expressions.
    FiniteSet,
}

/// Parses the right-hand side of a definition.
pub fn parse_function_body(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    if stream.pop_if(&TokenType::LeftBrace).is_none() {
        return parse_expression(stream);
    }
    parse_function_body_after_curly(stream, SingletonPolicy::Expression)
}

/// Parses a braced form whose `{` has already been consumed, up to and
/// including the matching `}`.
pub fn parse_function_body_after_curly(
    stream: &mut TokenStream<'_>,
    policy: SingletonPolicy,
) -> ParseResult<Expression> {
    let start = stream.location();
    let first = parse_expression(stream)?;

    match stream.peek_type() {
        Some(TokenType::RightBrace) => {
            stream.pop();
            debug!("braces hold a single expression, read as {policy:?}");
            return Ok(match policy {
                SingletonPolicy::Expression => first,
                SingletonPolicy::FiniteSet => Expression::FiniteSet(vec![first]),
            });
        }
        Some(TokenType::Comma) => {
            debug!("braces hold a finite set");
            let set = parse_rest_of_finite_set(stream, first)?;
            expect(stream, &TokenType::RightBrace, ParseErrorKind::UnmatchedBrace)?;
            return Ok(set);
        }
        None => return Err(stream.error(ParseErrorKind::UnmatchedBrace)),
        Some(_) => {}
    }

    let condition = parse_condition_with_left(stream, first)?;

    let body = match stream.peek_type() {
        Some(TokenType::Comma) | Some(TokenType::RightBrace) => {
            debug!("braces hold set-builder notation");
            parse_rest_of_set_builder(stream, condition, start)?
        }
        Some(TokenType::Colon) => {
            debug!("braces hold a piecewise definition");
            parse_rest_of_piecewise(stream, condition.finish())?
        }
        None => return Err(stream.error(ParseErrorKind::UnmatchedBrace)),
        Some(_) => return Err(stream.error(ParseErrorKind::AmbiguousForm)),
    };

    expect(stream, &TokenType::RightBrace, ParseErrorKind::UnmatchedBrace)?;
    Ok(body)
}

/// Collects `, e2, e3` after the first element, stopping at `}` or the end
/// of input. Leaves the `}` in place.
///
/// Separators are lenient: the comma after an element is optional, so
/// `{ 1, 2, }` holds two elements and `{ 1, 2 3 }` three.
pub fn parse_rest_of_finite_set(
    stream: &mut TokenStream<'_>,
    first: Expression,
) -> ParseResult<Expression> {
    expect(stream, &TokenType::Comma, ParseErrorKind::Expected {
        message: "expected ',' after the first element of a set".to_string(),
    })?;
    let mut elements = vec![first];
    while !stream.is_empty() && !stream.peek_is(&TokenType::RightBrace) {
        elements.push(parse_expression(stream)?);
        stream.pop_if(&TokenType::Comma);
    }
    Ok(Expression::FiniteSet(elements))
}

/// Collects the branches of a piecewise definition whose first guard has
/// been parsed. Leaves the `}` in place.
pub fn parse_rest_of_piecewise(
    stream: &mut TokenStream<'_>,
    first_condition: Condition,
) -> ParseResult<Expression> {
    expect(stream, &TokenType::Colon, ParseErrorKind::MissingColon)?;
    let value = parse_expression(stream)?;
    let mut branches = vec![PiecewiseBranch::new(first_condition, value)];

    while let Some(comma) = stream.pop_if(&TokenType::Comma) {
        if stream.peek_is(&TokenType::RightBrace) {
            return Err(ParseError::at_token(ParseErrorKind::TrailingComma, comma));
        }

        let expr = parse_expression(stream)?;
        match stream.peek_type() {
            Some(TokenType::RightBrace) => {
                branches.push(PiecewiseBranch::new(Condition::TRUE, expr));
                break;
            }
            Some(TokenType::Comma) => return Err(stream.error(ParseErrorKind::ElseNotLast)),
            None => return Err(stream.error(ParseErrorKind::UnmatchedBrace)),
            Some(_) => {}
        }

        let condition = parse_condition_with_left(stream, expr)?.finish();
        expect(stream, &TokenType::Colon, ParseErrorKind::MissingColon)?;
        let value = parse_expression(stream)?;
        branches.push(PiecewiseBranch::new(condition, value));
    }

    match stream.peek_type() {
        Some(TokenType::RightBrace) => Ok(Expression::Piecewise(branches)),
        None => Err(stream.error(ParseErrorKind::UnmatchedBrace)),
        Some(_) => Err(stream.error(ParseErrorKind::MissingSeparator)),
    }
}

/// Turns `(v | lhs) cmp rhs` into the set of all `v` with `lhs cmp rhs`,
/// then collects any further `, condition` clauses. Leaves the `}` in place.
pub fn parse_rest_of_set_builder(
    stream: &mut TokenStream<'_>,
    condition: ProvisionalCondition,
    start: Option<Location>,
) -> ParseResult<Expression> {
    let ProvisionalCondition {
        left,
        comparator,
        right,
    } = condition;

    let union = match left {
        Expression::Binary(binary) if binary.operator == BinaryOperator::Union => binary,
        _ => return Err(ParseError::new(ParseErrorKind::SetBuilderMissingPipe, start)),
    };
    let BinaryExpression {
        left: bound,
        right: predicate,
        ..
    } = *union;
    let variable = match bound {
        Expression::Variable(variable) => variable,
        other => {
            return Err(ParseError::new(
                ParseErrorKind::SetBuilderNotVariable {
                    found: other.kind_name().to_string(),
                },
                start,
            ))
        }
    };

    let mut conditions = ConditionSet::new();
    conditions.insert(Condition::compare(predicate, comparator, right));
    while stream.pop_if(&TokenType::Comma).is_some() {
        conditions.insert(parse_condition(stream)?);
    }

    Ok(Expression::infinite_set(variable, conditions))
}
