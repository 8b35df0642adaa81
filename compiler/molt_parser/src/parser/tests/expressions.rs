use molt_ast::{BinaryOperator, Expression};
use pretty_assertions::assert_eq;

use crate::parser::test_utils::*;
use crate::parser::{parse_expression, ParseErrorKind, ParseResult};

fn expr(source: &str) -> ParseResult<Expression> {
    parse_all(source, parse_expression)
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(
        expr("1 + 2 * 3").unwrap(),
        binary(
            num(1.0),
            BinaryOperator::Add,
            binary(num(2.0), BinaryOperator::Mul, num(3.0))
        )
    );
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(
        expr("a - b - c").unwrap(),
        binary(
            binary(var("a"), BinaryOperator::Sub, var("b")),
            BinaryOperator::Sub,
            var("c")
        )
    );
}

#[test]
fn power_is_right_associative() {
    assert_eq!(
        expr("a ^ b ^ c").unwrap(),
        binary(
            var("a"),
            BinaryOperator::Pow,
            binary(var("b"), BinaryOperator::Pow, var("c"))
        )
    );
}

#[test]
fn negation_binds_looser_than_power() {
    assert_eq!(
        expr("-x^2").unwrap(),
        Expression::negation(binary(var("x"), BinaryOperator::Pow, num(2.0)))
    );
    assert_eq!(
        expr("2^-1").unwrap(),
        binary(num(2.0), BinaryOperator::Pow, Expression::negation(num(1.0)))
    );
}

#[test]
fn union_is_loosest() {
    assert_eq!(
        expr("a | b & c + 1").unwrap(),
        union(
            var("a"),
            binary(
                var("b"),
                BinaryOperator::Intersection,
                binary(var("c"), BinaryOperator::Add, num(1.0))
            )
        )
    );
}

#[test]
fn intersection_and_difference_share_a_level() {
    assert_eq!(
        expr("a & b \\ c").unwrap(),
        binary(
            binary(var("a"), BinaryOperator::Intersection, var("b")),
            BinaryOperator::Difference,
            var("c")
        )
    );
}

#[test]
fn chained_application() {
    assert_eq!(
        expr("f(1)(2, x)").unwrap(),
        Expression::application(apply("f", vec![num(1.0)]), vec![num(2.0), var("x")])
    );
}

#[test]
fn parentheses_group() {
    assert_eq!(
        expr("(a + b) * c").unwrap(),
        binary(
            binary(var("a"), BinaryOperator::Add, var("b")),
            BinaryOperator::Mul,
            var("c")
        )
    );
}

#[test]
fn braces_inside_expressions_are_sets() {
    assert_eq!(
        expr("{x} | {1, 2}").unwrap(),
        union(
            Expression::FiniteSet(vec![var("x")]),
            Expression::FiniteSet(vec![num(1.0), num(2.0)])
        )
    );
}

#[test]
fn set_builder_inside_an_expression() {
    let parsed = expr("{ y | y > 0 } & s").unwrap();
    match parsed {
        Expression::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Intersection);
            assert!(matches!(binary.left, Expression::InfiniteSet(_)));
        }
        other => panic!("expected an intersection, got {other:?}"),
    }
}

#[test]
fn unclosed_parenthesis() {
    assert_eq!(expr("(a + b").unwrap_err().kind, ParseErrorKind::UnmatchedParen);
    assert_eq!(expr("f(a, b").unwrap_err().kind, ParseErrorKind::UnmatchedParen);
}

#[test]
fn missing_operand() {
    assert_eq!(expr("a +").unwrap_err().kind, ParseErrorKind::UnexpectedEof);
}
