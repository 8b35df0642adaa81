//! Condition parsing: `<expression> <comparator> <expression>`.

use molt_ast::{Comparator, Condition, Expression};
use molt_lexer::TokenType;

use super::error::{ParseErrorKind, ParseResult};
use super::expressions::parse_expression;
use super::token_stream::TokenStream;

/// A comparison whose left side has not been committed to yet.
///
/// The function-body parser reads `{ y | y < x` as the comparison
/// `(y | y) < x` before it knows whether the braces hold a set-builder or a
/// piecewise definition. It then either keeps the comparison as written
/// ([`ProvisionalCondition::finish`]) or takes it apart to pull the bound
/// variable out of the union.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionalCondition {
    pub left: Expression,
    pub comparator: Comparator,
    pub right: Expression,
}

impl ProvisionalCondition {
    /// The condition exactly as written.
    pub fn finish(self) -> Condition {
        Condition::compare(self.left, self.comparator, self.right)
    }
}

fn comparator(token_type: &TokenType) -> Option<Comparator> {
    match token_type {
        TokenType::Equal => Some(Comparator::Equal),
        TokenType::NotEqual => Some(Comparator::NotEqual),
        TokenType::Less => Some(Comparator::Less),
        TokenType::LessEqual => Some(Comparator::LessOrEqual),
        TokenType::Greater => Some(Comparator::Greater),
        TokenType::GreaterEqual => Some(Comparator::GreaterOrEqual),
        TokenType::In => Some(Comparator::Element),
        _ => None,
    }
}

/// Parses a fresh condition.
pub fn parse_condition(stream: &mut TokenStream<'_>) -> ParseResult<Condition> {
    let left = parse_expression(stream)?;
    Ok(parse_condition_with_left(stream, left)?.finish())
}

/// Parses the comparator and right side of a condition whose left side has
/// already been consumed as an expression.
pub fn parse_condition_with_left(
    stream: &mut TokenStream<'_>,
    left: Expression,
) -> ParseResult<ProvisionalCondition> {
    let Some(comparator) = stream.peek_type().and_then(comparator) else {
        let found = stream
            .peek()
            .map(|token| token.token_type.describe())
            .unwrap_or_else(|| "end of input".to_string());
        return Err(stream.error(ParseErrorKind::ExpectedComparison { found }));
    };
    stream.pop();
    let right = parse_expression(stream)?;
    Ok(ProvisionalCondition {
        left,
        comparator,
        right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use molt_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn condition(source: &str) -> ParseResult<Condition> {
        let tokens = tokenize(source);
        let mut stream = TokenStream::new(&tokens);
        parse_condition(&mut stream)
    }

    #[test]
    fn every_comparator() {
        let cases = [
            ("a = b", Comparator::Equal),
            ("a != b", Comparator::NotEqual),
            ("a < b", Comparator::Less),
            ("a <= b", Comparator::LessOrEqual),
            ("a > b", Comparator::Greater),
            ("a >= b", Comparator::GreaterOrEqual),
            ("a in b", Comparator::Element),
        ];
        for (source, expected) in cases {
            let parsed = condition(source).unwrap();
            assert_eq!(parsed.comparator(), Some(expected), "{source}");
        }
    }

    #[test]
    fn missing_comparator() {
        let err = condition("a + b").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::ExpectedComparison {
                found: "end of input".to_string()
            }
        );
    }

    #[test]
    fn with_left_keeps_union_left_side_whole() {
        let tokens = tokenize("< x");
        let mut stream = TokenStream::new(&tokens);
        let left = Expression::union(Expression::variable("y"), Expression::variable("y"));
        let provisional = parse_condition_with_left(&mut stream, left.clone()).unwrap();
        assert_eq!(provisional.left, left);
        assert_eq!(provisional.comparator, Comparator::Less);
        assert!(stream.is_empty());
    }
}
