use molt_lexer::{Location, Token};
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// The kinds of syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected `,`, `}}` or `:` after this condition; the braces hold neither a set-builder nor a piecewise definition")]
    AmbiguousForm,

    #[error("unmatched `{{`: expected a closing `}}`")]
    UnmatchedBrace,

    #[error("unmatched `(`: expected a closing `)`")]
    UnmatchedParen,

    #[error("set-builder notation needs a `|` between the bound variable and its condition")]
    SetBuilderMissingPipe,

    #[error("the left side of `|` in set-builder notation must be a variable, found {found}")]
    SetBuilderNotVariable { found: String },

    #[error("trailing comma before `}}` in a piecewise definition")]
    TrailingComma,

    #[error("the else clause must be the last item")]
    ElseNotLast,

    #[error("expected `:` after a piecewise condition")]
    MissingColon,

    #[error("missing separating comma between piecewise branches")]
    MissingSeparator,

    #[error("unexpected {found}")]
    UnexpectedToken { found: String },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected a comparison (`=`, `!=`, `<`, `<=`, `>`, `>=` or `in`), found {found}")]
    ExpectedComparison { found: String },

    #[error("{message}")]
    Expected { message: String },
}

/// A syntax error and where it happened.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Start of the offending token, or the end of input
    pub location: Option<Location>,
    /// Width of the offending token in characters
    pub width: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: Option<Location>) -> Self {
        Self {
            kind,
            location,
            width: 1,
        }
    }

    pub fn at_token(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            location: Some(token.location),
            width: token.lexeme.as_str().chars().count().max(1),
        }
    }

    pub fn expected(message: impl Into<String>, location: Option<Location>) -> Self {
        Self::new(
            ParseErrorKind::Expected {
                message: message.into(),
            },
            location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_render_braces() {
        let err = ParseError::new(ParseErrorKind::UnmatchedBrace, None);
        assert_eq!(err.to_string(), "unmatched `{`: expected a closing `}`");
        let err = ParseError::new(ParseErrorKind::ElseNotLast, None);
        assert_eq!(err.to_string(), "the else clause must be the last item");
    }

    #[test]
    fn not_variable_names_the_node_kind() {
        let err = ParseError::new(
            ParseErrorKind::SetBuilderNotVariable {
                found: "function application".into(),
            },
            None,
        );
        assert!(err.to_string().ends_with("found function application"));
    }
}
