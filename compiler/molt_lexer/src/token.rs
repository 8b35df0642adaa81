use std::fmt;
use std::hash::{Hash, Hasher};

use crate::string_interner::InternedString;

/// Represents a token's location in the source code.
///
/// This struct tracks the position of a token in the source text, including
/// line and column numbers (1-based) and the byte offset (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based line number in the source file
    pub line: usize,
    /// The 1-based column number in the source file
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

/// Represents the type of a token in the molt notation language.
///
/// This enum includes all token types that can be produced by the lexer:
/// statement keywords, arithmetic and set operators, comparisons, delimiters,
/// identifiers and numbers.
#[derive(Debug, Clone)]
pub enum TokenType {
    // Keywords
    /// `let`
    Let,
    /// `eval`
    Eval,
    /// `check`
    Check,
    /// `in`, set membership
    In,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,

    // Set operators
    /// `|`, set union and the set-builder separator
    Pipe,
    /// `&`, set intersection
    Ampersand,
    /// `\`, set difference
    Backslash,

    // Comparisons
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,

    // Literals and identifiers
    /// A variable or function name
    Identifier(InternedString),
    /// A numeric literal
    Number(f64),
    /// Input the lexer could not recognise
    Error(String),
}

impl PartialEq for TokenType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TokenType::Identifier(a), TokenType::Identifier(b)) => a == b,
            (TokenType::Number(a), TokenType::Number(b)) => a.to_bits() == b.to_bits(),
            (TokenType::Error(a), TokenType::Error(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
                && !self.has_payload(),
        }
    }
}

impl Eq for TokenType {}

impl Hash for TokenType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TokenType::Identifier(s) => s.hash(state),
            TokenType::Number(n) => n.to_bits().hash(state),
            TokenType::Error(s) => s.hash(state),
            _ => {} // All other variants have no associated data
        }
    }
}

impl TokenType {
    fn has_payload(&self) -> bool {
        matches!(
            self,
            TokenType::Identifier(_) | TokenType::Number(_) | TokenType::Error(_)
        )
    }

    /// Returns true if this token compares two expressions inside a condition
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenType::Equal
                | TokenType::NotEqual
                | TokenType::Less
                | TokenType::LessEqual
                | TokenType::Greater
                | TokenType::GreaterEqual
                | TokenType::In
        )
    }

    /// A short human-readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            TokenType::Let => "`let`".to_string(),
            TokenType::Eval => "`eval`".to_string(),
            TokenType::Check => "`check`".to_string(),
            TokenType::In => "`in`".to_string(),
            TokenType::Plus => "`+`".to_string(),
            TokenType::Minus => "`-`".to_string(),
            TokenType::Star => "`*`".to_string(),
            TokenType::Slash => "`/`".to_string(),
            TokenType::Caret => "`^`".to_string(),
            TokenType::Pipe => "`|`".to_string(),
            TokenType::Ampersand => "`&`".to_string(),
            TokenType::Backslash => "`\\`".to_string(),
            TokenType::Equal => "`=`".to_string(),
            TokenType::NotEqual => "`!=`".to_string(),
            TokenType::Less => "`<`".to_string(),
            TokenType::LessEqual => "`<=`".to_string(),
            TokenType::Greater => "`>`".to_string(),
            TokenType::GreaterEqual => "`>=`".to_string(),
            TokenType::LeftParen => "`(`".to_string(),
            TokenType::RightParen => "`)`".to_string(),
            TokenType::LeftBrace => "`{`".to_string(),
            TokenType::RightBrace => "`}`".to_string(),
            TokenType::Comma => "`,`".to_string(),
            TokenType::Colon => "`:`".to_string(),
            TokenType::Identifier(name) => format!("identifier `{name}`"),
            TokenType::Number(n) => format!("number `{n}`"),
            TokenType::Error(msg) => msg.clone(),
        }
    }
}

/// Represents a token in the source code, including its type, lexeme, and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type of the token
    pub token_type: TokenType,
    /// The original source text of the token
    pub lexeme: InternedString,
    /// The location of the token in the source code
    pub location: Location,
}

impl Token {
    /// Creates a new token from a string that can be converted to an InternedString.
    pub fn new<S: Into<InternedString>>(token_type: TokenType, lexeme: S, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Returns true if this token is a statement keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Let | TokenType::Eval | TokenType::Check | TokenType::In
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.token_type, self.location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unit_variants_compare_by_kind() {
        assert_eq!(TokenType::LeftBrace, TokenType::LeftBrace);
        assert_ne!(TokenType::LeftBrace, TokenType::RightBrace);
    }

    #[test]
    fn test_payload_variants_compare_by_value() {
        assert_eq!(
            TokenType::Identifier(InternedString::from("x")),
            TokenType::Identifier(InternedString::from("x"))
        );
        assert_ne!(
            TokenType::Identifier(InternedString::from("x")),
            TokenType::Identifier(InternedString::from("y"))
        );
        assert_eq!(TokenType::Number(2.0), TokenType::Number(2.0));
        assert_ne!(TokenType::Number(2.0), TokenType::Number(3.0));
    }

    #[test]
    fn test_comparison_tokens() {
        assert!(TokenType::Equal.is_comparison());
        assert!(TokenType::In.is_comparison());
        assert!(!TokenType::Pipe.is_comparison());
        assert!(!TokenType::Colon.is_comparison());
    }

    #[test]
    fn test_location_display() {
        let location = Location {
            line: 3,
            column: 7,
            offset: 40,
        };
        assert_eq!(location.to_string(), "3:7");
    }
}
