use molt_lexer::{Location, Token, TokenType};

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Deepest nesting of parentheses, braces and unary operators
pub const MAX_NESTING_DEPTH: usize = 128;

/// A stream of tokens from the lexer
pub struct TokenStream<'a> {
    /// The tokens being parsed
    tokens: &'a [Token],
    /// Current position in the token stream
    position: usize,
    /// Nesting of the construct being parsed
    depth: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new token stream from a slice of tokens
    pub fn new(tokens: &'a [Token]) -> Self {
        TokenStream {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Get the current token without advancing
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Type of the current token, if any
    pub fn peek_type(&self) -> Option<&'a TokenType> {
        self.peek().map(|token| &token.token_type)
    }

    /// Look ahead at the next token without consuming it
    pub fn peek_is(&self, expected: &TokenType) -> bool {
        matches!(self.peek(), Some(token) if token.token_type == *expected)
    }

    /// Get the next token and advance the position
    pub fn pop(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if let Some(token) = token {
            log::trace!("pop {token}");
            self.position += 1;
        }
        token
    }

    /// Consume the next token when it has the given type
    pub fn pop_if(&mut self, expected: &TokenType) -> Option<&'a Token> {
        if self.peek_is(expected) {
            self.pop()
        } else {
            None
        }
    }

    /// Location of the current token, or of the end of the last token at end of input
    pub fn location(&self) -> Option<Location> {
        match self.peek() {
            Some(token) => Some(token.location),
            None => self.tokens.last().map(|last| {
                let width = last.lexeme.as_str().len();
                Location {
                    line: last.location.line,
                    column: last.location.column + last.lexeme.as_str().chars().count(),
                    offset: last.location.offset + width,
                }
            }),
        }
    }

    /// Get the remaining tokens as a slice
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position..]
    }

    /// Check if we're at the end of input
    pub fn is_empty(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Runs `parse` one nesting level deeper, failing once the input nests
    /// past [`MAX_NESTING_DEPTH`].
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorKind::Expected {
                message: "expression is nested too deeply".to_string(),
            }));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// An error of `kind` anchored at the current token
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::at_token(kind, token),
            None => ParseError::new(kind, self.location()),
        }
    }

    /// An "unexpected token" error for the current token, or end of input
    pub fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::at_token(
                ParseErrorKind::UnexpectedToken {
                    found: token.token_type.describe(),
                },
                token,
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEof, self.location()),
        }
    }
}

/// Consumes the next token if it has type `expected`, otherwise fails with `kind`.
pub fn expect(
    stream: &mut TokenStream<'_>,
    expected: &TokenType,
    kind: ParseErrorKind,
) -> ParseResult<Token> {
    match stream.pop_if(expected) {
        Some(token) => Ok(token.clone()),
        None => Err(stream.error(kind)),
    }
}
