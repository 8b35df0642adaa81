//! Lexer for molt using the 'logos' crate
//! Recognizes statement keywords, identifiers, numbers, operators, and delimiters

use crate::token::{Location, Token, TokenType};
use logos::Logos;

/// Raw token type used by the logos lexer
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum LogosToken {
    // --- Keywords ---
    /// `let`
    #[token("let")]
    Let,
    /// `eval`
    #[token("eval")]
    Eval,
    /// `check`
    #[token("check")]
    Check,
    /// `in`
    #[token("in")]
    In,

    // --- Identifiers ---
    /// Variable and function names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // --- Literals ---
    /// Decimal numbers, with an optional fractional part
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // --- Operators (multi-char first) ---
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`
    #[token("|")]
    Pipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `\`
    #[token("\\")]
    Backslash,
    /// `=`
    #[token("=")]
    Equal,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    // --- Delimiters ---
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
}

/// molt lexer
pub struct Lexer<'source> {
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// Current line number (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
    /// Current byte offset in source
    offset: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'source str) -> Self {
        Self {
            logos_lexer: LogosToken::lexer(source),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Convert a LogosToken to our semantic Token type
    fn convert_token(&self, logos_token: LogosToken, lexeme: &str) -> Token {
        let token_type = match logos_token {
            // Keywords
            LogosToken::Let => TokenType::Let,
            LogosToken::Eval => TokenType::Eval,
            LogosToken::Check => TokenType::Check,
            LogosToken::In => TokenType::In,

            // Literals
            LogosToken::Identifier => TokenType::Identifier(lexeme.into()),
            LogosToken::Number(n) => TokenType::Number(n),

            // Operators
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,
            LogosToken::Caret => TokenType::Caret,
            LogosToken::Pipe => TokenType::Pipe,
            LogosToken::Ampersand => TokenType::Ampersand,
            LogosToken::Backslash => TokenType::Backslash,
            LogosToken::Equal => TokenType::Equal,
            LogosToken::NotEqual => TokenType::NotEqual,
            LogosToken::Less => TokenType::Less,
            LogosToken::LessEqual => TokenType::LessEqual,
            LogosToken::Greater => TokenType::Greater,
            LogosToken::GreaterEqual => TokenType::GreaterEqual,

            // Delimiters
            LogosToken::LParen => TokenType::LeftParen,
            LogosToken::RParen => TokenType::RightParen,
            LogosToken::LBrace => TokenType::LeftBrace,
            LogosToken::RBrace => TokenType::RightBrace,
            LogosToken::Comma => TokenType::Comma,
            LogosToken::Colon => TokenType::Colon,
        };

        Token::new(token_type, lexeme, self.location())
    }

    /// Advance line and column numbers up to the given byte offset
    fn update_position(&mut self, target: usize) {
        let source = self.logos_lexer.source();
        for c in source[self.offset..target].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.logos_lexer.next()?;
        let span = self.logos_lexer.span();
        let lexeme = self.logos_lexer.slice();
        // Skipped whitespace and comments still move the cursor
        self.update_position(span.start);
        let token = match logos_token {
            Ok(token) => self.convert_token(token, lexeme),
            Err(_) => Token::new(
                TokenType::Error(format!(
                    "Invalid token `{}` at {}:{}",
                    lexeme, self.line, self.column
                )),
                lexeme,
                self.location(),
            ),
        };
        #[cfg(feature = "logging")]
        log::trace!("lexed {}", token);
        self.update_position(span.end);
        Some(token)
    }
}

/// Tokenize a whole source string
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = "let x = 42";
        let mut lexer = Lexer::new(source);

        let token = lexer.next().unwrap();
        assert!(matches!(token.token_type, TokenType::Let));

        let token = lexer.next().unwrap();
        assert!(matches!(token.token_type, TokenType::Identifier(ref s) if s == "x"));

        let token = lexer.next().unwrap();
        assert!(matches!(token.token_type, TokenType::Equal));

        let token = lexer.next().unwrap();
        assert!(matches!(token.token_type, TokenType::Number(n) if n == 42.0));

        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_set_builder() {
        let source = "{ y | y <= x }";
        let types: Vec<TokenType> = Lexer::new(source).map(|t| t.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::LeftBrace,
                TokenType::Identifier("y".into()),
                TokenType::Pipe,
                TokenType::Identifier("y".into()),
                TokenType::LessEqual,
                TokenType::Identifier("x".into()),
                TokenType::RightBrace,
            ]
        );
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        let tokens = tokenize("eval check in inside");
        assert!(matches!(tokens[0].token_type, TokenType::Eval));
        assert!(matches!(tokens[1].token_type, TokenType::Check));
        assert!(matches!(tokens[2].token_type, TokenType::In));
        assert!(matches!(tokens[3].token_type, TokenType::Identifier(ref s) if s == "inside"));
    }

    #[test]
    fn test_locations_account_for_whitespace_and_newlines() {
        let tokens = tokenize("f(x) =\n  { x }");
        let brace = &tokens[5];
        assert!(matches!(brace.token_type, TokenType::LeftBrace));
        assert_eq!(brace.location.line, 2);
        assert_eq!(brace.location.column, 3);
        assert_eq!(brace.location.offset, 9);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = tokenize("let a = 1 # the answer\neval a");
        assert_eq!(tokens.len(), 6);
        assert!(matches!(tokens[4].token_type, TokenType::Eval));
        assert_eq!(tokens[4].location.line, 2);
    }

    #[test]
    fn test_invalid_input_becomes_error_token() {
        let tokens = tokenize("x ? y");
        assert!(matches!(tokens[1].token_type, TokenType::Error(_)));
        assert_eq!(tokens[1].lexeme, "?");
    }
}
