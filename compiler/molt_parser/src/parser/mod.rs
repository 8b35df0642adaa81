// Hand-written recursive descent parser for molt.

pub mod conditions;
pub mod diagnostics;
pub mod error;
pub mod expressions;
pub mod function_body;
pub mod statements;
pub mod token_stream;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use conditions::{parse_condition, parse_condition_with_left, ProvisionalCondition};
pub use diagnostics::{render_snippet, Diagnostic};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use expressions::parse_expression;
pub use function_body::{
    parse_function_body, parse_function_body_after_curly, parse_rest_of_finite_set,
    parse_rest_of_piecewise, parse_rest_of_set_builder, SingletonPolicy,
};
pub use statements::{parse_program, parse_statement};
pub use token_stream::{expect, TokenStream, MAX_NESTING_DEPTH};

use molt_ast::Program;
use molt_lexer::{Lexer, Token, TokenType};

/// Lexes and parses a whole source text.
pub fn parse_source(source: &str) -> ParseResult<Program> {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    if let Some(bad) = tokens
        .iter()
        .find(|token| matches!(token.token_type, TokenType::Error(_)))
    {
        return Err(ParseError::at_token(
            ParseErrorKind::Expected {
                message: bad.token_type.describe(),
            },
            bad,
        ));
    }
    log::debug!("lexed {} tokens", tokens.len());
    let mut stream = TokenStream::new(&tokens);
    parse_program(&mut stream)
}
