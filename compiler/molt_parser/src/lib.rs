//! Parser for the molt mathematical notation language.
//!
//! Turns the lexer's tokens into a [`molt_ast::Program`]. The interesting part
//! is [`parser::parse_function_body`], which tells apart the four forms that
//! all open with `{ <expression>`: bracketed expressions, finite sets,
//! set-builder notation and piecewise definitions.

pub mod parser;

pub use parser::{
    parse_condition, parse_condition_with_left, parse_expression, parse_function_body,
    parse_function_body_after_curly, parse_program, parse_source, parse_statement, render_snippet,
    Diagnostic, ParseError, ParseErrorKind, ParseResult, ProvisionalCondition, SingletonPolicy,
    TokenStream, MAX_NESTING_DEPTH,
};
