//! molt lexical analyzer
//!
//! This crate converts molt source text (function definitions, set-builder
//! notation, piecewise functions, finite sets and arithmetic) into a stream of
//! tokens for the parser.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod string_interner;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{tokenize, Lexer, LogosToken};
pub use string_interner::InternedString;
pub use token::{Location, Token, TokenType};
