//! Syntax tree for the molt mathematical notation language.
//!
//! This crate defines the nodes the parser produces (expressions, conditions,
//! statements), their canonical notation through `Display`, natural-language
//! readings in [`explain`], and a [`visit::Visitor`] for traversals.

pub mod ast;
pub mod display;
pub mod explain;
pub mod visit;

pub use ast::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::error::Error;

/// A result type for AST operations.
#[cfg(feature = "serde")]
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Serializes an AST node to a JSON string.
///
/// # Example
///
/// ```
/// use molt_ast::{to_json, Expression};
///
/// let json = to_json(&Expression::number(42.0)).unwrap();
/// assert!(json.contains(r#""type": "Number""#));
/// ```
#[cfg(feature = "serde")]
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserializes an AST node from a JSON string.
#[cfg(feature = "serde")]
pub fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}
