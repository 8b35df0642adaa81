//! Evaluator and statement interpreter for molt programs.
//!
//! [`Interpreter::run`] executes a parsed [`molt_ast::Program`] and returns the
//! lines its `eval` and `check` statements print.

pub mod error;
pub mod eval;
pub mod interpreter;
pub mod value;

pub use error::{EvalError, EvalResult};
pub use eval::{contains, Check, Evaluate, MAX_CALL_DEPTH};
pub use interpreter::{Interpreter, RunConfig};
pub use value::{FunctionValue, PredicateSet, Value, Variables};
