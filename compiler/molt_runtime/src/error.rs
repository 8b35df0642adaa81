use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised while evaluating a program. Arithmetic outside its domain is
/// not an error; it evaluates to `undefined`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("attempted to apply a {found}, which is not a function")]
    NotAFunction { found: String },

    #[error("attempted to evaluate a function which takes {expected} arguments, but found {found} arguments")]
    ArityMismatch { expected: usize, found: usize },

    #[error("{0}")]
    TypeMismatch(String),

    #[error("function calls nested more than {limit} deep")]
    RecursionLimit { limit: usize },
}

impl EvalError {
    /// `Could not <operation> <left> and <right>`
    pub fn mismatch(operation: &str, left: &str, right: &str) -> Self {
        EvalError::TypeMismatch(format!("Could not {operation} {left} and {right}"))
    }
}
