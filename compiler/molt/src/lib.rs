use molt_ast::explain::explain_statement;
use molt_parser::{parse_source, render_snippet, ParseError};
use molt_runtime::{EvalError, Interpreter, RunConfig};
use thiserror::Error;

/// Anything that stops a source text from running to completion.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("runtime error: {0}")]
    Runtime(#[from] EvalError),
}

impl SourceError {
    /// Formats the error for the terminal, with a source excerpt for syntax
    /// errors.
    pub fn render(&self, source: &str) -> String {
        match self {
            SourceError::Parse(err) => render_snippet(err, source),
            SourceError::Runtime(_) => self.to_string(),
        }
    }
}

/// Parse and run a whole program, returning what its `eval` and `check`
/// statements print.
pub fn run_source(source: &str, config: RunConfig) -> Result<Vec<String>, SourceError> {
    let program = parse_source(source)?;
    let mut interpreter = Interpreter::new(config);
    Ok(interpreter.run(&program)?)
}

/// Parse a program and read each statement back in words.
pub fn explain_source(source: &str) -> Result<Vec<String>, SourceError> {
    let program = parse_source(source)?;
    Ok(program.statements.iter().map(explain_statement).collect())
}
