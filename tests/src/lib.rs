//! Shared helpers for the workspace integration tests.

use molt_runtime::{Interpreter, RunConfig};

/// A program under `fixtures/` together with the output it must print.
pub struct Fixture {
    pub name: &'static str,
    pub source: &'static str,
    pub expected: &'static str,
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "piecewise",
        source: include_str!("../fixtures/piecewise.molt"),
        expected: include_str!("../fixtures/piecewise.out"),
    },
    Fixture {
        name: "sets",
        source: include_str!("../fixtures/sets.molt"),
        expected: include_str!("../fixtures/sets.out"),
    },
];

/// Runs `source` from scratch and returns the printed lines.
pub fn run_lines(source: &str, config: RunConfig) -> Vec<String> {
    let program = match molt_parser::parse_source(source) {
        Ok(program) => program,
        Err(err) => panic!("{}", molt_parser::render_snippet(&err, source)),
    };
    match Interpreter::new(config).run(&program) {
        Ok(lines) => lines,
        Err(err) => panic!("runtime error: {err}"),
    }
}
