pub mod env;

pub use env::EvaluationVariables;
