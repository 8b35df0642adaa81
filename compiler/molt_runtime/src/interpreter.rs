use std::rc::Rc;

use log::{debug, info};
use molt_ast::{Program, Statement};

use crate::error::EvalResult;
use crate::eval::{Check, Evaluate};
use crate::value::{FunctionValue, Value, Variables};

/// Options for running a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Follow each printed result with the notation that produced it
    pub explain: bool,
}

/// Runs statements in order against one persistent set of bindings.
#[derive(Debug, Default)]
pub struct Interpreter {
    vars: Variables,
    config: RunConfig,
}

impl Interpreter {
    pub fn new(config: RunConfig) -> Self {
        Self {
            vars: Variables::new(),
            config,
        }
    }

    pub fn config(&self) -> RunConfig {
        self.config
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// Runs every statement and returns the printed lines. Stops at the first
    /// error; bindings made before it remain.
    pub fn run(&mut self, program: &Program) -> EvalResult<Vec<String>> {
        info!("running {} statements", program.statements.len());
        let mut output = Vec::new();
        for statement in &program.statements {
            if let Some(line) = self.execute(statement)? {
                output.push(line);
            }
        }
        Ok(output)
    }

    /// Runs one statement, returning the line it prints, if any.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Option<String>> {
        match statement {
            Statement::Let(stmt) => {
                let value = stmt.value.evaluate(&self.vars)?;
                debug!("{} = {value}", stmt.variable);
                self.vars.set(stmt.variable.name.clone(), value);
                Ok(None)
            }
            Statement::FunctionDef(def) => {
                debug!("defining {}", def.name);
                let function = FunctionValue {
                    name: def.name.name.clone(),
                    parameters: def.parameters.clone(),
                    body: def.body.clone(),
                };
                self.vars
                    .set(def.name.name.clone(), Value::Function(Rc::new(function)));
                Ok(None)
            }
            Statement::Eval(expr) => {
                let value = expr.evaluate(&self.vars)?;
                Ok(Some(self.annotate(value.to_string(), expr)))
            }
            Statement::Check(condition) => {
                let holds = condition.check(&self.vars)?;
                Ok(Some(self.annotate(holds.to_string(), condition)))
            }
        }
    }

    fn annotate(&self, result: String, source: &dyn std::fmt::Display) -> String {
        if self.config.explain {
            format!("{result}  # {source}")
        } else {
            result
        }
    }
}
