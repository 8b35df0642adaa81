//! Evaluation of expressions and conditions.
//!
//! Function application is dynamically scoped: the body runs in a copy of
//! the caller's bindings with the parameters bound on top.

use log::trace;
use molt_ast::visit::{free_variables, free_variables_of_set};
use molt_ast::{Application, BinaryOperator, Comparator, Condition, Expression, InfiniteSet};

use crate::error::{EvalError, EvalResult};
use crate::value::{PredicateSet, Value, Variables};

/// Deepest nesting of function calls and set-builder membership tests
pub const MAX_CALL_DEPTH: usize = 256;

pub trait Evaluate {
    fn evaluate(&self, vars: &Variables) -> EvalResult<Value>;
}

pub trait Check {
    fn check(&self, vars: &Variables) -> EvalResult<bool>;
}

impl Evaluate for Expression {
    fn evaluate(&self, vars: &Variables) -> EvalResult<Value> {
        match self {
            Expression::Number(number) => Ok(Value::Number(number.value())),
            Expression::Variable(variable) => vars
                .get(&variable.name)
                .cloned()
                .ok_or_else(|| EvalError::UnknownVariable(variable.name.clone())),
            Expression::Binary(binary) => {
                let left = binary.left.evaluate(vars)?;
                let right = binary.right.evaluate(vars)?;
                binary_operation(binary.operator, left, right)
            }
            Expression::Negation(operand) => match operand.evaluate(vars)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                Value::Undefined => Ok(Value::Undefined),
                other => Err(EvalError::TypeMismatch(format!(
                    "Could not negate a {}",
                    other.type_name()
                ))),
            },
            Expression::FiniteSet(elements) => {
                let values = elements
                    .iter()
                    .map(|element| element.evaluate(vars))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::finite_set(values))
            }
            Expression::InfiniteSet(set) => Ok(Value::predicate_set(PredicateSet::Builder {
                set: (**set).clone(),
                captured: capture(set, vars),
            })),
            Expression::Piecewise(branches) => {
                for branch in branches {
                    if branch.condition.check(vars)? {
                        return branch.value.evaluate(vars);
                    }
                }
                Ok(Value::Undefined)
            }
            Expression::Application(app) => apply(app, vars),
        }
    }
}

impl Check for Condition {
    fn check(&self, vars: &Variables) -> EvalResult<bool> {
        let comparison = match self {
            Condition::True => return Ok(true),
            Condition::Comparison(comparison) => comparison,
        };
        let left = comparison.left.evaluate(vars)?;
        let right = comparison.right.evaluate(vars)?;
        if left.is_undefined() || right.is_undefined() {
            return Ok(false);
        }
        match comparison.comparator {
            Comparator::Equal => Ok(left.same_as(&right)),
            Comparator::NotEqual => Ok(!left.same_as(&right)),
            Comparator::Less => numeric(&left, &right, |a, b| a < b),
            Comparator::LessOrEqual => numeric(&left, &right, |a, b| a <= b),
            Comparator::Greater => numeric(&left, &right, |a, b| a > b),
            Comparator::GreaterOrEqual => numeric(&left, &right, |a, b| a >= b),
            Comparator::Element => contains(&right, &left, vars),
        }
    }
}

fn numeric(left: &Value, right: &Value, holds: fn(f64, f64) -> bool) -> EvalResult<bool> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(holds(*a, *b)),
        _ => Err(EvalError::mismatch(
            "compare",
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Whether `element` belongs to `set`.
pub fn contains(set: &Value, element: &Value, vars: &Variables) -> EvalResult<bool> {
    match set {
        Value::FiniteSet(elements) => Ok(elements.iter().any(|e| e.same_as(element))),
        Value::PredicateSet(predicate) => match predicate.as_ref() {
            PredicateSet::Builder { set, captured } => {
                if vars.depth() >= MAX_CALL_DEPTH {
                    return Err(EvalError::RecursionLimit {
                        limit: MAX_CALL_DEPTH,
                    });
                }
                let mut scope = captured.copy().with_depth(vars.depth() + 1);
                scope.set(set.variable.name.clone(), element.clone());
                for condition in &set.conditions {
                    if !condition.check(&scope)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            PredicateSet::Union(a, b) => Ok(contains(a, element, vars)? || contains(b, element, vars)?),
            PredicateSet::Intersection(a, b) => {
                Ok(contains(a, element, vars)? && contains(b, element, vars)?)
            }
            PredicateSet::Difference(a, b) => {
                Ok(contains(a, element, vars)? && !contains(b, element, vars)?)
            }
        },
        Value::Undefined => Ok(false),
        other => Err(EvalError::TypeMismatch(format!(
            "Could not test membership in a {}",
            other.type_name()
        ))),
    }
}

/// The bindings a set-builder needs: the names its conditions read, plus
/// whatever the functions among them read in turn.
fn capture(set: &InfiniteSet, vars: &Variables) -> Variables {
    let mut wanted = free_variables_of_set(set);
    let mut pending: Vec<String> = wanted.iter().cloned().collect();
    while let Some(name) = pending.pop() {
        if let Some(Value::Function(function)) = vars.get(&name) {
            for dependency in free_variables(&function.body) {
                let is_parameter = function.parameters.iter().any(|p| p.name == dependency);
                if !is_parameter && wanted.insert(dependency.clone()) {
                    pending.push(dependency);
                }
            }
        }
    }
    vars.restrict(&wanted)
}

fn apply(app: &Application, vars: &Variables) -> EvalResult<Value> {
    let function = match app.function.evaluate(vars)? {
        Value::Function(function) => function,
        other => {
            return Err(EvalError::NotAFunction {
                found: other.type_name().to_string(),
            })
        }
    };
    if app.arguments.len() != function.parameters.len() {
        return Err(EvalError::ArityMismatch {
            expected: function.parameters.len(),
            found: app.arguments.len(),
        });
    }
    if vars.depth() >= MAX_CALL_DEPTH {
        return Err(EvalError::RecursionLimit {
            limit: MAX_CALL_DEPTH,
        });
    }

    let mut context = vars.enter_call();
    for (parameter, argument) in function.parameters.iter().zip(&app.arguments) {
        context.set(parameter.name.clone(), argument.evaluate(vars)?);
    }
    trace!("calling {} at depth {}", function.name, context.depth());
    function.body.evaluate(&context)
}

fn binary_operation(operator: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    if left.is_undefined() || right.is_undefined() {
        return Ok(Value::Undefined);
    }
    match operator {
        BinaryOperator::Add => arithmetic("add", left, right, |a, b| a + b),
        BinaryOperator::Sub => arithmetic("subtract", left, right, |a, b| a - b),
        BinaryOperator::Mul => arithmetic("multiply", left, right, |a, b| a * b),
        BinaryOperator::Div => arithmetic("divide", left, right, |a, b| {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }),
        BinaryOperator::Pow => arithmetic("exponentiate", left, right, f64::powf),
        BinaryOperator::Union => union(left, right),
        BinaryOperator::Intersection => intersection(left, right),
        BinaryOperator::Difference => difference(left, right),
    }
}

/// Applies `op` to two numbers. Results that are not finite are `undefined`.
fn arithmetic(
    operation: &str,
    left: Value,
    right: Value,
    op: impl Fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => {
            let result = op(*a, *b);
            if result.is_finite() {
                Ok(Value::Number(result))
            } else {
                Ok(Value::Undefined)
            }
        }
        _ => Err(EvalError::mismatch(
            operation,
            left.type_name(),
            right.type_name(),
        )),
    }
}

fn require_sets(operation: &str, left: &Value, right: &Value) -> EvalResult<()> {
    if left.is_set() && right.is_set() {
        Ok(())
    } else {
        Err(EvalError::mismatch(
            operation,
            left.type_name(),
            right.type_name(),
        ))
    }
}

fn union(left: Value, right: Value) -> EvalResult<Value> {
    require_sets("take the union of", &left, &right)?;
    if let (Value::FiniteSet(a), Value::FiniteSet(b)) = (&left, &right) {
        return Ok(Value::finite_set(a.iter().chain(b.iter()).cloned()));
    }
    Ok(Value::predicate_set(PredicateSet::Union(left, right)))
}

fn intersection(left: Value, right: Value) -> EvalResult<Value> {
    require_sets("intersect", &left, &right)?;
    if let (Value::FiniteSet(a), Value::FiniteSet(b)) = (&left, &right) {
        return Ok(Value::finite_set(
            a.iter()
                .filter(|x| b.iter().any(|y| x.same_as(y)))
                .cloned(),
        ));
    }
    Ok(Value::predicate_set(PredicateSet::Intersection(left, right)))
}

fn difference(left: Value, right: Value) -> EvalResult<Value> {
    require_sets("take the difference of", &left, &right)?;
    if let (Value::FiniteSet(a), Value::FiniteSet(b)) = (&left, &right) {
        return Ok(Value::finite_set(
            a.iter()
                .filter(|x| !b.iter().any(|y| x.same_as(y)))
                .cloned(),
        ));
    }
    Ok(Value::predicate_set(PredicateSet::Difference(left, right)))
}
