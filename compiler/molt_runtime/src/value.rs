//! Runtime values.

use std::fmt;
use std::rc::Rc;

use molt_ast::{Expression, InfiniteSet, Variable};
use molt_env::EvaluationVariables;

pub type Variables = EvaluationVariables<Value>;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    /// The result of an operation outside its domain, such as `1 / 0`.
    Undefined,
    /// Distinct elements in the order they were first written.
    FiniteSet(Rc<Vec<Value>>),
    /// A set known only through its membership test.
    PredicateSet(Rc<PredicateSet>),
    Function(Rc<FunctionValue>),
}

/// Lazy sets. Membership is decided when asked, and nothing is enumerated.
#[derive(Debug)]
pub enum PredicateSet {
    /// `{ y | conditions }` with the bindings the conditions can reach.
    Builder {
        set: InfiniteSet,
        captured: Variables,
    },
    Union(Value, Value),
    Intersection(Value, Value),
    Difference(Value, Value),
}

#[derive(Debug)]
pub struct FunctionValue {
    pub name: String,
    pub parameters: Vec<Variable>,
    pub body: Expression,
}

impl Value {
    /// Builds a finite set, dropping later duplicates.
    pub fn finite_set(elements: impl IntoIterator<Item = Value>) -> Value {
        let mut distinct: Vec<Value> = Vec::new();
        for element in elements {
            if !distinct.iter().any(|seen| seen.duplicates(&element)) {
                distinct.push(element);
            }
        }
        Value::FiniteSet(Rc::new(distinct))
    }

    pub fn predicate_set(set: PredicateSet) -> Value {
        Value::PredicateSet(Rc::new(set))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::FiniteSet(_) | Value::PredicateSet(_))
    }

    /// Name of the value's kind for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Undefined => "undefined",
            Value::FiniteSet(_) | Value::PredicateSet(_) => "set",
            Value::Function(_) => "function",
        }
    }

    /// Mathematical equality.
    ///
    /// Finite sets are equal when they hold the same elements in any order.
    /// Predicate sets and functions are only equal to themselves, and
    /// `undefined` equals nothing.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::FiniteSet(a), Value::FiniteSet(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.same_as(y)))
            }
            (Value::PredicateSet(a), Value::PredicateSet(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn duplicates(&self, other: &Value) -> bool {
        (self.is_undefined() && other.is_undefined()) || self.same_as(other)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.duplicates(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Undefined => f.write_str("undefined"),
            Value::FiniteSet(elements) => {
                f.write_str("{")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("}")
            }
            Value::PredicateSet(set) => write!(f, "{set}"),
            Value::Function(function) => write!(f, "{function}"),
        }
    }
}

impl fmt::Display for PredicateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateSet::Builder { set, .. } => write!(f, "{set}"),
            PredicateSet::Union(a, b) => write!(f, "({a} | {b})"),
            PredicateSet::Intersection(a, b) => write!(f, "({a} & {b})"),
            PredicateSet::Difference(a, b) => write!(f, "({a} \\ {b})"),
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.is_empty() {
            return f.write_str("<function>");
        }
        let names: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        write!(f, "<function of {}>", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(values: &[f64]) -> Value {
        Value::finite_set(values.iter().copied().map(Value::Number))
    }

    #[test]
    fn numbers_print_without_trailing_zero() {
        assert_eq!(Value::Number(9.0).to_string(), "9");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }

    #[test]
    fn finite_sets_drop_duplicates_in_order() {
        let value = set(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(value.to_string(), "{3, 1, 2}");
    }

    #[test]
    fn finite_set_equality_ignores_order() {
        assert!(set(&[1.0, 2.0]).same_as(&set(&[2.0, 1.0])));
        assert!(!set(&[1.0, 2.0]).same_as(&set(&[1.0])));
    }

    #[test]
    fn undefined_equals_nothing() {
        assert!(!Value::Undefined.same_as(&Value::Undefined));
        assert_eq!(
            Value::finite_set(vec![Value::Undefined, Value::Undefined]).to_string(),
            "{undefined}"
        );
    }

    #[test]
    fn functions_print_their_parameters() {
        let function = FunctionValue {
            name: "f".into(),
            parameters: vec![Variable::new("x"), Variable::new("y")],
            body: Expression::number(1.0),
        };
        assert_eq!(function.to_string(), "<function of x, y>");
    }
}
