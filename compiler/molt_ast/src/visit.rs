//! Visitor pattern for traversing syntax trees.
//!
//! Implement [`Visitor`] and override the hooks you care about; the default
//! implementations walk into every child. The `walk_*` functions are the
//! default traversals and can be called from an override to keep descending.

use std::collections::BTreeSet;

use crate::ast::*;

/// A visitor over expressions and conditions.
pub trait Visitor {
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_condition(&mut self, condition: &Condition) {
        walk_condition(self, condition);
    }

    fn visit_variable(&mut self, _variable: &Variable) {}

    /// Called for the bound variable and conditions of `{ v | ... }`.
    fn visit_infinite_set(&mut self, set: &InfiniteSet) {
        walk_infinite_set(self, set);
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    match expr {
        Expression::Number(_) => {}
        Expression::Variable(variable) => visitor.visit_variable(variable),
        Expression::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        Expression::Negation(operand) => visitor.visit_expression(operand),
        Expression::FiniteSet(elements) => {
            for element in elements {
                visitor.visit_expression(element);
            }
        }
        Expression::InfiniteSet(set) => visitor.visit_infinite_set(set),
        Expression::Piecewise(branches) => {
            for branch in branches {
                visitor.visit_condition(&branch.condition);
                visitor.visit_expression(&branch.value);
            }
        }
        Expression::Application(app) => {
            visitor.visit_expression(&app.function);
            for argument in &app.arguments {
                visitor.visit_expression(argument);
            }
        }
    }
}

pub fn walk_condition<V: Visitor + ?Sized>(visitor: &mut V, condition: &Condition) {
    if let Condition::Comparison(comparison) = condition {
        visitor.visit_expression(&comparison.left);
        visitor.visit_expression(&comparison.right);
    }
}

pub fn walk_infinite_set<V: Visitor + ?Sized>(visitor: &mut V, set: &InfiniteSet) {
    for condition in &set.conditions {
        visitor.visit_condition(condition);
    }
}

/// Collects names that are read but not bound by an enclosing set-builder.
#[derive(Default)]
struct FreeVariables {
    bound: Vec<String>,
    free: BTreeSet<String>,
}

impl Visitor for FreeVariables {
    fn visit_variable(&mut self, variable: &Variable) {
        if !self.bound.contains(&variable.name) {
            self.free.insert(variable.name.clone());
        }
    }

    fn visit_infinite_set(&mut self, set: &InfiniteSet) {
        self.bound.push(set.variable.name.clone());
        walk_infinite_set(self, set);
        self.bound.pop();
    }
}

/// Names an expression reads from its environment, sorted.
pub fn free_variables(expr: &Expression) -> BTreeSet<String> {
    let mut collector = FreeVariables::default();
    collector.visit_expression(expr);
    collector.free
}

/// Names the conditions of a set-builder read, excluding its bound variable.
pub fn free_variables_of_set(set: &InfiniteSet) -> BTreeSet<String> {
    let mut collector = FreeVariables::default();
    collector.visit_infinite_set(set);
    collector.free
}
