//! Natural-language readings of molt statements.
//!
//! `f(x) = { x = 2: 2, x = 3: 9 }` reads as
//! "f of x is 2 if x is 2 and is 9 if x is 3".

use crate::ast::*;

/// Reads a whole statement aloud.
pub fn explain_statement(statement: &Statement) -> String {
    match statement {
        Statement::Let(stmt) => format!("{} is {}", stmt.variable, explain_expression(&stmt.value)),
        Statement::FunctionDef(def) => format!(
            "{} of {} is {}",
            def.name,
            join_and(def.parameters.iter().map(|p| p.name.clone()).collect()),
            explain_expression(&def.body)
        ),
        Statement::Eval(expr) => format!("evaluate {}", explain_expression(expr)),
        Statement::Check(condition) => format!("check whether {}", explain_condition(condition)),
    }
}

pub fn explain_expression(expr: &Expression) -> String {
    match expr {
        Expression::Number(number) => number.to_string(),
        Expression::Variable(variable) => variable.name.clone(),
        Expression::Binary(binary) => {
            let left = explain_expression(&binary.left);
            let right = explain_expression(&binary.right);
            match binary.operator {
                BinaryOperator::Add => format!("the sum of {left} and {right}"),
                BinaryOperator::Sub => format!("the difference of {left} and {right}"),
                BinaryOperator::Mul => format!("the product of {left} and {right}"),
                BinaryOperator::Div => format!("the quotient of {left} and {right}"),
                BinaryOperator::Pow => format!("{left} to the power of {right}"),
                BinaryOperator::Union => format!("the union of {left} and {right}"),
                BinaryOperator::Intersection => {
                    format!("the intersection of {left} and {right}")
                }
                BinaryOperator::Difference => format!("{left} without the elements of {right}"),
            }
        }
        Expression::Negation(operand) => format!("negative {}", explain_expression(operand)),
        Expression::FiniteSet(elements) if elements.is_empty() => "the empty set".to_string(),
        Expression::FiniteSet(elements) => format!(
            "the set containing {}",
            join_and(elements.iter().map(explain_expression).collect())
        ),
        Expression::InfiniteSet(set) => format!(
            "the set of all {} where {}",
            set.variable,
            join_and(set.conditions.iter().map(explain_condition).collect())
        ),
        Expression::Piecewise(branches) => branches
            .iter()
            .enumerate()
            .map(|(i, branch)| {
                let value = explain_expression(&branch.value);
                let reading = if branch.is_else() {
                    format!("{value} otherwise")
                } else {
                    format!("{value} if {}", explain_condition(&branch.condition))
                };
                if i == 0 {
                    reading
                } else {
                    format!(" and is {reading}")
                }
            })
            .collect(),
        Expression::Application(app) => format!(
            "{} of {}",
            explain_expression(&app.function),
            join_and(app.arguments.iter().map(explain_expression).collect())
        ),
    }
}

pub fn explain_condition(condition: &Condition) -> String {
    let comparison = match condition {
        Condition::True => return "always".to_string(),
        Condition::Comparison(comparison) => comparison,
    };
    let left = explain_expression(&comparison.left);
    let right = explain_expression(&comparison.right);
    let relation = match comparison.comparator {
        Comparator::Equal => "is",
        Comparator::NotEqual => "is not",
        Comparator::Less => "is less than",
        Comparator::LessOrEqual => "is at most",
        Comparator::Greater => "is greater than",
        Comparator::GreaterOrEqual => "is at least",
        Comparator::Element => "is an element of",
    };
    format!("{left} {relation} {right}")
}

fn join_and(mut items: Vec<String>) -> String {
    match items.len() {
        0 => String::new(),
        1 => items.remove(0),
        _ => {
            let last = items.pop().unwrap_or_default();
            format!("{} and {last}", items.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    fn num(value: f64) -> Expression {
        Expression::number(value)
    }

    fn define(body: Expression) -> Statement {
        Statement::FunctionDef(Box::new(FunctionDefinition {
            name: Variable::new("f"),
            parameters: vec![Variable::new("x")],
            body,
        }))
    }

    #[test]
    fn piecewise_reading() {
        let body = Expression::Piecewise(vec![
            PiecewiseBranch::new(
                Condition::compare(var("x"), Comparator::Equal, num(2.0)),
                num(2.0),
            ),
            PiecewiseBranch::new(
                Condition::compare(var("x"), Comparator::Equal, num(3.0)),
                num(9.0),
            ),
        ]);
        assert_eq!(
            explain_statement(&define(body)),
            "f of x is 2 if x is 2 and is 9 if x is 3"
        );
    }

    #[test]
    fn piecewise_else_reading() {
        let body = Expression::Piecewise(vec![
            PiecewiseBranch::new(
                Condition::compare(var("x"), Comparator::Equal, num(2.0)),
                num(1.0),
            ),
            PiecewiseBranch::new(Condition::TRUE, num(3.0)),
        ]);
        assert_eq!(
            explain_statement(&define(body)),
            "f of x is 1 if x is 2 and is 3 otherwise"
        );
    }

    #[test]
    fn set_builder_reading() {
        let conditions: ConditionSet =
            std::iter::once(Condition::compare(var("y"), Comparator::Less, var("x"))).collect();
        let body = Expression::infinite_set(Variable::new("y"), conditions);
        assert_eq!(
            explain_statement(&define(body)),
            "f of x is the set of all y where y is less than x"
        );
    }

    #[test]
    fn finite_sets_and_unions() {
        let set = Expression::FiniteSet(vec![num(1.0), num(2.0), num(3.0)]);
        assert_eq!(explain_expression(&set), "the set containing 1, 2 and 3");
        assert_eq!(
            explain_expression(&Expression::union(var("a"), var("b"))),
            "the union of a and b"
        );
    }

    #[test]
    fn statements() {
        let check = Statement::Check(Condition::compare(
            num(2.0),
            Comparator::Element,
            Expression::application(var("g"), vec![num(5.0)]),
        ));
        assert_eq!(
            explain_statement(&check),
            "check whether 2 is an element of g of 5"
        );
        let let_stmt = Statement::Let(Box::new(LetStatement {
            variable: Variable::new("a"),
            value: num(3.0),
        }));
        assert_eq!(explain_statement(&let_stmt), "a is 3");
    }
}
