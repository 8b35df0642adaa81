//! Canonical molt notation for syntax trees.
//!
//! The printed form parses back to an equal tree: operands are parenthesised
//! only where precedence requires it, and a top-level body that is a
//! one-element set is written `{{a}}` so it is not read back as a bare
//! bracketed expression.

use std::fmt;

use crate::ast::*;

const NEGATION_PRECEDENCE: u8 = 5;
const ATOM_PRECEDENCE: u8 = 7;

fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Binary(binary) => binary.operator.precedence(),
        Expression::Negation(_) => NEGATION_PRECEDENCE,
        _ => ATOM_PRECEDENCE,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression, min: u8) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(number) => write!(f, "{number}"),
            Expression::Variable(variable) => write!(f, "{variable}"),
            Expression::Binary(binary) => {
                let own = binary.operator.precedence();
                if binary.operator == BinaryOperator::Pow {
                    // right associative, and the exponent may be negated
                    write_operand(f, &binary.left, ATOM_PRECEDENCE)?;
                    f.write_str("^")?;
                    write_operand(f, &binary.right, NEGATION_PRECEDENCE)
                } else {
                    write_operand(f, &binary.left, own)?;
                    write!(f, " {} ", binary.operator)?;
                    write_operand(f, &binary.right, own + 1)
                }
            }
            Expression::Negation(operand) => {
                f.write_str("-")?;
                write_operand(f, operand, NEGATION_PRECEDENCE)
            }
            Expression::FiniteSet(elements) => {
                f.write_str("{")?;
                write_list(f, elements)?;
                f.write_str("}")
            }
            Expression::InfiniteSet(set) => write!(f, "{set}"),
            Expression::Piecewise(branches) => {
                f.write_str("{ ")?;
                write_list(f, branches)?;
                f.write_str(" }")
            }
            Expression::Application(app) => {
                write_operand(f, &app.function, ATOM_PRECEDENCE)?;
                f.write_str("(")?;
                write_list(f, &app.arguments)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for InfiniteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} | ", self.variable)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
                write!(f, "{condition}")?;
                continue;
            }
            // The first condition's left side sits on the right of the pipe.
            match condition {
                Condition::Comparison(comparison) => {
                    write_operand(f, &comparison.left, 2)?;
                    write!(f, " {} {}", comparison.comparator, comparison.right)?;
                }
                Condition::True => write!(f, "{condition}")?,
            }
        }
        f.write_str(" }")
    }
}

impl fmt::Display for PiecewiseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_else() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}: {}", self.condition, self.value)
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::True => f.write_str("true"),
            Condition::Comparison(comparison) => write!(
                f,
                "{} {} {}",
                comparison.left, comparison.comparator, comparison.right
            ),
        }
    }
}

/// A definition body as written after `=`.
struct Body<'a>(&'a Expression);

impl fmt::Display for Body<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expression::FiniteSet(elements) if elements.len() == 1 => write!(f, "{{{}}}", self.0),
            Expression::FiniteSet(_) | Expression::InfiniteSet(_) | Expression::Piecewise(_) => {
                write!(f, "{}", self.0)
            }
            // `{1} | s` must not lose its tail to a braced body
            body => {
                let text = body.to_string();
                if text.starts_with('{') {
                    write!(f, "{{ {text} }}")
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {}", stmt.variable, Body(&stmt.value)),
            Statement::FunctionDef(def) => {
                write!(f, "{}(", def.name)?;
                write_list(f, &def.parameters)?;
                write!(f, ") = {}", Body(&def.body))
            }
            Statement::Eval(expr) => write!(f, "eval {expr}"),
            Statement::Check(condition) => write!(f, "check {condition}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement}")?;
        }
        Ok(())
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

    #[test]
    fn integral_numbers_print_without_fraction() {
        assert_eq!(num(3.0).to_string(), "3");
        assert_eq!(num(2.5).to_string(), "2.5");
    }

    #[test]
    fn parenthesises_by_precedence() {
        let sum = Expression::binary(var("a"), BinaryOperator::Add, var("b"));
        let product = Expression::binary(sum.clone(), BinaryOperator::Mul, var("c"));
        assert_eq!(product.to_string(), "(a + b) * c");

        let left_nested = Expression::binary(sum.clone(), BinaryOperator::Sub, var("c"));
        assert_eq!(left_nested.to_string(), "a + b - c");

        let right_nested = Expression::binary(var("c"), BinaryOperator::Sub, sum);
        assert_eq!(right_nested.to_string(), "c - (a + b)");
    }

    #[test]
    fn power_is_right_associative() {
        let inner = Expression::binary(var("b"), BinaryOperator::Pow, var("c"));
        let outer = Expression::binary(var("a"), BinaryOperator::Pow, inner.clone());
        assert_eq!(outer.to_string(), "a^b^c");

        let left = Expression::binary(inner, BinaryOperator::Pow, var("d"));
        assert_eq!(left.to_string(), "(b^c)^d");

        let negated_exponent =
            Expression::binary(var("a"), BinaryOperator::Pow, Expression::negation(num(1.0)));
        assert_eq!(negated_exponent.to_string(), "a^-1");

        let negated_power = Expression::negation(Expression::binary(
            var("x"),
            BinaryOperator::Pow,
            num(2.0),
        ));
        assert_eq!(negated_power.to_string(), "-x^2");
    }

    #[test]
    fn set_builder_notation() {
        let conditions: ConditionSet = vec![
            Condition::compare(var("y"), Comparator::Less, var("x")),
            Condition::compare(var("y"), Comparator::Greater, num(0.0)),
        ]
        .into_iter()
        .collect();
        let set = Expression::infinite_set(Variable::new("y"), conditions);
        assert_eq!(set.to_string(), "{ y | y < x, y > 0 }");
    }

    #[test]
    fn set_builder_first_condition_guards_unions() {
        let conditions: ConditionSet = vec![Condition::compare(
            Expression::union(var("a"), var("b")),
            Comparator::Equal,
            var("c"),
        )]
        .into_iter()
        .collect();
        let set = Expression::infinite_set(Variable::new("y"), conditions);
        assert_eq!(set.to_string(), "{ y | (a | b) = c }");
    }

    #[test]
    fn piecewise_else_prints_bare_value() {
        let piecewise = Expression::Piecewise(vec![
            PiecewiseBranch::new(
                Condition::compare(var("x"), Comparator::Equal, num(2.0)),
                num(1.0),
            ),
            PiecewiseBranch::new(Condition::TRUE, num(3.0)),
        ]);
        assert_eq!(piecewise.to_string(), "{ x = 2: 1, 3 }");
    }

    #[test]
    fn singleton_body_is_double_braced() {
        let def = Statement::FunctionDef(Box::new(FunctionDefinition {
            name: Variable::new("f"),
            parameters: vec![Variable::new("x")],
            body: Expression::FiniteSet(vec![var("x")]),
        }));
        assert_eq!(def.to_string(), "f(x) = {{x}}");

        let let_stmt = Statement::Let(Box::new(LetStatement {
            variable: Variable::new("s"),
            value: Expression::FiniteSet(vec![num(1.0), num(2.0)]),
        }));
        assert_eq!(let_stmt.to_string(), "let s = {1, 2}");
    }

    #[test]
    fn body_opening_with_a_set_is_braced() {
        let def = Statement::Let(Box::new(LetStatement {
            variable: Variable::new("t"),
            value: Expression::union(Expression::FiniteSet(vec![num(1.0)]), var("s")),
        }));
        assert_eq!(def.to_string(), "let t = { {1} | s }");
    }

    #[test]
    fn applications_and_membership() {
        let app = Expression::application(
            Expression::application(var("f"), vec![num(1.0)]),
            vec![num(2.0), var("y")],
        );
        assert_eq!(app.to_string(), "f(1)(2, y)");

        let check = Statement::Check(Condition::compare(
            num(2.0),
            Comparator::Element,
            Expression::application(var("g"), vec![num(5.0)]),
        ));
        assert_eq!(check.to_string(), "check 2 in g(5)");
    }
}
