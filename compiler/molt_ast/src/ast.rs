// Syntax tree definitions for molt programs.
// Nodes are built once by the parser and never mutated afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric literal.
///
/// Equality compares bit patterns so that trees holding numbers have a total
/// equality and can be deduplicated.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Number(pub f64);

impl Number {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Number {}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum Expression {
    Number(Number),
    Variable(Variable),
    Binary(Box<BinaryExpression>),
    Negation(Box<Expression>),
    FiniteSet(Vec<Expression>),
    InfiniteSet(Box<InfiniteSet>),
    Piecewise(Vec<PiecewiseBranch>),
    Application(Box<Application>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryExpression {
    pub left: Expression,
    pub operator: BinaryOperator,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Union,
    Intersection,
    Difference,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Pow => "^",
            BinaryOperator::Union => "|",
            BinaryOperator::Intersection => "&",
            BinaryOperator::Difference => "\\",
        }
    }

    /// Binding strength, lowest first. Shared by the parser and the printer.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Union => 1,
            BinaryOperator::Intersection | BinaryOperator::Difference => 2,
            BinaryOperator::Add | BinaryOperator::Sub => 3,
            BinaryOperator::Mul | BinaryOperator::Div => 4,
            BinaryOperator::Pow => 6,
        }
    }

    pub fn is_set_operation(self) -> bool {
        matches!(
            self,
            BinaryOperator::Union | BinaryOperator::Intersection | BinaryOperator::Difference
        )
    }
}

/// Set-builder notation: `{ variable | conditions }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InfiniteSet {
    pub variable: Variable,
    pub conditions: ConditionSet,
}

/// One `condition: value` line of a piecewise definition. The trailing
/// else branch is guarded by [`Condition::TRUE`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PiecewiseBranch {
    pub condition: Condition,
    pub value: Expression,
}

impl PiecewiseBranch {
    pub fn new(condition: Condition, value: Expression) -> Self {
        Self { condition, value }
    }

    pub fn is_else(&self) -> bool {
        self.condition == Condition::TRUE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Application {
    pub function: Expression,
    pub arguments: Vec<Expression>,
}

impl Expression {
    pub fn number(value: f64) -> Self {
        Expression::Number(Number(value))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(name))
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::Binary(Box::new(BinaryExpression {
            left,
            operator,
            right,
        }))
    }

    pub fn union(left: Expression, right: Expression) -> Self {
        Self::binary(left, BinaryOperator::Union, right)
    }

    pub fn negation(operand: Expression) -> Self {
        Expression::Negation(Box::new(operand))
    }

    pub fn infinite_set(variable: Variable, conditions: ConditionSet) -> Self {
        Expression::InfiniteSet(Box::new(InfiniteSet {
            variable,
            conditions,
        }))
    }

    pub fn application(function: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Application(Box::new(Application {
            function,
            arguments,
        }))
    }

    /// Human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number",
            Expression::Variable(_) => "variable",
            Expression::Binary(binary) => match binary.operator {
                BinaryOperator::Add => "addition",
                BinaryOperator::Sub => "subtraction",
                BinaryOperator::Mul => "multiplication",
                BinaryOperator::Div => "division",
                BinaryOperator::Pow => "power",
                BinaryOperator::Union => "set union",
                BinaryOperator::Intersection => "set intersection",
                BinaryOperator::Difference => "set difference",
            },
            Expression::Negation(_) => "negation",
            Expression::FiniteSet(_) => "finite set",
            Expression::InfiniteSet(_) => "set-builder set",
            Expression::Piecewise(_) => "piecewise function",
            Expression::Application(_) => "function application",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Comparator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Element,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "!=",
            Comparator::Less => "<",
            Comparator::LessOrEqual => "<=",
            Comparator::Greater => ">",
            Comparator::GreaterOrEqual => ">=",
            Comparator::Element => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum Condition {
    True,
    Comparison(Box<Comparison>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comparison {
    pub left: Expression,
    pub comparator: Comparator,
    pub right: Expression,
}

impl Condition {
    /// The always-true guard of a piecewise else branch.
    pub const TRUE: Condition = Condition::True;

    pub fn compare(left: Expression, comparator: Comparator, right: Expression) -> Self {
        Condition::Comparison(Box::new(Comparison {
            left,
            comparator,
            right,
        }))
    }

    pub fn left(&self) -> Option<&Expression> {
        match self {
            Condition::True => None,
            Condition::Comparison(comparison) => Some(&comparison.left),
        }
    }

    pub fn right(&self) -> Option<&Expression> {
        match self {
            Condition::True => None,
            Condition::Comparison(comparison) => Some(&comparison.right),
        }
    }

    pub fn comparator(&self) -> Option<Comparator> {
        match self {
            Condition::True => None,
            Condition::Comparison(comparison) => Some(comparison.comparator),
        }
    }
}

/// The conjoined conditions of a set-builder set.
///
/// Iterates in insertion order. Structurally equal conditions collapse into
/// one, and equality between two sets ignores order.
#[derive(Debug, Clone, Default, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `condition` unless an equal one is already present.
    /// Returns whether the set grew.
    pub fn insert(&mut self, condition: Condition) -> bool {
        if self.conditions.contains(&condition) {
            return false;
        }
        self.conditions.push(condition);
        true
    }

    pub fn contains(&self, condition: &Condition) -> bool {
        self.conditions.contains(condition)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.conditions.iter()
    }
}

impl PartialEq for ConditionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|condition| other.contains(condition))
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut set = ConditionSet::new();
        for condition in iter {
            set.insert(condition);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ConditionSet {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum Statement {
    Let(Box<LetStatement>),
    FunctionDef(Box<FunctionDefinition>),
    Eval(Expression),
    Check(Condition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetStatement {
    pub variable: Variable,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDefinition {
    pub name: Variable,
    pub parameters: Vec<Variable>,
    pub body: Expression,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}
