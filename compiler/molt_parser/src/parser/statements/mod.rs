//! Statements. A program is a sequence of these with no terminators between
//! them; each statement ends where its last expression ends.
//!
//! ```text
//! let a = 3
//! f(x, y) = { x = y: 1, 0 }
//! s = { 1, 2 }
//! eval f(a, 2)
//! check 2 in s
//! ```

use log::debug;
use molt_ast::{FunctionDefinition, LetStatement, Program, Statement, Variable};
use molt_lexer::TokenType;

use super::conditions::parse_condition;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::expressions::parse_expression;
use super::function_body::parse_function_body;
use super::token_stream::{expect, TokenStream};

/// Parses statements until the stream is exhausted.
pub fn parse_program(stream: &mut TokenStream<'_>) -> ParseResult<Program> {
    let mut statements = Vec::new();
    while !stream.is_empty() {
        statements.push(parse_statement(stream)?);
    }
    debug!("parsed program with {} statements", statements.len());
    Ok(Program::new(statements))
}

/// Parses a single statement.
pub fn parse_statement(stream: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let Some(token) = stream.peek() else {
        return Err(stream.unexpected());
    };

    match &token.token_type {
        TokenType::Let => {
            stream.pop();
            let variable = parse_name(stream, "expected a variable name after `let`")?;
            parse_let_rest(stream, variable)
        }
        TokenType::Eval => {
            stream.pop();
            Ok(Statement::Eval(parse_expression(stream)?))
        }
        TokenType::Check => {
            stream.pop();
            Ok(Statement::Check(parse_condition(stream)?))
        }
        TokenType::Identifier(_) => {
            let name = parse_name(stream, "expected a name")?;
            if stream.pop_if(&TokenType::LeftParen).is_some() {
                parse_function_definition(stream, name)
            } else {
                parse_let_rest(stream, name)
            }
        }
        _ => Err(stream.unexpected()),
    }
}

fn parse_name(stream: &mut TokenStream<'_>, message: &str) -> ParseResult<Variable> {
    match stream.peek() {
        Some(token) => match &token.token_type {
            TokenType::Identifier(name) => {
                stream.pop();
                Ok(Variable::new(name.as_str()))
            }
            _ => Err(ParseError::at_token(
                ParseErrorKind::Expected {
                    message: message.to_string(),
                },
                token,
            )),
        },
        None => Err(ParseError::expected(message, stream.location())),
    }
}

fn expect_equals(stream: &mut TokenStream<'_>) -> ParseResult<()> {
    expect(
        stream,
        &TokenType::Equal,
        ParseErrorKind::Expected {
            message: "expected `=` in definition".to_string(),
        },
    )?;
    Ok(())
}

fn parse_let_rest(stream: &mut TokenStream<'_>, variable: Variable) -> ParseResult<Statement> {
    expect_equals(stream)?;
    let value = parse_function_body(stream)?;
    debug!("definition of {variable}");
    Ok(Statement::Let(Box::new(LetStatement { variable, value })))
}

/// Parses `x, y) = body` after `name(`.
fn parse_function_definition(
    stream: &mut TokenStream<'_>,
    name: Variable,
) -> ParseResult<Statement> {
    let mut parameters = Vec::new();
    if stream.pop_if(&TokenType::RightParen).is_none() {
        loop {
            parameters.push(parse_name(stream, "expected a parameter name")?);
            if stream.pop_if(&TokenType::Comma).is_none() {
                break;
            }
        }
        expect(stream, &TokenType::RightParen, ParseErrorKind::UnmatchedParen)?;
    }
    expect_equals(stream)?;
    let body = parse_function_body(stream)?;
    debug!("definition of function {name} with {} parameters", parameters.len());
    Ok(Statement::FunctionDef(Box::new(FunctionDefinition {
        name,
        parameters,
        body,
    })))
}
