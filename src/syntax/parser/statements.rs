//! Statement parsing. Keyword-led forms are tried first; the identifier-led
//! forms (assignment, call) disambiguate by backtracking.

use crate::syntax::ast::{MethodCall, Statement};
use crate::syntax::parser::expressions::{parse_argument_list, parse_expression};
use crate::syntax::parser::helpers::{identifier, keyword, symbol, PResult};
use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};

pub fn parse_statement(input: &str) -> PResult<'_, Statement> {
    alt((
        parse_if_else,
        parse_while,
        parse_do_while,
        parse_print,
        parse_assignment,
        parse_call_statement,
    ))(input)
}

pub fn parse_block(input: &str) -> PResult<'_, Vec<Statement>> {
    delimited(symbol("{"), many0(parse_statement), symbol("}"))(input)
}

fn parse_if_else(input: &str) -> PResult<'_, Statement> {
    map(
        tuple((
            keyword("if"),
            delimited(symbol("("), parse_expression, symbol(")")),
            parse_block,
            opt(preceded(keyword("else"), parse_block)),
        )),
        |(_, condition, then_branch, else_branch)| Statement::IfElse {
            condition,
            then_branch,
            else_branch: else_branch.unwrap_or_default(),
        },
    )(input)
}

fn parse_while(input: &str) -> PResult<'_, Statement> {
    map(
        tuple((
            keyword("while"),
            delimited(symbol("("), parse_expression, symbol(")")),
            parse_block,
        )),
        |(_, condition, body)| Statement::While { condition, body },
    )(input)
}

fn parse_do_while(input: &str) -> PResult<'_, Statement> {
    map(
        tuple((
            keyword("do"),
            parse_block,
            keyword("while"),
            delimited(symbol("("), parse_expression, symbol(")")),
            symbol(";"),
        )),
        |(_, body, _, condition, _)| Statement::DoWhile { body, condition },
    )(input)
}

fn parse_print(input: &str) -> PResult<'_, Statement> {
    map(
        terminated(
            preceded(
                keyword("print"),
                delimited(symbol("("), parse_expression, symbol(")")),
            ),
            symbol(";"),
        ),
        |argument| Statement::Print { argument },
    )(input)
}

/// `x = e;` or `x.y = e;`
fn parse_assignment(input: &str) -> PResult<'_, Statement> {
    map(
        tuple((
            identifier,
            opt(preceded(symbol("."), identifier)),
            symbol("="),
            parse_expression,
            symbol(";"),
        )),
        |(target, member, _, value, _)| Statement::Assignment { target, member, value },
    )(input)
}

/// `f(args);` or `x.f(args);`
fn parse_call_statement(input: &str) -> PResult<'_, Statement> {
    let (rest, (first, member)) =
        pair(identifier, opt(preceded(symbol("."), identifier)))(input)?;
    let (rest, arguments) = parse_argument_list(rest)?;
    let (rest, _) = symbol(";")(rest)?;
    let call = match member {
        Some(method) => MethodCall { receiver: Some(first), method, arguments },
        None => MethodCall { receiver: None, method: first, arguments },
    };
    Ok((rest, Statement::Call(call)))
}
