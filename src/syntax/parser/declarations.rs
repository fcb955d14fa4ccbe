//! Class, member, method and local-declaration parsing.

use crate::syntax::ast::{
    ClassDeclaration, Declaration, MethodBody, MethodDeclaration, Parameter, Program,
    ReturnStatement, Type,
};
use crate::syntax::parser::expressions::parse_expression;
use crate::syntax::parser::helpers::{identifier, keyword, skip_trivia, symbol, PResult};
use crate::syntax::parser::statements::parse_statement;
use nom::branch::alt;
use nom::combinator::{eof, map, opt, value};
use nom::multi::{many0, many1, separated_list0, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};

pub fn parse_type(input: &str) -> PResult<'_, Type> {
    alt((
        value(Type::Integer, keyword("integer")),
        value(Type::Boolean, keyword("boolean")),
        value(Type::None, keyword("none")),
        map(identifier, Type::Object),
    ))(input)
}

/// A class member carries exactly one identifier.
fn parse_member(input: &str) -> PResult<'_, Declaration> {
    map(
        terminated(pair(parse_type, identifier), symbol(";")),
        |(ty, name)| Declaration { ty, names: vec![name] },
    )(input)
}

/// A method-local declaration may introduce several names of one type.
fn parse_declaration(input: &str) -> PResult<'_, Declaration> {
    map(
        terminated(
            pair(parse_type, separated_list1(symbol(","), identifier)),
            symbol(";"),
        ),
        |(ty, names)| Declaration { ty, names },
    )(input)
}

fn parse_parameter(input: &str) -> PResult<'_, Parameter> {
    map(pair(parse_type, identifier), |(ty, name)| Parameter { ty, name })(input)
}

fn parse_return(input: &str) -> PResult<'_, ReturnStatement> {
    map(
        delimited(keyword("return"), parse_expression, symbol(";")),
        |expression| ReturnStatement { expression },
    )(input)
}

fn parse_method(input: &str) -> PResult<'_, MethodDeclaration> {
    map(
        tuple((
            parse_type,
            identifier,
            delimited(
                symbol("("),
                separated_list0(symbol(","), parse_parameter),
                symbol(")"),
            ),
            symbol("{"),
            many0(parse_declaration),
            many0(parse_statement),
            opt(parse_return),
            symbol("}"),
        )),
        |(return_type, name, parameters, _, declarations, statements, ret, _)| {
            MethodDeclaration {
                name,
                parameters,
                return_type,
                body: MethodBody { declarations, statements, ret },
            }
        },
    )(input)
}

fn parse_class(input: &str) -> PResult<'_, ClassDeclaration> {
    map(
        tuple((
            keyword("class"),
            identifier,
            opt(preceded(keyword("extends"), identifier)),
            symbol("{"),
            many0(parse_member),
            many0(parse_method),
            symbol("}"),
            symbol(";"),
        )),
        |(_, name, superclass, _, members, methods, _, _)| ClassDeclaration {
            name,
            superclass,
            members,
            methods,
        },
    )(input)
}

pub fn parse_program(input: &str) -> PResult<'_, Program> {
    map(
        terminated(many1(parse_class), pair(skip_trivia, eof)),
        |classes| Program { classes },
    )(input)
}
