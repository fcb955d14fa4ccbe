//! Expression parsing as a precedence cascade, loosest binding first:
//! `or` < `and` < comparisons < additive < multiplicative < unary < primary.

use crate::syntax::ast::{
    BinaryOperator, Expression, ExpressionKind, MethodCall, UnaryOperator,
};
use crate::syntax::parser::helpers::{identifier, keyword, padded, symbol, PResult};
use nom::branch::alt;
use nom::character::complete::digit1;
use nom::combinator::{map, map_res, value};
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, preceded};

pub fn parse_expression(input: &str) -> PResult<'_, Expression> {
    parse_or_expression_or_higher(input)
}

/// Generic left-associative chain: `next (op next)*`, folded left.
fn left_chain<'a, FNext, FOp>(
    mut next: FNext,
    mut op: FOp,
) -> impl FnMut(&'a str) -> PResult<'a, Expression>
where
    FNext: FnMut(&'a str) -> PResult<'a, Expression>,
    FOp: FnMut(&'a str) -> PResult<'a, BinaryOperator>,
{
    move |input: &'a str| {
        let (mut rest, mut left) = next(input)?;
        loop {
            match op(rest) {
                Ok((after_op, operator)) => {
                    let (after_rhs, right) = next(after_op)?;
                    left = Expression::new(ExpressionKind::Binary {
                        op: operator,
                        left: Box::new(left),
                        right: Box::new(right),
                    });
                    rest = after_rhs;
                }
                Err(_) => return Ok((rest, left)),
            }
        }
    }
}

fn parse_or_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    left_chain(parse_and_expression_or_higher, |i| {
        value(BinaryOperator::Or, keyword("or"))(i)
    })(input)
}

fn parse_and_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    left_chain(parse_comparison_expression_or_higher, |i| {
        value(BinaryOperator::And, keyword("and"))(i)
    })(input)
}

fn parse_comparison_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    left_chain(parse_additive_expression_or_higher, |i| {
        alt((
            value(BinaryOperator::GreaterEqual, symbol(">=")),
            value(BinaryOperator::Greater, symbol(">")),
            value(BinaryOperator::Equal, symbol("=")),
        ))(i)
    })(input)
}

fn parse_additive_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    left_chain(parse_multiplicative_expression_or_higher, |i| {
        alt((
            value(BinaryOperator::Plus, symbol("+")),
            value(BinaryOperator::Minus, symbol("-")),
        ))(i)
    })(input)
}

fn parse_multiplicative_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    left_chain(parse_unary_expression_or_higher, |i| {
        alt((
            value(BinaryOperator::Times, symbol("*")),
            value(BinaryOperator::Divide, symbol("/")),
        ))(i)
    })(input)
}

fn parse_unary_expression_or_higher(input: &str) -> PResult<'_, Expression> {
    alt((
        map(preceded(keyword("not"), parse_unary_expression_or_higher), |e| {
            Expression::new(ExpressionKind::Unary {
                op: UnaryOperator::Not,
                operand: Box::new(e),
            })
        }),
        map(preceded(symbol("-"), parse_unary_expression_or_higher), |e| {
            Expression::new(ExpressionKind::Unary {
                op: UnaryOperator::Negate,
                operand: Box::new(e),
            })
        }),
        parse_primary_expression,
    ))(input)
}

fn parse_primary_expression(input: &str) -> PResult<'_, Expression> {
    alt((
        parse_integer_literal,
        parse_boolean_literal,
        parse_new_expression,
        delimited(symbol("("), parse_expression, symbol(")")),
        parse_identifier_expression,
    ))(input)
}

fn parse_integer_literal(input: &str) -> PResult<'_, Expression> {
    map(
        map_res(padded(digit1), |digits: &str| digits.parse::<i32>()),
        |n| Expression::new(ExpressionKind::IntegerLiteral(n)),
    )(input)
}

fn parse_boolean_literal(input: &str) -> PResult<'_, Expression> {
    alt((
        value(
            Expression::new(ExpressionKind::BooleanLiteral(true)),
            keyword("true"),
        ),
        value(
            Expression::new(ExpressionKind::BooleanLiteral(false)),
            keyword("false"),
        ),
    ))(input)
}

fn parse_new_expression(input: &str) -> PResult<'_, Expression> {
    map(
        preceded(keyword("new"), pair(identifier, parse_argument_list)),
        |(class, arguments)| Expression::new(ExpressionKind::New { class, arguments }),
    )(input)
}

pub(crate) fn parse_argument_list(input: &str) -> PResult<'_, Vec<Expression>> {
    delimited(
        symbol("("),
        separated_list0(symbol(","), parse_expression),
        symbol(")"),
    )(input)
}

/// `x`, `x.y`, `f(args)` or `x.f(args)` — all begin with an identifier.
fn parse_identifier_expression(input: &str) -> PResult<'_, Expression> {
    let (rest, first) = identifier(input)?;

    if let Ok((rest, arguments)) = parse_argument_list(rest) {
        let call = MethodCall { receiver: None, method: first, arguments };
        return Ok((rest, Expression::new(ExpressionKind::Call(call))));
    }

    if let Ok((rest, second)) = preceded(symbol("."), identifier)(rest) {
        if let Ok((rest, arguments)) = parse_argument_list(rest) {
            let call = MethodCall { receiver: Some(first), method: second, arguments };
            return Ok((rest, Expression::new(ExpressionKind::Call(call))));
        }
        let access = ExpressionKind::MemberAccess { object: first, member: second };
        return Ok((rest, Expression::new(access)));
    }

    Ok((rest, Expression::new(ExpressionKind::Variable(first))))
}
