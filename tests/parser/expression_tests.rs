#![cfg(test)]

use minnow::syntax::ast::{
    BinaryOperator, Expression, ExpressionKind, Program, Statement, UnaryOperator,
};
use minnow::syntax::Parser;

fn parse(source: &str) -> Program {
    Parser::new().parse(source).expect("program should parse")
}

/// Wrap a single expression statement into a program and pull it back out.
fn parse_print_argument(expr: &str) -> Expression {
    let source = format!("class Main {{ none main() {{ print({expr}); }} }};");
    let mut program = parse(&source);
    match program.classes[0].methods[0].body.statements.remove(0) {
        Statement::Print { argument } => argument,
        other => panic!("expected print statement, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = parse_print_argument("2 + 3 * 4");
    match expr.kind {
        ExpressionKind::Binary { op: BinaryOperator::Plus, left, right } => {
            assert!(matches!(left.kind, ExpressionKind::IntegerLiteral(2)));
            assert!(matches!(
                right.kind,
                ExpressionKind::Binary { op: BinaryOperator::Times, .. }
            ));
        }
        other => panic!("expected plus at the root, got {other:?}"),
    }
}

#[test]
fn additive_operators_associate_left() {
    let expr = parse_print_argument("1 - 2 - 3");
    match expr.kind {
        ExpressionKind::Binary { op: BinaryOperator::Minus, left, right } => {
            assert!(matches!(
                left.kind,
                ExpressionKind::Binary { op: BinaryOperator::Minus, .. }
            ));
            assert!(matches!(right.kind, ExpressionKind::IntegerLiteral(3)));
        }
        other => panic!("expected minus at the root, got {other:?}"),
    }
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let expr = parse_print_argument("1 + 2 > 3 * 4");
    assert!(matches!(
        expr.kind,
        ExpressionKind::Binary { op: BinaryOperator::Greater, .. }
    ));
}

#[test]
fn logical_operators_bind_loosest() {
    let expr = parse_print_argument("1 > 2 and 3 > 4 or true");
    match expr.kind {
        ExpressionKind::Binary { op: BinaryOperator::Or, left, .. } => {
            assert!(matches!(
                left.kind,
                ExpressionKind::Binary { op: BinaryOperator::And, .. }
            ));
        }
        other => panic!("expected or at the root, got {other:?}"),
    }
}

#[test]
fn equality_is_an_expression_operator() {
    // The `=` after the assignment's own `=` is equality.
    let source = "class Main { none main() { boolean b; b = 1 = 2; } };";
    let mut program = parse(source);
    match program.classes[0].methods[0].body.statements.remove(0) {
        Statement::Assignment { value, .. } => {
            assert!(matches!(
                value.kind,
                ExpressionKind::Binary { op: BinaryOperator::Equal, .. }
            ));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn unary_operators_nest() {
    let expr = parse_print_argument("--5");
    match expr.kind {
        ExpressionKind::Unary { op: UnaryOperator::Negate, operand } => {
            assert!(matches!(
                operand.kind,
                ExpressionKind::Unary { op: UnaryOperator::Negate, .. }
            ));
        }
        other => panic!("expected negation, got {other:?}"),
    }
}

#[test]
fn not_parses_as_boolean_negation() {
    let source = "class Main { none main() { boolean b; b = not false; } };";
    let mut program = parse(source);
    match program.classes[0].methods[0].body.statements.remove(0) {
        Statement::Assignment { value, .. } => {
            assert!(matches!(
                value.kind,
                ExpressionKind::Unary { op: UnaryOperator::Not, .. }
            ));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse_print_argument("(2 + 3) * 4");
    match expr.kind {
        ExpressionKind::Binary { op: BinaryOperator::Times, left, .. } => {
            assert!(matches!(
                left.kind,
                ExpressionKind::Binary { op: BinaryOperator::Plus, .. }
            ));
        }
        other => panic!("expected times at the root, got {other:?}"),
    }
}

#[test]
fn call_member_access_and_new_forms() {
    let expr = parse_print_argument("a.total(x.count, f(1), new Counter(2))");
    match expr.kind {
        ExpressionKind::Call(call) => {
            assert_eq!(call.receiver.as_ref().unwrap().name, "a");
            assert_eq!(call.method.name, "total");
            assert_eq!(call.arguments.len(), 3);
            assert!(matches!(
                call.arguments[0].kind,
                ExpressionKind::MemberAccess { .. }
            ));
            assert!(matches!(call.arguments[1].kind, ExpressionKind::Call(_)));
            assert!(matches!(call.arguments[2].kind, ExpressionKind::New { .. }));
        }
        other => panic!("expected method call, got {other:?}"),
    }
}
