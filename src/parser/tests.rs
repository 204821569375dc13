//! Parser tests.

use pretty_assertions::assert_eq;

use crate::ast::*;
use crate::error::ParserError;
use crate::parser::{parse, Parser, MAX_NESTING};
use crate::span::Span;

fn parse_expr(source: &str) -> Expr {
    Parser::new(source).parse().unwrap()
}

fn num(value: f64) -> Expr {
    Expr::number(value)
}

#[test]
fn test_number() {
    assert_eq!(parse_expr("42"), num(42.0));
    assert_eq!(parse_expr("  3.25 "), num(3.25));
    assert_eq!(parse_expr("7."), num(7.0));
}

#[test]
fn test_precedence() {
    // 1 + 2 * 3 should parse as 1 + (2 * 3)
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        Expr::binary(
            num(1.0),
            BinaryOp::Add,
            Expr::binary(num(2.0), BinaryOp::Multiply, num(3.0))
        )
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        parse_expr("8 - 3 - 2"),
        Expr::binary(
            Expr::binary(num(8.0), BinaryOp::Subtract, num(3.0)),
            BinaryOp::Subtract,
            num(2.0)
        )
    );
    assert_eq!(
        parse_expr("8 / 4 % 3"),
        Expr::binary(
            Expr::binary(num(8.0), BinaryOp::Divide, num(4.0)),
            BinaryOp::Modulo,
            num(3.0)
        )
    );
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(
        parse_expr("2^3^4"),
        Expr::binary(
            num(2.0),
            BinaryOp::Power,
            Expr::binary(num(3.0), BinaryOp::Power, num(4.0))
        )
    );
}

#[test]
fn test_negation_wraps_power() {
    // -2^2 is -(2^2)
    assert_eq!(
        parse_expr("-2^2"),
        Expr::negate(Expr::binary(num(2.0), BinaryOp::Power, num(2.0)))
    );
}

#[test]
fn test_negative_exponent() {
    assert_eq!(
        parse_expr("2^-1"),
        Expr::binary(num(2.0), BinaryOp::Power, Expr::negate(num(1.0)))
    );
}

#[test]
fn test_negation_binds_tighter_than_multiply() {
    assert_eq!(
        parse_expr("-a * b"),
        Expr::binary(
            Expr::negate(Expr::variable("a")),
            BinaryOp::Multiply,
            Expr::variable("b")
        )
    );
}

#[test]
fn test_unary_plus_is_dropped() {
    assert_eq!(parse_expr("+5"), num(5.0));
    assert_eq!(parse_expr("+-+5"), Expr::negate(num(5.0)));
    assert_eq!(parse_expr("--5"), Expr::negate(Expr::negate(num(5.0))));
}

#[test]
fn test_grouping_is_kept() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        Expr::binary(
            Expr::grouping(Expr::binary(num(1.0), BinaryOp::Add, num(2.0))),
            BinaryOp::Multiply,
            num(3.0)
        )
    );
    assert_eq!(parse_expr("((x))"), Expr::grouping(Expr::grouping(Expr::variable("x"))));
}

#[test]
fn test_call() {
    assert_eq!(
        parse_expr("foo(1, x + 2)"),
        Expr::call(
            "foo",
            vec![
                num(1.0),
                Expr::binary(Expr::variable("x"), BinaryOp::Add, num(2.0))
            ]
        )
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(parse_expr("now()"), Expr::call("now", vec![]));
    assert_eq!(parse_expr("now ( )"), Expr::call("now", vec![]));
}

#[test]
fn test_nested_calls() {
    assert_eq!(
        parse_expr("max(sin(Pi), cos(0))"),
        Expr::call(
            "max",
            vec![
                Expr::call("sin", vec![Expr::variable("Pi")]),
                Expr::call("cos", vec![num(0.0)]),
            ]
        )
    );
}

#[test]
fn test_error_on_unexpected_character() {
    let err = parse("1 + $").unwrap_err();
    assert_eq!(
        err,
        ParserError::unexpected_token("expression", "character '$'", Span::new(4, 5))
    );
}

#[test]
fn test_error_on_empty_input() {
    let err = parse("").unwrap_err();
    assert_eq!(
        err,
        ParserError::unexpected_token("expression", "end of input", Span::point(0))
    );
}

#[test]
fn test_error_on_missing_close_paren() {
    let err = parse("(1 + 2").unwrap_err();
    assert_eq!(
        err,
        ParserError::unexpected_token("')'", "end of input", Span::point(6))
    );
}

#[test]
fn test_error_on_missing_comma() {
    let err = parse("f(1 2)").unwrap_err();
    assert_eq!(
        err,
        ParserError::unexpected_token("',' or ')'", "number '2'", Span::new(4, 5))
    );
}

#[test]
fn test_error_on_trailing_comma() {
    assert!(matches!(
        parse("f(1,)"),
        Err(ParserError::UnexpectedToken { .. })
    ));
}

#[test]
fn test_error_on_trailing_input() {
    let err = parse("1 + 2 )").unwrap_err();
    assert_eq!(err, ParserError::trailing_input("')'", Span::new(6, 7)));

    let err = parse("2 3").unwrap_err();
    assert_eq!(err, ParserError::trailing_input("number '3'", Span::new(2, 3)));
}

#[test]
fn test_error_on_dangling_operator() {
    assert!(parse("2 *").is_err());
    assert!(parse("2 ^").is_err());
    assert!(parse("-").is_err());
}

#[test]
fn test_deep_nesting_is_an_error() {
    let err = parse(&"(".repeat(100_000)).unwrap_err();
    assert_eq!(err, ParserError::too_deep(MAX_NESTING, Span::new(256, 257)));

    let closed = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(parse(&closed), Err(ParserError::TooDeep { .. })));

    assert!(matches!(
        parse(&format!("{}1", "-".repeat(100_000))),
        Err(ParserError::TooDeep { .. })
    ));
    assert!(matches!(
        parse(&format!("2{}", "^2".repeat(100_000))),
        Err(ParserError::TooDeep { .. })
    ));
}

#[test]
fn test_long_operator_chain_is_an_error() {
    let chain = format!("1{}", " + 1".repeat(100_000));
    assert!(matches!(parse(&chain), Err(ParserError::TooDeep { .. })));
}

#[test]
fn test_nesting_below_the_limit_parses() {
    let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(parse_expr(&nested).to_string(), nested);

    let chain = format!("1{}", " + 1".repeat(200));
    assert_eq!(parse_expr(&chain).to_string(), chain);

    // A finished chain gives its levels back to the rest of the expression.
    let siblings = format!("f({0}, {0})", chain);
    assert!(parse(&siblings).is_ok());
}
