//! Renders an expression back to source text with minimal parentheses.
//!
//! `Grouping` nodes are printed as written. Extra parentheses are added only
//! where a hand-built tree could not be read back otherwise.

use std::fmt;

use crate::ast::{BinaryOp, Expr};
use crate::parser::precedence::Associativity;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Grouping(inner) => write!(f, "({})", inner),
            Expr::Call { name, arguments } => {
                write!(f, "{}(", name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Expr::Unary {
                operator,
                operand,
                postfix,
            } => {
                let wrap = matches!(operand.as_ref(), Expr::Binary { operator, .. } if *operator != BinaryOp::Power);
                if *postfix {
                    write_operand(f, operand, wrap)?;
                    write!(f, "{}", operator)
                } else {
                    write!(f, "{}", operator)?;
                    write_operand(f, operand, wrap)
                }
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                write_operand(f, left, needs_parens(left, *operator, Side::Left))?;
                if *operator == BinaryOp::Power {
                    write!(f, "{}", operator)?;
                } else {
                    write!(f, " {} ", operator)?;
                }
                write_operand(f, right, needs_parens(right, *operator, Side::Right))
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn needs_parens(child: &Expr, parent: BinaryOp, side: Side) -> bool {
    match child {
        Expr::Binary { operator, .. } => {
            let (child_prec, parent_prec) = (operator.precedence(), parent.precedence());
            if child_prec != parent_prec {
                return child_prec < parent_prec;
            }
            match parent.associativity() {
                Associativity::Left => side == Side::Right,
                Associativity::Right => side == Side::Left,
            }
        }
        // `-2^2` reads as `-(2^2)`, so a negated base needs its own parentheses.
        Expr::Unary { postfix: false, .. } => parent == BinaryOp::Power && side == Side::Left,
        Expr::Number(value) => {
            value.is_sign_negative() && parent == BinaryOp::Power && side == Side::Left
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn num(value: f64) -> Expr {
        Expr::number(value)
    }

    #[test]
    fn test_spacing() {
        let expr = Expr::binary(
            Expr::binary(num(1.0), BinaryOp::Add, num(2.0)),
            BinaryOp::Multiply,
            Expr::binary(num(3.0), BinaryOp::Power, num(4.5)),
        );
        assert_eq!(expr.to_string(), "(1 + 2) * 3^4.5");
    }

    #[test]
    fn test_left_associative_right_operand() {
        let expr = Expr::binary(
            num(8.0),
            BinaryOp::Subtract,
            Expr::binary(num(3.0), BinaryOp::Subtract, num(2.0)),
        );
        assert_eq!(expr.to_string(), "8 - (3 - 2)");

        let expr = Expr::binary(
            Expr::binary(num(8.0), BinaryOp::Subtract, num(3.0)),
            BinaryOp::Subtract,
            num(2.0),
        );
        assert_eq!(expr.to_string(), "8 - 3 - 2");
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = Expr::binary(
            num(2.0),
            BinaryOp::Power,
            Expr::binary(num(3.0), BinaryOp::Power, num(4.0)),
        );
        assert_eq!(expr.to_string(), "2^3^4");

        let expr = Expr::binary(
            Expr::binary(num(2.0), BinaryOp::Power, num(3.0)),
            BinaryOp::Power,
            num(4.0),
        );
        assert_eq!(expr.to_string(), "(2^3)^4");
    }

    #[test]
    fn test_unary() {
        let expr = Expr::negate(Expr::binary(num(2.0), BinaryOp::Power, num(2.0)));
        assert_eq!(expr.to_string(), "-2^2");

        let expr = Expr::binary(Expr::negate(num(2.0)), BinaryOp::Power, num(2.0));
        assert_eq!(expr.to_string(), "(-2)^2");

        let expr = Expr::negate(Expr::binary(num(1.0), BinaryOp::Add, num(2.0)));
        assert_eq!(expr.to_string(), "-(1 + 2)");

        let expr = Expr::Unary {
            operator: crate::ast::UnaryOp::Negate,
            operand: Box::new(Expr::variable("x")),
            postfix: true,
        };
        assert_eq!(expr.to_string(), "x-");
    }

    #[test]
    fn test_calls() {
        let expr = Expr::call(
            "max",
            vec![Expr::variable("a"), Expr::call("sin", vec![Expr::variable("Pi")])],
        );
        assert_eq!(expr.to_string(), "max(a, sin(Pi))");
        assert_eq!(Expr::call("now", vec![]).to_string(), "now()");
    }

    #[test]
    fn test_printed_source_parses_back_to_same_tree() {
        let sources = [
            "2 * (3 + 4) / 5 - 512 * (-9 + 10) * 332 - 55 / 2",
            "-2^2",
            "(-2)^2",
            "2^3^4",
            "(2^3)^4",
            "8 - 3 - 2",
            "8 - (3 - 2)",
            "f(x, g(1, 2), -y % 3)",
            "((1))",
            "2^-x",
        ];

        for source in sources {
            let expr = parse(source).unwrap();
            let printed = expr.to_string();
            assert_eq!(printed, source);
            assert_eq!(parse(&printed).unwrap(), expr);
        }
    }
}
