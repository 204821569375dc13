//! End-to-end tests through the public entry points.

use pretty_assertions::assert_eq;

use crate::builtins::math_scope;
use crate::environment::FunctionError;
use crate::*;

fn both_modes(source: &str, env: &dyn Environment) -> Result<f64, String> {
    let compiled = eval_with_mode(source, env, ExecutionMode::Bytecode).map_err(|e| e.to_string());
    let walked = eval_with_mode(source, env, ExecutionMode::TreeWalk).map_err(|e| e.to_string());
    assert_eq!(compiled, walked, "execution modes disagree on {:?}", source);
    compiled
}

#[test]
fn test_literal_scenarios() {
    let env = EmptyEnvironment;
    assert_eq!(both_modes("2+2", &env), Ok(4.0));
    assert_eq!(both_modes("2*(3-4)+2/4", &env), Ok(-1.5));
    assert_eq!(both_modes("4^3^2", &env), Ok(262144.0));
    assert_eq!(both_modes("8-3-2", &env), Ok(3.0));
    assert_eq!(
        both_modes("2^3^4", &env),
        Ok(2417851639229258349412352.0)
    );

    let value = both_modes("2 * (3 + 4) / 5 - 512 * (-9 + 10) * 332 - 55 / 2", &env).unwrap();
    assert!((value - -170008.7).abs() < 1e-9);
}

#[test]
fn test_divide_by_zero_is_an_error_not_infinity() {
    let program = compile(&parse("1/0").unwrap()).unwrap();
    assert_eq!(
        run(&program, &EmptyEnvironment),
        Err(RuntimeError::DivisionByZero)
    );
}

#[test]
fn test_undefined_references() {
    assert!(matches!(
        eval("x+1", &EmptyEnvironment),
        Err(ReckonError::Runtime(RuntimeError::UndefinedVariable(name))) if name == "x"
    ));
    assert!(matches!(
        eval("foo(1)", &EmptyEnvironment),
        Err(ReckonError::Runtime(RuntimeError::UndefinedFunction(name))) if name == "foo"
    ));
}

#[test]
fn test_argument_count_mismatch() {
    let env = math_scope();
    assert!(matches!(
        eval("sin(1,2)", &env),
        Err(ReckonError::Runtime(RuntimeError::Function(FunctionError::Arity { .. })))
    ));
    assert_eq!(
        both_modes("sin(1,2)", &env),
        Err("Runtime error: sin() requires 1 argument, got 2".to_string())
    );
}

#[test]
fn test_parse_errors_surface_through_eval() {
    assert!(matches!(
        eval("2 +", &EmptyEnvironment),
        Err(ReckonError::Parser(_))
    ));
    assert!(matches!(
        eval("(1", &EmptyEnvironment),
        Err(ReckonError::Parser(_))
    ));
}

#[test]
fn test_program_runs_many_times_with_different_bindings() {
    let program = compile(&parse("a * x^2 + sin(x)").unwrap()).unwrap();

    for i in 0..50 {
        let x = i as f64 / 10.0;
        let mut env = math_scope();
        env.set_var("a", 3.0);
        env.set_var("x", x);
        assert_eq!(run(&program, &env), Ok(3.0 * x.powf(2.0) + x.sin()));
    }
}

#[test]
fn test_printed_expression_evaluates_the_same() {
    let env = math_scope();
    for source in ["-2^2", "(1 + 2) * -3 % 4", "cos(Pi) - 2^-1^2", "E^(1/2)"] {
        let expr = parse(source).unwrap();
        let reprinted = expr.to_string();
        assert_eq!(both_modes(&reprinted, &env), both_modes(source, &env));
    }
}

#[test]
fn test_disassemble_lists_every_instruction() {
    let program = compile(&parse("f(x, 2) * -y").unwrap()).unwrap();
    let listing = disassemble(&program);
    assert_eq!(listing.lines().count(), program.len());
    assert!(listing.contains("f/2"));
}

#[test]
fn test_session_end_to_end() {
    let session = Session::default();
    for line in ["g = 9.81", "fall(t) = g * t^2 / 2", "h = fall(2)"] {
        assert!(matches!(session.execute(line), Ok(Outcome::Defined(_))));
    }
    match session.execute("h * 1").unwrap() {
        Outcome::Value(value) => assert!((value - 19.62).abs() < 1e-12),
        other => panic!("expected a value, got {:?}", other),
    }
}

#[test]
fn test_deeply_nested_input_is_rejected_not_crashed() {
    for n in [10_000, 100_000] {
        let source = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert!(matches!(
            eval(&source, &EmptyEnvironment),
            Err(ReckonError::Parser(ParserError::TooDeep { .. }))
        ));
    }
    let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(both_modes(&nested, &EmptyEnvironment), Ok(1.0));
}
