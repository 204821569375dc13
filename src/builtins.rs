//! Process-wide built-in constants and functions.

use std::collections::HashMap;
use std::rc::Rc;

use lazy_static::lazy_static;

use crate::environment::{Environment, FunctionError, NativeFn, Scope};

/// A built-in function taking a fixed number of arguments.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[f64]) -> f64,
}

impl BuiltinFunction {
    pub fn call(&self, args: &[f64]) -> Result<f64, FunctionError> {
        if args.len() != self.arity {
            return Err(FunctionError::arity(self.name, self.arity, args.len()));
        }
        Ok((self.func)(args))
    }
}

lazy_static! {
    static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut constants = HashMap::new();
        constants.insert("Pi", std::f64::consts::PI);
        constants.insert("E", std::f64::consts::E);
        constants
    };

    static ref FUNCTIONS: HashMap<&'static str, BuiltinFunction> = [
        BuiltinFunction { name: "sin", arity: 1, func: |args| args[0].sin() },
        BuiltinFunction { name: "cos", arity: 1, func: |args| args[0].cos() },
    ]
    .into_iter()
    .map(|builtin| (builtin.name, builtin))
    .collect();
}

/// The built-in library as an [`Environment`]. Zero-sized; the tables it
/// reads are built once on first use and never change.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builtins;

impl Builtins {
    pub fn constant_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = CONSTANTS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn function_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = FUNCTIONS.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn function(name: &str) -> Option<BuiltinFunction> {
        FUNCTIONS.get(name).copied()
    }
}

impl Environment for Builtins {
    fn lookup_var(&self, name: &str) -> Option<f64> {
        CONSTANTS.get(name).copied()
    }

    fn lookup_func(&self, name: &str) -> Option<NativeFn> {
        let builtin = Builtins::function(name)?;
        Some(Rc::new(move |args: &[f64]| builtin.call(args)))
    }
}

/// A fresh, empty scope that falls back to the built-ins.
pub fn math_scope() -> Scope<'static> {
    static BUILTINS: Builtins = Builtins;
    Scope::with_parent(&BUILTINS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Builtins.lookup_var("Pi"), Some(std::f64::consts::PI));
        assert_eq!(Builtins.lookup_var("E"), Some(std::f64::consts::E));
        assert_eq!(Builtins.lookup_var("pi"), None);
        assert_eq!(Builtins::constant_names(), vec!["E", "Pi"]);
    }

    #[test]
    fn test_functions() {
        let sin = Builtins.lookup_func("sin").unwrap();
        let cos = Builtins.lookup_func("cos").unwrap();
        assert_eq!(sin(&[0.0]), Ok(0.0));
        assert_eq!(cos(&[0.0]), Ok(1.0));
        assert!(Builtins.lookup_func("tan").is_none());
        assert_eq!(Builtins::function_names(), vec!["cos", "sin"]);
    }

    #[test]
    fn test_wrong_argument_count() {
        let sin = Builtins.lookup_func("sin").unwrap();
        assert_eq!(sin(&[1.0, 2.0]), Err(FunctionError::arity("sin", 1, 2)));
        assert_eq!(sin(&[]), Err(FunctionError::arity("sin", 1, 0)));
    }

    #[test]
    fn test_math_scope_shadows_builtins() {
        let mut scope = math_scope();
        assert_eq!(scope.lookup_var("Pi"), Some(std::f64::consts::PI));

        scope.set_var("Pi", 3.0);
        assert_eq!(scope.lookup_var("Pi"), Some(3.0));
        assert!(scope.lookup_func("cos").is_some());
    }
}
