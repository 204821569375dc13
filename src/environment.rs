//! Variable and function bindings consulted at evaluation time.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub use crate::error::FunctionError;

/// A callable bound to a name. Receives its arguments in call-site order.
pub type NativeFn = Rc<dyn Fn(&[f64]) -> Result<f64, FunctionError>>;

/// Read-only view of the bindings an expression is evaluated against.
pub trait Environment {
    fn lookup_var(&self, name: &str) -> Option<f64>;
    fn lookup_func(&self, name: &str) -> Option<NativeFn>;
}

/// An environment with no bindings at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn lookup_var(&self, _name: &str) -> Option<f64> {
        None
    }

    fn lookup_func(&self, _name: &str) -> Option<NativeFn> {
        None
    }
}

/// A mutable binding store with optional fallback to a parent environment.
///
/// The parent is borrowed, never owned: a child scope lives no longer than
/// the environment it falls back to.
#[derive(Default)]
pub struct Scope<'p> {
    vars: HashMap<String, f64>,
    funcs: HashMap<String, NativeFn>,
    parent: Option<&'p dyn Environment>,
}

impl<'p> Scope<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: &'p dyn Environment) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    pub fn set_func(&mut self, name: impl Into<String>, func: NativeFn) {
        self.funcs.insert(name.into(), func);
    }

    /// Bind a function that must be called with exactly `arity` arguments.
    pub fn define_native<F>(&mut self, name: &str, arity: usize, func: F)
    where
        F: Fn(&[f64]) -> Result<f64, FunctionError> + 'static,
    {
        let owned_name = name.to_string();
        self.set_func(
            name,
            Rc::new(move |args: &[f64]| {
                if args.len() != arity {
                    return Err(FunctionError::arity(owned_name.as_str(), arity, args.len()));
                }
                func(args)
            }),
        );
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.funcs.clear();
    }

    /// Names of the variables bound directly in this scope, sorted.
    pub fn var_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the functions bound directly in this scope, sorted.
    pub fn func_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.funcs.is_empty()
    }
}

impl Environment for Scope<'_> {
    fn lookup_var(&self, name: &str) -> Option<f64> {
        match self.vars.get(name) {
            Some(value) => Some(*value),
            None => self.parent.and_then(|parent| parent.lookup_var(name)),
        }
    }

    fn lookup_func(&self, name: &str) -> Option<NativeFn> {
        match self.funcs.get(name) {
            Some(func) => Some(Rc::clone(func)),
            None => self.parent.and_then(|parent| parent.lookup_func(name)),
        }
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("vars", &self.vars)
            .field("funcs", &self.func_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
