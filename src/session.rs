//! Line-oriented front end: evaluation plus `name = expr` and
//! `name(params) = expr` definitions against a persistent global scope.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use log::debug;

use crate::ast::Expr;
use crate::builtins::Builtins;
use crate::bytecode::{compile, Program, Vm, VmConfig};
use crate::environment::{Environment, FunctionError, NativeFn, Scope};
use crate::error::{DefinitionError, ReckonError, RuntimeError};
use crate::interpreter;
use crate::parser::parse;
use crate::ExecutionMode;

/// Nested user-function calls allowed before evaluation is abandoned.
pub const MAX_CALL_DEPTH: usize = 200;

static BUILTINS: Builtins = Builtins;

/// What a successfully executed line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(f64),
    /// A variable or function was bound; carries its signature (`x`, `f(a, b)`).
    Defined(String),
}

/// An evaluation session holding user definitions between lines.
pub struct Session {
    globals: Rc<RefCell<Scope<'static>>>,
    mode: ExecutionMode,
    vm: Rc<Vm>,
    depth: Rc<Cell<usize>>,
}

impl Session {
    pub fn new(mode: ExecutionMode, vm_config: VmConfig) -> Self {
        Self {
            globals: Rc::new(RefCell::new(Scope::with_parent(&BUILTINS))),
            mode,
            vm: Rc::new(Vm::new(vm_config)),
            depth: Rc::new(Cell::new(0)),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Evaluate a line, or bind a name when the line contains `=`.
    pub fn execute(&self, line: &str) -> Result<Outcome, ReckonError> {
        if line.contains('=') {
            self.define(line).map(Outcome::Defined)
        } else {
            self.evaluate(line).map(Outcome::Value)
        }
    }

    /// Parse and evaluate an expression against the globals.
    pub fn evaluate(&self, source: &str) -> Result<f64, ReckonError> {
        let expr = parse(source)?;
        let body = Body::new(expr, self.mode, &self.vm)?;
        let globals = self.globals.borrow();
        Ok(body.evaluate(&*globals)?)
    }

    /// Compile a line for inspection without evaluating it.
    pub fn compile(&self, source: &str) -> Result<Program, ReckonError> {
        Ok(compile(&parse(source)?)?)
    }

    /// Handle `target = body`, returning the signature of what was defined.
    pub fn define(&self, line: &str) -> Result<String, ReckonError> {
        let Some((target, body)) = line.split_once('=') else {
            return Err(DefinitionError::InvalidTarget(line.trim().to_string()).into());
        };
        if body.contains('=') {
            return Err(DefinitionError::MultipleAssignment.into());
        }

        let target = parse(target)?;
        let body = parse(body)?;

        match target {
            Expr::Variable(name) => {
                let value = {
                    let globals = self.globals.borrow();
                    Body::new(body, self.mode, &self.vm)?.evaluate(&*globals)?
                };
                debug!("defined {} = {}", name, value);
                self.globals.borrow_mut().set_var(name.as_str(), value);
                Ok(name)
            }
            Expr::Call { name, arguments } => {
                let params = parameter_names(&arguments)?;
                let signature = format!("{}({})", name, params.join(", "));
                let func = self.user_function(&name, params, Body::new(body, self.mode, &self.vm)?);
                debug!("defined {}", signature);
                self.globals.borrow_mut().set_func(name.as_str(), func);
                Ok(signature)
            }
            other => Err(DefinitionError::InvalidTarget(other.to_string()).into()),
        }
    }

    /// Remove every user definition. Built-ins stay available.
    pub fn clear(&self) {
        self.globals.borrow_mut().clear();
    }

    pub fn var_names(&self) -> Vec<String> {
        let globals = self.globals.borrow();
        globals.var_names().into_iter().map(str::to_string).collect()
    }

    pub fn func_names(&self) -> Vec<String> {
        let globals = self.globals.borrow();
        globals.func_names().into_iter().map(str::to_string).collect()
    }

    pub fn lookup_var(&self, name: &str) -> Option<f64> {
        self.globals.borrow().lookup_var(name)
    }

    pub fn lookup_func(&self, name: &str) -> Option<NativeFn> {
        self.globals.borrow().lookup_func(name)
    }

    fn user_function(&self, name: &str, params: Vec<String>, body: Body) -> NativeFn {
        let name = name.to_string();
        let globals: Weak<RefCell<Scope<'static>>> = Rc::downgrade(&self.globals);
        let depth = Rc::clone(&self.depth);

        Rc::new(move |args: &[f64]| {
            if args.len() != params.len() {
                return Err(FunctionError::arity(name.as_str(), params.len(), args.len()));
            }
            let globals = globals
                .upgrade()
                .ok_or_else(|| FunctionError::Scope(name.clone()))?;

            if depth.get() >= MAX_CALL_DEPTH {
                return Err(FunctionError::message(format!(
                    "{}(): maximum call depth of {} exceeded",
                    name, MAX_CALL_DEPTH
                )));
            }

            let outer = globals.borrow();
            let mut local = Scope::with_parent(&*outer);
            for (param, value) in params.iter().zip(args) {
                local.set_var(param.as_str(), *value);
            }

            depth.set(depth.get() + 1);
            let result = body.evaluate(&local);
            depth.set(depth.get() - 1);
            Ok(result?)
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ExecutionMode::default(), VmConfig::default())
    }
}

/// A parsed expression ready to run in the session's execution mode.
enum Body {
    Tree(Expr),
    Compiled { program: Program, vm: Rc<Vm> },
}

impl Body {
    fn new(expr: Expr, mode: ExecutionMode, vm: &Rc<Vm>) -> Result<Body, ReckonError> {
        Ok(match mode {
            ExecutionMode::TreeWalk => Body::Tree(expr),
            ExecutionMode::Bytecode => Body::Compiled {
                program: compile(&expr)?,
                vm: Rc::clone(vm),
            },
        })
    }

    fn evaluate(&self, env: &dyn Environment) -> Result<f64, RuntimeError> {
        match self {
            Body::Tree(expr) => interpreter::evaluate(expr, env),
            Body::Compiled { program, vm } => vm.run(program, env),
        }
    }
}

fn parameter_names(arguments: &[Expr]) -> Result<Vec<String>, DefinitionError> {
    let mut seen = HashSet::new();
    arguments
        .iter()
        .map(|argument| match argument {
            Expr::Variable(name) if seen.insert(name.as_str()) => Ok(name.clone()),
            other => Err(DefinitionError::InvalidParameter(other.to_string())),
        })
        .collect()
}
