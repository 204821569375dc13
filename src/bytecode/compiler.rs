//! Bytecode compiler: transforms an expression tree into a [`Program`].

use log::{debug, trace};

use crate::ast::{Expr, UnaryOp};
use crate::bytecode::instruction::OpCode;
use crate::bytecode::program::Program;
use crate::error::CompileError;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

/// The bytecode compiler.
///
/// A single post-order walk writes opcodes and side-table entries in the
/// order the VM will consume them.
#[derive(Debug, Default)]
pub struct Compiler {
    program: Program,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile one expression into a finished program.
    pub fn compile(mut self, expr: &Expr) -> CompileResult<Program> {
        self.compile_expression(expr)?;

        debug!(
            "compiled {} opcodes ({} values, {} vars, {} calls)",
            self.program.len(),
            self.program.values.len(),
            self.program.vars.len(),
            self.program.funcs.len()
        );
        trace!("program: {:?}", self.program);
        Ok(self.program)
    }

    fn compile_expression(&mut self, expr: &Expr) -> CompileResult<()> {
        match expr {
            Expr::Number(value) => self.program.write_number(*value),

            Expr::Variable(name) => self.program.write_variable(name),

            Expr::Grouping(inner) => self.compile_expression(inner)?,

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                self.compile_expression(left)?;
                self.compile_expression(right)?;
                self.program.write_op(OpCode::for_binary(*operator));
            }

            Expr::Unary {
                operator,
                operand,
                postfix,
            } => {
                if *postfix {
                    return Err(CompileError::unsupported_postfix(operator.to_string()));
                }
                self.compile_expression(operand)?;
                match operator {
                    UnaryOp::Negate => self.program.write_op(OpCode::Neg),
                }
            }

            Expr::Call { name, arguments } => {
                // The call site is recorded before its arguments, so nested
                // calls appear in `funcs` after the call that contains them.
                self.program.add_call_site(name, arguments.len());
                for argument in arguments {
                    self.compile_expression(argument)?;
                }
                self.program.write_op(OpCode::Func);
            }
        }

        Ok(())
    }
}

/// Compile an expression with a fresh [`Compiler`].
pub fn compile(expr: &Expr) -> CompileResult<Program> {
    Compiler::new().compile(expr)
}
