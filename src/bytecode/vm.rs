//! Stack-based virtual machine for compiled programs.

use log::trace;

use crate::bytecode::config::VmConfig;
use crate::bytecode::instruction::OpCode;
use crate::bytecode::pool::StackPool;
use crate::bytecode::program::Program;
use crate::environment::Environment;
use crate::error::RuntimeError;

/// Result type for VM operations.
pub type VMResult<T> = Result<T, RuntimeError>;

/// The virtual machine.
///
/// Holds only the stack pool, so one `Vm` can serve many concurrent runs.
#[derive(Debug)]
pub struct Vm {
    pool: StackPool,
}

impl Vm {
    pub fn new(config: VmConfig) -> Self {
        let config = config.with_defaults();
        Self {
            pool: StackPool::new(config.stack_pool_size, config.stack_capacity),
        }
    }

    pub fn pool(&self) -> &StackPool {
        &self.pool
    }

    /// Execute `program` against `env` and return the single value it leaves.
    pub fn run(&self, program: &Program, env: &dyn Environment) -> VMResult<f64> {
        let mut stack = self.pool.acquire();
        let mut values = program.values.iter();
        let mut vars = program.vars.iter();
        let mut funcs = program.funcs.iter();

        for &opcode in &program.opcodes {
            match opcode {
                OpCode::Num => {
                    let value = values
                        .next()
                        .ok_or_else(|| exhausted("values", opcode))?;
                    stack.push(*value);
                }

                OpCode::Var => {
                    let name = vars.next().ok_or_else(|| exhausted("vars", opcode))?;
                    let value = env
                        .lookup_var(name)
                        .ok_or_else(|| RuntimeError::undefined_variable(name.as_str()))?;
                    stack.push(value);
                }

                OpCode::Neg => {
                    let value = pop(&mut stack, opcode)?;
                    stack.push(-value);
                }

                OpCode::Func => {
                    let meta = funcs.next().ok_or_else(|| exhausted("funcs", opcode))?;
                    let func = env
                        .lookup_func(&meta.name)
                        .ok_or_else(|| RuntimeError::undefined_function(meta.name.as_str()))?;
                    if stack.len() < meta.arg_count {
                        return Err(RuntimeError::stack_underflow(
                            opcode.name(),
                            meta.arg_count,
                            stack.len(),
                        ));
                    }
                    let first_arg = stack.len() - meta.arg_count;
                    let result = func(&stack[first_arg..])?;
                    stack.truncate(first_arg);
                    stack.push(result);
                }

                OpCode::Add
                | OpCode::Sub
                | OpCode::Mult
                | OpCode::Div
                | OpCode::Mod
                | OpCode::Exp => {
                    let Some(operator) = opcode.binary_operator() else {
                        return Err(RuntimeError::invalid_program(format!(
                            "{} is not a binary opcode",
                            opcode
                        )));
                    };
                    if stack.len() < 2 {
                        return Err(RuntimeError::stack_underflow(
                            opcode.name(),
                            2,
                            stack.len(),
                        ));
                    }
                    let right = pop(&mut stack, opcode)?;
                    let left = pop(&mut stack, opcode)?;
                    stack.push(operator.apply(left, right)?);
                }
            }
        }

        if stack.len() != 1 {
            return Err(RuntimeError::invalid_program(format!(
                "expected one value on the stack after execution, found {}",
                stack.len()
            )));
        }

        let result = stack[0];
        trace!("run finished with {}", result);
        Ok(result)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new(VmConfig::default())
    }
}

fn pop(stack: &mut Vec<f64>, opcode: OpCode) -> VMResult<f64> {
    stack
        .pop()
        .ok_or_else(|| RuntimeError::stack_underflow(opcode.name(), 1, 0))
}

fn exhausted(table: &str, opcode: OpCode) -> RuntimeError {
    RuntimeError::invalid_program(format!("{} has no entry left in {}", opcode, table))
}
