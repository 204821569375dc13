//! Bytecode module: compiler and virtual machine for expressions.
//!
//! Compiling once and running many times avoids re-parsing when the same
//! expression is evaluated against different bindings.
//!
//! # Architecture
//!
//! - `instruction`: OpCode definitions for the instruction set
//! - `program`: Compiled programs and their operand side tables
//! - `compiler`: Transforms an expression tree into a program
//! - `vm`: Stack-based virtual machine with a pooled operand stack
//! - `pool`: The bounded stack pool shared by concurrent runs
//! - `config`: VM sizing
//! - `disassembler`: Debug output for program inspection

pub mod compiler;
pub mod config;
pub mod disassembler;
pub mod instruction;
pub mod pool;
pub mod program;
pub mod vm;

pub use compiler::{compile, Compiler};
pub use config::VmConfig;
pub use disassembler::{disassemble, print_disassembly};
pub use instruction::OpCode;
pub use pool::{PooledStack, StackPool};
pub use program::{FuncMeta, Program};
pub use vm::Vm;
