//! Bytecode instruction definitions.

use crate::ast::BinaryOp;

/// Opcodes for the bytecode virtual machine.
///
/// Opcodes carry no inline operands. `Num`, `Var` and `Func` each consume
/// the next unread entry of their side table in the [`Program`].
///
/// [`Program`]: crate::bytecode::Program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ============ Operands ============
    /// Push the next literal from `values`
    Num = 1,
    /// Push the value bound to the next name in `vars`
    Var,

    // ============ Arithmetic ============
    /// l + r
    Add,
    /// l - r
    Sub,
    /// l * r
    Mult,
    /// l / r, failing when r is zero
    Div,
    /// Floating-point remainder of l / r
    Mod,
    /// l raised to the power r
    Exp,
    /// -v
    Neg,

    // ============ Calls ============
    /// Call the next function in `funcs` with its recorded argument count
    Func,
}

impl OpCode {
    /// The opcode implementing a binary operator.
    pub fn for_binary(op: BinaryOp) -> OpCode {
        match op {
            BinaryOp::Add => OpCode::Add,
            BinaryOp::Subtract => OpCode::Sub,
            BinaryOp::Multiply => OpCode::Mult,
            BinaryOp::Divide => OpCode::Div,
            BinaryOp::Modulo => OpCode::Mod,
            BinaryOp::Power => OpCode::Exp,
        }
    }

    /// The binary operator this opcode applies, if it is a binary opcode.
    pub fn binary_operator(self) -> Option<BinaryOp> {
        match self {
            OpCode::Add => Some(BinaryOp::Add),
            OpCode::Sub => Some(BinaryOp::Subtract),
            OpCode::Mult => Some(BinaryOp::Multiply),
            OpCode::Div => Some(BinaryOp::Divide),
            OpCode::Mod => Some(BinaryOp::Modulo),
            OpCode::Exp => Some(BinaryOp::Power),
            OpCode::Num | OpCode::Var | OpCode::Neg | OpCode::Func => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Num => "NUM",
            OpCode::Var => "VAR",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mult => "MULT",
            OpCode::Div => "DIV",
            OpCode::Mod => "MOD",
            OpCode::Exp => "EXP",
            OpCode::Neg => "NEG",
            OpCode::Func => "FUNC",
        }
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_mapping_is_symmetric() {
        let ops = [
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Multiply,
            BinaryOp::Divide,
            BinaryOp::Modulo,
            BinaryOp::Power,
        ];
        for op in ops {
            assert_eq!(OpCode::for_binary(op).binary_operator(), Some(op));
        }
        assert_eq!(OpCode::Neg.binary_operator(), None);
        assert_eq!(OpCode::Func.binary_operator(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(OpCode::Mult.to_string(), "MULT");
        assert_eq!(OpCode::Func.to_string(), "FUNC");
    }
}
