//! Compiled programs: an opcode sequence plus its operand side tables.

use crate::bytecode::instruction::OpCode;

/// Name and argument count recorded for one call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncMeta {
    pub name: String,
    pub arg_count: usize,
}

impl FuncMeta {
    pub fn new(name: impl Into<String>, arg_count: usize) -> Self {
        Self {
            name: name.into(),
            arg_count,
        }
    }
}

/// A compiled expression.
///
/// The side tables are read positionally: the Nth `Num` opcode takes
/// `values[N]`, the Nth `Var` takes `vars[N]` and the Nth `Func` takes
/// `funcs[N]`. A program holds no execution state and can be run any number
/// of times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub opcodes: Vec<OpCode>,
    pub values: Vec<f64>,
    pub vars: Vec<String>,
    pub funcs: Vec<FuncMeta>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    pub(crate) fn write_op(&mut self, op: OpCode) {
        self.opcodes.push(op);
    }

    pub(crate) fn write_number(&mut self, value: f64) {
        self.values.push(value);
        self.write_op(OpCode::Num);
    }

    pub(crate) fn write_variable(&mut self, name: &str) {
        self.vars.push(name.to_string());
        self.write_op(OpCode::Var);
    }

    /// Record a call site. The matching `Func` opcode is written after the
    /// arguments have been compiled.
    pub(crate) fn add_call_site(&mut self, name: &str, arg_count: usize) {
        self.funcs.push(FuncMeta::new(name, arg_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands_go_to_side_tables() {
        let mut program = Program::new();
        program.add_call_site("f", 2);
        program.write_number(1.5);
        program.write_variable("x");
        program.write_op(OpCode::Func);

        assert_eq!(program.opcodes, vec![OpCode::Num, OpCode::Var, OpCode::Func]);
        assert_eq!(program.values, vec![1.5]);
        assert_eq!(program.vars, vec!["x".to_string()]);
        assert_eq!(program.funcs, vec![FuncMeta::new("f", 2)]);
        assert_eq!(program.len(), 3);
        assert!(!program.is_empty());
        assert!(Program::new().is_empty());
    }
}
