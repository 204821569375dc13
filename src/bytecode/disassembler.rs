//! Bytecode disassembler for debugging.

use std::fmt;

use crate::bytecode::instruction::OpCode;
use crate::bytecode::program::Program;

/// Render a program as a listing, one instruction per line.
pub fn disassemble(program: &Program) -> String {
    Disassembly(program).to_string()
}

/// Print a program listing to stdout.
pub fn print_disassembly(program: &Program) {
    print!("{}", Disassembly(program));
}

/// Display adapter producing the program listing.
///
/// Each line shows the instruction index, the opcode, its side-table operand
/// and the stack depth once the instruction has run.
pub struct Disassembly<'a>(pub &'a Program);

impl fmt::Display for Disassembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.0;
        let mut values = program.values.iter();
        let mut vars = program.vars.iter();
        let mut funcs = program.funcs.iter();
        let mut depth: isize = 0;

        for (index, opcode) in program.opcodes.iter().enumerate() {
            let operand = match opcode {
                OpCode::Num => {
                    depth += 1;
                    values.next().map(|value| value.to_string())
                }
                OpCode::Var => {
                    depth += 1;
                    vars.next().cloned()
                }
                OpCode::Func => funcs.next().map(|meta| {
                    depth += 1 - meta.arg_count as isize;
                    format!("{}/{}", meta.name, meta.arg_count)
                }),
                OpCode::Neg => Some(String::new()),
                _ => {
                    depth -= 1;
                    Some(String::new())
                }
            };
            let operand = operand.unwrap_or_else(|| "<missing>".to_string());

            writeln!(
                f,
                "{:04} {:<5} {:<12} depth {}",
                index,
                opcode.name(),
                operand,
                depth
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::compile;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing() {
        let program = compile(&parse("-x + max(1.5, 2)").unwrap()).unwrap();
        let listing = disassemble(&program);
        let lines: Vec<&str> = listing.lines().map(str::trim_end).collect();
        assert_eq!(
            lines,
            vec![
                "0000 VAR   x            depth 1",
                "0001 NEG                depth 1",
                "0002 NUM   1.5          depth 2",
                "0003 NUM   2            depth 3",
                "0004 FUNC  max/2        depth 2",
                "0005 ADD                depth 1",
            ]
        );
    }

    #[test]
    fn test_listing_flags_missing_operands() {
        let program = Program {
            opcodes: vec![OpCode::Num],
            ..Program::default()
        };
        assert!(disassemble(&program).contains("<missing>"));
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(disassemble(&Program::default()), "");
    }
}
