//! Interactive read-eval-print loop on top of a [`Session`].

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::bytecode::{disassemble, VmConfig};
use crate::session::{Outcome, Session};
use crate::ExecutionMode;

const HISTORY_FILE: &str = ".reckon_history";
const PROMPT: &str = ">> ";
const CLEAR_SCREEN: &str = "\x1B[H\x1B[2J";

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Repl {
    session: Session,
    history: Vec<String>,
    history_file: Option<PathBuf>,
    disassemble: bool,
}

impl Repl {
    pub fn new(mode: ExecutionMode, vm_config: VmConfig) -> Self {
        let mut repl = Self {
            session: Session::new(mode, vm_config),
            history: Vec::new(),
            history_file: Some(Self::get_history_path()),
            disassemble: false,
        };
        repl.load_history();
        repl
    }

    /// A REPL that neither reads nor writes a history file.
    pub fn without_history(mode: ExecutionMode, vm_config: VmConfig) -> Self {
        Self {
            session: Session::new(mode, vm_config),
            history: Vec::new(),
            history_file: None,
            disassemble: false,
        }
    }

    /// Print the bytecode listing of each evaluated expression before its value.
    pub fn with_disassembly(mut self, enabled: bool) -> Self {
        self.disassemble = enabled;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn get_history_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(HISTORY_FILE)
        } else {
            PathBuf::from(HISTORY_FILE)
        }
    }

    fn load_history(&mut self) {
        let Some(path) = &self.history_file else {
            return;
        };
        if let Ok(content) = std::fs::read_to_string(path) {
            self.history.extend(
                content
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string),
            );
        }
    }

    fn save_history(&self) {
        let Some(path) = &self.history_file else {
            return;
        };
        if let Err(e) = std::fs::write(path, self.history.join("\n")) {
            log::warn!("could not save history to {}: {}", path.display(), e);
        }
    }

    /// Run the loop on stdin/stdout until `:q`, `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        println!("Reckon {} - expression evaluator", env!("CARGO_PKG_VERSION"));
        println!("Type :help for available commands.\n");

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();

        loop {
            print!("{}", PROMPT);
            stdout.flush()?;

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    println!();
                    break;
                }
                Ok(_) => {
                    if self.handle_line(line.trim(), &mut stdout, &mut stderr)? == Control::Quit {
                        break;
                    }
                }
                Err(e) => {
                    self.save_history();
                    return Err(e);
                }
            }
        }

        self.save_history();
        Ok(())
    }

    /// Handle one trimmed input line, writing results to `out` and errors
    /// to `err`.
    pub fn handle_line<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Control> {
        if line.is_empty() {
            return Ok(Control::Continue);
        }
        self.history.push(line.to_string());

        match line {
            ":q" | ":quit" | "exit" => return Ok(Control::Quit),
            ":clear" => write!(out, "{}", CLEAR_SCREEN)?,
            ":help" => self.cmd_help(out)?,
            ":vars" => self.cmd_vars(out)?,
            ":history" => self.cmd_history(out)?,
            _ if line.starts_with(':') => writeln!(
                err,
                "Unknown command: {}. Type :help for available commands.",
                line
            )?,
            _ => self.evaluate(line, out, err)?,
        }

        Ok(Control::Continue)
    }

    fn evaluate<O: Write, E: Write>(
        &self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        if self.disassemble && !line.contains('=') {
            match self.session.compile(line) {
                Ok(program) => write!(out, "{}", disassemble(&program))?,
                Err(e) => return writeln!(err, "{} {}", "error:".red().bold(), e),
            }
        }

        match self.session.execute(line) {
            Ok(Outcome::Value(value)) => writeln!(out, "{}", value),
            Ok(Outcome::Defined(_)) => Ok(()),
            Err(e) => writeln!(err, "{} {}", "error:".red().bold(), e),
        }
    }

    fn cmd_help<O: Write>(&self, out: &mut O) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Reckon REPL Commands")?;
        writeln!(out)?;
        writeln!(out, "<expr>             - Evaluate an expression, e.g. 2 * (3 + 4)")?;
        writeln!(out, "name = <expr>      - Define a variable")?;
        writeln!(out, "f(a, b) = <expr>   - Define a function")?;
        writeln!(out, ":vars              - List user-defined variables and functions")?;
        writeln!(out, ":history           - Show command history")?;
        writeln!(out, ":clear             - Clear the screen")?;
        writeln!(out, ":help              - Show this help message")?;
        writeln!(out, ":q / exit / Ctrl+D - Exit the REPL")?;
        writeln!(out)
    }

    fn cmd_history<O: Write>(&self, out: &mut O) -> io::Result<()> {
        writeln!(out, "History:")?;
        for (i, entry) in self.history.iter().enumerate() {
            writeln!(out, "{:4}  {}", i + 1, entry)?;
        }
        Ok(())
    }

    fn cmd_vars<O: Write>(&self, out: &mut O) -> io::Result<()> {
        let vars = self.session.var_names();
        let funcs = self.session.func_names();

        if vars.is_empty() && funcs.is_empty() {
            return writeln!(out, "Nothing defined.");
        }
        if !vars.is_empty() {
            writeln!(out, "Variables:")?;
            for name in vars {
                let value = self.session.lookup_var(&name).unwrap_or(f64::NAN);
                writeln!(out, "  {} = {}", name, value)?;
            }
        }
        if !funcs.is_empty() {
            writeln!(out, "Functions:")?;
            for name in funcs {
                writeln!(out, "  {}", name)?;
            }
        }
        Ok(())
    }
}
