//! Reckon CLI: evaluate expressions, run expression files or start the REPL.

use std::env;
use std::fs;
use std::process;

use colored::Colorize;

use reckon::bytecode::print_disassembly;
use reckon::config::{self, VmConfig};
use reckon::repl::Repl;
use reckon::{ExecutionMode, Outcome, ReckonError, Session};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const EXIT_USAGE: i32 = 64;
const EXIT_NO_INPUT: i32 = 66;
const EXIT_FAILURE: i32 = 70;

/// CLI command to execute.
enum Command {
    /// Run an expression file, one expression or definition per line
    Run { file: String },
    /// Evaluate a single expression
    Eval { code: String },
    /// Start the REPL
    Repl,
}

/// CLI options parsed from arguments.
struct Options {
    command: Command,
    mode: ExecutionMode,
    disassemble: bool,
}

fn print_usage() {
    eprintln!("Reckon {} - arithmetic expression evaluator", VERSION);
    eprintln!();
    eprintln!("Usage: reckon [options] [file]");
    eprintln!("       reckon [options] -e <expression>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <expr>       Evaluate an expression and print the result");
    eprintln!("  --tree-walk     Evaluate by walking the syntax tree instead of the VM");
    eprintln!("  --disassemble   Print the bytecode of each expression before running it");
    eprintln!("  -h, --help      Show this help message");
    eprintln!("  -V, --version   Show version information");
    eprintln!();
    eprintln!("Without a file or -e, an interactive REPL is started.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RECKON_LOG              Log level (off, error, warn, info, debug, trace)");
    eprintln!("  RECKON_STACK_POOL_SIZE  Idle VM stacks kept for reuse");
    eprintln!("  RECKON_STACK_CAPACITY   Initial capacity of a VM stack");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(EXIT_USAGE);
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options {
        command: Command::Repl,
        mode: ExecutionMode::default(),
        disassemble: false,
    };

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("reckon {}", VERSION);
                process::exit(0);
            }
            "--tree-walk" => options.mode = ExecutionMode::TreeWalk,
            "--disassemble" => options.disassemble = true,
            "-e" => {
                i += 1;
                if i >= args.len() {
                    usage_error("-e requires an expression argument");
                }
                if !matches!(options.command, Command::Repl) {
                    usage_error("Only one of -e or a file can be given");
                }
                options.command = Command::Eval {
                    code: args[i].clone(),
                };
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                usage_error(&format!("Unknown option: {}", arg));
            }
            _ => {
                if !matches!(options.command, Command::Repl) {
                    usage_error("Only one of -e or a file can be given");
                }
                options.command = Command::Run { file: arg.clone() };
            }
        }
        i += 1;
    }

    options
}

fn main() {
    if let Ok(cwd) = env::current_dir() {
        config::load_env_files(&cwd);
    }
    if let Err(e) = reckon::logger::init(config::log_level()) {
        eprintln!("Warning: logger already installed: {}", e);
    }

    let options = parse_args();
    let vm_config = VmConfig::from_env();

    match &options.command {
        Command::Repl => run_repl(&options, vm_config),
        Command::Run { file } => run_file(file, &options, vm_config),
        Command::Eval { code } => run_eval(code, &options, vm_config),
    }
}

fn report(error: &ReckonError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

/// Execute one line, printing its value. Returns false on failure.
fn execute_line(session: &Session, line: &str, options: &Options) -> bool {
    if options.disassemble && !line.contains('=') {
        match session.compile(line) {
            Ok(program) => print_disassembly(&program),
            Err(e) => {
                report(&e);
                return false;
            }
        }
    }

    match session.execute(line) {
        Ok(Outcome::Value(value)) => {
            println!("{}", value);
            true
        }
        Ok(Outcome::Defined(_)) => true,
        Err(e) => {
            report(&e);
            false
        }
    }
}

fn run_file(path: &str, options: &Options, vm_config: VmConfig) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{} cannot read '{}': {}", "Error:".red().bold(), path, e);
            process::exit(EXIT_NO_INPUT);
        }
    };

    let session = Session::new(options.mode, vm_config);
    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !execute_line(&session, line, options) {
            eprintln!("  at {}:{}", path, number + 1);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run_eval(code: &str, options: &Options, vm_config: VmConfig) {
    let session = Session::new(options.mode, vm_config);
    if !execute_line(&session, code.trim(), options) {
        process::exit(EXIT_FAILURE);
    }
}

fn run_repl(options: &Options, vm_config: VmConfig) {
    let mut repl = Repl::new(options.mode, vm_config).with_disassembly(options.disassemble);
    if let Err(e) = repl.run() {
        report(&ReckonError::from(e));
        process::exit(EXIT_FAILURE);
    }
}
