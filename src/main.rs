use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use sympl::{
    config::{DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_LOOP_ITERATIONS, InterpreterConfig, init_tracing},
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

/// sympl runs scripts written in Sympl, a small dynamically typed scripting
/// language. Without a script it starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells sympl to read the script from a file instead of the command line.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode is a feature that automatically prints out the last non-null
    /// value of a script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Maximum number of iterations of a single loop.
    #[arg(long, default_value_t = DEFAULT_MAX_LOOP_ITERATIONS)]
    max_iterations: u64,

    /// The script, or its path with `--file`. Starts the prompt when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = InterpreterConfig::default().with_max_call_depth(args.max_depth)
                                             .with_max_loop_iterations(args.max_iterations);

    let Some(contents) = args.contents else {
        return repl(config);
    };

    let (file_name, script, config) = if args.file {
        let script = fs::read_to_string(&contents).unwrap_or_else(|_| {
                         eprintln!("Failed to read the input file '{contents}'. Perhaps this file \
                                    does not exist?");
                         std::process::exit(1);
                     });
        let base_dir = Path::new(&contents).parent()
                                           .filter(|dir| !dir.as_os_str().is_empty())
                                           .unwrap_or_else(|| Path::new("."))
                                           .to_path_buf();
        (contents, script, config.with_base_dir(base_dir))
    } else {
        ("<stdin>".to_string(), contents, config)
    };

    let mut interpreter = Interpreter::new(config);
    match interpreter.run(&file_name, &script) {
        Ok(result) => {
            if args.pipe_mode
               && let Some(value) = last_printable(result)
            {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{}", e.report());
            ExitCode::FAILURE
        },
    }
}

/// The value pipe mode prints: the last non-null statement value.
fn last_printable(result: Value) -> Option<Value> {
    match result {
        Value::List(values) => values.into_iter().rev().find(|v| *v != Value::Null),
        Value::Null => None,
        other => Some(other),
    }
}

/// Reads and runs one line at a time until end of input.
///
/// Every line runs in the same global context. A line holding a single
/// statement prints that statement's value, a line holding several prints
/// the list of values. Errors are reported and the prompt continues.
fn repl(config: InterpreterConfig) -> ExitCode {
    let mut interpreter = Interpreter::new(config);
    let stdin = io::stdin();

    loop {
        print!("sympl > ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {},
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return ExitCode::FAILURE;
            },
        }
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.run("<stdin>", line.trim_end()) {
            Ok(Value::List(mut values)) if values.len() == 1 => {
                if let Some(value) = values.pop()
                   && value != Value::Null
                {
                    println!("{}", value.repr());
                }
            },
            Ok(result) => println!("{}", result.repr()),
            Err(e) => eprintln!("{}", e.report()),
        }
    }
}
