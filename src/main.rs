mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod expr;
mod help;
mod highlighter;
mod host;
mod lexer;
mod macros;
mod parser;
mod value;

use clap::Parser;
use config::{WELCOME_FOOTER, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use eval::Interpreter;
use highlighter::LispHelper;
use host::run_with_interpreter;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// A tree-walking interpreter for a small Lisp-family language.
#[derive(Parser, Debug)]
#[command(name = "lisp-core")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking Lisp interpreter with hygienic macros")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if let Some(script_path) = args.script {
        run_script(&script_path)?;
        return Ok(());
    }

    run_repl()
}

/// Executes a script file to completion, printing each non-nil result and
/// any errors as they occur (REPL-like per-form behavior, not abort-on-first).
fn run_script(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;

    let interp = Interpreter::new();
    builtins::register_builtins(interp.root.clone());

    for line in run_with_interpreter(&contents, &interp) {
        match line.kind {
            host::OutputKind::Value => println!("{}", line.text),
            host::OutputKind::Error => eprintln!("Error: {}", line.text),
            host::OutputKind::Info | host::OutputKind::Time => {}
        }
    }

    Ok(())
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let interp = Interpreter::new();
    builtins::register_builtins(interp.root.clone());

    let config = Config::builder().auto_add_history(true).build();
    let mut rl =
        Editor::with_config(config).map_err(|e| format!("failed to initialize REPL: {}", e))?;
    rl.set_helper(Some(LispHelper::new()));

    let history_file = ".lisp_history";
    let _ = rl.load_history(history_file);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);
    println!("{}", WELCOME_FOOTER);

    loop {
        let readline = rl.readline("lisp> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match line.trim() {
                    "(quit)" | "(exit)" => {
                        println!("Goodbye!");
                        break;
                    }
                    "(clear)" => {
                        print!("\x1B[2J\x1B[H");
                        continue;
                    }
                    _ => {}
                }

                for out in run_with_interpreter(&line, &interp) {
                    match out.kind {
                        host::OutputKind::Value => {
                            println!("=> {}", LispHelper::highlight_output(&out.text))
                        }
                        host::OutputKind::Error => eprintln!("Error: {}", out.text),
                        host::OutputKind::Info | host::OutputKind::Time => {}
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_accept_an_optional_script_path() {
        let args = CliArgs {
            script: Some(PathBuf::from("example.lisp")),
        };
        assert_eq!(args.script, Some(PathBuf::from("example.lisp")));
    }

    #[test]
    fn cli_args_default_to_repl_mode() {
        let args = CliArgs { script: None };
        assert!(args.script.is_none());
    }
}
