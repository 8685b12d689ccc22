//! I/O and text conversion: print, str
//!
//! - `print`: writes each argument through the host's print sink, space
//!   separated, and returns nil
//! - `str`: concatenates the textual form of each argument into one string

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Interpreter;
use crate::host::{format_value, host_print};
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// Prints values through the host's print sink, separated by a single
/// space. Returns nil.
pub fn builtin_print(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let text = args
        .iter()
        .map(|v| format_value(v, true))
        .collect::<Vec<_>>()
        .join(" ");
    host_print(&text);
    Ok(Value::Nil)
}

/// Concatenates the textual form of each argument into one string.
pub fn builtin_str(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let text = args.iter().map(|v| format_value(v, true)).collect::<String>();
    Ok(Value::String(text))
}

/// Register all console I/O builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "print".to_string(),
        Value::Primitive(Primitive {
            name: "print",
            func: builtin_print,
        }),
    );
    env.define(
        "str".to_string(),
        Value::Primitive(Primitive {
            name: "str",
            func: builtin_str,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "print".to_string(),
        signature: "(print val1 val2 ...)".to_string(),
        description: "Prints values through the host's print sink, space separated. Returns nil.".to_string(),
        examples: vec![
            "(print \"hello\") => outputs: hello".to_string(),
            "(print 1 2 3) => outputs: 1 2 3".to_string(),
        ],
        related: vec!["str".to_string()],
        category: "Console I/O".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "str".to_string(),
        signature: "(str val1 val2 ...)".to_string(),
        description: "Concatenates the textual form of each argument into one string.".to_string(),
        examples: vec![
            "(str \"a\" \"b\" 1) => \"ab1\"".to_string(),
            "(str) => \"\"".to_string(),
        ],
        related: vec!["print".to_string()],
        category: "Console I/O".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn str_concatenates_textual_forms() {
        let i = interp();
        let result = builtin_str(
            &[Value::String("a".to_string()), Value::Number(1.0)],
            &i,
        )
        .unwrap();
        match result {
            Value::String(s) => assert_eq!(s, "a1"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn print_returns_nil() {
        let i = interp();
        assert!(matches!(builtin_print(&[], &i), Ok(Value::Nil)));
    }
}
