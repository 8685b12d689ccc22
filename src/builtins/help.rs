//! The `help` builtin: prints quick reference or per-function documentation
//! through the host's print sink.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ZERO_OR_ONE};
use crate::eval::Interpreter;
use crate::host::host_print;
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// With no arguments, prints the quick reference of every registered
/// builtin. With one symbol argument, prints that builtin's detailed help
/// entry. Returns nil either way.
pub fn builtin_help(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    match args.len() {
        0 => {
            host_print(&crate::help::format_quick_reference());
            Ok(Value::Nil)
        }
        1 => match &args[0] {
            Value::Symbol(name) => match crate::help::get_help(name) {
                Some(entry) => {
                    host_print(&crate::help::format_help_entry(&entry));
                    Ok(Value::Nil)
                }
                None => Err(EvalError::runtime_error(format!(
                    "no help found for '{}'",
                    name
                ))),
            },
            other => Err(EvalError::type_error("help", "symbol", other)),
        },
        actual => Err(EvalError::arity_error("help", ARITY_ZERO_OR_ONE, actual)),
    }
}

/// Register the help builtin in the environment.
pub fn register(env: &Rc<Environment>) {
    env.define(
        "help".to_string(),
        Value::Primitive(Primitive {
            name: "help",
            func: builtin_help,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "help".to_string(),
        signature: "(help) or (help 'name)".to_string(),
        description: "Shows the quick reference, or detailed help for one built-in.".to_string(),
        examples: vec![
            "(help) => prints the quick reference".to_string(),
            "(help 'cons) => prints detailed help for cons".to_string(),
        ],
        related: vec![],
        category: "Help".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_with_no_args_returns_nil() {
        let i = Interpreter::new();
        assert!(matches!(builtin_help(&[], &i), Ok(Value::Nil)));
    }

    #[test]
    fn help_with_unknown_symbol_errors() {
        let i = Interpreter::new();
        let result = builtin_help(&[Value::Symbol("not-a-real-fn".to_string())], &i);
        assert!(result.is_err());
    }

    #[test]
    fn help_with_non_symbol_is_a_type_error() {
        let i = Interpreter::new();
        let result = builtin_help(&[Value::Number(1.0)], &i);
        assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
    }
}
