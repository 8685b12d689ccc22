//! Logic operations: and, or, not
//!
//! Short-circuiting boolean connectives, distinct from the generic
//! truthiness `if` already applies to every value.
//!
//! - `and`: returns the last argument if all are truthy, else the first falsy one
//! - `or`: returns the first truthy argument, else the last (falsy) one
//! - `not`: negates truthiness

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// Returns the last argument if every argument is truthy; otherwise returns
/// the first falsy one. `(and)` is `true`.
pub fn builtin_and(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let mut last = Value::Bool(true);
    for arg in args {
        if !arg.is_truthy() {
            return Ok(arg.clone());
        }
        last = arg.clone();
    }
    Ok(last)
}

/// Returns the first truthy argument; otherwise returns the last argument.
/// `(or)` is `false`.
pub fn builtin_or(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let mut last = Value::Bool(false);
    for arg in args {
        if arg.is_truthy() {
            return Ok(arg.clone());
        }
        last = arg.clone();
    }
    Ok(last)
}

/// Logical NOT: `true` if the argument is falsy (`false` or `nil`), else `false`.
pub fn builtin_not(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("not", ARITY_ONE, args.len()));
    }
    Ok(Value::Bool(!args[0].is_truthy()))
}

/// Register all logic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "and".to_string(),
        Value::Primitive(Primitive {
            name: "and",
            func: builtin_and,
        }),
    );
    env.define(
        "or".to_string(),
        Value::Primitive(Primitive {
            name: "or",
            func: builtin_or,
        }),
    );
    env.define(
        "not".to_string(),
        Value::Primitive(Primitive {
            name: "not",
            func: builtin_not,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "and".to_string(),
        signature: "(and val1 val2 ...)".to_string(),
        description: "Returns the last argument if all are truthy, otherwise the first falsy one.".to_string(),
        examples: vec![
            "(and true true true) => true".to_string(),
            "(and true false true) => false".to_string(),
            "(and 1 2 3) => 3".to_string(),
        ],
        related: vec!["or".to_string(), "not".to_string()],
        category: "Logic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "or".to_string(),
        signature: "(or val1 val2 ...)".to_string(),
        description: "Returns the first truthy argument, otherwise the last one.".to_string(),
        examples: vec![
            "(or false false true) => true".to_string(),
            "(or false false) => false".to_string(),
            "(or nil 2) => 2".to_string(),
        ],
        related: vec!["and".to_string(), "not".to_string()],
        category: "Logic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "not".to_string(),
        signature: "(not val)".to_string(),
        description: "Returns true if val is falsy (false or nil), otherwise false.".to_string(),
        examples: vec![
            "(not false) => true".to_string(),
            "(not true) => false".to_string(),
            "(not nil) => true".to_string(),
            "(not 5) => false".to_string(),
        ],
        related: vec!["and".to_string(), "or".to_string()],
        category: "Logic".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn and_short_circuits_on_first_falsy() {
        let i = interp();
        let result = builtin_and(&[Value::Bool(true), Value::Nil, Value::Number(1.0)], &i).unwrap();
        assert!(matches!(result, Value::Nil));
    }

    #[test]
    fn or_returns_first_truthy() {
        let i = interp();
        let result = builtin_or(&[Value::Bool(false), Value::Number(2.0)], &i).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 2.0));
    }

    #[test]
    fn not_negates_truthiness() {
        let i = interp();
        assert!(matches!(builtin_not(&[Value::Nil], &i), Ok(Value::Bool(true))));
    }
}
