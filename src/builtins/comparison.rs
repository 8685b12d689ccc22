//! Comparison operations: =, <, >, <=, >=
//!
//! Relational operators for comparing numeric and symbolic values.
//!
//! - `=`: Structural equality over scalars and collections
//! - `<`: Less than
//! - `>`: Greater than
//! - `<=`: Less than or equal
//! - `>=`: Greater than or equal

use crate::env::Environment;
use crate::error::{EvalError, ARITY_TWO};
use crate::eval::Interpreter;
use crate::value::{structural_eq, Primitive, Value};
use std::rc::Rc;

fn as_number(function: &str, value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "number", other)),
    }
}

/// Tests if two values are structurally equal.
pub fn builtin_eq(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("=", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(structural_eq(&args[0], &args[1])))
}

/// Tests if the first argument is strictly less than the second.
pub fn builtin_lt(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("<", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(
        as_number("<", &args[0])? < as_number("<", &args[1])?,
    ))
}

/// Tests if the first argument is strictly greater than the second.
pub fn builtin_gt(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(">", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(
        as_number(">", &args[0])? > as_number(">", &args[1])?,
    ))
}

/// Tests if the first argument is less than or equal to the second.
pub fn builtin_le(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("<=", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(
        as_number("<=", &args[0])? <= as_number("<=", &args[1])?,
    ))
}

/// Tests if the first argument is greater than or equal to the second.
pub fn builtin_ge(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(">=", ARITY_TWO, args.len()));
    }
    Ok(Value::Bool(
        as_number(">=", &args[0])? >= as_number(">=", &args[1])?,
    ))
}

/// Register all comparison builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "=".to_string(),
        Value::Primitive(Primitive {
            name: "=",
            func: builtin_eq,
        }),
    );
    env.define(
        "<".to_string(),
        Value::Primitive(Primitive {
            name: "<",
            func: builtin_lt,
        }),
    );
    env.define(
        ">".to_string(),
        Value::Primitive(Primitive {
            name: ">",
            func: builtin_gt,
        }),
    );
    env.define(
        "<=".to_string(),
        Value::Primitive(Primitive {
            name: "<=",
            func: builtin_le,
        }),
    );
    env.define(
        ">=".to_string(),
        Value::Primitive(Primitive {
            name: ">=",
            func: builtin_ge,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "=".to_string(),
        signature: "(= val1 val2)".to_string(),
        description: "Tests if two values are structurally equal. Works with numbers, strings, and collections.".to_string(),
        examples: vec![
            "(= 5 5) => true".to_string(),
            "(= 5 6) => false".to_string(),
            "(= \"hello\" \"hello\") => true".to_string(),
        ],
        related: vec!["<".to_string(), ">".to_string(), "<=".to_string(), ">=".to_string()],
        category: "Comparison".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "<".to_string(),
        signature: "(< num1 num2)".to_string(),
        description: "Tests if the first argument is strictly less than the second.".to_string(),
        examples: vec!["(< 1 2) => true".to_string(), "(< 1 1) => false".to_string()],
        related: vec![">".to_string(), "<=".to_string(), ">=".to_string(), "=".to_string()],
        category: "Comparison".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: ">".to_string(),
        signature: "(> num1 num2)".to_string(),
        description: "Tests if the first argument is strictly greater than the second.".to_string(),
        examples: vec!["(> 3 2) => true".to_string(), "(> 3 3) => false".to_string()],
        related: vec!["<".to_string(), "<=".to_string(), ">=".to_string(), "=".to_string()],
        category: "Comparison".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "<=".to_string(),
        signature: "(<= num1 num2)".to_string(),
        description: "Tests if the first argument is less than or equal to the second.".to_string(),
        examples: vec!["(<= 2 2) => true".to_string(), "(<= 5 4) => false".to_string()],
        related: vec!["<".to_string(), ">".to_string(), ">=".to_string(), "=".to_string()],
        category: "Comparison".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: ">=".to_string(),
        signature: "(>= num1 num2)".to_string(),
        description: "Tests if the first argument is greater than or equal to the second.".to_string(),
        examples: vec!["(>= 2 2) => true".to_string(), "(>= 1 2) => false".to_string()],
        related: vec!["<".to_string(), ">".to_string(), "<=".to_string(), "=".to_string()],
        category: "Comparison".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn eq_is_structural() {
        let i = interp();
        let a = Value::list(vec![Value::Number(1.0)]);
        let b = Value::vector(vec![Value::Number(1.0)]);
        assert!(matches!(builtin_eq(&[a, b], &i), Ok(Value::Bool(true))));
    }

    #[test]
    fn ordering_requires_numbers() {
        let i = interp();
        assert!(builtin_lt(&[Value::String("a".to_string()), Value::Number(1.0)], &i).is_err());
    }
}
