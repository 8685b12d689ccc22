//! Vector operations: vec, nth, length
//!
//! `length` is shared across every sequence kind (lists, vectors, strings,
//! maps), not just vectors, since nothing else in the primitive library
//! owns a generic notion of "size".

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE, ARITY_TWO};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// Converts a list to a vector.
pub fn builtin_vec(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("vec", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) => Ok(Value::vector(items.as_ref().clone())),
        Value::Vector(items) => Ok(Value::Vector(items.clone())),
        other => Err(EvalError::type_error("vec", "list", other)),
    }
}

/// Returns the element of a list or vector at an index. Out-of-bounds is
/// an error.
pub fn builtin_nth(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("nth", ARITY_TWO, args.len()));
    }
    let items = match &args[0] {
        Value::List(items) | Value::Vector(items) => items,
        other => return Err(EvalError::type_error("nth", "list or vector", other)),
    };
    let index = match &args[1] {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => *n as usize,
        other => return Err(EvalError::type_error("nth", "non-negative integer", other)),
    };
    items
        .get(index)
        .cloned()
        .ok_or_else(|| EvalError::runtime_error(format!("nth: index {} out of bounds", index)))
}

/// Returns the number of elements in a list, vector, string, or map.
pub fn builtin_length(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("length", ARITY_ONE, args.len()));
    }
    let len = match &args[0] {
        Value::List(items) | Value::Vector(items) => items.len(),
        Value::Map(pairs) => pairs.len(),
        Value::String(s) | Value::Symbol(s) => s.chars().count(),
        other => return Err(EvalError::type_error("length", "sequence", other)),
    };
    Ok(Value::Number(len as f64))
}

/// Register all vector builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "vec".to_string(),
        Value::Primitive(Primitive {
            name: "vec",
            func: builtin_vec,
        }),
    );
    env.define(
        "nth".to_string(),
        Value::Primitive(Primitive {
            name: "nth",
            func: builtin_nth,
        }),
    );
    env.define(
        "length".to_string(),
        Value::Primitive(Primitive {
            name: "length",
            func: builtin_length,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "vec".to_string(),
        signature: "(vec list)".to_string(),
        description: "Converts a list to a vector.".to_string(),
        examples: vec!["(vec (list 1 2 3)) => [1 2 3]".to_string()],
        related: vec!["nth".to_string(), "length".to_string()],
        category: "Vector operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "nth".to_string(),
        signature: "(nth seq index)".to_string(),
        description: "Returns the element at index in a list or vector. Errors if out of bounds.".to_string(),
        examples: vec!["(nth [1 2 3] 1) => 2".to_string()],
        related: vec!["vec".to_string(), "first".to_string()],
        category: "Vector operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "length".to_string(),
        signature: "(length seq)".to_string(),
        description: "Returns the number of elements in a list, vector, string, or map.".to_string(),
        examples: vec![
            "(length (list 1 2 3)) => 3".to_string(),
            "(length \"abc\") => 3".to_string(),
        ],
        related: vec!["empty?".to_string()],
        category: "Vector operations".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn nth_errors_out_of_bounds() {
        let i = interp();
        let v = Value::vector(vec![Value::Number(1.0)]);
        assert!(builtin_nth(&[v, Value::Number(5.0)], &i).is_err());
    }

    #[test]
    fn length_works_across_sequence_kinds() {
        let i = interp();
        assert!(matches!(
            builtin_length(&[Value::String("abc".to_string())], &i),
            Ok(Value::Number(n)) if n == 3.0
        ));
        assert!(matches!(
            builtin_length(&[Value::map(vec![("a".to_string(), Value::Nil)])], &i),
            Ok(Value::Number(n)) if n == 1.0
        ));
    }
}
