//! List operations: cons, car, cdr, list, first, rest, reverse, empty?
//!
//! `first`/`rest` are list/vector-polymorphic aliases of `car`/`cdr`.
//! `empty?` additionally accepts strings and maps.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE, ARITY_TWO};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// Constructs a new list by prepending elem to list.
pub fn builtin_cons(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cons", ARITY_TWO, args.len()));
    }

    let mut items = vec![args[0].clone()];
    match &args[1] {
        Value::List(rest) => items.extend(rest.iter().cloned()),
        other => return Err(EvalError::type_error("cons", "list", other)),
    }
    Ok(Value::list(items))
}

/// Returns the first element of a non-empty list.
pub fn builtin_car(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("car", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(items[0].clone()),
        Value::List(_) => Err(EvalError::runtime_error("car of empty list")),
        other => Err(EvalError::type_error("car", "list", other)),
    }
}

/// Returns all elements of a non-empty list except the first. `cdr` of a
/// single-element list is the empty list, not `nil`.
pub fn builtin_cdr(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("cdr", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(Value::list(items[1..].to_vec())),
        Value::List(_) => Err(EvalError::runtime_error("cdr of empty list")),
        other => Err(EvalError::type_error("cdr", "list", other)),
    }
}

/// Creates a new list containing the given elements in order.
pub fn builtin_list(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::list(args.to_vec()))
}

/// List/vector-polymorphic first element.
pub fn builtin_first(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("first", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) | Value::Vector(items) => {
            Ok(items.first().cloned().unwrap_or(Value::Nil))
        }
        other => Err(EvalError::type_error("first", "list or vector", other)),
    }
}

/// List/vector-polymorphic tail, preserving the input's shape.
pub fn builtin_rest(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("rest", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) => Ok(Value::list(items.iter().skip(1).cloned().collect())),
        Value::Vector(items) => Ok(Value::vector(items.iter().skip(1).cloned().collect())),
        other => Err(EvalError::type_error("rest", "list or vector", other)),
    }
}

/// Reverses a list or vector, preserving its shape.
pub fn builtin_reverse(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("reverse", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::List(items) => Ok(Value::list(items.iter().rev().cloned().collect())),
        Value::Vector(items) => Ok(Value::vector(items.iter().rev().cloned().collect())),
        other => Err(EvalError::type_error("reverse", "list or vector", other)),
    }
}

/// Tests if a sequence (list, vector, string, or map) is empty.
pub fn builtin_empty_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("empty?", ARITY_ONE, args.len()));
    }
    let empty = match &args[0] {
        Value::List(items) | Value::Vector(items) => items.is_empty(),
        Value::Map(pairs) => pairs.is_empty(),
        Value::String(s) | Value::Symbol(s) => s.is_empty(),
        Value::Nil => true,
        other => return Err(EvalError::type_error("empty?", "sequence", other)),
    };
    Ok(Value::Bool(empty))
}

/// Register all list builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "cons".to_string(),
        Value::Primitive(Primitive {
            name: "cons",
            func: builtin_cons,
        }),
    );
    env.define(
        "car".to_string(),
        Value::Primitive(Primitive {
            name: "car",
            func: builtin_car,
        }),
    );
    env.define(
        "cdr".to_string(),
        Value::Primitive(Primitive {
            name: "cdr",
            func: builtin_cdr,
        }),
    );
    env.define(
        "list".to_string(),
        Value::Primitive(Primitive {
            name: "list",
            func: builtin_list,
        }),
    );
    env.define(
        "first".to_string(),
        Value::Primitive(Primitive {
            name: "first",
            func: builtin_first,
        }),
    );
    env.define(
        "rest".to_string(),
        Value::Primitive(Primitive {
            name: "rest",
            func: builtin_rest,
        }),
    );
    env.define(
        "reverse".to_string(),
        Value::Primitive(Primitive {
            name: "reverse",
            func: builtin_reverse,
        }),
    );
    env.define(
        "empty?".to_string(),
        Value::Primitive(Primitive {
            name: "empty?",
            func: builtin_empty_p,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "cons".to_string(),
        signature: "(cons elem list)".to_string(),
        description: "Constructs a new list by prepending elem to list.".to_string(),
        examples: vec![
            "(cons 1 (list 2 3)) => (1 2 3)".to_string(),
            "(cons 1 (list)) => (1)".to_string(),
        ],
        related: vec!["car".to_string(), "cdr".to_string(), "list".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "car".to_string(),
        signature: "(car list)".to_string(),
        description: "Returns the first element of a list. Errors on empty list or non-list.".to_string(),
        examples: vec!["(car (list 1 2 3)) => 1".to_string()],
        related: vec!["cdr".to_string(), "cons".to_string(), "first".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "cdr".to_string(),
        signature: "(cdr list)".to_string(),
        description: "Returns all elements except the first. The cdr of a single-element list is the empty list.".to_string(),
        examples: vec!["(cdr (list 1 2 3)) => (2 3)".to_string(), "(cdr (list 1)) => ()".to_string()],
        related: vec!["car".to_string(), "cons".to_string(), "rest".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "list".to_string(),
        signature: "(list elem1 elem2 ...)".to_string(),
        description: "Creates a new list containing the given elements in order.".to_string(),
        examples: vec!["(list 1 2 3) => (1 2 3)".to_string(), "(list) => ()".to_string()],
        related: vec!["cons".to_string(), "car".to_string(), "cdr".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "first".to_string(),
        signature: "(first seq)".to_string(),
        description: "Returns the first element of a list or vector, or nil if empty.".to_string(),
        examples: vec!["(first (list 1 2)) => 1".to_string(), "(first []) => nil".to_string()],
        related: vec!["car".to_string(), "rest".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "rest".to_string(),
        signature: "(rest seq)".to_string(),
        description: "Returns every element but the first, preserving list/vector shape.".to_string(),
        examples: vec!["(rest [1 2 3]) => [2 3]".to_string()],
        related: vec!["cdr".to_string(), "first".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "reverse".to_string(),
        signature: "(reverse seq)".to_string(),
        description: "Reverses a list or vector, preserving its shape.".to_string(),
        examples: vec!["(reverse (list 1 2 3)) => (3 2 1)".to_string()],
        related: vec!["first".to_string(), "rest".to_string()],
        category: "List operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "empty?".to_string(),
        signature: "(empty? seq)".to_string(),
        description: "Tests if a list, vector, string, or map is empty.".to_string(),
        examples: vec!["(empty? (list)) => true".to_string(), "(empty? (list 1)) => false".to_string()],
        related: vec!["nil?".to_string()],
        category: "List operations".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn car_of_empty_list_is_an_error() {
        let i = interp();
        assert!(builtin_car(&[Value::list(vec![])], &i).is_err());
    }

    #[test]
    fn cdr_of_singleton_is_empty_list_not_nil() {
        let i = interp();
        let result = builtin_cdr(&[Value::list(vec![Value::Number(1.0)])], &i).unwrap();
        match result {
            Value::List(items) => assert!(items.is_empty()),
            other => panic!("expected empty list, got {:?}", other),
        }
    }

    #[test]
    fn rest_preserves_vector_shape() {
        let i = interp();
        let result =
            builtin_rest(&[Value::vector(vec![Value::Number(1.0), Value::Number(2.0)])], &i)
                .unwrap();
        assert!(matches!(result, Value::Vector(_)));
    }

    #[test]
    fn empty_p_accepts_every_sequence_kind() {
        let i = interp();
        assert!(matches!(builtin_empty_p(&[Value::list(vec![])], &i), Ok(Value::Bool(true))));
        assert!(matches!(builtin_empty_p(&[Value::map(vec![])], &i), Ok(Value::Bool(true))));
        assert!(matches!(
            builtin_empty_p(&[Value::String(String::new())], &i),
            Ok(Value::Bool(true))
        ));
    }
}
