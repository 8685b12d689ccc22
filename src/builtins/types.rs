//! Type predicates and introspection: list?, vector?, map?, fn?, nil?,
//! number?, string?, true?, false?, type-of
//!
//! All predicates return a boolean; `type-of` returns one of the strings
//! named by `Value::type_name`.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn one_arg(function: &str, args: &[Value]) -> Result<&Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(function, ARITY_ONE, args.len()));
    }
    Ok(&args[0])
}

/// Tests if val is a list.
pub fn builtin_list_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("list?", args)?,
        Value::List(_)
    )))
}

/// Tests if val is a vector.
pub fn builtin_vector_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("vector?", args)?,
        Value::Vector(_)
    )))
}

/// Tests if val is a map.
pub fn builtin_map_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg("map?", args)?, Value::Map(_))))
}

/// Tests if val is callable (a closure or a primitive).
pub fn builtin_fn_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(one_arg("fn?", args)?.is_callable()))
}

/// Tests if val is nil.
pub fn builtin_nil_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(one_arg("nil?", args)?, Value::Nil)))
}

/// Tests if val is a number.
pub fn builtin_number_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("number?", args)?,
        Value::Number(_)
    )))
}

/// Tests if val is a string.
pub fn builtin_string_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("string?", args)?,
        Value::String(_) | Value::Symbol(_)
    )))
}

/// Tests if val is the boolean `true`.
pub fn builtin_true_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("true?", args)?,
        Value::Bool(true)
    )))
}

/// Tests if val is the boolean `false`.
pub fn builtin_false_p(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::Bool(matches!(
        one_arg("false?", args)?,
        Value::Bool(false)
    )))
}

/// Returns the name of val's type as a string.
pub fn builtin_type_of(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    Ok(Value::String(one_arg("type-of", args)?.type_name()))
}

/// Register all type predicate builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "list?".to_string(),
        Value::Primitive(Primitive {
            name: "list?",
            func: builtin_list_p,
        }),
    );
    env.define(
        "vector?".to_string(),
        Value::Primitive(Primitive {
            name: "vector?",
            func: builtin_vector_p,
        }),
    );
    env.define(
        "map?".to_string(),
        Value::Primitive(Primitive {
            name: "map?",
            func: builtin_map_p,
        }),
    );
    env.define(
        "fn?".to_string(),
        Value::Primitive(Primitive {
            name: "fn?",
            func: builtin_fn_p,
        }),
    );
    env.define(
        "nil?".to_string(),
        Value::Primitive(Primitive {
            name: "nil?",
            func: builtin_nil_p,
        }),
    );
    env.define(
        "number?".to_string(),
        Value::Primitive(Primitive {
            name: "number?",
            func: builtin_number_p,
        }),
    );
    env.define(
        "string?".to_string(),
        Value::Primitive(Primitive {
            name: "string?",
            func: builtin_string_p,
        }),
    );
    env.define(
        "true?".to_string(),
        Value::Primitive(Primitive {
            name: "true?",
            func: builtin_true_p,
        }),
    );
    env.define(
        "false?".to_string(),
        Value::Primitive(Primitive {
            name: "false?",
            func: builtin_false_p,
        }),
    );
    env.define(
        "type-of".to_string(),
        Value::Primitive(Primitive {
            name: "type-of",
            func: builtin_type_of,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "number?".to_string(),
        signature: "(number? val)".to_string(),
        description: "Tests if val is a number.".to_string(),
        examples: vec!["(number? 42) => true".to_string(), "(number? \"42\") => false".to_string()],
        related: vec!["string?".to_string(), "type-of".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "string?".to_string(),
        signature: "(string? val)".to_string(),
        description: "Tests if val is a string.".to_string(),
        examples: vec!["(string? \"hello\") => true".to_string(), "(string? 42) => false".to_string()],
        related: vec!["number?".to_string(), "type-of".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "list?".to_string(),
        signature: "(list? val)".to_string(),
        description: "Tests if val is a list.".to_string(),
        examples: vec!["(list? (list 1 2)) => true".to_string(), "(list? 42) => false".to_string()],
        related: vec!["vector?".to_string(), "map?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "vector?".to_string(),
        signature: "(vector? val)".to_string(),
        description: "Tests if val is a vector.".to_string(),
        examples: vec!["(vector? [1 2]) => true".to_string(), "(vector? (list 1 2)) => false".to_string()],
        related: vec!["list?".to_string(), "map?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "map?".to_string(),
        signature: "(map? val)".to_string(),
        description: "Tests if val is a map.".to_string(),
        examples: vec!["(map? {:x 1}) => true".to_string(), "(map? 42) => false".to_string()],
        related: vec!["list?".to_string(), "vector?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "fn?".to_string(),
        signature: "(fn? val)".to_string(),
        description: "Tests if val is callable: a closure or a primitive.".to_string(),
        examples: vec!["(fn? car) => true".to_string(), "(fn? 1) => false".to_string()],
        related: vec!["type-of".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "nil?".to_string(),
        signature: "(nil? val)".to_string(),
        description: "Tests if val is nil.".to_string(),
        examples: vec!["(nil? nil) => true".to_string(), "(nil? 0) => false".to_string()],
        related: vec!["empty?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "true?".to_string(),
        signature: "(true? val)".to_string(),
        description: "Tests if val is the boolean true.".to_string(),
        examples: vec!["(true? true) => true".to_string(), "(true? 1) => false".to_string()],
        related: vec!["false?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "false?".to_string(),
        signature: "(false? val)".to_string(),
        description: "Tests if val is the boolean false.".to_string(),
        examples: vec!["(false? false) => true".to_string(), "(false? nil) => false".to_string()],
        related: vec!["true?".to_string()],
        category: "Type predicates".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "type-of".to_string(),
        signature: "(type-of val)".to_string(),
        description: "Returns the name of val's type as a string: nil, number, string, boolean, list, vector, map, or fn.".to_string(),
        examples: vec![
            "(type-of 1) => \"number\"".to_string(),
            "(type-of \"x\") => \"string\"".to_string(),
            "(type-of nil) => \"nil\"".to_string(),
        ],
        related: vec!["number?".to_string(), "string?".to_string()],
        category: "Type predicates".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn type_of_names_every_case() {
        let i = interp();
        match builtin_type_of(&[Value::Nil], &i).unwrap() {
            Value::String(s) => assert_eq!(s, "nil"),
            _ => panic!("expected string"),
        }
        match builtin_type_of(&[Value::Number(1.0)], &i).unwrap() {
            Value::String(s) => assert_eq!(s, "number"),
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn fn_p_accepts_primitives_and_closures() {
        let i = interp();
        let primitive = Value::Primitive(Primitive {
            name: "noop",
            func: |_args, _i| Ok(Value::Nil),
        });
        assert!(matches!(builtin_fn_p(&[primitive], &i), Ok(Value::Bool(true))));
        assert!(matches!(
            builtin_fn_p(&[Value::Number(1.0)], &i),
            Ok(Value::Bool(false))
        ));
    }
}
