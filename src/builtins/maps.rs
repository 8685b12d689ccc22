//! Map operations: get, assoc, keys, vals
//!
//! Maps are immutable, insertion-ordered key/value pairs keyed by keyword
//! text; `assoc` returns a new map rather than mutating its argument.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_ONE, ARITY_THREE, ARITY_TWO};
use crate::eval::{map_get, Interpreter};
use crate::value::{Primitive, Value};
use std::rc::Rc;

/// A map key may be a keyword or a string, matching the evaluation rule for
/// map literals (§4.3: "each key must evaluate to a string or keyword").
fn as_key<'a>(function: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    match value {
        Value::Keyword(k) | Value::String(k) => Ok(k.as_str()),
        other => Err(EvalError::type_error(function, "string or keyword", other)),
    }
}

/// Looks up a key in a map. A missing key returns nil.
pub fn builtin_get(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("get", ARITY_TWO, args.len()));
    }
    map_get(&args[0], as_key("get", &args[1])?)
}

/// Returns a new map with `key` bound to `value`, leaving the original
/// untouched. Updates in place if the key already exists, otherwise
/// appends, preserving insertion order.
pub fn builtin_assoc(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity_error("assoc", ARITY_THREE, args.len()));
    }
    let pairs = match &args[0] {
        Value::Map(pairs) => pairs,
        other => return Err(EvalError::type_error("assoc", "map", other)),
    };
    let key = as_key("assoc", &args[1])?.to_string();
    let value = args[2].clone();

    let mut updated = pairs.as_ref().clone();
    match updated.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => updated.push((key, value)),
    }
    Ok(Value::map(updated))
}

/// Returns a map's keys as a list of keywords, in insertion order.
pub fn builtin_keys(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("keys", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Map(pairs) => Ok(Value::list(
            pairs.iter().map(|(k, _)| Value::Keyword(k.clone())).collect(),
        )),
        other => Err(EvalError::type_error("keys", "map", other)),
    }
}

/// Returns a map's values as a list, in insertion order.
pub fn builtin_vals(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("vals", ARITY_ONE, args.len()));
    }
    match &args[0] {
        Value::Map(pairs) => Ok(Value::list(pairs.iter().map(|(_, v)| v.clone()).collect())),
        other => Err(EvalError::type_error("vals", "map", other)),
    }
}

/// Register all map builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "get".to_string(),
        Value::Primitive(Primitive {
            name: "get",
            func: builtin_get,
        }),
    );
    env.define(
        "assoc".to_string(),
        Value::Primitive(Primitive {
            name: "assoc",
            func: builtin_assoc,
        }),
    );
    env.define(
        "keys".to_string(),
        Value::Primitive(Primitive {
            name: "keys",
            func: builtin_keys,
        }),
    );
    env.define(
        "vals".to_string(),
        Value::Primitive(Primitive {
            name: "vals",
            func: builtin_vals,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "get".to_string(),
        signature: "(get map key)".to_string(),
        description: "Looks up a keyword key in a map. A missing key returns nil.".to_string(),
        examples: vec![
            "(get {:name \"Alice\"} :name) => \"Alice\"".to_string(),
            "(get {:x 1} :y) => nil".to_string(),
        ],
        related: vec!["assoc".to_string(), "keys".to_string()],
        category: "Map operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "assoc".to_string(),
        signature: "(assoc map key value)".to_string(),
        description: "Returns a new map with key bound to value.".to_string(),
        examples: vec!["(assoc {:x 1} :y 2) => {:x 1 :y 2}".to_string()],
        related: vec!["get".to_string()],
        category: "Map operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "keys".to_string(),
        signature: "(keys map)".to_string(),
        description: "Returns a map's keys as a list of keywords, in insertion order.".to_string(),
        examples: vec!["(keys {:x 1 :y 2}) => (:x :y)".to_string()],
        related: vec!["vals".to_string(), "get".to_string()],
        category: "Map operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "vals".to_string(),
        signature: "(vals map)".to_string(),
        description: "Returns a map's values as a list, in insertion order.".to_string(),
        examples: vec!["(vals {:x 1 :y 2}) => (1 2)".to_string()],
        related: vec!["keys".to_string(), "get".to_string()],
        category: "Map operations".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn get_returns_nil_for_missing_key() {
        let i = interp();
        let m = Value::map(vec![("x".to_string(), Value::Number(1.0))]);
        let result = builtin_get(&[m, Value::Keyword("y".to_string())], &i).unwrap();
        assert!(matches!(result, Value::Nil));
    }

    #[test]
    fn assoc_updates_in_place_preserving_order() {
        let i = interp();
        let m = Value::map(vec![
            ("x".to_string(), Value::Number(1.0)),
            ("y".to_string(), Value::Number(2.0)),
        ]);
        let updated = builtin_assoc(
            &[m, Value::Keyword("x".to_string()), Value::Number(9.0)],
            &i,
        )
        .unwrap();
        match updated {
            Value::Map(pairs) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].0, "x");
                assert!(matches!(pairs[0].1, Value::Number(n) if n == 9.0));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn keys_and_vals_preserve_insertion_order() {
        let i = interp();
        let m = Value::map(vec![
            ("b".to_string(), Value::Number(2.0)),
            ("a".to_string(), Value::Number(1.0)),
        ]);
        match builtin_keys(&[m.clone()], &i).unwrap() {
            Value::List(items) => {
                assert!(matches!(&items[0], Value::Keyword(k) if k == "b"));
            }
            other => panic!("expected list, got {:?}", other),
        }
        match builtin_vals(&[m], &i).unwrap() {
            Value::List(items) => assert!(matches!(items[0], Value::Number(n) if n == 2.0)),
            other => panic!("expected list, got {:?}", other),
        }
    }
}
