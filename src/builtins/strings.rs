//! String-specific wrappers: str-length, str-concat, str-upper, str-lower
//!
//! Thin string-specific counterparts to what the formatter and `str`
//! already imply; the language has no broader string-manipulation library.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE, ARITY_ONE};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn as_text<'a>(function: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value
        .as_text()
        .ok_or_else(|| EvalError::type_error(function, "string", value))
}

/// Returns the length of a string, in characters.
pub fn builtin_str_length(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("str-length", ARITY_ONE, args.len()));
    }
    Ok(Value::Number(
        as_text("str-length", &args[0])?.chars().count() as f64
    ))
}

/// Concatenates one or more strings.
pub fn builtin_str_concat(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(
            "str-concat",
            ARITY_AT_LEAST_ONE,
            args.len(),
        ));
    }
    let mut result = String::new();
    for arg in args {
        result.push_str(as_text("str-concat", arg)?);
    }
    Ok(Value::String(result))
}

/// Converts a string to uppercase.
pub fn builtin_str_upper(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("str-upper", ARITY_ONE, args.len()));
    }
    Ok(Value::String(as_text("str-upper", &args[0])?.to_uppercase()))
}

/// Converts a string to lowercase.
pub fn builtin_str_lower(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("str-lower", ARITY_ONE, args.len()));
    }
    Ok(Value::String(as_text("str-lower", &args[0])?.to_lowercase()))
}

/// Register all string builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "str-length".to_string(),
        Value::Primitive(Primitive {
            name: "str-length",
            func: builtin_str_length,
        }),
    );
    env.define(
        "str-concat".to_string(),
        Value::Primitive(Primitive {
            name: "str-concat",
            func: builtin_str_concat,
        }),
    );
    env.define(
        "str-upper".to_string(),
        Value::Primitive(Primitive {
            name: "str-upper",
            func: builtin_str_upper,
        }),
    );
    env.define(
        "str-lower".to_string(),
        Value::Primitive(Primitive {
            name: "str-lower",
            func: builtin_str_lower,
        }),
    );

    crate::help::register_help(crate::help::HelpEntry {
        name: "str-length".to_string(),
        signature: "(str-length s)".to_string(),
        description: "Returns the length of a string, in characters.".to_string(),
        examples: vec!["(str-length \"hello\") => 5".to_string()],
        related: vec!["length".to_string(), "str-concat".to_string()],
        category: "String operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "str-concat".to_string(),
        signature: "(str-concat s1 s2 ...)".to_string(),
        description: "Concatenates one or more strings.".to_string(),
        examples: vec!["(str-concat \"foo\" \"bar\") => \"foobar\"".to_string()],
        related: vec!["str".to_string(), "str-length".to_string()],
        category: "String operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "str-upper".to_string(),
        signature: "(str-upper s)".to_string(),
        description: "Converts a string to uppercase.".to_string(),
        examples: vec!["(str-upper \"hi\") => \"HI\"".to_string()],
        related: vec!["str-lower".to_string()],
        category: "String operations".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "str-lower".to_string(),
        signature: "(str-lower s)".to_string(),
        description: "Converts a string to lowercase.".to_string(),
        examples: vec!["(str-lower \"HI\") => \"hi\"".to_string()],
        related: vec!["str-upper".to_string()],
        category: "String operations".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn str_length_counts_chars_not_bytes() {
        let i = interp();
        let result = builtin_str_length(&[Value::String("héllo".to_string())], &i).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 5.0));
    }

    #[test]
    fn str_concat_requires_at_least_one_argument() {
        let i = interp();
        assert!(builtin_str_concat(&[], &i).is_err());
    }

    #[test]
    fn str_upper_and_lower_round_trip() {
        let i = interp();
        assert!(matches!(
            builtin_str_upper(&[Value::String("hi".to_string())], &i),
            Ok(Value::String(s)) if s == "HI"
        ));
        assert!(matches!(
            builtin_str_lower(&[Value::String("HI".to_string())], &i),
            Ok(Value::String(s)) if s == "hi"
        ));
    }
}
