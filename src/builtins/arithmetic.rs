//! Arithmetic operations: +, -, *, /, %
//!
//! Basic mathematical operations supporting variadic arguments where applicable.
//!
//! - `+`: Sum of all arguments (identity: 0)
//! - `-`: Subtract subsequent args from first, or negate if single arg
//! - `*`: Product of all arguments (identity: 1)
//! - `/`: Divide first by subsequent args, or reciprocal if single arg
//! - `%`: Remainder operation (modulo) - exactly 2 args required

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE, ARITY_TWO};
use crate::eval::Interpreter;
use crate::value::{Primitive, Value};
use std::rc::Rc;

fn as_number(function: &str, value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "number", other)),
    }
}

/// Returns the sum of all arguments.
///
/// # Examples
///
/// ```lisp
/// (+ 1 2 3) => 6
/// (+ 10) => 10
/// (+) => 0
/// ```
///
/// # See Also
///
/// -, *, /
pub fn builtin_add(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let mut sum = 0.0;
    for arg in args {
        sum += as_number("+", arg)?;
    }
    Ok(Value::Number(sum))
}

/// Subtracts subsequent arguments from the first.
///
/// With one argument, returns its negation.
///
/// # Examples
///
/// ```lisp
/// (- 10 3 2) => 5
/// (- 5) => -5
/// ```
///
/// # See Also
///
/// +, *, /
pub fn builtin_sub(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("-", ARITY_AT_LEAST_ONE, args.len()));
    }

    let first = as_number("-", &args[0])?;
    if args.len() == 1 {
        return Ok(Value::Number(-first));
    }

    let mut result = first;
    for arg in &args[1..] {
        result -= as_number("-", arg)?;
    }
    Ok(Value::Number(result))
}

/// Returns the product of all arguments.
///
/// # Examples
///
/// ```lisp
/// (* 2 3 4) => 24
/// (* 5) => 5
/// (*) => 1
/// ```
///
/// # See Also
///
/// +, -, /
pub fn builtin_mul(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    let mut product = 1.0;
    for arg in args {
        product *= as_number("*", arg)?;
    }
    Ok(Value::Number(product))
}

/// Divides the first argument by subsequent arguments.
///
/// With one argument, returns its reciprocal.
///
/// # Examples
///
/// ```lisp
/// (/ 20 4) => 5
/// (/ 100 2 5) => 10
/// ```
///
/// # See Also
///
/// +, -, *, %
pub fn builtin_div(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("/", ARITY_AT_LEAST_ONE, args.len()));
    }

    let first = as_number("/", &args[0])?;
    if args.len() == 1 {
        if first == 0.0 {
            return Err(EvalError::runtime_error("division by zero"));
        }
        return Ok(Value::Number(1.0 / first));
    }

    let mut result = first;
    for arg in &args[1..] {
        let divisor = as_number("/", arg)?;
        if divisor == 0.0 {
            return Err(EvalError::runtime_error("division by zero"));
        }
        result /= divisor;
    }
    Ok(Value::Number(result))
}

/// Returns the remainder when num1 is divided by num2. Sign follows Rust's
/// `%` operator (sign of the dividend), not Euclidean remainder.
///
/// # Examples
///
/// ```lisp
/// (% 17 5) => 2
/// (% 10 3) => 1
/// ```
///
/// # See Also
///
/// /
pub fn builtin_mod(args: &[Value], _interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("%", ARITY_TWO, args.len()));
    }

    let a = as_number("%", &args[0])?;
    let b = as_number("%", &args[1])?;
    if b == 0.0 {
        return Err(EvalError::runtime_error("modulo by zero"));
    }

    Ok(Value::Number(a % b))
}

/// Register all arithmetic builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "+".to_string(),
        Value::Primitive(Primitive {
            name: "+",
            func: builtin_add,
        }),
    );
    env.define(
        "-".to_string(),
        Value::Primitive(Primitive {
            name: "-",
            func: builtin_sub,
        }),
    );
    env.define(
        "*".to_string(),
        Value::Primitive(Primitive {
            name: "*",
            func: builtin_mul,
        }),
    );
    env.define(
        "/".to_string(),
        Value::Primitive(Primitive {
            name: "/",
            func: builtin_div,
        }),
    );
    env.define(
        "%".to_string(),
        Value::Primitive(Primitive {
            name: "%",
            func: builtin_mod,
        }),
    );

    // Register help entries
    crate::help::register_help(crate::help::HelpEntry {
        name: "+".to_string(),
        signature: "(+ ...)".to_string(),
        description: "Returns the sum of all arguments.".to_string(),
        examples: vec![
            "(+ 1 2 3) => 6".to_string(),
            "(+ 10) => 10".to_string(),
            "(+) => 0".to_string(),
        ],
        related: vec!["-".to_string(), "*".to_string(), "/".to_string()],
        category: "Arithmetic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "-".to_string(),
        signature: "(- ...)".to_string(),
        description: "Subtracts subsequent arguments from the first. With one argument, returns its negation.".to_string(),
        examples: vec![
            "(- 10 3 2) => 5".to_string(),
            "(- 5) => -5".to_string(),
        ],
        related: vec!["+".to_string(), "*".to_string(), "/".to_string()],
        category: "Arithmetic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "*".to_string(),
        signature: "(* ...)".to_string(),
        description: "Returns the product of all arguments.".to_string(),
        examples: vec![
            "(* 2 3 4) => 24".to_string(),
            "(* 5) => 5".to_string(),
            "(*) => 1".to_string(),
        ],
        related: vec!["+".to_string(), "-".to_string(), "/".to_string()],
        category: "Arithmetic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "/".to_string(),
        signature: "(/ ...)".to_string(),
        description:
            "Divides the first argument by subsequent arguments. With one argument, returns its reciprocal."
                .to_string(),
        examples: vec!["(/ 20 4) => 5".to_string(), "(/ 100 2 5) => 10".to_string()],
        related: vec![
            "+".to_string(),
            "-".to_string(),
            "*".to_string(),
            "%".to_string(),
        ],
        category: "Arithmetic".to_string(),
    });

    crate::help::register_help(crate::help::HelpEntry {
        name: "%".to_string(),
        signature: "(% ...)".to_string(),
        description: "Returns the remainder when num1 is divided by num2.".to_string(),
        examples: vec!["(% 17 5) => 2".to_string(), "(% 10 3) => 1".to_string()],
        related: vec!["/".to_string()],
        category: "Arithmetic".to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp() -> Interpreter {
        Interpreter::new()
    }

    #[test]
    fn add_sums_and_defaults_to_zero() {
        let i = interp();
        assert!(matches!(builtin_add(&[], &i), Ok(Value::Number(n)) if n == 0.0));
        assert!(matches!(
            builtin_add(&[Value::Number(1.0), Value::Number(2.0)], &i),
            Ok(Value::Number(n)) if n == 3.0
        ));
    }

    #[test]
    fn sub_negates_single_argument() {
        let i = interp();
        assert!(matches!(builtin_sub(&[Value::Number(5.0)], &i), Ok(Value::Number(n)) if n == -5.0));
    }

    #[test]
    fn div_rejects_division_by_zero() {
        let i = interp();
        assert!(builtin_div(&[Value::Number(1.0), Value::Number(0.0)], &i).is_err());
    }

    #[test]
    fn arithmetic_on_non_number_is_a_type_error() {
        let i = interp();
        assert!(builtin_add(&[Value::String("x".to_string())], &i).is_err());
    }
}
