// ABOUTME: Error types for evaluation failures in the Lisp interpreter

use crate::value::Value;
use thiserror::Error;

// ===== Arity constant strings (reused across builtins' arity errors) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_THREE: &str = "3";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_ZERO_OR_ONE: &str = "0-1";
pub const ARITY_TWO_OR_THREE: &str = "2-3";

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Type mismatch: function name, expected type, actual type.
    #[error("{function}: expected {expected}, got {actual}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
    },

    /// Arity mismatch: function/closure name. Spec mandates a uniform
    /// "wrong number of arguments" message regardless of expected/actual
    /// counts, so those are kept only for callers that want to log them.
    #[error("wrong number of arguments to {function}")]
    ArityError { function: String, expected: String, actual: usize },

    #[error("{message}")]
    RuntimeError { message: String },

    #[error("macro error: {0}")]
    MacroError(String),

    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    #[error("value is not callable")]
    NotCallable,
}

impl EvalError {
    pub fn type_error(function: &str, expected: &str, actual: &Value) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name(),
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn runtime_error(message: impl Into<String>) -> Self {
        EvalError::RuntimeError {
            message: message.into(),
        }
    }

    pub fn macro_error(message: impl Into<String>) -> Self {
        EvalError::MacroError(message.into())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{line}:{column}: expected {expected}, got {got}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: String,
        got: String,
    },

    #[error("{line}:{column}: unexpected closing delimiter '{delim}'")]
    UnexpectedClosing {
        line: usize,
        column: usize,
        delim: char,
    },

    #[error("{line}:{column}: unterminated collection, reached end of input")]
    UnterminatedCollection { line: usize, column: usize },

    #[error("{line}:{column}: {message}")]
    Other {
        line: usize,
        column: usize,
        message: String,
    },
}
