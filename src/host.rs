// ABOUTME: Host adapter: run(source) -> [OutputLine], the print sink, and the value formatter

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::Interpreter;
use crate::parser::parse_program;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Value,
    Error,
    Info,
    Time,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

impl OutputLine {
    fn value(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Value,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }

    fn time(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Time,
            text: text.into(),
        }
    }
}

thread_local! {
    static PRINT_SINK: RefCell<Option<Box<dyn FnMut(&str)>>> = RefCell::new(None);
}

/// Installs a callback to receive everything `print` writes. Replaces any
/// previously installed sink. Pass `None` to fall back to stdout.
pub fn set_print_sink(sink: Option<Box<dyn FnMut(&str)>>) {
    PRINT_SINK.with(|cell| *cell.borrow_mut() = sink);
}

/// Called by the `print` primitive. Routes through the installed sink, or
/// `println!` to stdout if none has been installed.
pub fn host_print(text: &str) {
    let handled = PRINT_SINK.with(|cell| {
        if let Some(sink) = cell.borrow_mut().as_mut() {
            sink(text);
            true
        } else {
            false
        }
    });
    if !handled {
        println!("{}", text);
    }
}

/// Lexes, parses, and evaluates `source`, returning one `OutputLine` per
/// top-level form plus a final `time` line. A lex/parse failure short
/// circuits to a single `error` line with no evaluation.
pub fn run(source: &str) -> Vec<OutputLine> {
    let interp = Interpreter::new();
    crate::builtins::register_builtins(interp.root.clone());
    run_with_interpreter(source, &interp)
}

/// Same as `run`, but reuses a caller-supplied interpreter so a REPL can
/// carry definitions across calls.
pub fn run_with_interpreter(source: &str, interp: &Interpreter) -> Vec<OutputLine> {
    let started = Instant::now();
    let parsed = parse_program(source);
    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return vec![OutputLine::error(message)];
    }

    let mut lines = Vec::with_capacity(parsed.exprs.len() + 1);
    let mut executed = 0usize;
    for expr in &parsed.exprs {
        executed += 1;
        match interp.eval(expr, interp.root.clone()) {
            Ok(Value::Nil) => {}
            Ok(value) => lines.push(OutputLine::value(format_value(&value, true))),
            Err(err) => lines.push(OutputLine::error(format_error(&err))),
        }
    }

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    lines.push(OutputLine::time(format!(
        "executed {} expression{} in {:.3}ms",
        executed,
        if executed == 1 { "" } else { "s" },
        elapsed_ms
    )));
    lines
}

fn format_error(err: &EvalError) -> String {
    err.to_string()
}

/// The value formatter: used by `print`, `str`, and the top-level `value`
/// output line. `top` selects whether strings print raw (top level) or
/// quoted (nested inside a list/vector/map).
pub fn format_value(value: &Value, top: bool) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::String(s) | Value::Symbol(s) => {
            if top {
                s.clone()
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Nil => "nil".to_string(),
        Value::Keyword(k) => format!(":{}", k),
        Value::List(items) => format!(
            "({})",
            items
                .iter()
                .map(|v| format_value(v, false))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        Value::Vector(items) => format!(
            "[{}]",
            items
                .iter()
                .map(|v| format_value(v, false))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        Value::Map(pairs) => format!(
            "{{{}}}",
            pairs
                .iter()
                .map(|(k, v)| format!(":{} {}", k, format_value(v, false)))
                .collect::<Vec<_>>()
                .join(" ")
        ),
        Value::Closure(_) => "#<fn>".to_string(),
        Value::Primitive(p) => format!("#<primitive:{}>", p.name),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Builds a fresh root environment with every builtin registered; used by
/// the REPL, which needs the environment outside of a single `run` call.
pub fn new_root_environment() -> Rc<Environment> {
    let env = Environment::new();
    crate::builtins::register_builtins(env.clone());
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_results_are_suppressed_at_top_level() {
        let lines = run("(def x 1)");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, OutputKind::Time);
    }

    #[test]
    fn a_value_line_is_emitted_for_non_nil_results() {
        let lines = run("(+ 1 2)");
        assert_eq!(lines[0].kind, OutputKind::Value);
        assert_eq!(lines[0].text, "3");
    }

    #[test]
    fn an_error_in_one_form_does_not_stop_the_next() {
        let lines = run("(car 1) (+ 1 2)");
        assert_eq!(lines[0].kind, OutputKind::Error);
        assert_eq!(lines[1].kind, OutputKind::Value);
        assert_eq!(lines[1].text, "3");
    }

    #[test]
    fn lex_or_parse_failure_short_circuits_to_a_single_error_line() {
        let lines = run(")");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, OutputKind::Error);
    }

    #[test]
    fn integral_numbers_format_without_a_trailing_dot_zero() {
        assert_eq!(format_value(&Value::Number(4.0), true), "4");
        assert_eq!(format_value(&Value::Number(4.5), true), "4.5");
    }

    #[test]
    fn strings_are_unquoted_at_top_level_and_quoted_when_nested() {
        let s = Value::String("hi".to_string());
        assert_eq!(format_value(&s, true), "hi");
        assert_eq!(format_value(&s, false), "\"hi\"");
    }

    #[test]
    fn keyword_accessor_reads_a_map_value() {
        let lines = run(r#"(def p {:name "Alice" :age 30}) (print (:name p))"#);
        assert_eq!(lines[0].kind, OutputKind::Time);
    }
}
