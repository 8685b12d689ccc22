// ABOUTME: Macro table and the hygienic macro expander

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{eval_body, quote_to_value, value_to_expr, Interpreter};
use crate::expr::{Expr, ExprKind};
use std::collections::HashMap;

/// A macro installed by `defmacro`: parameter names and an unevaluated body.
#[derive(Clone)]
pub struct MacroDef {
    pub params: Vec<String>,
    pub body: Vec<Expr>,
}

#[derive(Default)]
pub struct MacroRegistry {
    macros: HashMap<String, MacroDef>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        MacroRegistry {
            macros: HashMap::new(),
        }
    }

    pub fn define(&mut self, name: String, params: Vec<String>, body: Vec<Expr>) {
        self.macros.insert(name, MacroDef { params, body });
    }

    pub fn get(&self, name: &str) -> Option<MacroDef> {
        self.macros.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }
}

const MAX_EXPANSION_DEPTH: usize = 1000;

/// Expands one macro call: binds the call's unevaluated argument expressions
/// to the macro's parameters (as quoted data), evaluates the macro body to
/// get back a piece of expression data, reifies it as an `Expr`, and renames
/// every gensym-marked identifier the macro introduced. The caller
/// re-evaluates the result in the call site's own environment.
pub fn expand_call(
    interp: &Interpreter,
    name: &str,
    def: &MacroDef,
    call_args: &[Expr],
) -> Result<Expr, EvalError> {
    let depth = interp.enter_macro_expansion();
    if depth > MAX_EXPANSION_DEPTH {
        interp.exit_macro_expansion();
        return Err(EvalError::macro_error("macro expansion too deep"));
    }

    let result = (|| {
        if def.params.len() != call_args.len() {
            return Err(EvalError::arity_error(
                name,
                def.params.len().to_string(),
                call_args.len(),
            ));
        }

        let expansion_env = Environment::with_parent(interp.root.clone());
        for (param, arg) in def.params.iter().zip(call_args.iter()) {
            expansion_env.define(param.clone(), quote_to_value(arg)?);
        }

        let produced = eval_body(&def.body, expansion_env, interp)?;
        let expanded = value_to_expr(&produced).ok_or_else(|| {
            EvalError::macro_error(format!("{}: expansion did not produce an expression", name))
        })?;

        Ok(rename_gensyms(expanded, interp))
    })();

    interp.exit_macro_expansion();
    result
}

/// Renames every `ident#`-style identifier the macro template introduced to
/// a fresh, globally unique name, so it can never collide with (or be
/// shadowed by) an identifier at the macro's call site. Plain identifiers —
/// special forms, primitives, globals, and anything substituted in from the
/// caller's own arguments — are left untouched. All occurrences of the same
/// `ident#` within one expansion map to the same generated name.
fn rename_gensyms(expr: Expr, interp: &Interpreter) -> Expr {
    let mut mapping = HashMap::new();
    rename_walk(expr, &mut mapping, interp)
}

fn rename_walk(expr: Expr, mapping: &mut HashMap<String, String>, interp: &Interpreter) -> Expr {
    let position = expr.position;
    let kind = match expr.kind {
        ExprKind::Symbol(name) if is_gensym_marker(&name) => {
            let fresh = mapping
                .entry(name.clone())
                .or_insert_with(|| interp.gensym(name.trim_end_matches('#')))
                .clone();
            ExprKind::Symbol(fresh)
        }
        ExprKind::Symbol(name) => ExprKind::Symbol(name),
        ExprKind::Literal(lit) => ExprKind::Literal(lit),
        ExprKind::List(items) => ExprKind::List(
            items
                .into_iter()
                .map(|i| rename_walk(i, mapping, interp))
                .collect(),
        ),
        ExprKind::Vector(items) => ExprKind::Vector(
            items
                .into_iter()
                .map(|i| rename_walk(i, mapping, interp))
                .collect(),
        ),
        ExprKind::Map(pairs) => ExprKind::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (rename_walk(k, mapping, interp), rename_walk(v, mapping, interp)))
                .collect(),
        ),
        ExprKind::Quote(inner) => ExprKind::Quote(Box::new(rename_walk(*inner, mapping, interp))),
        ExprKind::Quasiquote(inner) => {
            ExprKind::Quasiquote(Box::new(rename_walk(*inner, mapping, interp)))
        }
        ExprKind::Unquote(inner) => {
            ExprKind::Unquote(Box::new(rename_walk(*inner, mapping, interp)))
        }
        ExprKind::Splice(inner) => {
            ExprKind::Splice(Box::new(rename_walk(*inner, mapping, interp)))
        }
    };
    Expr::new(kind, position)
}

fn is_gensym_marker(name: &str) -> bool {
    name.len() > 1 && name.ends_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_roundtrip() {
        let mut reg = MacroRegistry::new();
        reg.define("unless".to_string(), vec!["c".to_string()], vec![]);
        assert!(reg.contains("unless"));
        assert!(!reg.contains("other"));
        assert_eq!(reg.get("unless").unwrap().params, vec!["c".to_string()]);
    }

    #[test]
    fn gensym_marker_detection() {
        assert!(is_gensym_marker("tmp#"));
        assert!(!is_gensym_marker("#"));
        assert!(!is_gensym_marker("tmp"));
    }
}
