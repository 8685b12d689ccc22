// ABOUTME: The tree-walking evaluator: special forms, application, quoting

use crate::env::Environment;
use crate::error::EvalError;
use crate::expr::{Expr, ExprKind, Literal};
use crate::macros::{self, MacroDef, MacroRegistry};
use crate::value::{ClosureData, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Holds the state that lives for the lifetime of one running program:
/// the root environment every `def`/`defn`/`defmacro` binds into
/// regardless of lexical nesting, the macro table, and the counters
/// needed for gensym and the macro-expansion depth guard.
pub struct Interpreter {
    pub root: Rc<Environment>,
    macros: RefCell<MacroRegistry>,
    gensym_counter: Cell<u64>,
    expansion_depth: Cell<usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            root: Environment::new(),
            macros: RefCell::new(MacroRegistry::new()),
            gensym_counter: Cell::new(0),
            expansion_depth: Cell::new(0),
        }
    }

    pub fn with_root(root: Rc<Environment>) -> Self {
        Interpreter {
            root,
            macros: RefCell::new(MacroRegistry::new()),
            gensym_counter: Cell::new(0),
            expansion_depth: Cell::new(0),
        }
    }

    pub fn define_macro(&self, name: String, params: Vec<String>, body: Vec<Expr>) {
        self.macros.borrow_mut().define(name, params, body);
    }

    pub fn lookup_macro(&self, name: &str) -> Option<MacroDef> {
        self.macros.borrow().get(name)
    }

    /// A fresh name guaranteed not to collide with anything in this run.
    pub fn gensym(&self, base: &str) -> String {
        let n = self.gensym_counter.get();
        self.gensym_counter.set(n + 1);
        format!("{}__gen{}", base, n)
    }

    /// Bumps and returns the macro-expansion nesting depth; paired with
    /// `exit_macro_expansion`. Guards against runaway recursive expansion.
    pub fn enter_macro_expansion(&self) -> usize {
        let depth = self.expansion_depth.get() + 1;
        self.expansion_depth.set(depth);
        depth
    }

    pub fn exit_macro_expansion(&self) {
        let depth = self.expansion_depth.get();
        self.expansion_depth.set(depth.saturating_sub(1));
    }

    pub fn eval(&self, expr: &Expr, env: Rc<Environment>) -> Result<Value, EvalError> {
        eval(expr, env, self)
    }

    pub fn apply(&self, callee: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
        apply(self, callee, args)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Evaluates a single expression in `env`. This is the one place that
/// decides, for a list whose head is a symbol, whether that symbol names a
/// reserved special form, a user macro, or an ordinary value to apply.
pub fn eval(expr: &Expr, env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    match &expr.kind {
        ExprKind::Literal(Literal::Number(n)) => Ok(Value::Number(*n)),
        ExprKind::Literal(Literal::String(s)) => Ok(Value::String(s.clone())),
        ExprKind::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
        ExprKind::Literal(Literal::Nil) => Ok(Value::Nil),
        ExprKind::Literal(Literal::Keyword(k)) => Ok(Value::Keyword(k.clone())),
        ExprKind::Symbol(name) => env
            .get(name)
            .ok_or_else(|| EvalError::UndefinedSymbol(name.clone())),
        ExprKind::Vector(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(eval(item, env.clone(), interp)?);
            }
            Ok(Value::vector(out))
        }
        ExprKind::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                let key = eval_map_key(k, env.clone(), interp)?;
                let value = eval(v, env.clone(), interp)?;
                out.push((key, value));
            }
            Ok(Value::map(out))
        }
        ExprKind::Quote(inner) => quote_to_value(inner),
        ExprKind::Quasiquote(inner) => quasiquote_to_value(inner, &env, interp),
        ExprKind::Unquote(_) => Err(EvalError::runtime_error(
            "unquote used outside quasiquote",
        )),
        ExprKind::Splice(_) => Err(EvalError::runtime_error(
            "unquote-splicing used outside quasiquote",
        )),
        ExprKind::List(items) => eval_list(items, env, interp),
    }
}

fn eval_map_key(expr: &Expr, env: Rc<Environment>, interp: &Interpreter) -> Result<String, EvalError> {
    match eval(expr, env, interp)? {
        Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => Ok(s),
        other => Err(EvalError::type_error("map", "string or keyword", &other)),
    }
}

fn eval_list(items: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    if items.is_empty() {
        return Ok(Value::list(vec![]));
    }

    if let ExprKind::Symbol(name) = &items[0].kind {
        if let Some(result) = eval_special_form(name, &items[1..], env.clone(), interp)? {
            return Ok(result);
        }
        if let Some(def) = interp.lookup_macro(name) {
            let expanded = macros::expand_call(interp, name, &def, &items[1..])?;
            return eval(&expanded, env, interp);
        }
    }

    let callee = eval(&items[0], env.clone(), interp)?;
    let mut args = Vec::with_capacity(items.len() - 1);
    for arg in &items[1..] {
        args.push(eval(arg, env.clone(), interp)?);
    }
    apply(interp, &callee, args)
}

/// Dispatches the eight reserved special forms. Returns `Ok(None)` when
/// `name` isn't one of them, so the caller can fall through to macro
/// lookup and then ordinary application.
fn eval_special_form(
    name: &str,
    args: &[Expr],
    env: Rc<Environment>,
    interp: &Interpreter,
) -> Result<Option<Value>, EvalError> {
    let result = match name {
        "def" => eval_def(args, env, interp)?,
        "defn" => eval_defn(args, env, interp)?,
        "fn" => {
            if args.is_empty() {
                return Err(EvalError::arity_error("fn", "at least 1", args.len()));
            }
            eval_fn(&args[0], &args[1..], env, None)?
        }
        "let" => eval_let(args, env, interp)?,
        "if" => eval_if(args, env, interp)?,
        "do" => eval_body(args, env, interp)?,
        "quote" => eval_quote_form(args)?,
        "defmacro" => eval_defmacro(args, interp)?,
        _ => return Ok(None),
    };
    Ok(Some(result))
}

fn eval_def(args: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("def", "2", args.len()));
    }
    let name = args[0]
        .symbol_name()
        .ok_or_else(|| EvalError::runtime_error("def: first argument must be a symbol"))?
        .to_string();
    let value = eval(&args[1], env, interp)?;
    let value = name_closure(value, &name);
    interp.root.define(name, value);
    Ok(Value::Nil)
}

fn eval_defn(args: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("defn", "at least 2", args.len()));
    }
    let name = args[0]
        .symbol_name()
        .ok_or_else(|| EvalError::runtime_error("defn: first argument must be a symbol"))?
        .to_string();
    let closure = eval_fn(&args[1], &args[2..], env, Some(name.clone()))?;
    interp.root.define(name, closure);
    Ok(Value::Nil)
}

/// Names an anonymous closure after the symbol it's being bound to, purely
/// so a later arity error can report a useful name instead of "fn".
fn name_closure(value: Value, name: &str) -> Value {
    match value {
        Value::Closure(c) if c.name.is_none() => Value::Closure(Rc::new(ClosureData {
            params: c.params.clone(),
            body: c.body.clone(),
            env: c.env.clone(),
            name: Some(name.to_string()),
        })),
        other => other,
    }
}

fn eval_fn(
    params_expr: &Expr,
    body: &[Expr],
    env: Rc<Environment>,
    name: Option<String>,
) -> Result<Value, EvalError> {
    let params = match &params_expr.kind {
        ExprKind::Symbol(s) => vec![s.clone()],
        ExprKind::Vector(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let s = item.symbol_name().ok_or_else(|| {
                    EvalError::runtime_error("fn: parameter list must contain only symbols")
                })?;
                out.push(s.to_string());
            }
            out
        }
        _ => {
            return Err(EvalError::runtime_error(
                "fn: expected a parameter vector or a single symbol",
            ))
        }
    };
    Ok(Value::Closure(Rc::new(ClosureData {
        params,
        body: body.to_vec(),
        env,
        name,
    })))
}

fn eval_let(args: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("let", "at least 1", args.len()));
    }
    let bindings = match &args[0].kind {
        ExprKind::Vector(items) => items,
        _ => return Err(EvalError::runtime_error("let: expected a binding vector")),
    };
    if bindings.len() % 2 != 0 {
        return Err(EvalError::runtime_error(
            "let: binding vector must have an even number of forms",
        ));
    }
    let let_env = Environment::with_parent(env);
    let mut i = 0;
    while i < bindings.len() {
        let name = bindings[i]
            .symbol_name()
            .ok_or_else(|| EvalError::runtime_error("let: binding name must be a symbol"))?
            .to_string();
        let value = eval(&bindings[i + 1], let_env.clone(), interp)?;
        let_env.define(name, value);
        i += 2;
    }
    eval_body(&args[1..], let_env, interp)
}

fn eval_if(args: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() != 2 && args.len() != 3 {
        return Err(EvalError::arity_error("if", "2-3", args.len()));
    }
    let cond = eval(&args[0], env.clone(), interp)?;
    if cond.is_truthy() {
        eval(&args[1], env, interp)
    } else if args.len() == 3 {
        eval(&args[2], env, interp)
    } else {
        Ok(Value::Nil)
    }
}

fn eval_quote_form(args: &[Expr]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("quote", "1", args.len()));
    }
    quote_to_value(&args[0])
}

fn eval_defmacro(args: &[Expr], interp: &Interpreter) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::arity_error("defmacro", "at least 2", args.len()));
    }
    let name = args[0]
        .symbol_name()
        .ok_or_else(|| EvalError::runtime_error("defmacro: first argument must be a symbol"))?
        .to_string();
    let params = match &args[1].kind {
        ExprKind::Vector(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let s = item.symbol_name().ok_or_else(|| {
                    EvalError::runtime_error("defmacro: parameter list must contain only symbols")
                })?;
                out.push(s.to_string());
            }
            out
        }
        _ => {
            return Err(EvalError::runtime_error(
                "defmacro: expected a parameter vector",
            ))
        }
    };
    let body = args[2..].to_vec();
    interp.define_macro(name, params, body);
    Ok(Value::Nil)
}

/// Evaluates each expression in order, in the same `env`, returning the
/// last result (or `nil` for an empty body). Shared by `do`, `let` bodies,
/// closure bodies, and macro bodies.
pub fn eval_body(body: &[Expr], env: Rc<Environment>, interp: &Interpreter) -> Result<Value, EvalError> {
    let mut result = Value::Nil;
    for expr in body {
        result = eval(expr, env.clone(), interp)?;
    }
    Ok(result)
}

/// Applies a callable to already-evaluated arguments. Exposed so
/// higher-order primitives (`map`, `filter`, `reduce`) can call back into
/// the evaluator through the `Interpreter` reference they're handed.
pub fn apply(interp: &Interpreter, callee: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
    match callee {
        Value::Primitive(p) => (p.func)(&args, interp),
        Value::Closure(c) => {
            if c.params.len() != args.len() {
                let name = c.name.clone().unwrap_or_else(|| "fn".to_string());
                return Err(EvalError::arity_error(
                    &name,
                    c.params.len().to_string(),
                    args.len(),
                ));
            }
            let call_env = Environment::with_parent(c.env.clone());
            for (param, arg) in c.params.iter().zip(args) {
                call_env.define(param.clone(), arg);
            }
            eval_body(&c.body, call_env, interp)
        }
        Value::Keyword(k) => {
            if args.len() != 1 {
                return Err(EvalError::arity_error(k, "1", args.len()));
            }
            map_get(&args[0], k)
        }
        _ => Err(EvalError::NotCallable),
    }
}

/// `(get map key)` and the keyword-as-accessor shorthand `(:k map)` share
/// this lookup: an absent key yields `nil` rather than an error.
pub fn map_get(target: &Value, key: &str) -> Result<Value, EvalError> {
    match target {
        Value::Map(pairs) => Ok(pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Nil)),
        other => Err(EvalError::type_error("get", "map", other)),
    }
}

/// Converts parsed syntax into quoted data: the core of `quote` and of
/// binding a macro's unevaluated call-site arguments to its parameters.
/// A `Symbol` becomes a `Value::Symbol` (see its doc comment); a `List`
/// with no elements becomes an empty list value, distinct from `nil`.
/// Nested `Quote` converts recursively. `Unquote`/`Splice` are only
/// meaningful inside a quasiquote, so encountering one here is an error.
pub fn quote_to_value(expr: &Expr) -> Result<Value, EvalError> {
    Ok(match &expr.kind {
        ExprKind::Literal(Literal::Number(n)) => Value::Number(*n),
        ExprKind::Literal(Literal::String(s)) => Value::String(s.clone()),
        ExprKind::Literal(Literal::Bool(b)) => Value::Bool(*b),
        ExprKind::Literal(Literal::Nil) => Value::Nil,
        ExprKind::Literal(Literal::Keyword(k)) => Value::Keyword(k.clone()),
        ExprKind::Symbol(s) => Value::Symbol(s.clone()),
        ExprKind::List(items) => Value::list(
            items
                .iter()
                .map(quote_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ExprKind::Vector(items) => Value::vector(
            items
                .iter()
                .map(quote_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        ExprKind::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                let key = match quote_to_value(k)? {
                    Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => s,
                    other => {
                        return Err(EvalError::type_error("quote", "string or keyword", &other))
                    }
                };
                out.push((key, quote_to_value(v)?));
            }
            Value::map(out)
        }
        ExprKind::Quote(inner) => quote_to_value(inner)?,
        ExprKind::Quasiquote(inner) => freeze_to_value(inner),
        ExprKind::Unquote(_) => {
            return Err(EvalError::runtime_error(
                "unquote used outside quasiquote",
            ))
        }
        ExprKind::Splice(_) => {
            return Err(EvalError::runtime_error(
                "unquote-splicing used outside quasiquote",
            ))
        }
    })
}

/// Processes the body of a quasiquote: ordinary structure is quoted like
/// `quote`, an `unquote` hole is evaluated in `env`, and `unquote-splicing`
/// flattens a sequence into the enclosing list or vector. A quasiquote
/// nested inside this one is not walked further; it is re-emitted as a
/// literal quoted structure (see DESIGN.md).
pub fn quasiquote_to_value(
    expr: &Expr,
    env: &Rc<Environment>,
    interp: &Interpreter,
) -> Result<Value, EvalError> {
    match &expr.kind {
        ExprKind::Literal(Literal::Number(n)) => Ok(Value::Number(*n)),
        ExprKind::Literal(Literal::String(s)) => Ok(Value::String(s.clone())),
        ExprKind::Literal(Literal::Bool(b)) => Ok(Value::Bool(*b)),
        ExprKind::Literal(Literal::Nil) => Ok(Value::Nil),
        ExprKind::Literal(Literal::Keyword(k)) => Ok(Value::Keyword(k.clone())),
        ExprKind::Symbol(s) => Ok(Value::Symbol(s.clone())),
        ExprKind::Unquote(inner) => eval(inner, env.clone(), interp),
        ExprKind::Splice(_) => Err(EvalError::macro_error(
            "unquote-splicing used outside a list or vector position",
        )),
        ExprKind::Quote(inner) => quote_to_value(inner),
        ExprKind::Quasiquote(inner) => Ok(freeze_to_value(inner)),
        ExprKind::List(items) => Ok(Value::list(qq_sequence(items, env, interp)?)),
        ExprKind::Vector(items) => Ok(Value::vector(qq_sequence(items, env, interp)?)),
        ExprKind::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs {
                let key = match quasiquote_to_value(k, env, interp)? {
                    Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => s,
                    other => {
                        return Err(EvalError::type_error(
                            "quasiquote",
                            "string or keyword",
                            &other,
                        ))
                    }
                };
                out.push((key, quasiquote_to_value(v, env, interp)?));
            }
            Ok(Value::map(out))
        }
    }
}

fn qq_sequence(
    items: &[Expr],
    env: &Rc<Environment>,
    interp: &Interpreter,
) -> Result<Vec<Value>, EvalError> {
    let mut out = Vec::new();
    for item in items {
        if let ExprKind::Splice(inner) = &item.kind {
            match eval(inner, env.clone(), interp)? {
                Value::List(items) | Value::Vector(items) => out.extend(items.iter().cloned()),
                other => {
                    return Err(EvalError::type_error(
                        "unquote-splicing",
                        "list or vector",
                        &other,
                    ))
                }
            }
        } else {
            out.push(quasiquote_to_value(item, env, interp)?);
        }
    }
    Ok(out)
}

/// Quotes a nested quasiquote's contents literally, without erroring on
/// any `unquote`/`unquote-splicing` within it (those holes are not
/// evaluated; the nested quasiquote is data, not code, to the outer one).
/// Represents `~x` as `(unquote x)` and `~@x` as `(unquote-splicing x)`,
/// so the structure round-trips if the nested quasiquote is later
/// evaluated on its own.
fn freeze_to_value(expr: &Expr) -> Value {
    match &expr.kind {
        ExprKind::Literal(Literal::Number(n)) => Value::Number(*n),
        ExprKind::Literal(Literal::String(s)) => Value::String(s.clone()),
        ExprKind::Literal(Literal::Bool(b)) => Value::Bool(*b),
        ExprKind::Literal(Literal::Nil) => Value::Nil,
        ExprKind::Literal(Literal::Keyword(k)) => Value::Keyword(k.clone()),
        ExprKind::Symbol(s) => Value::Symbol(s.clone()),
        ExprKind::List(items) => Value::list(items.iter().map(freeze_to_value).collect()),
        ExprKind::Vector(items) => Value::vector(items.iter().map(freeze_to_value).collect()),
        ExprKind::Map(pairs) => Value::map(
            pairs
                .iter()
                .map(|(k, v)| {
                    let key = match freeze_to_value(k) {
                        Value::String(s) | Value::Symbol(s) | Value::Keyword(s) => s,
                        other => other.type_name(),
                    };
                    (key, freeze_to_value(v))
                })
                .collect(),
        ),
        ExprKind::Quote(inner) => freeze_to_value(inner),
        ExprKind::Quasiquote(inner) => freeze_to_value(inner),
        ExprKind::Unquote(inner) => {
            Value::list(vec![Value::Symbol("unquote".to_string()), freeze_to_value(inner)])
        }
        ExprKind::Splice(inner) => Value::list(vec![
            Value::Symbol("unquote-splicing".to_string()),
            freeze_to_value(inner),
        ]),
    }
}

/// The reverse of `quote_to_value`, used only to reify a macro's returned
/// data back into an expression tree for re-evaluation at the call site.
/// `Value::Symbol` becomes a bare identifier; `Value::String` becomes a
/// string literal, so a string an unquoted argument carried through a
/// macro template surfaces as a self-evaluating string, not a variable
/// reference. Closures and primitives can't be reified; `None` propagates
/// as a macro error.
pub fn value_to_expr(value: &Value) -> Option<Expr> {
    let kind = match value {
        Value::Number(n) => ExprKind::Literal(Literal::Number(*n)),
        Value::String(s) => ExprKind::Literal(Literal::String(s.clone())),
        Value::Symbol(s) => ExprKind::Symbol(s.clone()),
        Value::Bool(b) => ExprKind::Literal(Literal::Bool(*b)),
        Value::Nil => ExprKind::Literal(Literal::Nil),
        Value::Keyword(k) => ExprKind::Literal(Literal::Keyword(k.clone())),
        Value::List(items) => {
            ExprKind::List(items.iter().map(value_to_expr).collect::<Option<Vec<_>>>()?)
        }
        Value::Vector(items) => {
            ExprKind::Vector(items.iter().map(value_to_expr).collect::<Option<Vec<_>>>()?)
        }
        Value::Map(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (k, v) in pairs.iter() {
                let key_expr = Expr::synthetic(ExprKind::Literal(Literal::Keyword(k.clone())));
                out.push((key_expr, value_to_expr(v)?));
            }
            ExprKind::Map(out)
        }
        Value::Closure(_) | Value::Primitive(_) => return None,
    };
    Some(Expr::synthetic(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(src: &str) -> Result<Value, EvalError> {
        let interp = Interpreter::new();
        let exprs = parse(src).expect("parse error");
        eval_body(&exprs, interp.root.clone(), &interp)
    }

    fn num(v: Result<Value, EvalError>) -> f64 {
        match v.unwrap() {
            Value::Number(n) => n,
            other => panic!("expected number, got {:?}", other),
        }
    }

    #[test]
    fn undefined_symbol_is_reported() {
        assert!(matches!(
            run("(unknown-thing 1 2)"),
            Err(EvalError::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn if_picks_the_right_branch() {
        assert_eq!(num(run("(if true 1 2)")), 1.0);
        assert_eq!(num(run("(if false 1 2)")), 2.0);
    }

    #[test]
    fn if_without_else_yields_nil_on_false() {
        assert!(matches!(run("(if false 1)").unwrap(), Value::Nil));
    }

    #[test]
    fn def_binds_into_root_regardless_of_nesting() {
        let interp = Interpreter::new();
        let exprs = parse("(let [x 1] (def y 2)) y").expect("parse error");
        let mut result = Value::Nil;
        for e in &exprs {
            result = eval(e, interp.root.clone(), &interp).expect("eval error");
        }
        assert!(matches!(result, Value::Number(n) if n == 2.0));
    }

    #[test]
    fn let_bindings_see_earlier_bindings() {
        assert_eq!(num(run("(let [x 1 y (if true x x)] y)")), 1.0);
    }

    #[test]
    fn fn_and_application_close_over_environment() {
        assert_eq!(num(run("((fn [x] (if x 1 0)) true)")), 1.0);
    }

    #[test]
    fn defn_allows_recursive_self_reference() {
        assert_eq!(
            num(run(
                "(defn count-down [n] (if n (count-down nil) 0)) (count-down true)"
            )),
            0.0
        );
    }

    #[test]
    fn quote_turns_a_symbol_into_a_value_symbol() {
        match run("(quote x)").unwrap() {
            Value::Symbol(s) => assert_eq!(s, "x"),
            other => panic!("expected Value::Symbol, got {:?}", other),
        }
    }

    #[test]
    fn quote_leaves_nested_list_structure_intact() {
        match run("(quote (1 2))").unwrap() {
            Value::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn quasiquote_evaluates_unquote_holes() {
        match run("(let [x 5] `(a ~x))").unwrap() {
            Value::List(items) => {
                assert!(matches!(&items[0], Value::Symbol(s) if s == "a"));
                assert!(matches!(&items[1], Value::Number(n) if *n == 5.0));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn quasiquote_splices_a_list_into_place() {
        match run("(let [xs (quote (1 2))] `(a ~@xs b))").unwrap() {
            Value::List(items) => assert_eq!(items.len(), 4),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn empty_list_is_not_nil() {
        assert!(matches!(run("()").unwrap(), Value::List(items) if items.is_empty()));
        assert!(matches!(run("(quote ())").unwrap(), Value::List(items) if items.is_empty()));
    }

    #[test]
    fn defmacro_expands_and_reevaluates_at_call_site() {
        let src = r#"
            (defmacro unless [c t e] `(if ~c ~e ~t))
            (unless true "a" "b")
        "#;
        match run(src).unwrap() {
            Value::String(s) => assert_eq!(s, "b"),
            other => panic!("expected string \"b\", got {:?}", other),
        }
    }

    #[test]
    fn unquoted_string_literal_stays_a_string_through_macro_expansion() {
        let src = r#"
            (defmacro unless [c t e] `(if ~c ~e ~t))
            (unless false "a" "b")
        "#;
        match run(src).unwrap() {
            Value::String(s) => assert_eq!(s, "a"),
            other => panic!("expected string \"a\", got {:?}", other),
        }
    }
}
