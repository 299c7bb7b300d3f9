//! The expression evaluator.
//!
//! Expressions arrive as plain strings (space-joined token runs). Evaluation
//! is two-tiered: a fast path for operator-free expressions and anything in
//! the `ZS.` namespace, and a general path that rewrites identifier runs to
//! their evaluated text before deciding between string concatenation and
//! numeric arithmetic.

use std::str::FromStr as _;

use smallvec::SmallVec;
use tracing::warn;

use crate::{
    arith,
    builtins::{HolyCFunction, ZsFunction},
    error::RunResult,
    io::PrintWriter,
    namespace::Locals,
    parse::{between_chars, count_outside_parens, is_escaped, split_no_overlap},
    run::Interp,
    value::{Value, Vec2},
};

/// Evaluated call arguments. Most calls take a handful of values.
pub(crate) type Args = SmallVec<[Value; 4]>;

impl Interp {
    /// Evaluates one expression string in the given scope.
    pub(crate) fn eval(&mut self, expr: &str, locals: &mut Locals, print: &mut impl PrintWriter) -> RunResult<Value> {
        let expression = expr.trim();
        let head = expression.split('(').next().unwrap_or("").trim();
        let is_zs = expression.split('.').next().is_some_and(|h| h.eq_ignore_ascii_case("ZS"));
        let no_operators = ['+', '-', '*', '/', '^']
            .iter()
            .all(|&op| count_outside_parens(expression, op) == 0);

        // Fast path: a single call or variable access, or anything under ZS.
        if no_operators || is_zs {
            if self.namespaces.is_function(head) {
                let args = self.call_args(expression, locals, print)?;
                return self.call_function(head, args, print);
            }
            if let Ok(builtin) = HolyCFunction::from_str(head) {
                let args = self.call_args(expression, locals, print)?;
                return builtin.call(self, &args, print);
            }
            if expression.contains('(') && self.namespaces.is_class(head) {
                let args = self.call_args(expression, locals, print)?;
                return self.new_instance(head, args, print);
            }
            if is_zs {
                let args = self.call_args(expression, locals, print)?;
                return self.call_zs(head, &args, print);
            }
            return Ok(self.get_variable(expression, locals));
        }

        // General path: replace every identifier run outside quotes with the
        // stringified result of a call or a variable lookup.
        let bytes = expression.as_bytes();
        let mut rewritten = String::with_capacity(expression.len());
        let mut in_quotes = false;
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i] as char;
            if c == '"' && !is_escaped(expression, i) {
                in_quotes = !in_quotes;
            }
            if c.is_ascii_alphabetic() || c == '_' {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphabetic() || bytes[i] == b'.' || bytes[i] == b'_') {
                    i += 1;
                }
                let name = &expression[start..i];
                let zs_prefixed = name.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("ZS."));
                if !in_quotes && (self.namespaces.is_function(name) || zs_prefixed) {
                    if let Some((inner, end)) = call_span(expression, i) {
                        let value = if self.namespaces.is_function(name) {
                            let args = self.arg_values(inner, locals, print)?;
                            self.call_function(name, args, print)?
                        } else {
                            let args = self.arg_values(inner, locals, print)?;
                            self.call_zs(name, &args, print)?
                        };
                        rewritten.push_str(&value.to_str());
                        i = end;
                        continue;
                    }
                }
                if in_quotes {
                    rewritten.push_str(name);
                } else {
                    rewritten.push_str(&self.get_variable(name, locals).to_str());
                }
                continue;
            }
            rewritten.push(c);
            i += 1;
        }

        // Any surviving letters or quoted regions make this string
        // concatenation; otherwise it is pure arithmetic.
        let has_text = rewritten
            .char_indices()
            .any(|(pos, c)| c.is_ascii_alphabetic() || (c == '"' && !is_escaped(&rewritten, pos)));
        if has_text {
            let mut in_quotes = false;
            let mut out = String::with_capacity(rewritten.len());
            for (pos, c) in rewritten.char_indices() {
                if c == '"' && !is_escaped(&rewritten, pos) {
                    in_quotes = !in_quotes;
                    continue;
                }
                if in_quotes || !matches!(c, '(' | ')' | '+' | ' ') {
                    out.push(c);
                }
            }
            return Ok(Value::Str(out));
        }
        Ok(arith::evaluate(&rewritten))
    }

    /// Extracts and evaluates the parenthesised argument list of `expression`.
    fn call_args(&mut self, expression: &str, locals: &mut Locals, print: &mut impl PrintWriter) -> RunResult<Args> {
        let inner = between_chars(expression, '(', ')').to_owned();
        self.arg_values(&inner, locals, print)
    }

    /// Resolves a comma-separated argument list: bound names read directly
    /// from the caller's scope, anything else goes through the evaluator.
    pub(crate) fn arg_values(
        &mut self,
        arg_list: &str,
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<Args> {
        let mut values = Args::new();
        if arg_list.trim().is_empty() {
            return Ok(values);
        }
        for raw in split_no_overlap(arg_list, ',', '(', ')') {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            if let Some(v) = locals.get(name).cloned() {
                values.push(v);
            } else if let Some(v) = self.namespaces.globals.get(name).cloned() {
                values.push(v);
            } else {
                let v = self.eval(name, locals, print)?;
                values.push(v);
            }
        }
        Ok(values)
    }

    /// Dispatches a dotted `ZS.*` builtin by exact path, case-insensitively.
    pub(crate) fn call_zs(&mut self, head: &str, args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
        match ZsFunction::from_str(head) {
            Ok(builtin) => builtin.call(args, print),
            Err(_) => {
                warn!("ZS builtin '{head}' does not exist");
                Ok(Value::Null)
            }
        }
    }

    /// Resolves a (possibly dotted) variable access.
    ///
    /// Lookup order is locals, then globals; an unbound name evaluates to its
    /// own spelling as a string. `this.x` reads the current method receiver,
    /// `ClassName.x` reads a static attribute.
    pub(crate) fn get_variable(&self, var_name: &str, locals: &Locals) -> Value {
        let name = var_name.trim();
        if let Some((base, sub)) = name.split_once('.') {
            let sub = sub.trim();
            if base == "this" {
                return match &self.current_this {
                    Some(instance) if sub.is_empty() => Value::Instance(instance.clone()),
                    Some(instance) => sub_component(&Value::Instance(instance.clone()), sub),
                    None => {
                        warn!("'this' used outside of a method");
                        Value::Null
                    }
                };
            }
            if self.namespaces.is_class(base) {
                return self.namespaces.static_attr(base, sub).unwrap_or_else(|| {
                    warn!("unknown static attribute '{sub}' on class '{base}'");
                    Value::Null
                });
            }
            if let Some(value) = locals.get(base).or_else(|| self.namespaces.globals.get(base)) {
                return sub_component(value, sub);
            }
            return Value::Str(name.to_owned());
        }
        if name == "this" {
            return match &self.current_this {
                Some(instance) => Value::Instance(instance.clone()),
                None => {
                    warn!("'this' used outside of a method");
                    Value::Null
                }
            };
        }
        locals
            .get(name)
            .or_else(|| self.namespaces.globals.get(name))
            .cloned()
            .unwrap_or_else(|| Value::Str(name.to_owned()))
    }
}

/// Reads a dotted sub-component of an aggregate value, recursing through
/// nested paths.
pub(crate) fn sub_component(value: &Value, path: &str) -> Value {
    let (field, rest) = match path.split_once('.') {
        Some((f, r)) => (f, Some(r)),
        None => (path, None),
    };
    let next = match value {
        Value::Instance(instance) => instance.attrs.get(field).cloned().unwrap_or_else(|| {
            warn!("unknown attribute '{field}' on '{}'", instance.class_name);
            Value::Null
        }),
        Value::Vec2(Vec2 { x, y }) => match field {
            "x" => Value::Float(*x),
            "y" => Value::Float(*y),
            _ => {
                warn!("unknown Vec2 component '{field}'");
                Value::Null
            }
        },
        other => {
            warn!("value of type {} has no sub-components", other.type_of());
            Value::Null
        }
    };
    match rest {
        Some(rest) if !rest.is_empty() => sub_component(&next, rest),
        _ => next,
    }
}

/// Finds the parenthesised span starting at or after `from`, returning its
/// interior and the index one past the closing parenthesis.
fn call_span(expression: &str, from: usize) -> Option<(&str, usize)> {
    let bytes = expression.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if bytes.get(i) != Some(&b'(') {
        return None;
    }
    let start = i + 1;
    let mut depth = 1i32;
    let mut j = start;
    while j < bytes.len() {
        match bytes[j] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&expression[start..j], j + 1));
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}
