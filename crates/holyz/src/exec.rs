//! The statement executor.
//!
//! `process_line` dispatches a single token row by its first token and, for
//! block statements, consumes following rows by counting `{`/`}` tokens until
//! the braces balance. Its return value is the enclosing function's return
//! payload (`Null` otherwise); the internal `Break` sentinel carries a
//! `break` out of an `if` up to the nearest `while`.

use std::str::FromStr as _;

use tracing::{info, warn};

use crate::{
    builtins::HolyCFunction,
    error::RunResult,
    io::PrintWriter,
    namespace::Locals,
    ops::COMPARATORS,
    parse::{between_chars, brace_delta, join_tokens, string_raw},
    run::Interp,
    value::{Value, is_type_keyword},
};

/// Case-insensitive keyword match.
pub(crate) fn kw(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

fn is_assign_op(token: Option<&String>) -> bool {
    token.is_some_and(|t| matches!(t.as_str(), "=" | "+=" | "-=" | "*=" | "/="))
}

impl Interp {
    /// Executes the statement at `lines[*idx]`, advancing `idx` past any
    /// block the statement consumes.
    pub(crate) fn process_line(
        &mut self,
        lines: &[Vec<String>],
        idx: &mut usize,
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<Value> {
        let words = &lines[*idx];
        let first = words[0].as_str();

        // Deprecated print statement, kept for script compatibility.
        if kw(first, "print") {
            let text = self.eval(&join_tokens(&words[1..]), locals, print)?.to_str();
            print.stdout_write(&string_raw(&text))?;
            print.stdout_push('\n')?;
            return Ok(Value::Null);
        }

        // Holy-C auto-print: a bare string literal at statement position.
        if self.holyc_mode && words.len() == 1 && first.len() >= 2 && first.starts_with('"') && first.ends_with('"') {
            print.stdout_write(&string_raw(first))?;
            print.stdout_push('\n')?;
            return Ok(Value::Null);
        }

        if kw(first, "#holyc") {
            match words.get(1) {
                Some(mode) if kw(mode, "on") => self.holyc_mode = true,
                Some(mode) if kw(mode, "off") => self.holyc_mode = false,
                _ => warn!("#holyc expects 'on' or 'off'"),
            }
            return Ok(Value::Null);
        }

        if kw(first, "return") {
            return self.eval(&join_tokens(&words[1..]), locals, print);
        }

        if first.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("ZS.")) {
            self.eval(&join_tokens(words), locals, print)?;
            return Ok(Value::Null);
        }

        // Call statements: user functions first, then Holy-C builtins. A
        // second token that is an assignment operator means the name is a
        // variable, not a call.
        let head = first.split('(').next().unwrap_or("").trim();
        if !is_assign_op(words.get(1)) {
            if self.namespaces.is_function(head) {
                let joined = join_tokens(words);
                let args = self.arg_values(between_chars(&joined, '(', ')'), locals, print)?;
                self.call_function(head, args, print)?;
                return Ok(Value::Null);
            }
            if let Ok(builtin) = HolyCFunction::from_str(head) {
                if words.iter().any(|t| t.contains('(')) {
                    let joined = join_tokens(words);
                    let args = self.arg_values(between_chars(&joined, '(', ')'), locals, print)?;
                    builtin.call(self, &args, print)?;
                    return Ok(Value::Null);
                }
            }
        }

        // Parallel-spawn stub: acknowledged, never executed by the core.
        if first.starts_with("SplitThread") {
            info!("new thread: {}", join_tokens(words));
            return Ok(Value::Null);
        }

        if kw(first, "global") {
            if words.len() >= 3 {
                let name = words[2].clone();
                let rhs = if words.len() > 4 {
                    join_tokens(&words[4..])
                } else {
                    String::new()
                };
                let value = self.eval(&rhs, locals, print)?;
                self.namespaces.globals.insert(name, value);
            }
            return Ok(Value::Null);
        }

        // Typed declaration: declare and assign in the current scope.
        if is_type_keyword(first) || self.namespaces.is_class(first) {
            if words.len() >= 2 {
                let name = words[1].clone();
                let rhs = if words.len() > 3 {
                    join_tokens(&words[3..])
                } else {
                    String::new()
                };
                let value = self.eval(&rhs, locals, print)?;
                locals.insert(name, value);
            }
            return Ok(Value::Null);
        }

        // Assignment to a bound name.
        if !first.contains('.') && (locals.contains_key(first) || self.namespaces.globals.contains_key(first)) {
            self.var_op(words, locals, print)?;
            return Ok(Value::Null);
        }

        // Dotted-member mutation through the containing value.
        if let Some((base, _)) = first.split_once('.') {
            if base == "this"
                || self.namespaces.is_class(base)
                || locals.contains_key(base)
                || self.namespaces.globals.contains_key(base)
            {
                self.dotted_op(words, locals, print)?;
                return Ok(Value::Null);
            }
        }

        if kw(first, "while") {
            return self.exec_while(lines, idx, locals, print);
        }
        if kw(first, "if") {
            return self.exec_if(lines, idx, locals, print);
        }

        Ok(Value::Null)
    }

    fn exec_while(
        &mut self,
        lines: &[Vec<String>],
        idx: &mut usize,
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<Value> {
        let (pred, mut depth) = parse_block_header(&lines[*idx][1..]);
        let (a, cmp, b) = split_predicate(&pred);
        if depth == 0 {
            warn!("while statement is missing its block");
            return Ok(Value::Null);
        }
        let body = collect_block(lines, idx, &mut depth);

        loop {
            if !self.bool_op(&a, &cmp, &b, locals, print)? {
                break;
            }
            let mut j = 0;
            'body: while j < body.len() {
                let lead = body[j][0].as_str();
                if kw(lead, "continue") {
                    break 'body;
                }
                if kw(lead, "break") {
                    return Ok(Value::Null);
                }
                let ret = self.process_line(&body, &mut j, locals, print)?;
                match ret {
                    Value::Null => {}
                    // A break that surfaced from a nested if exits this loop
                    // and goes no further.
                    Value::Break => return Ok(Value::Null),
                    other => return Ok(other),
                }
                j += 1;
            }
        }
        Ok(Value::Null)
    }

    fn exec_if(
        &mut self,
        lines: &[Vec<String>],
        idx: &mut usize,
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<Value> {
        let (pred, mut depth) = parse_block_header(&lines[*idx][1..]);
        let (a, cmp, b) = split_predicate(&pred);

        let mut if_contents: Vec<Vec<String>> = Vec::new();
        let mut else_contents: Vec<Vec<String>> = Vec::new();
        let mut in_else = false;
        while *idx + 1 < lines.len() && depth > 0 {
            *idx += 1;
            let line = &lines[*idx];
            // "} else {" at the top block level switches branches.
            if depth == 1
                && !in_else
                && line[0] == "}"
                && line.iter().any(|t| kw(t, "else"))
                && line.iter().any(|t| t.contains('{'))
            {
                in_else = true;
                continue;
            }
            depth += brace_delta(line);
            if depth <= 0 {
                break;
            }
            if in_else {
                else_contents.push(line.clone());
            } else {
                if_contents.push(line.clone());
            }
        }

        // "else {" on the line after the closing brace.
        if !in_else
            && *idx + 1 < lines.len()
            && lines[*idx + 1].first().is_some_and(|t| kw(t, "else"))
        {
            *idx += 1;
            let (_, mut else_depth) = parse_block_header(&lines[*idx][1..]);
            if else_depth == 0 && *idx + 1 < lines.len() && lines[*idx + 1].first().is_some_and(|t| t == "{") {
                *idx += 1;
                else_depth = 1;
            }
            else_contents = collect_block(lines, idx, &mut else_depth);
        }

        let chosen = if self.bool_op(&a, &cmp, &b, locals, print)? {
            if_contents
        } else {
            else_contents
        };
        let mut j = 0;
        while j < chosen.len() {
            // A literal break propagates to the enclosing while.
            if kw(chosen[j][0].as_str(), "break") {
                return Ok(Value::Break);
            }
            let ret = self.process_line(&chosen, &mut j, locals, print)?;
            if ret != Value::Null {
                return Ok(ret);
            }
            j += 1;
        }
        Ok(Value::Null)
    }
}

/// Splits a block header after its keyword: predicate tokens up to the first
/// `{`-bearing token, and the starting brace depth (1 when a `{` was seen).
fn parse_block_header(tokens: &[String]) -> (Vec<String>, i32) {
    let mut pred = Vec::new();
    let mut depth = 0;
    for token in tokens {
        if token.contains('{') {
            let stripped = token.replace('{', "");
            if !stripped.is_empty() {
                pred.push(stripped);
            }
            depth = 1;
            break;
        }
        pred.push(token.clone());
    }
    (pred, depth)
}

/// Splits predicate tokens around the comparator: tokens to its left form
/// the left expression, tokens to its right the right expression. Without a
/// comparator the whole predicate is a truthiness test.
fn split_predicate(tokens: &[String]) -> (String, String, String) {
    if let Some(pos) = tokens.iter().position(|t| COMPARATORS.contains(&t.as_str())) {
        (
            join_tokens(&tokens[..pos]),
            tokens[pos].clone(),
            join_tokens(&tokens[pos + 1..]),
        )
    } else {
        (join_tokens(tokens), String::new(), String::new())
    }
}

/// Consumes lines until the running brace count returns to zero, leaving
/// `idx` on the balancing line. The interior lines are returned; the
/// balancing line is not included.
fn collect_block(lines: &[Vec<String>], idx: &mut usize, depth: &mut i32) -> Vec<Vec<String>> {
    let mut contents = Vec::new();
    while *idx + 1 < lines.len() && *depth > 0 {
        *idx += 1;
        *depth += brace_delta(&lines[*idx]);
        if *depth <= 0 {
            break;
        }
        contents.push(lines[*idx].clone());
    }
    contents
}
