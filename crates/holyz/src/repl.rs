//! Persistent interactive session support.
//!
//! `ReplSession` keeps interpreter state (globals, functions, classes, heap,
//! locals) alive across `eval_line` calls so interactive snippets can build
//! on each other. Lines are buffered until their braces balance, so
//! multi-line `func`, `class`, `while`, and `if` blocks work at the prompt.

use crate::{
    error::RunResult,
    io::PrintWriter,
    namespace::Locals,
    parse::brace_delta,
    run::Interp,
    value::is_type_keyword,
};

/// A persistent REPL session that executes lines against accumulated
/// interpreter state.
#[derive(Debug, Default)]
pub struct ReplSession {
    interp: Interp,
    locals: Locals,
    pending: Vec<Vec<String>>,
    depth: i32,
}

impl ReplSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying interpreter, exposed for inspection.
    #[must_use]
    pub fn interp(&self) -> &Interp {
        &self.interp
    }

    /// Names bound in the session's local scope, sorted.
    #[must_use]
    pub fn list_variables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.locals.keys().cloned().collect();
        names.sort();
        names
    }

    /// Feeds one input line to the session.
    ///
    /// Returns `Ok(Some(text))` when the line evaluated to a value the REPL
    /// should echo (non-empty and not `"0"`), `Ok(None)` otherwise — in
    /// particular while a brace-balanced block is still being collected.
    pub fn eval_line(&mut self, input: &str, print: &mut impl PrintWriter) -> RunResult<Option<String>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        // Pragma lines toggle Holy-C mode immediately, even mid-block.
        if trimmed.get(..6).is_some_and(|p| p.eq_ignore_ascii_case("#holyc")) {
            if trimmed.contains("on") {
                self.interp.set_holyc_mode(true);
                return Ok(Some("Holy C mode enabled".to_owned()));
            }
            if trimmed.contains("off") {
                self.interp.set_holyc_mode(false);
                return Ok(Some("Holy C mode disabled".to_owned()));
            }
            return Ok(None);
        }

        let tokens: Vec<String> = trimmed.split_whitespace().map(str::to_owned).collect();
        self.depth += brace_delta(&tokens);
        self.pending.push(tokens);
        if self.depth > 0 {
            return Ok(None);
        }
        self.depth = 0;
        let lines = std::mem::take(&mut self.pending);

        if lines.len() == 1 {
            if self.is_statement(&lines[0]) {
                let mut i = 0;
                self.interp.process_line(&lines, &mut i, &mut self.locals, print)?;
                return Ok(None);
            }
            let value = self.interp.eval(trimmed, &mut self.locals, print)?;
            let rendered = value.to_str();
            if rendered.is_empty() || rendered == "0" {
                return Ok(None);
            }
            return Ok(Some(rendered));
        }

        // Multi-line input: definitions go to the registries, leftover
        // statement lines run against the session scope.
        let body = self.interp.load_definitions(&lines, print)?;
        let mut i = 0;
        while i < body.len() {
            self.interp.process_line(&body, &mut i, &mut self.locals, print)?;
            i += 1;
        }
        Ok(None)
    }

    /// Statement-or-expression dispatch for a single line: declarations,
    /// assignments, and the print/thread statements run through the
    /// executor; everything else is evaluated and echoed.
    fn is_statement(&self, tokens: &[String]) -> bool {
        let first = tokens[0].as_str();
        if (is_type_keyword(first) || self.interp.namespaces.is_class(first)) && tokens.len() >= 2 {
            return true;
        }
        if first.eq_ignore_ascii_case("global") || first.eq_ignore_ascii_case("print") || first.starts_with("SplitThread") {
            return true;
        }
        // Holy-C auto-print applies at the prompt too.
        if self.interp.holyc_mode() && tokens.len() == 1 && first.len() >= 2 && first.starts_with('"') && first.ends_with('"') {
            return true;
        }
        tokens.len() >= 2 && matches!(tokens[1].as_str(), "=" | "+=" | "-=" | "*=" | "/=")
    }
}
