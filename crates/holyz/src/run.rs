//! The interpreter context and script entry points.

use crate::{
    error::{RunError, RunResult},
    heap::Heap,
    io::PrintWriter,
    namespace::{Locals, Namespaces},
    parse,
    value::{Instance, Value},
};

/// Ceiling on nested script function calls. The language itself is unbounded,
/// but runaway recursion must not overflow the host stack.
pub(crate) const MAX_CALL_DEPTH: usize = 200;

/// An interpreter instance: the global registries, the simulated heap, the
/// Holy-C mode flag, and the current-`this` slot for method bodies.
///
/// All state is process-internal and lives only for the lifetime of the
/// value. The interpreter is single-threaded; a host embedding it from
/// several threads must serialise access externally.
#[derive(Debug, Default)]
pub struct Interp {
    pub(crate) namespaces: Namespaces,
    pub(crate) heap: Heap,
    pub(crate) holyc_mode: bool,
    pub(crate) current_this: Option<Instance>,
    pub(crate) call_depth: usize,
}

impl Interp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a complete script: a definition-loading pre-pass populates the
    /// registries, then the statement executor walks the remaining top-level
    /// lines in order.
    pub fn run_script(&mut self, source: &str, print: &mut impl PrintWriter) -> RunResult<()> {
        let lines = parse::split_lines(source);
        let body = self.load_definitions(&lines, print)?;
        let mut locals = Locals::default();
        let mut i = 0;
        while i < body.len() {
            self.process_line(&body, &mut i, &mut locals, print)?;
            i += 1;
        }
        Ok(())
    }

    /// Evaluates a single expression against a throwaway local scope.
    ///
    /// Convenience for embedders and tests; the REPL keeps its own persistent
    /// locals instead.
    pub fn eval_expression(&mut self, expr: &str, print: &mut impl PrintWriter) -> RunResult<Value> {
        let mut locals = Locals::default();
        self.eval(expr, &mut locals, print)
    }

    /// Reads a global variable, if bound.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.namespaces.globals.get(name)
    }

    /// Whether Holy-C mode (auto-print of bare string-literal statements) is
    /// currently active.
    #[must_use]
    pub fn holyc_mode(&self) -> bool {
        self.holyc_mode
    }

    /// Enables or disables Holy-C mode.
    pub fn set_holyc_mode(&mut self, enabled: bool) {
        self.holyc_mode = enabled;
    }

    /// The simulated heap, exposed for inspection.
    #[must_use]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub(crate) fn enter_call(&mut self) -> RunResult<()> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RunError::RecursionLimit { depth: self.call_depth });
        }
        self.call_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth -= 1;
    }
}
