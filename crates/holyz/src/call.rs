//! The call runtime: argument binding, body execution, return propagation,
//! and instance construction.

use tracing::warn;

use crate::{
    class::ClassMethod,
    error::RunResult,
    expressions::Args,
    io::PrintWriter,
    namespace::Locals,
    run::Interp,
    value::{Instance, Value},
};

impl Interp {
    /// Calls a registered function by name. Arguments bind positionally;
    /// extras are dropped and missing parameters stay unbound.
    pub(crate) fn call_function(&mut self, name: &str, args: Args, print: &mut impl PrintWriter) -> RunResult<Value> {
        let Some(function) = self.namespaces.functions.get(name).cloned() else {
            warn!("function '{name}' is not defined");
            return Ok(Value::Null);
        };
        self.enter_call()?;
        let mut locals = Locals::default();
        for (param, value) in function.params.iter().zip(args) {
            locals.insert(param.clone(), value);
        }
        let result = self.run_body(&function.body, &mut locals, print);
        self.exit_call();
        result
    }

    /// Walks a function or method body from row 1 (row 0 holds the parameter
    /// list), returning the first non-null, non-break value a statement
    /// produces.
    pub(crate) fn run_body(
        &mut self,
        body: &[Vec<String>],
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<Value> {
        let mut i = 1;
        while i < body.len() {
            let ret = self.process_line(body, &mut i, locals, print)?;
            match ret {
                Value::Null => {}
                // A stray break outside any loop ends the body quietly.
                Value::Break => break,
                other => return Ok(other),
            }
            i += 1;
        }
        Ok(Value::Null)
    }

    /// Constructs an instance of `class_name`: attributes seeded from the
    /// class chain's non-static defaults, then the `constructor` method (when
    /// one exists) run through the send machinery.
    pub(crate) fn new_instance(&mut self, class_name: &str, args: Args, print: &mut impl PrintWriter) -> RunResult<Value> {
        let attrs = self.namespaces.seed_attrs(class_name);
        let mut instance = Instance {
            class_name: class_name.to_owned(),
            attrs,
        };
        if let Some(ctor) = self.namespaces.resolve_method(class_name, "constructor") {
            let (updated, _) = self.send_to(instance, &ctor, &args, print)?;
            instance = updated;
        }
        Ok(Value::Instance(instance))
    }

    /// Runs `method` with `instance` installed in the current-`this` slot,
    /// which is restored afterwards. Returns the possibly mutated instance
    /// and the body's return payload.
    pub(crate) fn send_to(
        &mut self,
        instance: Instance,
        method: &ClassMethod,
        args: &[Value],
        print: &mut impl PrintWriter,
    ) -> RunResult<(Instance, Value)> {
        self.enter_call()?;
        let saved = self.current_this.replace(instance);
        let mut locals = Locals::default();
        for (param, value) in method.params.iter().zip(args.iter().cloned()) {
            locals.insert(param.clone(), value);
        }
        let outcome = self.run_body(&method.body, &mut locals, print);
        let instance = self.current_this.take().unwrap_or_else(|| Instance {
            class_name: String::new(),
            attrs: crate::value::Attrs::new(),
        });
        self.current_this = saved;
        self.exit_call();
        let ret = outcome?;
        Ok((instance, ret))
    }
}
