//! Object messaging: `send`, `hasmethod`, `getmethod`.
//!
//! Method dispatch is messaging, not vtable lookup: the method is resolved
//! by string name against the receiver's class (then its superclass chain,
//! then trait impls) on every send.

use tracing::warn;

use crate::{
    class::ClassMethod,
    error::RunResult,
    io::PrintWriter,
    parse::string_raw,
    run::Interp,
    value::Value,
};

fn resolve(interp: &Interp, class_name: &str, method_name: &str) -> Option<ClassMethod> {
    interp
        .namespaces
        .resolve_method(class_name, method_name)
        .or_else(|| interp.namespaces.resolve_trait_method(class_name, method_name))
}

/// `send(instance, "method", ...args)` — binds `this`, binds parameters
/// positionally, runs the body, restores `this`, and yields the final return
/// payload (or true when the body returned nothing).
pub(super) fn send(interp: &mut Interp, args: &[Value], print: &mut impl PrintWriter) -> RunResult<Value> {
    if args.len() < 2 {
        return Ok(Value::Null);
    }
    let Value::Instance(instance) = &args[0] else {
        warn!("send() requires an object as first argument");
        return Ok(Value::Bool(false));
    };
    let method_name = string_raw(&args[1].to_str());
    let Some(method) = resolve(interp, &instance.class_name, &method_name) else {
        warn!("method '{method_name}' not found in class '{}'", instance.class_name);
        return Ok(Value::Bool(false));
    };
    let (_, ret) = interp.send_to(instance.clone(), &method, &args[2..], print)?;
    Ok(if ret == Value::Null { Value::Bool(true) } else { ret })
}

pub(super) fn has_method(interp: &Interp, args: &[Value]) -> Value {
    if args.len() < 2 {
        return Value::Bool(false);
    }
    let Value::Instance(instance) = &args[0] else {
        return Value::Bool(false);
    };
    let method_name = string_raw(&args[1].to_str());
    Value::Bool(resolve(interp, &instance.class_name, &method_name).is_some())
}

pub(super) fn get_method(interp: &Interp, args: &[Value]) -> Value {
    if args.len() < 2 {
        return Value::Null;
    }
    let Value::Instance(instance) = &args[0] else {
        return Value::Null;
    };
    let method_name = string_raw(&args[1].to_str());
    match resolve(interp, &instance.class_name, &method_name) {
        Some(method) => Value::Str(method.name),
        None => Value::Null,
    }
}
