//! Simulated-heap builtins: `malloc`, `free`, `addressof`, `deref`,
//! `setvalue`.

use tracing::warn;

use crate::{run::Interp, value::Value};

pub(super) fn malloc(interp: &mut Interp, args: &[Value]) -> Value {
    let Some(value) = args.first() else {
        return Value::Null;
    };
    Value::Pointer(interp.heap.allocate(value.clone()))
}

pub(super) fn free(interp: &mut Interp, args: &[Value]) -> Value {
    match args.first() {
        Some(Value::Pointer(ptr)) => {
            interp.heap.free(ptr);
            Value::Bool(true)
        }
        Some(_) => {
            warn!("free() requires a pointer argument");
            Value::Bool(false)
        }
        None => Value::Null,
    }
}

pub(super) fn deref(interp: &Interp, args: &[Value]) -> Value {
    match args.first() {
        Some(Value::Pointer(ptr)) => interp.heap.deref(ptr),
        Some(_) => {
            warn!("deref() requires a pointer argument");
            Value::Null
        }
        None => Value::Null,
    }
}

pub(super) fn set_value(interp: &mut Interp, args: &[Value]) -> Value {
    if args.len() < 2 {
        return Value::Null;
    }
    match &args[0] {
        Value::Pointer(ptr) => Value::Bool(interp.heap.write(ptr, args[1].clone())),
        _ => {
            warn!("setvalue() requires a pointer and value argument");
            Value::Bool(false)
        }
    }
}
