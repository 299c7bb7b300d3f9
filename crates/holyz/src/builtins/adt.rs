//! The Result/Option builtins.

use tracing::warn;

use crate::{
    parse::string_raw,
    value::{OptionValue, ResultValue, Value},
};

pub(super) fn ok(args: &[Value]) -> Value {
    let payload = args.first().cloned().unwrap_or(Value::Null);
    Value::Result(ResultValue::Ok(Box::new(payload)))
}

pub(super) fn err(args: &[Value]) -> Value {
    let message = args
        .first()
        .map_or_else(|| "Unknown error".to_owned(), |v| string_raw(&v.to_str()));
    let kind = args.get(1).map_or_else(|| "Error".to_owned(), |v| string_raw(&v.to_str()));
    Value::Result(ResultValue::Err { message, kind })
}

pub(super) fn is_ok(args: &[Value]) -> Value {
    Value::Bool(matches!(args.first(), Some(Value::Result(ResultValue::Ok(_)))))
}

pub(super) fn is_err(args: &[Value]) -> Value {
    match args.first() {
        None => Value::Bool(true),
        Some(Value::Result(ResultValue::Err { .. })) => Value::Bool(true),
        Some(_) => Value::Bool(false),
    }
}

/// Unwraps an `Ok` payload; unwrapping an `Err` warns and yields null.
pub(super) fn unwrap(args: &[Value]) -> Value {
    match args.first() {
        Some(Value::Result(ResultValue::Ok(payload))) => (**payload).clone(),
        Some(Value::Result(ResultValue::Err { message, .. })) => {
            warn!("unwrap called on Err: {message}");
            Value::Null
        }
        _ => Value::Null,
    }
}

/// Like [`unwrap`], with a caller-supplied failure message.
pub(super) fn expect(args: &[Value]) -> Value {
    match args.first() {
        Some(Value::Result(ResultValue::Ok(payload))) => (**payload).clone(),
        Some(Value::Result(ResultValue::Err { message, .. })) => {
            let msg = args.get(1).map_or_else(|| message.clone(), |v| string_raw(&v.to_str()));
            warn!("expect failed: {msg}");
            Value::Null
        }
        _ => Value::Null,
    }
}

pub(super) fn unwrap_or(args: &[Value]) -> Value {
    let default = || args.get(1).cloned().unwrap_or(Value::Null);
    match args.first() {
        Some(Value::Result(ResultValue::Ok(payload))) => (**payload).clone(),
        Some(Value::Result(ResultValue::Err { .. })) => default(),
        Some(_) => default(),
        None => Value::Null,
    }
}

pub(super) fn some(args: &[Value]) -> Value {
    match args.first() {
        Some(payload) => Value::Option(OptionValue::Some(Box::new(payload.clone()))),
        None => Value::Option(OptionValue::None),
    }
}

pub(super) fn none(_args: &[Value]) -> Value {
    Value::Option(OptionValue::None)
}

pub(super) fn is_some(args: &[Value]) -> Value {
    Value::Bool(matches!(args.first(), Some(Value::Option(OptionValue::Some(_)))))
}

pub(super) fn is_none(args: &[Value]) -> Value {
    match args.first() {
        None => Value::Bool(true),
        Some(Value::Option(OptionValue::Some(_))) => Value::Bool(false),
        Some(Value::Option(OptionValue::None)) => Value::Bool(true),
        Some(_) => Value::Bool(true),
    }
}
