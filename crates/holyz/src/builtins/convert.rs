//! Conversion and reflection builtins.

use crate::{parse::string_raw, value::Value};

fn first(args: &[Value]) -> &Value {
    args.first().unwrap_or(&Value::Null)
}

pub(super) fn to_int(args: &[Value]) -> Value {
    Value::Int(first(args).to_int())
}

pub(super) fn to_float(args: &[Value]) -> Value {
    Value::Float(first(args).to_float())
}

pub(super) fn to_str(args: &[Value]) -> Value {
    Value::Str(first(args).to_str())
}

pub(super) fn to_bool(args: &[Value]) -> Value {
    Value::Bool(first(args).to_bool())
}

/// Canonical type name of the argument, `"null"` when called bare.
pub(super) fn type_of(args: &[Value]) -> Value {
    Value::Str(args.first().map_or_else(|| "null".to_owned(), |v| v.type_of().to_string()))
}

/// `typecheck(type_name, value)` — true when the value's canonical type name
/// matches the expected name exactly.
pub(super) fn type_check(args: &[Value]) -> Value {
    if args.len() < 2 {
        return Value::Bool(false);
    }
    let expected = string_raw(&args[0].to_str());
    let actual = args[1].type_of().to_string();
    Value::Bool(actual == expected)
}
