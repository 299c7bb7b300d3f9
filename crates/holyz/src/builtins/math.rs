//! `ZS.Math.*` builtins.

use crate::value::Value;

fn first(args: &[Value]) -> &Value {
    args.first().unwrap_or(&Value::Null)
}

pub(super) fn sin(args: &[Value]) -> Value {
    Value::Float(first(args).to_float().sin())
}

pub(super) fn cos(args: &[Value]) -> Value {
    Value::Float(first(args).to_float().cos())
}

pub(super) fn tan(args: &[Value]) -> Value {
    Value::Float(first(args).to_float().tan())
}

/// Absolute value, preserving integer inputs.
pub(super) fn abs(args: &[Value]) -> Value {
    match first(args) {
        Value::Int(i) => Value::Int(i.wrapping_abs()),
        other => Value::Float(other.to_float().abs()),
    }
}

/// Truncates toward zero, like the language's float-to-int cast.
pub(super) fn round(args: &[Value]) -> Value {
    Value::Int(first(args).to_float() as i32)
}

/// Linear interpolation: `a + (b - a) * t`.
pub(super) fn lerp(args: &[Value]) -> Value {
    let a = first(args).to_float();
    let b = args.get(1).unwrap_or(&Value::Null).to_float();
    let t = args.get(2).unwrap_or(&Value::Null).to_float();
    Value::Float(a + (b - a) * t)
}
