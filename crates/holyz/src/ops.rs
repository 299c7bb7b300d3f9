//! Two-operand comparison and the assignment operators.

use tracing::warn;

use crate::{
    error::RunResult,
    io::PrintWriter,
    namespace::Locals,
    parse::join_tokens,
    run::Interp,
    value::Value,
};

/// Comparator tokens accepted by block predicates.
pub(crate) const COMPARATORS: &[&str] = &["==", "!=", ">=", "<=", ">", "<"];

impl Interp {
    /// Evaluates both operands and applies the comparator.
    ///
    /// Equality uses dynamic value equality; ordering coerces both sides to
    /// float. An empty comparator tests the truthiness of the left operand,
    /// and an unknown comparator warns and yields false.
    pub(crate) fn bool_op(
        &mut self,
        a: &str,
        cmp: &str,
        b: &str,
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<bool> {
        let val_a = if a.trim().is_empty() {
            Value::Null
        } else {
            self.eval(a, locals, print)?
        };
        let val_b = if b.trim().is_empty() {
            Value::Null
        } else {
            self.eval(b, locals, print)?
        };
        Ok(match cmp {
            "==" => val_a.loose_eq(&val_b),
            "!=" => !val_a.loose_eq(&val_b),
            ">=" => val_a.to_float() >= val_b.to_float(),
            "<=" => val_a.to_float() <= val_b.to_float(),
            ">" => val_a.to_float() > val_b.to_float(),
            "<" => val_a.to_float() < val_b.to_float(),
            "" => val_a.to_bool(),
            other => {
                warn!("unrecognized comparer '{other}'");
                false
            }
        })
    }

    /// Applies `NAME op RHS` to a bound variable, writing back to whichever
    /// map (locals or globals) the value came from.
    pub(crate) fn var_op(&mut self, tokens: &[String], locals: &mut Locals, print: &mut impl PrintWriter) -> RunResult<()> {
        let name = tokens[0].clone();
        let Some(op) = tokens.get(1).cloned() else {
            warn!("missing operator after '{name}'");
            return Ok(());
        };
        let rhs = join_tokens(tokens.get(2..).unwrap_or(&[]));

        let in_locals = locals.contains_key(&name);
        let in_globals = self.namespaces.globals.contains_key(&name);
        if !in_locals && !in_globals {
            warn!("uninitialized variable or typo in '{name}'");
            return Ok(());
        }
        let current = if in_locals {
            locals.get(&name).cloned().unwrap_or_default()
        } else {
            self.namespaces.globals.get(&name).cloned().unwrap_or_default()
        };

        let new_value = if current.is_scalar() {
            match op.as_str() {
                "=" => self.eval(&rhs, locals, print)?,
                // The full evaluator handles `lhs + (rhs)` so string
                // concatenation keeps working through `+=`.
                "+=" => self.eval(&format!("{name}+({rhs})"), locals, print)?,
                "-=" => Value::Float(current.to_float() - self.eval(&rhs, locals, print)?.to_float()),
                "*=" => Value::Float(current.to_float() * self.eval(&rhs, locals, print)?.to_float()),
                "/=" => Value::Float(current.to_float() / self.eval(&rhs, locals, print)?.to_float()),
                other => {
                    warn!("unrecognized operator '{other}'");
                    return Ok(());
                }
            }
        } else if let Value::Vec2(v) = current {
            let rhs_value = self.eval(&rhs, locals, print)?;
            match op.as_str() {
                "=" => rhs_value,
                "+=" => Value::Vec2(v + rhs_value.to_vec2()),
                "-=" => Value::Vec2(v - rhs_value.to_vec2()),
                "*=" => Value::Vec2(v * rhs_value.to_float()),
                "/=" => Value::Vec2(v / rhs_value.to_float()),
                other => {
                    warn!("unrecognized operator '{other}'");
                    return Ok(());
                }
            }
        } else {
            // Other aggregates only support replacement.
            if op == "=" {
                self.eval(&rhs, locals, print)?
            } else {
                warn!("cannot apply '{op}' to a {}", current.type_of());
                return Ok(());
            }
        };

        if in_locals {
            locals.insert(name, new_value);
        } else {
            self.namespaces.globals.insert(name, new_value);
        }
        Ok(())
    }

    /// Applies `BASE.FIELD op RHS`: mutation of an attribute of `this`, a
    /// class static attribute, or a field of an aggregate-valued variable.
    pub(crate) fn dotted_op(
        &mut self,
        tokens: &[String],
        locals: &mut Locals,
        print: &mut impl PrintWriter,
    ) -> RunResult<()> {
        let target = tokens[0].clone();
        let Some(op) = tokens.get(1).cloned() else {
            warn!("missing operator after '{target}'");
            return Ok(());
        };
        let rhs = join_tokens(tokens.get(2..).unwrap_or(&[]));
        let rhs_value = self.eval(&rhs, locals, print)?;

        let Some((base, rest)) = target.split_once('.') else {
            return Ok(());
        };
        let field = rest.split('.').next().unwrap_or(rest).to_owned();

        if base == "this" {
            let Some(instance) = self.current_this.as_mut() else {
                warn!("'this' used outside of a method");
                return Ok(());
            };
            let slot = instance.attrs.entry(field).or_insert(Value::Null);
            apply_field_op(slot, &op, &rhs_value);
            return Ok(());
        }

        if self.namespaces.is_class(base) {
            match self.namespaces.static_attr_owner(base, &field) {
                Some(owner) => {
                    if let Some(slot) = self
                        .namespaces
                        .classes
                        .get_mut(&owner)
                        .and_then(|class| class.static_attrs.get_mut(&field))
                    {
                        apply_field_op(slot, &op, &rhs_value);
                    }
                }
                None => warn!("unknown static attribute '{field}' on class '{base}'"),
            }
            return Ok(());
        }

        let slot = if locals.contains_key(base) {
            locals.get_mut(base)
        } else {
            self.namespaces.globals.get_mut(base)
        };
        let Some(slot) = slot else {
            warn!("uninitialized variable or typo in '{base}'");
            return Ok(());
        };
        match slot {
            Value::Instance(instance) => {
                let cell = instance.attrs.entry(field).or_insert(Value::Null);
                apply_field_op(cell, &op, &rhs_value);
            }
            Value::Vec2(v) => {
                let component = match field.as_str() {
                    "x" => &mut v.x,
                    "y" => &mut v.y,
                    _ => {
                        warn!("unknown Vec2 component '{field}'");
                        return Ok(());
                    }
                };
                apply_float_op(component, &op, &rhs_value);
            }
            other => warn!("value of type {} has no sub-components", other.type_of()),
        }
        Ok(())
    }
}

/// True for strings that would survive the evaluator's rewrite as text
/// rather than as a number.
fn is_text(value: &Value) -> bool {
    matches!(value, Value::Str(s) if s.trim().parse::<f32>().is_err())
}

/// Compound-assignment arithmetic on an attribute slot. `+=` concatenates
/// when either side is non-numeric text; integer slots stay integral when
/// the operand is.
fn apply_field_op(slot: &mut Value, op: &str, rhs: &Value) {
    match op {
        "=" => *slot = rhs.clone(),
        "+=" => {
            if is_text(slot) || is_text(rhs) {
                *slot = Value::Str(format!("{}{}", slot.to_str(), rhs.to_str()));
            } else {
                *slot = numeric(slot, rhs, |a, b| a + b);
            }
        }
        "-=" => *slot = numeric(slot, rhs, |a, b| a - b),
        "*=" => *slot = numeric(slot, rhs, |a, b| a * b),
        "/=" => *slot = Value::Float(slot.to_float() / rhs.to_float()),
        other => warn!("unrecognized operator '{other}'"),
    }
}

fn numeric(slot: &Value, rhs: &Value, op: impl Fn(f32, f32) -> f32) -> Value {
    let result = op(slot.to_float(), rhs.to_float());
    if matches!(slot, Value::Int(_)) && result.fract() == 0.0 && result >= i32::MIN as f32 && result <= i32::MAX as f32 {
        Value::Int(result as i32)
    } else {
        Value::Float(result)
    }
}

fn apply_float_op(component: &mut f32, op: &str, rhs: &Value) {
    let r = rhs.to_float();
    match op {
        "=" => *component = r,
        "+=" => *component += r,
        "-=" => *component -= r,
        "*=" => *component *= r,
        "/=" => *component /= r,
        other => warn!("unrecognized operator '{other}'"),
    }
}
