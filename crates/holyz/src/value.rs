use std::ops::{Add, Div, Mul, Sub};

use indexmap::IndexMap;
use strum::{Display, EnumString, IntoStaticStr};
use tracing::warn;

/// Ordered attribute map of a class instance.
///
/// Insertion order is preserved so attribute iteration is deterministic.
pub type Attrs = IndexMap<String, Value>;

/// Primary value type manipulated by the interpreter.
///
/// Values are value-typed: assignments copy, nothing is aliased by identity.
/// The only indirection in the language is the simulated heap, addressed
/// through [`Pointer`] handles.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Sentinel for uninitialised, missing, and void-returning operations.
    #[default]
    Null,
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
    /// Handle into the simulated heap.
    Pointer(Pointer),
    /// Rust-style success-or-error sum.
    Result(ResultValue),
    /// Rust-style optional sum.
    Option(OptionValue),
    /// User-defined class instance.
    Instance(Instance),
    /// Two-component float vector.
    Vec2(Vec2),
    /// Executor-internal sentinel propagating `break` out of an `if` up to the
    /// enclosing `while`. Not constructible from the language.
    Break,
}

/// Simulated heap handle: an opaque address plus the type name of the value
/// it was allocated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    pub address: u64,
    pub pointed_type: String,
}

/// Payload of a `Result` value: `Ok(v)` or `Err(message, kind)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Ok(Box<Value>),
    Err { message: String, kind: String },
}

/// Payload of an `Option` value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Some(Box<Value>),
    None,
}

/// Runtime object: the defining class name plus this instance's own
/// attribute map, seeded from the class's non-static defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub class_name: String,
    pub attrs: Attrs,
}

/// Two-component float vector, the one aggregate the assignment operators
/// understand natively.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Canonical runtime type names, as reported by `typeof` and used by
/// `typecheck`/`istype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Type {
    #[strum(serialize = "null")]
    Null,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "string")]
    Str,
    #[strum(serialize = "Pointer")]
    Pointer,
    #[strum(serialize = "Result")]
    Result,
    #[strum(serialize = "Option")]
    Option,
    #[strum(serialize = "object")]
    Object,
    #[strum(serialize = "Vec2")]
    Vec2,
}

impl Value {
    /// Canonical runtime type of this value.
    #[must_use]
    pub fn type_of(&self) -> Type {
        match self {
            Self::Null | Self::Break => Type::Null,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Bool(_) => Type::Bool,
            Self::Str(_) => Type::Str,
            Self::Pointer(_) => Type::Pointer,
            Self::Result(_) => Type::Result,
            Self::Option(_) => Type::Option,
            Self::Instance(_) => Type::Object,
            Self::Vec2(_) => Type::Vec2,
        }
    }

    /// True for the scalar tags the compound assignment operators treat as
    /// simple values.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Int(_) | Self::Float(_) | Self::Bool(_) | Self::Str(_)
        )
    }

    /// Best-effort conversion to `bool`.
    ///
    /// Only `true`, the string `"true"`, the float `1.0`, and the int `1`
    /// convert to true; a value outside the coercion chain warns and yields
    /// false.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Str(s) => s == "true",
            Self::Float(f) => *f == 1.0,
            Self::Int(i) => *i == 1,
            other => {
                warn!("invalid conversion from {} to type 'bool'", other.type_of());
                false
            }
        }
    }

    /// Best-effort conversion to a display string. Aggregates outside the
    /// coercion chain warn and yield an empty string.
    #[must_use]
    pub fn to_str(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => if *b { "true" } else { "false" }.to_owned(),
            other => {
                warn!("invalid conversion from {} to type 'string'", other.type_of());
                String::new()
            }
        }
    }

    /// Best-effort conversion to `float`. Unparsable strings and aggregates
    /// warn and yield zero.
    #[must_use]
    pub fn to_float(&self) -> f32 {
        match self {
            Self::Null => 0.0,
            Self::Float(f) => *f,
            Self::Int(i) => *i as f32,
            Self::Str(s) => s.trim().parse().unwrap_or_else(|_| {
                warn!("invalid conversion from string to type 'float'");
                0.0
            }),
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            other => {
                warn!("invalid conversion from {} to type 'float'", other.type_of());
                0.0
            }
        }
    }

    /// Best-effort conversion to `int`, truncating floats. Strings are parsed
    /// as int first, then as float.
    #[must_use]
    pub fn to_int(&self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Int(i) => *i,
            Self::Float(f) => *f as i32,
            Self::Str(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i32>() {
                    i
                } else if let Ok(f) = trimmed.parse::<f32>() {
                    f as i32
                } else {
                    warn!("invalid conversion from string to type 'int'");
                    0
                }
            }
            Self::Bool(b) => i32::from(*b),
            other => {
                warn!("invalid conversion from {} to type 'int'", other.type_of());
                0
            }
        }
    }

    /// Best-effort conversion to `Vec2`: numbers splat into both components.
    #[must_use]
    pub fn to_vec2(&self) -> Vec2 {
        match self {
            Self::Vec2(v) => *v,
            Self::Float(f) => Vec2::new(*f, *f),
            Self::Int(i) => Vec2::new(*i as f32, *i as f32),
            other => {
                warn!("invalid conversion from {} to type 'Vec2'", other.type_of());
                Vec2::default()
            }
        }
    }

    /// Dynamic equality: equal when both are null, when a shared scalar tag
    /// compares equal, or when one side parses to the other's tag.
    /// Symmetric by construction.
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f32 == *b,
            (Self::Bool(a), Self::Int(b)) | (Self::Int(b), Self::Bool(a)) => i32::from(*a) == *b,
            (Self::Bool(a), Self::Float(b)) | (Self::Float(b), Self::Bool(a)) => f32::from(u8::from(*a)) == *b,
            (Self::Str(s), Self::Int(i)) | (Self::Int(i), Self::Str(s)) => s.trim().parse::<i32>() == Ok(*i),
            (Self::Str(s), Self::Float(f)) | (Self::Float(f), Self::Str(s)) => s.trim().parse::<f32>() == Ok(*f),
            (Self::Str(s), Self::Bool(b)) | (Self::Bool(b), Self::Str(s)) => {
                (s == "true" && *b) || (s == "false" && !*b)
            }
            (Self::Pointer(a), Self::Pointer(b)) => a.address == b.address,
            (Self::Result(a), Self::Result(b)) => a == b,
            (Self::Option(a), Self::Option(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => a == b,
            (Self::Vec2(a), Self::Vec2(b)) => a == b,
            _ => false,
        }
    }
}

/// Type keywords accepted at declaration position.
pub(crate) const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "string", "bool", "void", "null", "Pointer", "Sprite", "Vec2", "Text", "Result", "Option", "I8",
    "U8", "I16", "U16", "I32", "U32", "I64", "U64", "F64", "U0",
];

/// True when `token` is one of the declaration type keywords
/// (case-insensitive, like every keyword in the language).
pub(crate) fn is_type_keyword(token: &str) -> bool {
    TYPE_KEYWORDS.iter().any(|t| t.eq_ignore_ascii_case(token))
}

/// Zero value for a declared type keyword, used for class attributes without
/// an explicit default.
pub(crate) fn zero_of(type_keyword: &str) -> Value {
    const INT_WIDTHS: &[&str] = &["int", "I8", "U8", "I16", "U16", "I32", "U32", "I64", "U64"];
    if type_keyword.eq_ignore_ascii_case("float") || type_keyword.eq_ignore_ascii_case("F64") {
        Value::Float(0.0)
    } else if type_keyword.eq_ignore_ascii_case("bool") {
        Value::Bool(false)
    } else if type_keyword.eq_ignore_ascii_case("string") {
        Value::Str(String::new())
    } else if type_keyword.eq_ignore_ascii_case("Vec2") {
        Value::Vec2(Vec2::default())
    } else if INT_WIDTHS.iter().any(|t| t.eq_ignore_ascii_case(type_keyword)) {
        Value::Int(0)
    } else {
        Value::Null
    }
}
