//! Class, trait, and trait-impl definition records.

use indexmap::IndexMap;

use crate::value::{Attrs, Value};

/// A declared instance or static attribute with its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAttr {
    pub name: String,
    pub default_value: Value,
    pub is_static: bool,
}

/// A method: name, positional parameters, and the tokenised body.
///
/// Row 0 of `body` is the header line; execution starts at row 1, like a
/// function body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub is_static: bool,
}

/// A user-defined class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub superclass: Option<String>,
    pub attributes: Vec<ClassAttr>,
    pub methods: Vec<ClassMethod>,
    /// Class-level attribute storage, shared by all instances and reachable
    /// as `ClassName.attr`.
    pub static_attrs: IndexMap<String, Value>,
}

/// A declared trait shape. Stored for lookup; nothing dispatches through the
/// declaration itself.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitDef {
    pub name: String,
    pub body: Vec<Vec<String>>,
}

/// A trait implementation block: methods attached to a type through
/// `impl TRAIT for TYPE`.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitImpl {
    pub trait_name: String,
    pub type_name: String,
    pub methods: Vec<ClassMethod>,
}

impl ClassDef {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            superclass: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            static_attrs: IndexMap::new(),
        }
    }

    /// Non-static defaults of this class alone, in declaration order.
    pub(crate) fn seed_own_attrs(&self, attrs: &mut Attrs) {
        for attr in &self.attributes {
            if !attr.is_static {
                attrs.insert(attr.name.clone(), attr.default_value.clone());
            }
        }
    }
}
