//! Process-wide name registries and the per-frame locals map.

use ahash::AHashMap;

use crate::{
    class::{ClassDef, ClassMethod, TraitDef, TraitImpl},
    function::Function,
    value::{Attrs, Value},
};

/// Per-call-frame name-to-value map. Lookup order everywhere is
/// locals → globals → literal.
pub type Locals = AHashMap<String, Value>;

/// The interpreter's global tables: variables, functions, classes, and
/// traits. One instance lives inside each interpreter context.
#[derive(Debug, Default)]
pub struct Namespaces {
    pub globals: AHashMap<String, Value>,
    pub functions: AHashMap<String, Function>,
    pub classes: AHashMap<String, ClassDef>,
    pub traits: AHashMap<String, TraitDef>,
    pub trait_impls: Vec<TraitImpl>,
}

impl Namespaces {
    pub(crate) fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub(crate) fn is_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Non-static default attributes of `class_name`, superclass defaults
    /// first so subclass declarations override them.
    pub(crate) fn seed_attrs(&self, class_name: &str) -> Attrs {
        let mut chain = Vec::new();
        let mut current = Some(class_name.to_owned());
        while let Some(name) = current {
            let Some(class) = self.classes.get(&name) else { break };
            current = class.superclass.clone();
            chain.push(name);
        }
        let mut attrs = Attrs::new();
        for name in chain.iter().rev() {
            if let Some(class) = self.classes.get(name) {
                class.seed_own_attrs(&mut attrs);
            }
        }
        attrs
    }

    /// Resolves a method by name: the class's own methods, then the
    /// superclass chain, then trait-impl methods for any class in the chain.
    pub(crate) fn resolve_method(&self, class_name: &str, method_name: &str) -> Option<ClassMethod> {
        let mut current = Some(class_name.to_owned());
        while let Some(name) = current {
            let class = self.classes.get(&name)?;
            if let Some(method) = class.methods.iter().find(|m| m.name == method_name) {
                return Some(method.clone());
            }
            current = class.superclass.clone();
        }
        None
    }

    /// Trait-impl fallback: the first matching method among `impl ... for`
    /// blocks targeting `class_name` or any of its superclasses.
    pub(crate) fn resolve_trait_method(&self, class_name: &str, method_name: &str) -> Option<ClassMethod> {
        let mut current = Some(class_name.to_owned());
        while let Some(name) = current {
            for imp in &self.trait_impls {
                if imp.type_name == name {
                    if let Some(method) = imp.methods.iter().find(|m| m.name == method_name) {
                        return Some(method.clone());
                    }
                }
            }
            current = self.classes.get(&name).and_then(|c| c.superclass.clone());
        }
        None
    }

    /// Reads a static attribute, recursing into the superclass chain.
    pub(crate) fn static_attr(&self, class_name: &str, field: &str) -> Option<Value> {
        let mut current = Some(class_name.to_owned());
        while let Some(name) = current {
            let class = self.classes.get(&name)?;
            if let Some(value) = class.static_attrs.get(field) {
                return Some(value.clone());
            }
            current = class.superclass.clone();
        }
        None
    }

    /// Name of the class in the chain that owns static attribute `field`.
    pub(crate) fn static_attr_owner(&self, class_name: &str, field: &str) -> Option<String> {
        let mut current = Some(class_name.to_owned());
        while let Some(name) = current {
            let class = self.classes.get(&name)?;
            if class.static_attrs.contains_key(field) {
                return Some(name);
            }
            current = class.superclass.clone();
        }
        None
    }
}
