//! Symbol tables shared between the type checker (writer) and the code
//! generator (reader).
//!
//! Member tables are flattened: a class's `members` map holds its own members
//! and every inherited one, each at its offset inside *this* class's object
//! record. Method tables hold own methods only; lookups walk the superclass
//! chain.

use crate::syntax::ast::CompoundType;
use serde::Serialize;
use std::collections::HashMap;

pub const WORD_SIZE: i32 = 4;

/// Offset of the receiver slot in an activation frame.
pub const RECEIVER_OFFSET: i32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableInfo {
    pub ty: CompoundType,
    /// Byte offset; meaning depends on scope: member offsets are relative to
    /// the object record base, parameter offsets are positive and local
    /// offsets negative relative to `%ebp`.
    pub offset: i32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInfo {
    pub return_type: CompoundType,
    /// Declared parameter types, in order.
    pub parameters: Vec<CompoundType>,
    /// Parameters and locals by name.
    pub variables: HashMap<String, VariableInfo>,
    /// Total byte size of the local area, `4 × locals`.
    pub locals_size: u32,
}

impl MethodInfo {
    pub fn parameters_size(&self) -> u32 {
        WORD_SIZE as u32 * self.parameters.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInfo {
    /// `None` for a root class.
    pub superclass: Option<String>,
    pub members: HashMap<String, VariableInfo>,
    /// Own member names in declaration order; subclasses append these when
    /// laying out their records.
    pub member_order: Vec<String>,
    pub methods: HashMap<String, MethodInfo>,
    /// Object record size in bytes, inherited slots included.
    pub members_size: u32,
}

impl ClassInfo {
    pub fn new(superclass: Option<String>) -> Self {
        ClassInfo {
            superclass,
            members: HashMap::new(),
            member_order: Vec::new(),
            methods: HashMap::new(),
            members_size: 0,
        }
    }

    /// Record an own member at `offset`. The first definition of a name wins.
    pub fn define_member(&mut self, name: String, ty: CompoundType, offset: i32) {
        self.member_order.push(name.clone());
        self.members
            .entry(name)
            .or_insert(VariableInfo { ty, offset, size: WORD_SIZE as u32 });
    }

    /// Record an inherited member at `offset` unless the name is shadowed.
    /// The slot is consumed either way.
    pub fn inherit_member(&mut self, name: String, ty: CompoundType, offset: i32) {
        self.members
            .entry(name)
            .or_insert(VariableInfo { ty, offset, size: WORD_SIZE as u32 });
    }
}

/// Map from class name to class record, plus chain-walking lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassTable {
    classes: HashMap<String, ClassInfo>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassInfo> {
        self.classes.get_mut(name)
    }

    pub fn insert(&mut self, name: String, info: ClassInfo) {
        self.classes.insert(name, info);
    }

    pub fn class_names(&self) -> impl Iterator<Item = &String> {
        self.classes.keys()
    }

    /// The class and its ancestors, nearest first.
    pub fn chain<'a>(&'a self, class: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut current = self.classes.get_key_value(class);
        while let Some((name, info)) = current {
            out.push(name.as_str());
            current = info
                .superclass
                .as_deref()
                .and_then(|s| self.classes.get_key_value(s));
        }
        out
    }

    /// Member lookup. Tables are flattened, so one map probe suffices.
    pub fn lookup_member(&self, class: &str, member: &str) -> Option<&VariableInfo> {
        self.classes.get(class)?.members.get(member)
    }

    /// Walk `class` and its ancestors for a method; returns the defining
    /// class alongside the method record (the code generator dispatches to
    /// the defining class, not the root).
    pub fn lookup_method(&self, class: &str, method: &str) -> Option<(&str, &MethodInfo)> {
        for name in self.chain(class) {
            if let Some(info) = self.classes[name].methods.get(method) {
                return Some((name, info));
            }
        }
        None
    }
}
