//! Per-function name binding table

use std::collections::HashMap;

use crate::error::{Error, Result};

use super::instruction::Label;

/// What a name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// An integer, typically a register id
    Int(i32),
    /// A label identity (auxiliary metadata)
    Label(Label),
}

/// Symbol table binding source names to register ids or label identities.
///
/// Binding an already-bound key is rejected with
/// [`Error::DuplicateBinding`]; lookups return `None` for unbound keys
/// rather than a sentinel value.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    entries: HashMap<String, Binding>,
}

impl NameTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to an integer value
    pub fn bind_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.bind(name, Binding::Int(value))
    }

    /// Bind `name` to a label identity
    pub fn bind_label(&mut self, name: &str, label: Label) -> Result<()> {
        self.bind(name, Binding::Label(label))
    }

    /// Look up the integer bound to `name`
    pub fn lookup_int(&self, name: &str) -> Option<i32> {
        match self.entries.get(name) {
            Some(Binding::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Look up the label bound to `name`
    pub fn lookup_label(&self, name: &str) -> Option<Label> {
        match self.entries.get(name) {
            Some(Binding::Label(l)) => Some(*l),
            _ => None,
        }
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bind(&mut self, name: &str, binding: Binding) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(Error::DuplicateBinding {
                name: name.to_string(),
            });
        }
        self.entries.insert(name.to_string(), binding);
        Ok(())
    }
}
