//! Allocation output: the register table

use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// Where a virtual register ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Placement {
    /// Assigned a physical register, identified by its name
    Allocated(String),
    /// Assigned a spill slot at the given stack byte offset
    Spilled(u64),
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Allocated(name) => write!(f, "{}", name),
            Placement::Spilled(offset) => write!(f, "[{:04x}]", offset),
        }
    }
}

/// One register's placement within its function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterTableEntry {
    /// The owning function's name
    pub function: String,
    /// The register's display name (its id rendered as text, e.g. `%-1`)
    pub name: String,
    /// The assigned placement
    pub placement: Placement,
}

/// Ordered mapping from virtual registers to placements, one entry per
/// register actually referenced.
///
/// Entries are grouped by function in item order; within a function they
/// are sorted by register id ascending. Identical input IR and an identical
/// physical-register list always produce an identical table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterTable {
    /// All entries, in deterministic order
    pub entries: Vec<RegisterTableEntry>,
}

impl RegisterTable {
    /// Look up a register's placement by function and display name
    pub fn get(&self, function: &str, name: &str) -> Option<&Placement> {
        self.entries
            .iter()
            .find(|e| e.function == function && e.name == name)
            .map(|e| &e.placement)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no registers were allocated
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the table as pretty-printed JSON for tooling
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RegisterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_fn: Option<&str> = None;
        for entry in &self.entries {
            if current_fn != Some(entry.function.as_str()) {
                writeln!(f, "{}:", entry.function)?;
                current_fn = Some(&entry.function);
            }
            writeln!(f, "  {}: {}", entry.name, entry.placement)?;
        }
        Ok(())
    }
}
