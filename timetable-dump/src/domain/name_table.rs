//! Deduplicating, insertion-ordered string table.

use std::collections::HashMap;

/// A list of distinct names where each name keeps the index it was first
/// inserted at.
///
/// Line-type names, street names and legend texts are all shared across a
/// whole dump and referenced by index from the tree.
///
/// # Examples
///
/// ```
/// use timetable_dump::domain::NameTable;
///
/// let mut table = NameTable::default();
/// assert_eq!(table.intern("BUS"), 0);
/// assert_eq!(table.intern("TRAM"), 1);
/// assert_eq!(table.intern("BUS"), 0);
/// assert_eq!(table.into_names(), ["BUS", "TRAM"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl NameTable {
    /// Returns the index of `name`, appending it if it is new.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the table and returns the names in insertion order.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
