//! Circuit name directory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry::CircuitEntry;

/// Map from simulator element index to directory entry.
///
/// Iteration follows the order in which indices were first inserted, which is
/// the order of the listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    entries: IndexMap<u32, CircuitEntry>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A repeated index replaces the old entry in place.
    pub fn insert(&mut self, index: u32, entry: CircuitEntry) -> Option<CircuitEntry> {
        self.entries.insert(index, entry)
    }

    /// Get an entry by index.
    pub fn get(&self, index: u32) -> Option<&CircuitEntry> {
        self.entries.get(&index)
    }

    /// Get a mutable entry by index.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut CircuitEntry> {
        self.entries.get_mut(&index)
    }

    /// Iterate over `(index, entry)` in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CircuitEntry)> {
        self.entries.iter().map(|(index, entry)| (*index, entry))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u32, CircuitEntry)> for Directory {
    fn from_iter<I: IntoIterator<Item = (u32, CircuitEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ElementKind;

    fn entry(name: &str, kind: ElementKind) -> CircuitEntry {
        CircuitEntry::new(name, kind, 1.0)
    }

    #[test]
    fn test_new_directory_is_empty() {
        let dir = Directory::new();
        assert!(dir.is_empty());
        assert_eq!(dir.len(), 0);
        assert!(dir.get(0).is_none());
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut dir = Directory::new();
        dir.insert(30, entry("c", ElementKind::Via));
        dir.insert(4, entry("a", ElementKind::Edge));
        dir.insert(17, entry("b", ElementKind::Via));

        let order: Vec<u32> = dir.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![30, 4, 17]);
    }

    #[test]
    fn test_duplicate_index_is_last_write_wins() {
        let mut dir = Directory::new();
        dir.insert(1, entry("first", ElementKind::Via));
        dir.insert(2, entry("other", ElementKind::Via));
        let old = dir.insert(1, entry("second", ElementKind::Tsv));

        assert_eq!(old.map(|e| e.instance), Some("first".to_string()));
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.get(1).unwrap().instance, "second");
        assert_eq!(dir.iter().next().unwrap().0, 1);
    }

    #[test]
    fn test_get_mut() {
        let mut dir: Directory = [(5, entry("e", ElementKind::Edge))].into_iter().collect();
        dir.get_mut(5).unwrap().apply(0.1, 0.2, 0.02);
        assert_eq!(dir.get(5).unwrap().current(), 0.2);
    }
}
