//! Active shape selection

use indexmap::IndexSet;
use std::sync::Arc;

use crate::catalog::ShapeCatalog;

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// Not a catalog identifier; nothing changed
    Unknown,
}

/// Selected shape ids, kept in the order they were picked
#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Arc<ShapeCatalog>,
    selected: IndexSet<String>,
}

impl SelectionState {
    pub fn new(catalog: Arc<ShapeCatalog>) -> Self {
        Self {
            catalog,
            selected: IndexSet::new(),
        }
    }

    pub fn toggle(&mut self, shape_id: &str) -> Toggle {
        if !self.catalog.contains(shape_id) {
            return Toggle::Unknown;
        }
        if self.selected.shift_remove(shape_id) {
            Toggle::Removed
        } else {
            self.selected.insert(shape_id.to_string());
            Toggle::Added
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn contains(&self, shape_id: &str) -> bool {
        self.selected.contains(shape_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> SelectionState {
        SelectionState::new(Arc::new(ShapeCatalog::builtin()))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = selection();
        assert_eq!(selection.toggle("T"), Toggle::Added);
        assert!(selection.contains("T"));
        assert_eq!(selection.toggle("T"), Toggle::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_list_keeps_pick_order() {
        let mut selection = selection();
        selection.toggle("p");
        selection.toggle("L");
        selection.toggle("凹");
        selection.toggle("L");
        selection.toggle("L");
        assert_eq!(selection.list(), ["p", "凹", "L"]);
    }

    #[test]
    fn test_unknown_shape_is_ignored() {
        let mut selection = selection();
        selection.toggle("L");
        assert_eq!(selection.toggle("hexagon"), Toggle::Unknown);
        assert_eq!(selection.list(), ["L"]);
    }

    #[test]
    fn test_clear() {
        let mut selection = selection();
        selection.toggle("L");
        selection.toggle("IV");
        selection.clear();
        assert!(selection.list().is_empty());
    }
}
