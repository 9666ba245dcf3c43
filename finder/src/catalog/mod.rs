//! Shape catalog
//!
//! Static registry of the shapes a treasure can take. The catalog is built
//! once at startup and shared read-only (`Arc<ShapeCatalog>`) by the client
//! and the counting service.

use indexmap::IndexMap;
use serde::Serialize;

/// How a shape's offsets are interpreted when it is placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// The offsets are one fixed pattern, rotated and translated as a whole
    Rigid,
    /// Two straight segments placed independently anywhere on the board
    Segments { long: usize, short: usize },
}

/// A shape footprint before any rotation is applied
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    pub id: String,
    /// Relative (row, col) offsets
    pub offsets: Vec<(i32, i32)>,
    pub kind: ShapeKind,
    pub description: String,
}

impl Shape {
    fn rigid(id: &str, offsets: &[(i32, i32)], description: &str) -> Self {
        Self {
            id: id.to_string(),
            offsets: offsets.to_vec(),
            kind: ShapeKind::Rigid,
            description: description.to_string(),
        }
    }
}

/// Ordered, immutable set of shapes keyed by identifier
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: IndexMap<String, Shape>,
}

impl ShapeCatalog {
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        Self {
            shapes: shapes.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// The eight shapes of the puzzle, in picklist order
    pub fn builtin() -> Self {
        Self::new([
            Shape::rigid(
                "L",
                &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)],
                "Four cells in a column with one cell extending sideways at the foot",
            ),
            Shape::rigid(
                "T",
                &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)],
                "Three cells in a row with a two-cell stem below the middle",
            ),
            Shape::rigid(
                "IV",
                &[(0, 0), (1, 0), (1, 1), (0, 2), (1, 3)],
                "A two-cell upright packed against a three-cell zigzag",
            ),
            Shape::rigid(
                "∠",
                &[(0, 0), (1, 0), (2, 0), (1, 1), (0, 2)],
                "An acute angle: a three-cell column, a middle cell and a tip",
            ),
            Shape::rigid(
                "∟",
                &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)],
                "A right angle with two equal three-cell arms",
            ),
            Shape::rigid(
                "p",
                &[(0, 0), (1, 0), (2, 0), (1, 1), (2, 1)],
                "A three-cell column with a two-cell bowl beside its lower half",
            ),
            Shape::rigid(
                "凹",
                &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)],
                "A three-cell bar with a notch: two legs hang from its ends",
            ),
            Shape {
                id: "独立双线段".to_string(),
                offsets: vec![(0, 0), (1, 0), (2, 0), (3, 3), (4, 3)],
                kind: ShapeKind::Segments { long: 3, short: 2 },
                description: "Two unconnected straight segments of three and two cells, \
                              each anywhere on the board"
                    .to_string(),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shape at a zero-based picklist position
    pub fn get_index(&self, index: usize) -> Option<&Shape> {
        self.shapes.get_index(index).map(|(_, shape)| shape)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = ShapeCatalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["L", "T", "IV", "∠", "∟", "p", "凹", "独立双线段"]);
    }

    #[test]
    fn test_every_shape_has_five_cells() {
        for shape in ShapeCatalog::builtin().iter() {
            assert_eq!(shape.offsets.len(), 5, "shape {} footprint", shape.id);
        }
    }

    #[test]
    fn test_lookup_by_id_and_index() {
        let catalog = ShapeCatalog::builtin();
        assert!(catalog.contains("T"));
        assert!(!catalog.contains("Z"));
        assert_eq!(catalog.get_index(0).map(|s| s.id.as_str()), Some("L"));
        assert!(catalog.get_index(catalog.len()).is_none());
        assert_eq!(
            catalog.get("独立双线段").map(|s| s.kind),
            Some(ShapeKind::Segments { long: 3, short: 2 })
        );
    }
}
