//! Precomputed placement index and constrained coverage counting

use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::{ShapeCatalog, ShapeKind};

use super::geometry::{rigid_placements, segment_pair_placements};
use super::types::{Constraints, Coverage, EngineError, PlacementMask};

/// Every on-board placement of every catalog shape, enumerated once
#[derive(Debug, Clone)]
pub struct PlacementIndex {
    placements: IndexMap<String, Vec<PlacementMask>>,
}

impl PlacementIndex {
    pub fn build(catalog: &ShapeCatalog) -> Self {
        let placements = catalog
            .iter()
            .map(|shape| {
                let masks = match shape.kind {
                    ShapeKind::Rigid => rigid_placements(&shape.offsets),
                    ShapeKind::Segments { long, short } => segment_pair_placements(long, short),
                };
                debug!("Indexed shape {}: {} placements", shape.id, masks.len());
                (shape.id.clone(), masks)
            })
            .collect();
        Self { placements }
    }

    pub fn placements(&self, shape_id: &str) -> Option<&[PlacementMask]> {
        self.placements.get(shape_id).map(Vec::as_slice)
    }

    /// Count, per cell, the admitted placements of the given shapes.
    ///
    /// Shapes are counted independently and summed; a shape listed twice is
    /// counted twice.
    pub fn count(
        &self,
        shapes: &[String],
        constraints: Constraints,
    ) -> Result<Coverage, EngineError> {
        let mut coverage = Coverage::default();
        for id in shapes {
            let masks = self
                .placements(id)
                .ok_or_else(|| EngineError::UnknownShape(id.clone()))?;
            masks
                .iter()
                .copied()
                .filter(|&mask| constraints.admits(mask))
                .for_each(|mask| coverage.add(mask));
        }
        Ok(coverage)
    }
}
