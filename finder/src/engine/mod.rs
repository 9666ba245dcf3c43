//! Placement-counting engine
//!
//! Enumerates where each catalog shape can sit on the board and counts, per
//! cell, the placements consistent with the player's marks.

pub mod geometry;
pub mod placement;
pub mod types;

pub use placement::PlacementIndex;
pub use types::{Constraints, Coverage, EngineError, PlacementMask};
