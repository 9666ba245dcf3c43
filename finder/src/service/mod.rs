//! Reference placement-counting service
//!
//! This module provides:
//! - `PositionAppState` holding the catalog and its precomputed placements
//! - HTTP routes for counting placements and listing shapes

pub mod routes;

pub use routes::{PositionAppState, ShapeListItem, position_routes};
