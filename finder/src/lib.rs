//! Treasure Finder Library
//!
//! This module exports the interactive client core, the shape catalog and the
//! reference placement-counting service, for use by the binaries and the
//! integration tests.

pub mod catalog;
pub mod client;
pub mod config;
pub mod engine;
pub mod grid;
pub mod protocol;
pub mod service;

// Re-export commonly used types
pub use catalog::{Shape, ShapeCatalog, ShapeKind};
pub use client::{Controller, HttpInferenceClient, InferenceService};
pub use grid::{Cell, GRID_SIZE};
pub use protocol::{PositionRequest, PositionResponse};
pub use service::{PositionAppState, position_routes};
