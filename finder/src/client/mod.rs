//! Interactive client core
//!
//! This module provides:
//! - `AnnotationState` and `SelectionState`, the player's input
//! - `RequestScheduler`, debouncing edits into counting requests
//! - `InferenceService` trait and the HTTP `HttpInferenceClient`
//! - `GridRenderer`, projecting state onto per-cell visuals
//! - `Controller`, the single owner driving all of the above
//! - a terminal front end over the controller's view

pub mod annotation;
pub mod controller;
pub mod inference;
pub mod render;
pub mod scheduler;
pub mod selection;
pub mod status;
pub mod terminal;

pub use annotation::{AnnotationSnapshot, AnnotationState, CellStatus, Mark};
pub use controller::{Controller, Input, ViewState};
pub use inference::{
    HttpInferenceClient, InferenceError, InferenceResult, InferenceService, RequestSequence,
};
pub use render::{CellVisual, GridRenderer, VisualGrid, project};
pub use scheduler::{RequestScheduler, Trigger};
pub use selection::{SelectionState, Toggle};
pub use status::StatusLine;
