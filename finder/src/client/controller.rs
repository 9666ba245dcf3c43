//! Client controller
//!
//! Owns every piece of client state and is the only place it is mutated.
//! A single task drives it: user inputs, debounce triggers and request
//! completions are handled one at a time, and requests run as spawned tasks
//! that report back through a channel. After each handled event the
//! controller publishes a fresh [`ViewState`].

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::catalog::ShapeCatalog;
use crate::grid::Cell;
use crate::protocol::PositionRequest;

use super::annotation::{AnnotationState, Mark};
use super::inference::{InferenceError, InferenceResult, InferenceService, RequestSequence};
use super::render::{GridRenderer, VisualGrid};
use super::scheduler::{RequestScheduler, Trigger};
use super::selection::{SelectionState, Toggle};
use super::status::StatusLine;

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    ToggleShape(String),
    SetMode(Mark),
    ClickCell(Cell),
    Reset,
}

/// A finished request, tagged with the sequence number it was sent under
#[derive(Debug)]
pub struct Completion {
    seq: u64,
    shapes: Vec<String>,
    outcome: Result<InferenceResult, InferenceError>,
}

/// Everything the presentation layer needs to draw the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub grid: VisualGrid,
    pub status: StatusLine,
    pub selection: Vec<String>,
    pub mode: Mark,
    /// A request for the current state is in flight
    pub loading: bool,
}

pub struct Controller {
    catalog: Arc<ShapeCatalog>,
    selection: SelectionState,
    annotations: AnnotationState,
    mode: Mark,
    renderer: GridRenderer,
    status: StatusLine,
    sequence: RequestSequence,
    scheduler: RequestScheduler,
    triggers: mpsc::UnboundedReceiver<Trigger>,
    service: Arc<dyn InferenceService>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    view_tx: watch::Sender<ViewState>,
}

impl Controller {
    pub fn new(
        catalog: Arc<ShapeCatalog>,
        service: Arc<dyn InferenceService>,
        debounce: Duration,
    ) -> Self {
        let (scheduler, triggers) = RequestScheduler::new(debounce);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(ViewState::default());

        Self {
            selection: SelectionState::new(Arc::clone(&catalog)),
            catalog,
            annotations: AnnotationState::new(),
            mode: Mark::default(),
            renderer: GridRenderer::new(),
            status: StatusLine::default(),
            sequence: RequestSequence::new(),
            scheduler,
            triggers,
            service,
            completions_tx,
            completions_rx,
            view_tx,
        }
    }

    pub fn catalog(&self) -> &Arc<ShapeCatalog> {
        &self.catalog
    }

    /// Receive a [`ViewState`] after every handled event
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            grid: self.renderer.grid().clone(),
            status: self.status.clone(),
            selection: self.selection.list(),
            mode: self.mode,
            loading: self.sequence.is_outstanding(),
        }
    }

    pub fn annotations(&self) -> &AnnotationState {
        &self.annotations
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::ToggleShape(id) => match self.selection.toggle(&id) {
                Toggle::Unknown => debug!("Ignoring toggle of unknown shape {}", id),
                toggle => {
                    debug!(?toggle, "Shape {} toggled", id);
                    self.scheduler.notify();
                }
            },
            Input::SetMode(mode) => {
                self.mode = mode;
            }
            Input::ClickCell(cell) => {
                let status = self.annotations.mark(cell, self.mode);
                debug!(?status, "Cell {} marked", cell);
                self.renderer.apply_annotations(&self.annotations);
                self.scheduler.notify();
            }
            Input::Reset => {
                self.annotations.reset();
                self.selection.clear();
                self.scheduler.cancel();
                self.sequence.supersede();
                self.renderer.reset_all();
                self.status = StatusLine::Reset;
                info!("User input reset");
            }
        }
        self.publish();
    }

    /// Handle a debounce trigger. Returns the sequence number of the request
    /// it sent, if any.
    pub fn handle_trigger(&mut self, trigger: Trigger) -> Option<u64> {
        if !self.scheduler.accept(trigger) {
            return None;
        }

        if self.selection.is_empty() {
            // Nothing to count; a reply for an earlier selection must not land
            self.sequence.supersede();
            self.renderer.reset_all();
            self.renderer.apply_annotations(&self.annotations);
            self.status = StatusLine::EmptySelection;
            self.publish();
            return None;
        }

        let snapshot = self.annotations.snapshot();
        let request =
            PositionRequest::new(self.selection.list(), &snapshot.treasure, &snapshot.empty);
        let seq = self.sequence.issue();
        debug!(seq, shapes = ?request.shapes, "Sending position request");
        self.dispatch(seq, request);
        self.publish();
        Some(seq)
    }

    /// Apply a completion if it answers the latest request. Returns whether
    /// it was applied.
    pub fn handle_completion(&mut self, completion: Completion) -> bool {
        let Completion {
            seq,
            shapes,
            outcome,
        } = completion;

        if !self.sequence.complete(seq) {
            debug!(seq, latest = self.sequence.latest(), "Discarding stale response");
            return false;
        }

        match outcome {
            Ok(result) => {
                info!(seq, total = result.total, "Applied placement counts");
                self.status = StatusLine::Summary {
                    shapes,
                    total: result.total,
                };
                self.renderer.apply_result(&self.annotations, result);
            }
            Err(e) => {
                warn!(seq, "Position request failed: {}", e);
                self.status = StatusLine::RequestFailed;
            }
        }
        self.publish();
        true
    }

    /// Wait for the next debounce trigger or request completion and handle it
    pub async fn process_next(&mut self) {
        tokio::select! {
            Some(trigger) = self.triggers.recv() => {
                self.handle_trigger(trigger);
            }
            Some(completion) = self.completions_rx.recv() => {
                self.handle_completion(completion);
            }
            else => {}
        }
    }

    /// Event loop: runs until the input channel closes
    pub async fn run(mut self, mut inputs: mpsc::Receiver<Input>) {
        self.publish();
        loop {
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(input) => self.handle_input(input),
                    None => break,
                },
                Some(trigger) = self.triggers.recv() => {
                    self.handle_trigger(trigger);
                }
                Some(completion) = self.completions_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
        }
        info!("Controller stopped");
    }

    fn dispatch(&self, seq: u64, request: PositionRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = service.request(&request).await;
            let _ = tx.send(Completion {
                seq,
                shapes: request.shapes,
                outcome,
            });
        });
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}
