//! Inference client
//!
//! Serializes the selection and annotations into a [`PositionRequest`], posts
//! it to the counting service and decodes the reply into an
//! [`InferenceResult`]. No retries: a failure is reported once and the
//! caller decides what to show.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::grid::GRID_SIZE;
use crate::protocol::{PositionRequest, PositionResponse};

/// Errors that can occur when asking the service for counts
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned HTTP {0}")]
    Status(StatusCode),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Per-cell coverage counts from one successful request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceResult {
    pub counts: [[u64; GRID_SIZE]; GRID_SIZE],
    pub total: u64,
}

impl TryFrom<PositionResponse> for InferenceResult {
    type Error = InferenceError;

    fn try_from(response: PositionResponse) -> Result<Self, Self::Error> {
        if response.grid_counts.len() != GRID_SIZE {
            return Err(InferenceError::Malformed(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                response.grid_counts.len()
            )));
        }
        let mut counts = [[0; GRID_SIZE]; GRID_SIZE];
        for (r, row) in response.grid_counts.iter().enumerate() {
            counts[r] = row.as_slice().try_into().map_err(|_| {
                InferenceError::Malformed(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    GRID_SIZE
                ))
            })?;
        }
        Ok(Self {
            counts,
            total: response.all_positions_count,
        })
    }
}

/// Trait for counting backends (the HTTP service, or a fake in tests)
#[async_trait]
pub trait InferenceService: Send + Sync {
    async fn request(&self, request: &PositionRequest) -> Result<InferenceResult, InferenceError>;
}

/// Talks to the counting service over HTTP
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/get_positions", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceService for HttpInferenceClient {
    async fn request(&self, request: &PositionRequest) -> Result<InferenceResult, InferenceError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status));
        }

        let body: PositionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Malformed(e.to_string()))?;
        body.try_into()
    }
}

/// Monotonic numbering of sent requests: only the latest may be applied
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
    outstanding: bool,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next outgoing request; it becomes the only current one
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.outstanding = true;
        self.latest
    }

    /// Make every issued request stale without sending a new one
    pub fn supersede(&mut self) {
        self.latest += 1;
        self.outstanding = false;
    }

    /// Record a completion. Returns `true` if it answers the latest request.
    pub fn complete(&mut self, seq: u64) -> bool {
        if seq == self.latest && self.outstanding {
            self.outstanding = false;
            true
        } else {
            false
        }
    }

    /// Whether the latest issued request is still in flight
    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
