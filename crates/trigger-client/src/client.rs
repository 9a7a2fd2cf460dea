//! Trigger API trait and submission errors
//!
//! `TriggerApi` is the seam between the widget and the server. The widget
//! only ever talks to this trait, so tests and alternative hosts can plug in
//! their own implementation.

use crate::types::{PagePath, SubmissionPayload, SubmitResponse, TriggerButton};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors of a trigger submission
///
/// Every variant is terminal for the click that caused it; nothing retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The server answered with a non-2xx status.
    #[error("Server responded with {status}")]
    Status { status: u16, body: String },

    /// No response was received (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl SubmitError {
    /// HTTP status of the failure, `0` when no status was received
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) => 0,
        }
    }
}

/// Trigger button API
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; several buttons may submit
/// concurrently through the same client.
#[async_trait]
pub trait TriggerApi: Send + Sync {
    /// Fetch the buttons configured for a pull request page
    ///
    /// # Arguments
    ///
    /// * `page` - Path of the pull request page
    ///
    /// # Returns
    ///
    /// The buttons in the order the administrators configured them.
    async fn fetch_buttons(&self, page: &PagePath) -> anyhow::Result<Vec<TriggerButton>>;

    /// Press a button on the server
    ///
    /// # Arguments
    ///
    /// * `page` - Path of the pull request page
    /// * `uuid` - Identifier of the pressed button
    /// * `form` - Serialized dialog form, `None` when no form was shown
    ///
    /// # Returns
    ///
    /// The confirmation mode and per-notification outcomes.
    async fn submit(
        &self,
        page: &PagePath,
        uuid: &Uuid,
        form: Option<&SubmissionPayload>,
    ) -> Result<SubmitResponse, SubmitError>;
}
