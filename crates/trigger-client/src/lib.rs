//! Trigger button REST client
//!
//! This crate provides the wire types of the trigger button admin resource
//! and a trait-based client for it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               TriggerApi trait                   │
//! │  - fetch_buttons()   GET  .../fromPR<page>       │
//! │  - submit()          POST .../fromUUID<page>/... │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌───────────────────┐
//!              │ HttpTriggerClient │
//!              │ (reqwest)         │
//!              └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use trigger_client::{HttpTriggerClient, PagePath, TriggerApi};
//! use trigger_config::AppConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpTriggerClient::from_config(&AppConfig::load())?;
//! let page = PagePath::new("/projects/PRJ/repos/repo/pull-requests/1/overview");
//!
//! for button in client.fetch_buttons(&page).await? {
//!     println!("{} ({})", button.name, button.uuid);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod http_client;
pub mod types;

pub use client::{SubmitError, TriggerApi};
pub use http_client::HttpTriggerClient;
pub use types::{
    FieldKind, FieldValue, FormField, FormOption, OnOrOff, PagePath, SubmissionPayload,
    SubmitRequest, SubmitResponse, TriggerButton, TriggerOutcome,
};

// Re-export uuid so consumers don't need to depend on it directly
pub use uuid::Uuid;
