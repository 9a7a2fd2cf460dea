//! Widget state
//!
//! Per-button UI state and the reducer that moves it.

pub mod button_state;

pub use button_state::{reduce_button_state, ButtonEvent, ButtonUiState};
