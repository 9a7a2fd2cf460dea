//! # trigger-widget
//!
//! Server-configured trigger buttons for a pull request page.
//!
//! Each button is described by a [`TriggerButton`](trigger_client::TriggerButton).
//! Pressing one either submits straight away or first shows a dialog with the
//! confirmation text and a generated form, then reports the outcome of every
//! notification the server invoked.
//!
//! ## Design Principles
//!
//! The widget never touches the page directly. The embedding host implements
//! the traits in [`traits`] (page surface, dialogs, notifications, navigation)
//! and the widget drives them. This keeps everything testable with recording
//! doubles and lets the same logic run in a browser shell or a terminal.
//!
//! ## Components
//!
//! - [`form`]: field renderer and form assembler
//! - [`dialog`]: confirmation dialog, resolved exactly once
//! - [`controller`]: per-button click handling and busy state
//! - [`presenter`]: outcome notifications
//! - [`widget`]: mount/unmount, menu and button list
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trigger_widget::{ClickEvent, Host, TriggerWidget, WidgetOptions};
//!
//! let mut widget = TriggerWidget::new(api, host, WidgetOptions::from(&config), page);
//! if widget.mount().await? {
//!     let outcome = widget.click(uuid, &mut ClickEvent::new()).await?;
//! }
//! ```

pub mod controller;
pub mod dialog;
pub mod event;
pub mod form;
pub mod fragment;
pub mod presenter;
pub mod state;
pub mod traits;
pub mod widget;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use controller::{ClickOutcome, TriggerController};
pub use dialog::{open_dialog, should_confirm, DialogId, DialogOutcome, OpenDialog};
pub use event::ClickEvent;
pub use form::{
    assemble_confirmation, assemble_form, render_field, ControlOption, FieldControl, FormError,
    RenderedForm,
};
pub use fragment::{escape_html, unescape_html, Element, Node};
pub use presenter::{outcome_notifications, present, submit_error_notification};
pub use state::{ButtonEvent, ButtonUiState};
pub use traits::{
    Anchor, AnchorKind, CloseMode, DialogHost, Host, Navigator, Notification, NotificationKind,
    Notifier, PageSurface,
};
pub use widget::{TriggerWidget, WidgetError, WidgetOptions};
