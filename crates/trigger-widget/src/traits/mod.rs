//! Host traits
//!
//! The widget never touches the page directly. Everything visible goes
//! through these traits, which the embedding host implements.

pub mod dialog_host;
pub mod navigator;
pub mod notifier;
pub mod page_surface;

pub use dialog_host::DialogHost;
pub use navigator::Navigator;
pub use notifier::{CloseMode, Notification, NotificationKind, Notifier};
pub use page_surface::{Anchor, AnchorKind, PageSurface};

use std::sync::Arc;

/// The host collaborators a widget needs, bundled for cloning into
/// per-button controllers
#[derive(Clone)]
pub struct Host {
    pub surface: Arc<dyn PageSurface>,
    pub dialogs: Arc<dyn DialogHost>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl Host {
    pub fn new(
        surface: Arc<dyn PageSurface>,
        dialogs: Arc<dyn DialogHost>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            surface,
            dialogs,
            notifier,
            navigator,
        }
    }
}
