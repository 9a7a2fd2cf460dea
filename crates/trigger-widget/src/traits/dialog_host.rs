//! Trait for presenting modal dialogs.

use crate::dialog::{DialogId, OpenDialog};

/// Presents modal dialogs on the page.
///
/// The host takes ownership of the [`OpenDialog`] in [`DialogHost::show`] and
/// resolves it later by calling [`OpenDialog::submit`] or
/// [`OpenDialog::close`] when the user picks an action. Both consume the
/// dialog, so at most one action can fire per instance. Dropping the dialog
/// without an action counts as closing it.
pub trait DialogHost: Send + Sync {
    /// Show a dialog.
    fn show(&self, dialog: OpenDialog);

    /// Remove a hidden dialog from the page.
    ///
    /// Called once per dialog after it was resolved, whichever action fired.
    fn remove(&self, id: DialogId);
}
