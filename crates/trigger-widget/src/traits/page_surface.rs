//! Trait for the page area the widget injects itself into.

use crate::fragment::Node;
use crate::state::ButtonUiState;
use trigger_client::Uuid;

/// Page elements the widget can attach itself after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// The pull request merge button
    MergeButton,
    /// The edit pull request button, shown when merging is not possible
    EditPullRequest,
}

/// An existing page element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub kind: AnchorKind,
    /// The element's class list
    pub classes: Vec<String>,
}

impl Anchor {
    pub fn new(kind: AnchorKind, classes: Vec<String>) -> Self {
        Self { kind, classes }
    }

    /// First generated theme class (`css-...`) of the anchor
    ///
    /// Carried over to the injected toggle so it matches the host buttons.
    pub fn theme_class(&self) -> Option<&str> {
        self.classes
            .iter()
            .map(String::as_str)
            .find(|class| class.starts_with("css-"))
    }
}

/// The page area owned by a mounted widget.
pub trait PageSurface: Send + Sync {
    /// Look up an anchor element, if the page has one.
    fn find_anchor(&self, kind: AnchorKind) -> Option<Anchor>;

    /// Insert the (hidden) menu right after `anchor`.
    fn inject_menu(&self, anchor: &Anchor, menu: Node);

    /// Append one trigger list item to the menu.
    fn append_button(&self, uuid: Uuid, item: Node);

    fn set_menu_visible(&self, visible: bool);

    /// Report the menu's `aria-expanded` state.
    fn set_menu_expanded(&self, expanded: bool);

    /// Reflect a button's disabled/busy state on its element.
    fn set_button_state(&self, uuid: Uuid, state: ButtonUiState);

    /// Remove everything injected by [`PageSurface::inject_menu`].
    fn remove_menu(&self);
}
