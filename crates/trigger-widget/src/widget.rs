//! Trigger widget
//!
//! Owns everything the widget adds to a pull request page: the menu toggle
//! injected after the merge (or edit) button, the list of trigger buttons and
//! one [`TriggerController`] per button.
//!
//! Reloading only needs `&self`, so clicks keep routing while a reload waits
//! on the refresh delay or the network.

use crate::controller::{ClickOutcome, TriggerController};
use crate::event::ClickEvent;
use crate::fragment::{Element, Node};
use crate::traits::{Anchor, AnchorKind, Host};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use trigger_client::{PagePath, TriggerApi, TriggerButton, Uuid};
use trigger_config::AppConfig;

/// Anchors tried in order when mounting
const ANCHOR_PREFERENCE: [AnchorKind; 2] = [AnchorKind::MergeButton, AnchorKind::EditPullRequest];

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Widget is not mounted")]
    NotMounted,

    #[error("No trigger button matches {0:?}")]
    UnknownTrigger(String),

    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}

/// Timing and labels of a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOptions {
    pub min_busy: Duration,
    pub refresh_delay: Duration,
    pub menu_label: String,
}

impl From<&AppConfig> for WidgetOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            min_busy: config.min_busy(),
            refresh_delay: config.refresh_delay(),
            menu_label: config.menu_label.clone(),
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

pub struct TriggerWidget {
    api: Arc<dyn TriggerApi>,
    host: Host,
    options: WidgetOptions,
    page: PagePath,
    anchor: Option<Anchor>,
    controllers: Mutex<Vec<Arc<TriggerController>>>,
    menu_expanded: bool,
}

impl TriggerWidget {
    pub fn new(
        api: Arc<dyn TriggerApi>,
        host: Host,
        options: WidgetOptions,
        page: PagePath,
    ) -> Self {
        Self {
            api,
            host,
            options,
            page,
            anchor: None,
            controllers: Mutex::new(Vec::new()),
            menu_expanded: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn page(&self) -> &PagePath {
        &self.page
    }

    fn lock_controllers(&self) -> MutexGuard<'_, Vec<Arc<TriggerController>>> {
        self.controllers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Controllers in the order their buttons were appended
    pub fn controllers(&self) -> Vec<Arc<TriggerController>> {
        self.lock_controllers().clone()
    }

    pub fn buttons(&self) -> Vec<TriggerButton> {
        self.lock_controllers()
            .iter()
            .map(|c| c.button().clone())
            .collect()
    }

    pub fn menu_expanded(&self) -> bool {
        self.menu_expanded
    }

    /// Inject the menu and load the buttons
    ///
    /// Returns `false` when the page has no anchor to attach to; the widget
    /// then stays unmounted and nothing is fetched.
    pub async fn mount(&mut self) -> Result<bool, WidgetError> {
        if self.is_mounted() {
            log::warn!("Widget already mounted on {}", self.page);
            return Ok(true);
        }

        let Some(anchor) = ANCHOR_PREFERENCE
            .iter()
            .find_map(|kind| self.host.surface.find_anchor(*kind))
        else {
            log::info!("No anchor on {}, not mounting", self.page);
            return Ok(false);
        };

        log::debug!("Mounting widget after {:?}", anchor.kind);
        let menu = menu_template(&self.options.menu_label, anchor.theme_class());
        self.host.surface.inject_menu(&anchor, menu);
        self.anchor = Some(anchor);

        self.load_buttons().await?;
        Ok(true)
    }

    /// Fetch the buttons and append them to the menu
    ///
    /// The list only ever grows: reloading appends every fetched button
    /// again, even when it is already shown. Returns the number of buttons
    /// appended.
    pub async fn load_buttons(&self) -> Result<usize, WidgetError> {
        if !self.is_mounted() {
            return Err(WidgetError::NotMounted);
        }

        let buttons = self.api.fetch_buttons(&self.page).await?;
        log::info!("Loaded {} trigger buttons for {}", buttons.len(), self.page);

        let count = buttons.len();
        let mut controllers = self.lock_controllers();
        for button in buttons {
            self.host
                .surface
                .append_button(button.uuid, button_template(&button.name));
            controllers.push(Arc::new(TriggerController::new(
                button,
                self.page.clone(),
                self.api.clone(),
                self.host.clone(),
                self.options.min_busy,
            )));
        }
        drop(controllers);

        if count > 0 {
            self.host.surface.set_menu_visible(true);
        }
        Ok(count)
    }

    /// A reviewer approved the pull request; buttons may have become
    /// available, so reload them after the refresh delay
    pub async fn on_approval(&self) -> Result<usize, WidgetError> {
        log::debug!(
            "Approval on {}, reloading in {:?}",
            self.page,
            self.options.refresh_delay
        );
        tokio::time::sleep(self.options.refresh_delay).await;
        self.load_buttons().await
    }

    /// Click on the menu toggle
    pub fn toggle_menu(&mut self, event: &mut ClickEvent) {
        if self.menu_expanded {
            self.collapse_menu(event);
        } else {
            event.prevent_default();
            self.set_expanded(true);
        }
    }

    /// The menu toggle lost focus
    pub fn collapse_menu(&mut self, event: &mut ClickEvent) {
        event.prevent_default();
        event.stop_propagation();
        self.set_expanded(false);
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.menu_expanded = expanded;
        self.host.surface.set_menu_expanded(expanded);
    }

    pub fn controller(&self, uuid: Uuid) -> Option<Arc<TriggerController>> {
        self.lock_controllers()
            .iter()
            .find(|c| c.uuid() == uuid)
            .cloned()
    }

    /// First controller whose uuid or exact name is `needle`
    pub fn find(&self, needle: &str) -> Option<Arc<TriggerController>> {
        let uuid = Uuid::parse_str(needle).ok();
        self.lock_controllers()
            .iter()
            .find(|c| Some(c.uuid()) == uuid || c.button().name == needle)
            .cloned()
    }

    /// Route a click to the controller of `uuid`
    pub async fn click(
        &self,
        uuid: Uuid,
        event: &mut ClickEvent,
    ) -> Result<ClickOutcome, WidgetError> {
        let controller = self
            .controller(uuid)
            .ok_or_else(|| WidgetError::UnknownTrigger(uuid.to_string()))?;
        Ok(controller.on_click(event).await)
    }

    /// Remove the menu and drop every controller
    ///
    /// Submissions already in flight still finish on their own controller.
    pub fn unmount(&mut self) {
        if self.anchor.take().is_none() {
            return;
        }
        log::debug!("Unmounting widget from {}", self.page);
        self.host.surface.remove_menu();
        self.lock_controllers().clear();
        self.menu_expanded = false;
    }
}

fn menu_template(label: &str, theme_class: Option<&str>) -> Node {
    let mut toggle = Element::new("button")
        .id("prNotifierActualButton")
        .attr("tabindex", "0")
        .text(label);
    if let Some(class) = theme_class {
        toggle = toggle.class(class);
    }

    Element::new("div")
        .id("prNotifierButton")
        .attr("style", "display:none;")
        .child(toggle)
        .child(
            Element::new("div")
                .id("prNotifierMenu")
                .attr("aria-expanded", "false")
                .child(Element::new("ul").id("prNotifierUL")),
        )
        .into()
}

fn button_template(name: &str) -> Node {
    Element::new("li")
        .child(Element::new("button").class("prnfb-button").text(name))
        .into()
}
