//! Recording doubles for the API and host traits

use crate::dialog::{DialogId, OpenDialog};
use crate::fragment::Node;
use crate::state::ButtonUiState;
use crate::traits::{
    Anchor, AnchorKind, DialogHost, Host, Navigator, Notification, Notifier, PageSurface,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trigger_client::{
    PagePath, SubmissionPayload, SubmitError, SubmitResponse, TriggerApi, TriggerButton, Uuid,
};

/// Mock API returning canned buttons and a canned submission result
pub struct MockApi {
    buttons: Mutex<Vec<TriggerButton>>,
    response: Mutex<Result<SubmitResponse, SubmitError>>,
    latency: Duration,
    fetch_count: Mutex<usize>,
    submissions: Mutex<Vec<(Uuid, Option<SubmissionPayload>)>>,
}

impl MockApi {
    pub fn new(buttons: Vec<TriggerButton>) -> Self {
        Self {
            buttons: Mutex::new(buttons),
            response: Mutex::new(Ok(SubmitResponse::default())),
            latency: Duration::ZERO,
            fetch_count: Mutex::new(0),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(self, response: Result<SubmitResponse, SubmitError>) -> Self {
        *self.response.lock().unwrap() = response;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_buttons(&self, buttons: Vec<TriggerButton>) {
        *self.buttons.lock().unwrap() = buttons;
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }

    pub fn submissions(&self) -> Vec<(Uuid, Option<SubmissionPayload>)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl TriggerApi for MockApi {
    async fn fetch_buttons(&self, _page: &PagePath) -> anyhow::Result<Vec<TriggerButton>> {
        *self.fetch_count.lock().unwrap() += 1;
        Ok(self.buttons.lock().unwrap().clone())
    }

    async fn submit(
        &self,
        _page: &PagePath,
        uuid: &Uuid,
        form: Option<&SubmissionPayload>,
    ) -> Result<SubmitResponse, SubmitError> {
        self.submissions
            .lock()
            .unwrap()
            .push((*uuid, form.cloned()));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Page surface recording every call
#[derive(Default)]
pub struct RecordingSurface {
    pub anchors: Vec<Anchor>,
    pub injected: Mutex<Vec<(AnchorKind, Node)>>,
    pub items: Mutex<Vec<(Uuid, Node)>>,
    pub visible: Mutex<Vec<bool>>,
    pub expanded: Mutex<Vec<bool>>,
    pub states: Mutex<Vec<(Uuid, ButtonUiState)>>,
    pub removed: Mutex<usize>,
}

impl RecordingSurface {
    pub fn with_anchor(kind: AnchorKind, classes: &[&str]) -> Self {
        Self {
            anchors: vec![Anchor::new(
                kind,
                classes.iter().map(|c| c.to_string()).collect(),
            )],
            ..Self::default()
        }
    }

    pub fn states_of(&self, uuid: Uuid) -> Vec<ButtonUiState> {
        self.states
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == uuid)
            .map(|(_, state)| *state)
            .collect()
    }
}

impl PageSurface for RecordingSurface {
    fn find_anchor(&self, kind: AnchorKind) -> Option<Anchor> {
        self.anchors.iter().find(|a| a.kind == kind).cloned()
    }

    fn inject_menu(&self, anchor: &Anchor, menu: Node) {
        self.injected.lock().unwrap().push((anchor.kind, menu));
    }

    fn append_button(&self, uuid: Uuid, item: Node) {
        self.items.lock().unwrap().push((uuid, item));
    }

    fn set_menu_visible(&self, visible: bool) {
        self.visible.lock().unwrap().push(visible);
    }

    fn set_menu_expanded(&self, expanded: bool) {
        self.expanded.lock().unwrap().push(expanded);
    }

    fn set_button_state(&self, uuid: Uuid, state: ButtonUiState) {
        self.states.lock().unwrap().push((uuid, state));
    }

    fn remove_menu(&self) {
        *self.removed.lock().unwrap() += 1;
    }
}

/// What [`ScriptedDialogs`] does with a shown dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Submit,
    Close,
}

/// Dialog host resolving every dialog with a fixed action
pub struct ScriptedDialogs {
    action: DialogAction,
    pub shown: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<DialogId>>,
}

impl ScriptedDialogs {
    pub fn new(action: DialogAction) -> Self {
        Self {
            action,
            shown: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }
}

impl DialogHost for ScriptedDialogs {
    fn show(&self, dialog: OpenDialog) {
        self.shown.lock().unwrap().push(dialog.fragment().to_html());
        match self.action {
            DialogAction::Submit => dialog.submit(),
            DialogAction::Close => dialog.close(),
        }
    }

    fn remove(&self, id: DialogId) {
        self.removed.lock().unwrap().push(id);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.shown.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_string());
    }
}

/// All recording doubles of one test, plus the [`Host`] bundling them
pub struct Fixture {
    pub api: Arc<MockApi>,
    pub surface: Arc<RecordingSurface>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Fixture {
    pub fn new(api: MockApi, surface: RecordingSurface, action: DialogAction) -> Self {
        Self {
            api: Arc::new(api),
            surface: Arc::new(surface),
            dialogs: Arc::new(ScriptedDialogs::new(action)),
            notifier: Arc::new(RecordingNotifier::default()),
            navigator: Arc::new(RecordingNavigator::default()),
        }
    }

    pub fn host(&self) -> Host {
        Host::new(
            self.surface.clone(),
            self.dialogs.clone(),
            self.notifier.clone(),
            self.navigator.clone(),
        )
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.shown.lock().unwrap().clone()
    }
}
