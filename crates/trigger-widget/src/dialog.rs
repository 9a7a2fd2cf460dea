//! Dialog controller
//!
//! Decides whether a button needs a confirmation dialog, builds the dialog
//! from the confirmation text and the assembled form, and turns the user's
//! choice into a [`DialogOutcome`].
//!
//! Resolution is single-shot by construction: [`OpenDialog::submit`] and
//! [`OpenDialog::close`] consume the dialog and complete a oneshot channel
//! the controller awaits.

use crate::form::{assemble_confirmation, assemble_form, RenderedForm};
use crate::fragment::{Element, Node};
use crate::traits::DialogHost;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use trigger_client::{SubmissionPayload, TriggerButton};

static NEXT_DIALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one dialog instance on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    fn next() -> Self {
        Self(NEXT_DIALOG_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

/// How a dialog ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Submit action: the serialized form
    Submitted(SubmissionPayload),
    /// Close action (or the host dropped the dialog)
    Cancelled,
}

/// Whether pressing `button` needs a dialog first
pub fn should_confirm(button: &TriggerButton) -> bool {
    button
        .confirmation_text
        .as_deref()
        .is_some_and(|text| !text.is_empty())
        || !button.form.is_empty()
}

/// A dialog handed to the host for display
pub struct OpenDialog {
    id: DialogId,
    title: String,
    confirmation: Option<String>,
    fragment: Node,
    form: Option<RenderedForm>,
    resolver: oneshot::Sender<DialogOutcome>,
}

impl OpenDialog {
    /// Build the dialog for `button` and the receiver of its outcome
    pub fn build(button: &TriggerButton) -> (Self, oneshot::Receiver<DialogOutcome>) {
        let (resolver, outcome) = oneshot::channel();
        let confirmation = assemble_confirmation(button.confirmation_text.as_deref());
        let form = assemble_form(&button.form);

        let content = Element::new("div")
            .class("aui-dialog2-content")
            .children(confirmation)
            .children(form.as_ref().map(|f| f.fragment().clone()));

        let fragment = dialog_template(&button.name, content).into();

        let dialog = Self {
            id: DialogId::next(),
            title: button.name.clone(),
            confirmation: button.confirmation_text.clone().filter(|t| !t.is_empty()),
            fragment,
            form,
            resolver,
        };
        (dialog, outcome)
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    /// Unescaped dialog title (the button name)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unescaped confirmation text, if any
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    /// Full dialog markup
    pub fn fragment(&self) -> &Node {
        &self.fragment
    }

    pub fn form(&self) -> Option<&RenderedForm> {
        self.form.as_ref()
    }

    /// The form, for reporting user edits
    pub fn form_mut(&mut self) -> Option<&mut RenderedForm> {
        self.form.as_mut()
    }

    /// Submit action: serialize the form and resolve the dialog
    pub fn submit(self) {
        let payload = self
            .form
            .as_ref()
            .map(RenderedForm::serialize)
            .unwrap_or_default();
        log::debug!("{} submitted with {} values", self.id, payload.len());
        self.resolve(DialogOutcome::Submitted(payload));
    }

    /// Close action: resolve the dialog as cancelled
    pub fn close(self) {
        log::debug!("{} closed", self.id);
        self.resolve(DialogOutcome::Cancelled);
    }

    fn resolve(self, outcome: DialogOutcome) {
        if self.resolver.send(outcome).is_err() {
            log::warn!("{} resolved after its controller went away", self.id);
        }
    }
}

impl fmt::Debug for OpenDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenDialog")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

/// Show the dialog for `button` and wait for the user's choice
///
/// The dialog is removed from the page once it resolved, whichever action
/// fired.
pub async fn open_dialog(button: &TriggerButton, host: &dyn DialogHost) -> DialogOutcome {
    let (dialog, outcome) = OpenDialog::build(button);
    let id = dialog.id();

    log::debug!("Opening {} for trigger {}", id, button.uuid);
    host.show(dialog);

    let outcome = outcome.await.unwrap_or_else(|_| {
        log::debug!("{} dropped by host without an action", id);
        DialogOutcome::Cancelled
    });

    host.remove(id);
    outcome
}

fn dialog_template(name: &str, content: Element) -> Element {
    let header = Element::new("header")
        .class("aui-dialog2-header")
        .child(
            Element::new("h2")
                .class("aui-dialog2-header-main")
                .text(name),
        )
        .child(
            Element::new("a").class("aui-dialog2-header-close").child(
                Element::new("span")
                    .class("aui-icon")
                    .class("aui-icon-small")
                    .class("aui-iconfont-close-dialog")
                    .text("Close"),
            ),
        );

    let footer = Element::new("footer").class("aui-dialog2-footer").child(
        Element::new("div")
            .class("aui-dialog2-footer-actions")
            .child(
                Element::new("button")
                    .id("dialog-submit-button")
                    .class("aui-button")
                    .class("aui-button-primary")
                    .text(name),
            )
            .child(
                Element::new("button")
                    .id("dialog-close-button")
                    .class("aui-button")
                    .class("aui-button-link")
                    .text("Close"),
            ),
    );

    Element::new("section")
        .attr("role", "dialog")
        .class("aui-layer")
        .class("aui-dialog2")
        .class("aui-dialog2-medium")
        .attr("data-aui-remove-on-hide", "true")
        .attr("aria-hidden", "true")
        .child(header)
        .child(content)
        .child(footer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use trigger_client::{FieldKind, FormField, FormOption, Uuid};

    /// What the recording host does with a shown dialog
    enum Script {
        Submit,
        Close,
        Drop,
        CheckThenSubmit(&'static str, &'static str),
    }

    struct RecordingDialogHost {
        script: Script,
        shown: Mutex<Vec<(DialogId, String)>>,
        removed: Mutex<Vec<DialogId>>,
    }

    impl RecordingDialogHost {
        fn new(script: Script) -> Self {
            Self {
                script,
                shown: Mutex::new(Vec::new()),
                removed: Mutex::new(Vec::new()),
            }
        }
    }

    impl DialogHost for RecordingDialogHost {
        fn show(&self, mut dialog: OpenDialog) {
            self.shown
                .lock()
                .unwrap()
                .push((dialog.id(), dialog.fragment().to_html()));
            match self.script {
                Script::Submit => dialog.submit(),
                Script::Close => dialog.close(),
                Script::Drop => drop(dialog),
                Script::CheckThenSubmit(field, option) => {
                    dialog
                        .form_mut()
                        .unwrap()
                        .set_checked(field, option, true)
                        .unwrap();
                    dialog.submit();
                }
            }
        }

        fn remove(&self, id: DialogId) {
            self.removed.lock().unwrap().push(id);
        }
    }

    fn button() -> TriggerButton {
        TriggerButton::new(Uuid::new_v4(), "Deploy <now>")
    }

    fn button_with_form() -> TriggerButton {
        button().with_form(vec![
            FormField::new("comment", FieldKind::Text, "Comment").with_default("hi"),
            FormField::new("targets", FieldKind::CheckboxGroup, "Targets").with_options(vec![
                FormOption::new("a", "A", false),
                FormOption::new("b", "B", false),
            ]),
        ])
    }

    #[test]
    fn test_should_confirm() {
        assert!(!should_confirm(&button()));
        assert!(should_confirm(&button().with_confirmation_text("Sure?")));
        assert!(should_confirm(&button_with_form()));

        let mut empty_text = button();
        empty_text.confirmation_text = Some(String::new());
        assert!(!should_confirm(&empty_text));
    }

    #[test]
    fn test_dialog_markup() {
        let (dialog, _outcome) =
            OpenDialog::build(&button_with_form().with_confirmation_text("Really?"));
        let html = dialog.fragment().to_html();

        assert!(html.contains(r#"data-aui-remove-on-hide="true""#));
        assert!(html.contains("Deploy &lt;now&gt;"));
        assert!(!html.contains("<now>"));
        assert!(html.contains(r#"<div class="description">Really?</div>"#));
        assert!(html.contains("dialog-submit-button"));
        assert!(html.contains("dialog-close-button"));
        assert_eq!(dialog.fragment().elements_by_tag("form").len(), 1);
        assert_eq!(dialog.title(), "Deploy <now>");
    }

    #[test]
    fn test_confirmation_only_dialog_has_no_form() {
        let (dialog, _outcome) = OpenDialog::build(&button().with_confirmation_text("Sure?"));
        assert!(dialog.form().is_none());
        assert_eq!(dialog.confirmation(), Some("Sure?"));
        assert!(dialog.fragment().elements_by_tag("form").is_empty());
    }

    #[tokio::test]
    async fn test_submit_resolves_with_payload_and_removes() {
        let host = RecordingDialogHost::new(Script::CheckThenSubmit("targets", "b"));

        let outcome = open_dialog(&button_with_form(), &host).await;

        let DialogOutcome::Submitted(payload) = outcome else {
            panic!("expected submission, got {:?}", outcome);
        };
        assert_eq!(payload.text("comment"), Some("hi"));
        assert_eq!(payload.checked("targets"), ["b"]);

        let shown = host.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(*host.removed.lock().unwrap(), vec![shown[0].0]);
    }

    #[tokio::test]
    async fn test_untouched_checkboxes_are_omitted() {
        let host = RecordingDialogHost::new(Script::Submit);

        let outcome = open_dialog(&button_with_form(), &host).await;

        let DialogOutcome::Submitted(payload) = outcome else {
            panic!("expected submission");
        };
        assert!(!payload.contains("targets"));
    }

    #[tokio::test]
    async fn test_close_cancels_and_removes() {
        let host = RecordingDialogHost::new(Script::Close);

        let outcome = open_dialog(&button_with_form(), &host).await;

        assert_eq!(outcome, DialogOutcome::Cancelled);
        assert_eq!(host.removed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_dialog_counts_as_cancelled() {
        let host = RecordingDialogHost::new(Script::Drop);

        let outcome = open_dialog(&button().with_confirmation_text("Sure?"), &host).await;

        assert_eq!(outcome, DialogOutcome::Cancelled);
        assert_eq!(host.removed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_only_submits_empty_payload() {
        let host = RecordingDialogHost::new(Script::Submit);

        let outcome = open_dialog(&button().with_confirmation_text("Sure?"), &host).await;

        assert_eq!(outcome, DialogOutcome::Submitted(SubmissionPayload::new()));
    }

    #[test]
    fn test_dialog_ids_are_unique() {
        let (a, _) = OpenDialog::build(&button());
        let (b, _) = OpenDialog::build(&button());
        assert_ne!(a.id(), b.id());
    }
}
