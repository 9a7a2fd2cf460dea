//! Terminal host
//!
//! Implements the widget's host traits on top of stdin/stdout: dialogs are
//! prompts, notifications are printed lines and redirects open the system
//! browser.

use crate::browser;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};
use trigger_client::Uuid;
use trigger_widget::{
    unescape_html, Anchor, AnchorKind, ButtonUiState, DialogHost, DialogId, FieldControl,
    FormError, Host, Navigator, Node, Notification, Notifier, OpenDialog, PageSurface,
    RenderedForm,
};

/// Build the host for one `press` invocation
pub fn host(values: Vec<(String, String)>, assume_yes: bool) -> Host {
    Host::new(
        Arc::new(TerminalSurface::default()),
        Arc::new(TerminalDialogs { values, assume_yes }),
        Arc::new(TerminalNotifier),
        Arc::new(BrowserNavigator),
    )
}

/// A page that always has a merge button and tracks button names
#[derive(Default)]
pub struct TerminalSurface {
    names: Mutex<HashMap<Uuid, String>>,
}

impl TerminalSurface {
    fn name_of(&self, uuid: Uuid) -> String {
        self.names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&uuid)
            .cloned()
            .unwrap_or_else(|| uuid.to_string())
    }
}

impl PageSurface for TerminalSurface {
    fn find_anchor(&self, kind: AnchorKind) -> Option<Anchor> {
        (kind == AnchorKind::MergeButton).then(|| Anchor::new(kind, Vec::new()))
    }

    fn inject_menu(&self, anchor: &Anchor, menu: Node) {
        log::debug!("Menu injected after {:?}: {}", anchor.kind, menu);
    }

    fn append_button(&self, uuid: Uuid, item: Node) {
        self.names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uuid, item.text_content());
    }

    fn set_menu_visible(&self, visible: bool) {
        log::debug!("Menu visible: {}", visible);
    }

    fn set_menu_expanded(&self, expanded: bool) {
        log::debug!("Menu expanded: {}", expanded);
    }

    fn set_button_state(&self, uuid: Uuid, state: ButtonUiState) {
        log::debug!("Button {} is {}", uuid, state);
        if let Some(indicator) = state.indicator() {
            println!("[{}] {}", indicator.text_content(), self.name_of(uuid));
        }
    }

    fn remove_menu(&self) {
        log::debug!("Menu removed");
    }
}

/// Dialogs answered on the terminal
pub struct TerminalDialogs {
    /// `--set` values applied to the form before asking
    values: Vec<(String, String)>,
    assume_yes: bool,
}

impl DialogHost for TerminalDialogs {
    fn show(&self, dialog: OpenDialog) {
        let values = self.values.clone();
        let assume_yes = self.assume_yes;
        // Reading stdin blocks; the dialog resolves from the blocking pool
        tokio::task::spawn_blocking(move || run_dialog(dialog, &values, assume_yes));
    }

    fn remove(&self, id: DialogId) {
        log::debug!("{} removed", id);
    }
}

fn run_dialog(mut dialog: OpenDialog, values: &[(String, String)], assume_yes: bool) {
    println!();
    println!("{}", dialog.title());
    if let Some(text) = dialog.confirmation() {
        println!("{}", text);
    }

    if let Some(form) = dialog.form_mut() {
        for error in apply_assignments(form, values) {
            log::warn!("Ignoring form value: {}", error);
            eprintln!("⚠️  {}", error);
        }
        for line in describe_form(form) {
            println!("  {}", line);
        }
    }

    let question = format!("Press {}?", dialog.title());
    if assume_yes || ask(&question) {
        dialog.submit();
    } else {
        dialog.close();
    }
}

fn ask(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            log::warn!("Failed to read answer: {}", e);
            false
        }
    }
}

/// What a `--set` value is applied to
enum Target {
    Checkboxes(Vec<String>),
    Radio,
    Text,
}

/// Apply `name=value` pairs to a rendered form
///
/// Checkbox groups take a comma separated list and end up with exactly those
/// options checked; a list naming an unknown option leaves the group as it
/// was. Returns the values that could not be applied.
pub fn apply_assignments(form: &mut RenderedForm, values: &[(String, String)]) -> Vec<FormError> {
    let mut errors = Vec::new();

    for (name, value) in values {
        let target = match form.controls().iter().find(|c| c.name() == name) {
            Some(FieldControl::Choices {
                exclusive: false,
                options,
                ..
            }) => Target::Checkboxes(options.iter().map(|o| o.value.clone()).collect()),
            Some(FieldControl::Choices { .. }) => Target::Radio,
            _ => Target::Text,
        };

        let result = match target {
            Target::Checkboxes(all) => {
                errors.extend(set_checkboxes(form, name, &all, value));
                continue;
            }
            Target::Radio => form.set_checked(name, value, true),
            Target::Text => form.set_text(name, value.as_str()),
        };
        if let Err(e) = result {
            errors.push(e);
        }
    }

    errors
}

fn set_checkboxes(
    form: &mut RenderedForm,
    name: &str,
    all: &[String],
    list: &str,
) -> Vec<FormError> {
    let wanted: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .collect();

    let unknown: Vec<FormError> = wanted
        .iter()
        .filter(|option| !all.iter().any(|known| known == *option))
        .map(|option| FormError::UnknownOption {
            field: name.to_string(),
            option: option.to_string(),
        })
        .collect();
    if !unknown.is_empty() {
        return unknown;
    }

    all.iter()
        .map(|option| form.set_checked(name, option, wanted.contains(&option.as_str())))
        .filter_map(Result::err)
        .collect()
}

/// One line per field with its current value
pub fn describe_form(form: &RenderedForm) -> Vec<String> {
    form.controls()
        .iter()
        .map(|control| match control {
            FieldControl::Text { name, value, .. } => format!("{}: {}", name, value),
            FieldControl::Choices {
                name,
                exclusive,
                options,
            } => {
                let marks: Vec<String> = options
                    .iter()
                    .map(|o| {
                        let mark = match (*exclusive, o.checked) {
                            (true, true) => "(•)",
                            (true, false) => "( )",
                            (false, true) => "[x]",
                            (false, false) => "[ ]",
                        };
                        format!("{} {}", mark, o.label)
                    })
                    .collect();
                format!("{}: {}", name, marks.join("  "))
            }
        })
        .collect()
}

/// Prints notifications with their kind marker
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        println!(
            "{} {}",
            notification.kind.emoji(),
            unescape_html(&notification.title)
        );
        for line in notification.body_text() {
            println!("   {}", line);
        }
    }
}

/// Opens redirect targets in the system browser
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) {
        println!("Opening {}", url);
        browser::open_url(url);
    }
}
