//! Trigger button data transfer objects
//!
//! These types mirror the JSON exchanged with the button admin resource.
//! They are intentionally free of any rendering concerns so the widget crate
//! can decide how to present them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// One configured trigger button, as returned by `GET .../fromPR<page>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerButton {
    /// Stable identifier, used to address the submission endpoint
    pub uuid: Uuid,

    /// Display name (user supplied, may contain markup)
    pub name: String,

    /// Text shown in the confirmation dialog
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub confirmation_text: Option<String>,

    /// Where the browser goes when the button is pressed
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub redirect_url: Option<String>,

    /// Ordered form fields shown in the dialog
    #[serde(
        default,
        rename = "buttonFormList",
        deserialize_with = "null_as_default"
    )]
    pub form: Vec<FormField>,

    /// Who may see the button (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_level: Option<String>,

    /// Whether outcome details are reported back after submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<OnOrOff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_slug: Option<String>,
}

impl TriggerButton {
    /// Create a plain button without confirmation, form or redirect
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            confirmation_text: None,
            redirect_url: None,
            form: Vec::new(),
            user_level: None,
            confirmation: None,
            project_key: None,
            repository_slug: None,
        }
    }

    pub fn with_confirmation_text(mut self, text: impl Into<String>) -> Self {
        self.confirmation_text = Some(text.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn with_redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into()).filter(|u: &String| !u.is_empty());
        self
    }

    pub fn with_form(mut self, form: Vec<FormField>) -> Self {
        self.form = form;
        self
    }
}

/// Server-side ON/OFF switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OnOrOff {
    On,
    Off,
}

/// Kind of input control a [`FormField`] renders to
///
/// Kinds this client does not know are kept as [`FieldKind::Unknown`] so a
/// newer server cannot break descriptor decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line text input (`"input"`, alias `"text"`)
    Text,
    /// Multi-line text input (`"textarea"`)
    TextArea,
    /// Group of independent checkboxes (`"checkbox"`)
    CheckboxGroup,
    /// Group of mutually exclusive radio buttons (`"radio"`)
    RadioGroup,
    /// Anything else
    Unknown(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "input",
            Self::TextArea => "textarea",
            Self::CheckboxGroup => "checkbox",
            Self::RadioGroup => "radio",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "input" | "text" => Self::Text,
            "textarea" => Self::TextArea,
            "checkbox" => Self::CheckboxGroup,
            "radio" => Self::RadioGroup,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input of a generated form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Unique within the button; used as DOM identity and payload key
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default)]
    pub label: String,

    /// Initial value for text inputs, name of the pre-selected radio option
    #[serde(default, deserialize_with = "empty_as_none")]
    pub default_value: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,

    /// Options of checkbox and radio groups, in display order
    #[serde(
        default,
        rename = "buttonFormElementOptionList",
        deserialize_with = "null_as_default"
    )]
    pub options: Vec<FormOption>,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            default_value: None,
            description: None,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: Vec<FormOption>) -> Self {
        self.options = options;
        self
    }
}

/// One choice of a checkbox or radio group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOption {
    pub name: String,

    #[serde(default)]
    pub label: String,

    /// Checked by default (checkbox groups only; radio groups use the field default)
    #[serde(default, rename = "defaultValue", deserialize_with = "null_as_default")]
    pub selected: bool,
}

impl FormOption {
    pub fn new(name: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Value submitted for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, textarea and radio values
    Single(String),
    /// Checked options of a checkbox group, in rendered order
    Multiple(Vec<String>),
}

/// Serialized form: field name to value(s)
///
/// A checkbox group without any checked option has no key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload(BTreeMap<String, FieldValue>);

impl SubmissionPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Scalar value of a text, textarea or radio field
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Single(value)) => Some(value),
            _ => None,
        }
    }

    /// Checked options of a checkbox group (absent key means none)
    pub fn checked(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(FieldValue::Multiple(values)) => values,
            _ => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

/// Body of `POST .../fromUUID<page>/uuid/<uuid>`
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub form: Option<&'a SubmissionPayload>,
}

/// Successful answer of a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// `"on"` when the outcome list should be shown to the user
    #[serde(default)]
    pub confirmation: Option<String>,

    #[serde(
        default,
        rename = "notificationResponses",
        deserialize_with = "null_as_default"
    )]
    pub outcomes: Vec<TriggerOutcome>,
}

impl SubmitResponse {
    /// Whether the server asks for per-outcome feedback
    pub fn confirmation_enabled(&self) -> bool {
        self.confirmation.as_deref() == Some("on")
    }
}

/// Result of invoking one notification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOutcome {
    #[serde(alias = "name")]
    pub notification_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Uuid>,

    pub status: u16,

    /// Invoked URL, for diagnostics
    #[serde(default)]
    pub uri: String,
}

impl TriggerOutcome {
    pub fn new(name: impl Into<String>, status: u16, uri: impl Into<String>) -> Self {
        Self {
            notification_name: name.into(),
            notification: None,
            status,
            uri: uri.into(),
        }
    }

    /// 2xx statuses count as success
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Path of the pull request page the widget runs on
///
/// e.g. `/projects/PRJ/repos/repo/pull-requests/1/overview`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath(String);

impl PagePath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{}", path))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
