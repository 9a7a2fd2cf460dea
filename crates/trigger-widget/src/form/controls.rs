//! Live form controls
//!
//! Rendering a field yields markup plus a [`FieldControl`] describing the
//! value the control holds. Hosts report user edits through
//! [`RenderedForm`], and submission serializes the controls, exactly as a
//! browser would serialize the visible form.

use crate::fragment::Node;
use thiserror::Error;
use trigger_client::{FieldValue, SubmissionPayload};

/// Errors when a host edits a rendered form
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Field {field} has no option {option}")]
    UnknownOption { field: String, option: String },

    #[error("Field {0} does not take text")]
    NotText(String),

    #[error("Field {0} has no options")]
    NotChoice(String),
}

/// One option of a checkbox or radio group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOption {
    /// Submitted value (the option name)
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// The value-bearing part of one rendered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    /// Single or multi-line text input
    Text {
        name: String,
        value: String,
        multiline: bool,
    },
    /// Checkbox group (`exclusive == false`) or radio group
    Choices {
        name: String,
        exclusive: bool,
        options: Vec<ControlOption>,
    },
}

impl FieldControl {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Choices { name, .. } => name,
        }
    }

    /// Value this control contributes on submit, `None` when the browser
    /// would leave the key out (nothing checked)
    pub fn value(&self) -> Option<FieldValue> {
        match self {
            Self::Text { value, .. } => Some(FieldValue::Single(value.clone())),
            Self::Choices {
                exclusive: true,
                options,
                ..
            } => options
                .iter()
                .find(|o| o.checked)
                .map(|o| FieldValue::Single(o.value.clone())),
            Self::Choices { options, .. } => {
                let checked: Vec<String> = options
                    .iter()
                    .filter(|o| o.checked)
                    .map(|o| o.value.clone())
                    .collect();
                (!checked.is_empty()).then_some(FieldValue::Multiple(checked))
            }
        }
    }
}

/// An assembled form: its markup and the controls in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    fragment: Node,
    controls: Vec<FieldControl>,
}

impl RenderedForm {
    pub(crate) fn new(fragment: Node, controls: Vec<FieldControl>) -> Self {
        Self { fragment, controls }
    }

    /// Markup as initially rendered
    pub fn fragment(&self) -> &Node {
        &self.fragment
    }

    pub fn controls(&self) -> &[FieldControl] {
        &self.controls
    }

    fn control_mut(&mut self, name: &str) -> Result<&mut FieldControl, FormError> {
        self.controls
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Replace the text of a text or textarea field
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<(), FormError> {
        match self.control_mut(name)? {
            FieldControl::Text { value, .. } => {
                *value = text.into();
                Ok(())
            }
            FieldControl::Choices { .. } => Err(FormError::NotText(name.to_string())),
        }
    }

    /// Check or uncheck one option
    ///
    /// Checking a radio option unchecks its siblings.
    pub fn set_checked(&mut self, name: &str, option: &str, checked: bool) -> Result<(), FormError> {
        match self.control_mut(name)? {
            FieldControl::Text { .. } => Err(FormError::NotChoice(name.to_string())),
            FieldControl::Choices {
                exclusive, options, ..
            } => {
                if !options.iter().any(|o| o.value == option) {
                    return Err(FormError::UnknownOption {
                        field: name.to_string(),
                        option: option.to_string(),
                    });
                }
                let exclusive = *exclusive;
                for candidate in options.iter_mut() {
                    if candidate.value == option {
                        candidate.checked = checked;
                    } else if exclusive && checked {
                        candidate.checked = false;
                    }
                }
                Ok(())
            }
        }
    }

    /// Serialize the current control values
    ///
    /// Unchecked groups are omitted rather than sent as empty values.
    pub fn serialize(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::new();
        for control in &self.controls {
            if let Some(value) = control.value() {
                payload.insert(control.name(), value);
            }
        }
        payload
    }
}
