//! Field renderer
//!
//! Maps one [`FormField`] descriptor to its markup and live control. Every
//! user supplied string (label, default value, description, option names and
//! labels) goes through the escaping fragment builder.

use super::controls::{ControlOption, FieldControl};
use crate::fragment::{Element, Node};
use trigger_client::{FieldKind, FormField};

/// Prefix of the `id` attribute of generated inputs
const ID_PREFIX: &str = "prnfb-form-";

/// Markup and control of one rendered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub fragment: Node,
    pub control: FieldControl,
}

/// Render one field
///
/// Returns `None` for field kinds this widget does not know; such fields are
/// left out of the form without an error.
pub fn render_field(field: &FormField) -> Option<RenderedField> {
    match &field.kind {
        FieldKind::Text => Some(render_text(field, false)),
        FieldKind::TextArea => Some(render_text(field, true)),
        FieldKind::CheckboxGroup => Some(render_choices(field, false)),
        FieldKind::RadioGroup => Some(render_choices(field, true)),
        FieldKind::Unknown(kind) => {
            log::debug!("Skipping field {} of unknown kind {:?}", field.name, kind);
            None
        }
    }
}

fn render_text(field: &FormField, multiline: bool) -> RenderedField {
    let value = field.default_value.clone().unwrap_or_default();
    let id = format!("{}{}", ID_PREFIX, field.name);

    let mut label = Element::new("label")
        .attr("for", &field.name)
        .text(&field.label);
    if field.required {
        label = label.child(
            Element::new("span")
                .class("aui-icon")
                .class("icon-required")
                .text("(required)"),
        );
    }

    let input = if multiline {
        Element::new("textarea")
            .class("textarea")
            .id(&id)
            .attr("name", &field.name)
            .attr("placeholder", &value)
            .text(&value)
    } else {
        Element::new("input")
            .class("text")
            .class("medium-field")
            .attr("type", "text")
            .id(&id)
            .attr("name", &field.name)
            .attr("placeholder", &value)
            .attr("value", &value)
    };

    let fragment = Element::new("div")
        .class("field-group")
        .child(label)
        .child(input)
        .child(description(field))
        .into();

    RenderedField {
        fragment,
        control: FieldControl::Text {
            name: field.name.clone(),
            value,
            multiline,
        },
    }
}

fn render_choices(field: &FormField, exclusive: bool) -> RenderedField {
    let (wrapper_class, input_type, input_name) = if exclusive {
        ("radio", "radio", field.name.clone())
    } else {
        ("checkbox", "checkbox", format!("{}[]", field.name))
    };

    let options: Vec<ControlOption> = field
        .options
        .iter()
        .map(|option| ControlOption {
            value: option.name.clone(),
            label: option.label.clone(),
            checked: if exclusive {
                field.default_value.as_deref() == Some(option.name.as_str())
            } else {
                option.selected
            },
        })
        .collect();

    let items = options.iter().enumerate().map(|(index, option)| {
        let id = format!("{}{}-{}", ID_PREFIX, field.name, index);
        Node::from(
            Element::new("div")
                .class(wrapper_class)
                .child(
                    Element::new("input")
                        .class(wrapper_class)
                        .attr("value", &option.value)
                        .attr("type", input_type)
                        .flag("checked", option.checked)
                        .attr("name", &input_name)
                        .id(&id),
                )
                .child(Element::new("label").attr("for", &id).text(&option.label)),
        )
    });

    let fragment = Element::new("fieldset")
        .class("group")
        .child(Element::new("legend").child(Element::new("span").text(&field.label)))
        .children(items)
        .child(description(field))
        .into();

    RenderedField {
        fragment,
        control: FieldControl::Choices {
            name: field.name.clone(),
            exclusive,
            options,
        },
    }
}

fn description(field: &FormField) -> Element {
    Element::new("div")
        .class("description")
        .text(field.description.as_deref().unwrap_or_default())
}
