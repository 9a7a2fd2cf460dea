//! Form assembler
//!
//! Combines rendered fields into one form container, preserving the order
//! administrators configured the fields in.

use super::controls::RenderedForm;
use super::field_renderer::render_field;
use crate::fragment::{Element, Node};
use trigger_client::FormField;

/// Assemble a form from field descriptors
///
/// Returns `None` when there are no fields at all. Fields of unknown kind are
/// skipped, so the form may end up with fewer children than `fields`.
pub fn assemble_form(fields: &[FormField]) -> Option<RenderedForm> {
    if fields.is_empty() {
        return None;
    }

    let (fragments, controls): (Vec<Node>, Vec<_>) = fields
        .iter()
        .filter_map(render_field)
        .map(|rendered| (rendered.fragment, rendered.control))
        .unzip();

    let form = Element::new("form")
        .attr("style", "display:block;")
        .class("aui")
        .children(fragments);

    Some(RenderedForm::new(form.into(), controls))
}

/// Wrap the confirmation text, `None` when there is nothing to confirm
pub fn assemble_confirmation(text: Option<&str>) -> Option<Node> {
    let text = text.filter(|t| !t.is_empty())?;
    Some(Element::new("div").class("description").text(text).into())
}
