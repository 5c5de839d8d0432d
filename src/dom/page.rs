//! Builds the role obfuscation change form as a [`Document`].

use super::document::{Document, Element, ElementId};
use crate::model::{ALLOWED_DIVIDERS, CSRF_FIELD_NAME, DIVIDER_FIELD_NAME, Field, ObfuscationMethod};

/// Element id of the admin change form for role obfuscation settings.
pub const COMPONENT_FORM_ID: &str = "discordroleobfuscation_form";

/// Element id of the admin page's main content region.
pub const MAIN_CONTENT_ID: &str = "content-main";

/// Initial state of a generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Page path; decides which preview endpoint is used.
    pub path: String,
    pub csrf_token: String,
    /// Initial group id.
    pub group: String,
    /// Initial opt-out state; new configurations start opted out.
    pub opt_out: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            path: "/admin/discord_obfuscate/discordroleobfuscation/add/".to_string(),
            csrf_token: String::new(),
            group: String::new(),
            opt_out: true,
        }
    }
}

/// Builds the obfuscation form page with the same ids, names, and row layout
/// as the admin change form.
pub fn obfuscation_form_page(options: &PageOptions) -> Document {
    let mut doc = Document::new(options.path.clone());
    let content = doc.append(None, Element::region(MAIN_CONTENT_ID));
    let form = doc.append(Some(content), Element::form(COMPONENT_FORM_ID));
    doc.append(
        Some(form),
        Element::hidden(CSRF_FIELD_NAME, &options.csrf_token),
    );

    text_row(&mut doc, form, Field::Group, &options.group);
    checkbox_row(&mut doc, form, Field::OptOut, options.opt_out);

    let methods = ObfuscationMethod::all()
        .iter()
        .map(|m| (m.value.to_string(), m.label.to_string()))
        .collect();
    let row = doc.append(
        Some(form),
        Element::row().with_label(Field::ObfuscationType.label()),
    );
    doc.append(
        Some(row),
        field_select(Field::ObfuscationType, methods)
            .with_value(ObfuscationMethod::default_method().value),
    );

    text_row(&mut doc, form, Field::ObfuscationFormat, "");

    let row = doc.append(Some(form), Element::row().with_label("Dividers"));
    for (i, divider) in ALLOWED_DIVIDERS.iter().enumerate() {
        let id = format!("id_{DIVIDER_FIELD_NAME}_{i}");
        doc.append(
            Some(row),
            Element::checkbox(&id, DIVIDER_FIELD_NAME, divider).with_label(divider),
        );
    }

    text_row(&mut doc, form, Field::MinCharsBeforeDivider, "0");
    text_row(&mut doc, form, Field::CustomName, "");
    checkbox_row(&mut doc, form, Field::UseRandomKey, false);

    let row = doc.append(Some(form), Element::row().with_label(Field::RandomKey.label()));
    doc.append(Some(row), field_text(Field::RandomKey).readonly());

    checkbox_row(&mut doc, form, Field::RandomKeyRotateName, false);
    checkbox_row(&mut doc, form, Field::RandomKeyRotatePosition, false);

    let row = doc.append(Some(form), Element::row().with_label(Field::Preview.label()));
    doc.append(Some(row), field_text(Field::Preview).readonly());

    doc
}

fn field_text(field: Field) -> Element {
    Element::text(field.element_id(), field.payload_name())
}

fn field_select(field: Field, options: Vec<(String, String)>) -> Element {
    Element::select(field.element_id(), field.payload_name(), options)
}

fn text_row(doc: &mut Document, form: ElementId, field: Field, value: &str) -> ElementId {
    let row = doc.append(Some(form), Element::row().with_label(field.label()));
    doc.append(Some(row), field_text(field).with_value(value))
}

fn checkbox_row(doc: &mut Document, form: ElementId, field: Field, checked: bool) -> ElementId {
    let row = doc.append(Some(form), Element::row().with_label(field.label()));
    doc.append(
        Some(row),
        Element::checkbox(field.element_id(), field.payload_name(), "on").with_checked(checked),
    )
}
