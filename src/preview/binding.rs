use crate::dom::{COMPONENT_FORM_ID, Dom, MAIN_CONTENT_ID};
use crate::model::Field;

/// Finds the form whose input events drive preview passes.
///
/// Prefers the form holding the group field, then the component form, then
/// any form inside the main content region.
pub fn locate_form<D: Dom>(dom: &D) -> Option<D::Element> {
    if let Some(form) = dom
        .element_by_id(Field::Group.element_id())
        .and_then(|group| dom.closest_form(&group))
    {
        tracing::info!(via = "group field", "bound preview form");
        return Some(form);
    }
    if let Some(form) = dom
        .element_by_id(COMPONENT_FORM_ID)
        .filter(|el| dom.is_form(el))
    {
        tracing::info!(via = COMPONENT_FORM_ID, "bound preview form");
        return Some(form);
    }
    if let Some(form) = dom.form_within(MAIN_CONTENT_ID) {
        tracing::info!(via = MAIN_CONTENT_ID, "bound preview form");
        return Some(form);
    }
    tracing::info!("no preview form on page");
    None
}
