use super::Dom;
use crate::model::{CSRF_FIELD_NAME, DIVIDER_FIELD_NAME, Field};

/// The tracked fields of one page, resolved once per pass.
///
/// A slot is `None` when the page has no element with that field's id. The
/// divider checkboxes and the anti-forgery token are resolved by name.
#[derive(Debug, Clone)]
pub struct FieldRegistry<E> {
    slots: [Option<E>; Field::COUNT],
    dividers: Vec<E>,
    csrf: Option<E>,
}

impl<E: Clone> FieldRegistry<E> {
    /// Looks up every [`Field`] by element id, then the named groups.
    pub fn resolve<D: Dom<Element = E>>(dom: &D) -> Self {
        Self {
            slots: std::array::from_fn(|i| dom.element_by_id(Field::all()[i].element_id())),
            dividers: dom.elements_by_name(DIVIDER_FIELD_NAME),
            csrf: dom.elements_by_name(CSRF_FIELD_NAME).into_iter().next(),
        }
    }

    pub fn get(&self, field: Field) -> Option<&E> {
        self.slots[field.index()].as_ref()
    }

    /// Current value of `field`, or `None` if it is absent.
    pub fn value<D: Dom<Element = E>>(&self, dom: &D, field: Field) -> Option<String> {
        self.get(field).map(|el| dom.value(el))
    }

    /// Returns `true` only if `field` is present and checked.
    pub fn is_checked<D: Dom<Element = E>>(&self, dom: &D, field: Field) -> bool {
        self.get(field).is_some_and(|el| dom.is_checked(el))
    }

    /// Values of the checked divider checkboxes, in document order.
    pub fn checked_dividers<D: Dom<Element = E>>(&self, dom: &D) -> Vec<String> {
        self.dividers
            .iter()
            .filter(|el| dom.is_checked(el))
            .map(|el| dom.value(el))
            .collect()
    }

    /// Anti-forgery token from the page, or an empty string.
    pub fn csrf_token<D: Dom<Element = E>>(&self, dom: &D) -> String {
        self.csrf.as_ref().map(|el| dom.value(el)).unwrap_or_default()
    }
}
