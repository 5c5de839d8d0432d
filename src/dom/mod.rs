//! Page access: the [`Dom`] trait, the in-memory [`Document`], and the
//! per-pass [`FieldRegistry`].
//!
//! Everything above this layer reads and writes the page only through `Dom`,
//! so the same pipeline drives a browser page and the terminal form.

mod document;
mod page;
mod registry;

pub use document::{Document, Element, ElementId, ElementKind};
pub use page::{COMPONENT_FORM_ID, MAIN_CONTENT_ID, PageOptions, obfuscation_form_page};
pub use registry::FieldRegistry;

/// Read/write access to a page's elements.
///
/// Lookups return `None` (or an empty list) for missing elements; callers treat
/// absence as "omit", never as an error. Mutating methods take `&mut self`
/// even for handle-based implementations so the borrow checker enforces that
/// only one pass touches the page at a time.
pub trait Dom {
    /// Handle to a single element.
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Returns every element whose `name` attribute equals `name`, in document order.
    fn elements_by_name(&self, name: &str) -> Vec<Self::Element>;

    /// Current value of an input or select; empty for other elements.
    fn value(&self, element: &Self::Element) -> String;

    fn set_value(&mut self, element: &Self::Element, value: &str);

    /// Checked state of a checkbox; `false` for other elements.
    fn is_checked(&self, element: &Self::Element) -> bool;

    fn set_checked(&mut self, element: &Self::Element, checked: bool);

    /// Nearest enclosing field-row container.
    fn closest_row(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Shows or hides an element via its display style.
    fn set_displayed(&mut self, element: &Self::Element, displayed: bool);

    fn is_form(&self, element: &Self::Element) -> bool;

    /// Nearest enclosing form.
    fn closest_form(&self, element: &Self::Element) -> Option<Self::Element>;

    /// First form nested anywhere inside the element with id `container_id`.
    fn form_within(&self, container_id: &str) -> Option<Self::Element>;

    /// Path component of the page location, e.g. `/admin/app/model/3/change/`.
    fn location_path(&self) -> String;
}
