//! Form Snapshot Collector: reads the tracked fields into a [`Snapshot`].

use crate::dom::{Dom, FieldRegistry};
use crate::model::{DIVIDER_FIELD_NAME, FLAG_MARKER, Field, FieldKind, Snapshot};

/// Builds the preview payload from the current page.
///
/// Fields are emitted in [`Field::payload_fields`] order followed by one
/// `divider_characters` entry per checked divider. Absent fields are skipped;
/// empty text values fall back to the field's default. Never mutates the page.
pub fn collect<D: Dom>(dom: &D, fields: &FieldRegistry<D::Element>) -> Snapshot {
    let mut snapshot = Snapshot::new();
    for &field in Field::payload_fields() {
        let Some(element) = fields.get(field) else {
            continue;
        };
        match field.kind() {
            FieldKind::Flag => {
                if dom.is_checked(element) {
                    snapshot.push(field.payload_name(), FLAG_MARKER);
                }
            }
            FieldKind::Text { default } => {
                let value = dom.value(element);
                let value = if value.is_empty() {
                    default.to_string()
                } else {
                    value
                };
                snapshot.push(field.payload_name(), value);
            }
        }
    }
    for divider in fields.checked_dividers(dom) {
        snapshot.push(DIVIDER_FIELD_NAME, divider);
    }
    snapshot
}
