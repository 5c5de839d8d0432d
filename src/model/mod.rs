mod choices;
mod field;
mod snapshot;

pub use choices::{ALLOWED_DIVIDERS, ObfuscationMethod};
pub use field::{CSRF_FIELD_NAME, DIVIDER_FIELD_NAME, FLAG_MARKER, Field, FieldKind};
pub use snapshot::Snapshot;
