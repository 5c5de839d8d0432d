
/// Value emitted for any checked flag field.
pub const FLAG_MARKER: &str = "1";

/// Name shared by every divider checkbox; also the payload name for each checked one.
pub const DIVIDER_FIELD_NAME: &str = "divider_characters";

/// Name of the hidden input carrying the anti-forgery token.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";

/// How a field contributes to the preview payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Always emitted when present; an empty value becomes `default`.
    Text { default: &'static str },
    /// Emitted as [`FLAG_MARKER`] only when checked.
    Flag,
}

/// A logical field of the role obfuscation form.
///
/// Variants are declared in payload order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Group,
    OptOut,
    CustomName,
    UseRandomKey,
    RandomKey,
    RandomKeyRotateName,
    RandomKeyRotatePosition,
    ObfuscationType,
    ObfuscationFormat,
    MinCharsBeforeDivider,
    /// The read-only field the rendered preview is written into.
    Preview,
}

static ALL_FIELDS: &[Field] = &[
    Field::Group,
    Field::OptOut,
    Field::CustomName,
    Field::UseRandomKey,
    Field::RandomKey,
    Field::RandomKeyRotateName,
    Field::RandomKeyRotatePosition,
    Field::ObfuscationType,
    Field::ObfuscationFormat,
    Field::MinCharsBeforeDivider,
    Field::Preview,
];

impl Field {
    /// Number of logical fields.
    pub const COUNT: usize = 11;

    /// Returns all fields in payload order, output field last.
    pub fn all() -> &'static [Field] {
        ALL_FIELDS
    }

    /// Returns the fields that make up the preview payload, in order.
    pub fn payload_fields() -> &'static [Field] {
        &ALL_FIELDS[..Self::COUNT - 1]
    }

    /// Element id of this field in the admin page.
    pub fn element_id(self) -> &'static str {
        match self {
            Field::Group => "id_group",
            Field::OptOut => "id_opt_out",
            Field::CustomName => "id_custom_name",
            Field::UseRandomKey => "id_use_random_key",
            Field::RandomKey => "id_random_key",
            Field::RandomKeyRotateName => "id_random_key_rotate_name",
            Field::RandomKeyRotatePosition => "id_random_key_rotate_position",
            Field::ObfuscationType => "id_obfuscation_type",
            Field::ObfuscationFormat => "id_obfuscation_format",
            Field::MinCharsBeforeDivider => "id_min_chars_before_divider",
            Field::Preview => "id_preview",
        }
    }

    /// Name used for this field in the preview payload and the form's `name` attribute.
    pub fn payload_name(self) -> &'static str {
        match self {
            Field::Group => "group",
            Field::OptOut => "opt_out",
            Field::CustomName => "custom_name",
            Field::UseRandomKey => "use_random_key",
            Field::RandomKey => "random_key",
            Field::RandomKeyRotateName => "random_key_rotate_name",
            Field::RandomKeyRotatePosition => "random_key_rotate_position",
            Field::ObfuscationType => "obfuscation_type",
            Field::ObfuscationFormat => "obfuscation_format",
            Field::MinCharsBeforeDivider => "min_chars_before_divider",
            Field::Preview => "preview",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::OptOut
            | Field::UseRandomKey
            | Field::RandomKeyRotateName
            | Field::RandomKeyRotatePosition => FieldKind::Flag,
            Field::MinCharsBeforeDivider => FieldKind::Text { default: "0" },
            Field::Group
            | Field::CustomName
            | Field::RandomKey
            | Field::ObfuscationType
            | Field::ObfuscationFormat
            | Field::Preview => FieldKind::Text { default: "" },
        }
    }

    /// Human-readable label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Group => "Group",
            Field::OptOut => "Opt out",
            Field::CustomName => "Custom name",
            Field::UseRandomKey => "Use random key",
            Field::RandomKey => "Random key",
            Field::RandomKeyRotateName => "Rotate name",
            Field::RandomKeyRotatePosition => "Rotate position",
            Field::ObfuscationType => "Obfuscation type",
            Field::ObfuscationFormat => "Obfuscation format",
            Field::MinCharsBeforeDivider => "Min chars before divider",
            Field::Preview => "Preview",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
