//! Choice sets offered by the obfuscation form.
//!
//! These only shape the page the terminal host builds; the preview pipeline
//! forwards whatever the fields hold.

/// Divider characters an operator may pick, in display order.
pub const ALLOWED_DIVIDERS: &[&str] = &["┃", "┇", "┆", "︲", "｜", "︱", "➖"];

/// An obfuscation method selectable in the `obfuscation_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscationMethod {
    /// Value submitted with the form.
    pub value: &'static str,
    /// Label shown to the operator.
    pub label: &'static str,
}

static METHODS: &[ObfuscationMethod] = &[
    ObfuscationMethod {
        value: "sha256_hex",
        label: "SHA256 + hex",
    },
    ObfuscationMethod {
        value: "sha256_base32",
        label: "SHA256 + base32",
    },
    ObfuscationMethod {
        value: "blake2s_hex",
        label: "BLAKE2s + hex",
    },
    ObfuscationMethod {
        value: "blake2s_base32",
        label: "BLAKE2s + base32",
    },
];

impl ObfuscationMethod {
    /// Returns all methods in display order.
    pub fn all() -> &'static [ObfuscationMethod] {
        METHODS
    }

    /// The method a new configuration starts with.
    pub fn default_method() -> ObfuscationMethod {
        METHODS[1]
    }
}
