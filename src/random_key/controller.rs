use rand::TryRngCore;
use rand::rngs::OsRng;

use super::generator::KeyGenerator;
use crate::dom::{Dom, FieldRegistry};
use crate::model::Field;

/// Fields whose rows are only shown while the random key is enabled.
const ROTATION_FIELDS: [Field; 2] = [Field::RandomKeyRotateName, Field::RandomKeyRotatePosition];

/// Resolved state of the random key group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomKeyState {
    Disabled,
    Enabled,
}

impl RandomKeyState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Disabled => "random key off",
            Self::Enabled => "random key on",
        }
    }
}

/// Keeps the random key, its rotation toggles, and their rows consistent with
/// the `use_random_key` toggle.
#[derive(Debug)]
pub struct RandomKeyController<S = OsRng> {
    generator: KeyGenerator<S>,
}

impl RandomKeyController<OsRng> {
    pub fn new() -> Self {
        Self::with_generator(KeyGenerator::new())
    }
}

impl Default for RandomKeyController<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TryRngCore> RandomKeyController<S> {
    pub fn with_generator(generator: KeyGenerator<S>) -> Self {
        Self { generator }
    }

    /// Applies the state implied by the toggle to the page.
    ///
    /// Enabled fills an empty key and shows the rotation rows; an existing key
    /// is kept. Disabled clears the key, unchecks both rotation toggles, and
    /// hides their rows. A missing toggle counts as unchecked; a rotation
    /// toggle without a row container keeps its visibility.
    pub fn reconcile<D: Dom>(
        &mut self,
        dom: &mut D,
        fields: &FieldRegistry<D::Element>,
    ) -> RandomKeyState {
        let enabled = fields.is_checked(dom, Field::UseRandomKey);
        let key = fields.get(Field::RandomKey);

        if enabled {
            if let Some(key) = key
                && dom.value(key).is_empty()
            {
                let generated = self.generator.generate();
                dom.set_value(key, &generated);
                tracing::debug!("generated random key");
            }
        } else {
            if let Some(key) = key {
                dom.set_value(key, "");
            }
            for field in ROTATION_FIELDS {
                if let Some(toggle) = fields.get(field) {
                    dom.set_checked(toggle, false);
                }
            }
        }

        for field in ROTATION_FIELDS {
            if let Some(toggle) = fields.get(field)
                && let Some(row) = dom.closest_row(toggle)
            {
                dom.set_displayed(&row, enabled);
            }
        }

        if enabled {
            RandomKeyState::Enabled
        } else {
            RandomKeyState::Disabled
        }
    }

    pub fn generator(&self) -> &KeyGenerator<S> {
        &self.generator
    }
}
