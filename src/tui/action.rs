//! Actions returned by screen event handlers.

/// An action that a screen handler returns to the [`App`](super::App).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// A field value changed; the preview should refresh.
    Edited,
    /// Quit the application.
    Quit,
}
