//! TUI screen implementations.

pub mod page_form;

pub use page_form::PageFormState;
