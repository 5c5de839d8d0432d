//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{Focus, draw_form, form_lines};
pub use status_bar::{StatusBarContext, draw_status_bar};
