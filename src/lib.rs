#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Live preview of obfuscated role names for the role obfuscation admin form.
//!
//! Every edit to the form runs one pass: the random key fields are reconciled,
//! the form is snapshotted, and the snapshot is posted to the preview
//! endpoint. The response lands in the read-only preview field.
//!
//! Two hosts drive the same pipeline: the browser (wasm32, `web`) and a
//! terminal form (`tui`) that talks to a running admin server.

pub mod collector;
pub mod dom;
pub mod model;
pub mod preview;
pub mod random_key;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod tui;
#[cfg(target_arch = "wasm32")]
pub mod web;
