//! Random Key Controller and the key generator behind it.

mod controller;
mod generator;

pub use controller::{RandomKeyController, RandomKeyState};
pub use generator::{
    KEY_ALPHABET, KEY_LENGTH, KeyGenerator, KeySourceError, fallback_key, strong_key,
};
