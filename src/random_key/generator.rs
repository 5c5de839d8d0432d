use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng, TryRngCore};

/// Length of every generated key.
pub const KEY_LENGTH: usize = 16;

/// Symbols a key is drawn from.
pub const KEY_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of the alphabet size (4 * 62) that fits in a byte.
const REJECTION_BOUND: u8 = 248;

/// The strong random source could not produce bytes.
#[derive(Debug, thiserror::Error)]
#[error("strong random source unavailable: {0}")]
pub struct KeySourceError(String);

/// Draws a key from a strong source, rejecting bytes that would bias the result.
pub fn strong_key<R: TryRngCore>(source: &mut R) -> Result<String, KeySourceError> {
    let mut key = String::with_capacity(KEY_LENGTH);
    let mut buf = [0u8; 2 * KEY_LENGTH];
    while key.len() < KEY_LENGTH {
        source
            .try_fill_bytes(&mut buf)
            .map_err(|e| KeySourceError(e.to_string()))?;
        for &byte in buf.iter().filter(|&&b| b < REJECTION_BOUND) {
            if key.len() == KEY_LENGTH {
                break;
            }
            key.push(char::from(KEY_ALPHABET[usize::from(byte) % KEY_ALPHABET.len()]));
        }
    }
    Ok(key)
}

/// Draws a key with plain modulo sampling.
///
/// Slightly favours the first symbols of the alphabet.
pub fn fallback_key<R: RngCore>(rng: &mut R) -> String {
    (0..KEY_LENGTH)
        .map(|_| {
            let index = rng.next_u32() as usize % KEY_ALPHABET.len();
            char::from(KEY_ALPHABET[index])
        })
        .collect()
}

/// Generates random keys, preferring `S` and switching to a seeded
/// [`SmallRng`] for good once `S` fails.
#[derive(Debug)]
pub struct KeyGenerator<S = OsRng> {
    strong: S,
    fallback: Option<SmallRng>,
}

impl KeyGenerator<OsRng> {
    /// A generator backed by the operating system's random source.
    pub fn new() -> Self {
        Self::with_source(OsRng)
    }
}

impl Default for KeyGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TryRngCore> KeyGenerator<S> {
    pub fn with_source(strong: S) -> Self {
        Self {
            strong,
            fallback: None,
        }
    }

    /// Returns a new [`KEY_LENGTH`]-symbol key.
    pub fn generate(&mut self) -> String {
        if self.fallback.is_none() {
            match strong_key(&mut self.strong) {
                Ok(key) => return key,
                Err(err) => {
                    tracing::warn!(%err, "falling back to non-cryptographic key generator");
                }
            }
        }
        let rng = self
            .fallback
            .get_or_insert_with(|| SmallRng::seed_from_u64(fallback_seed()));
        fallback_key(rng)
    }

    /// Returns `true` once the strong source has failed.
    pub fn is_using_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fallback_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn fallback_seed() -> u64 {
    (js_sys::Date::now() * 1000.0) as u64 ^ (js_sys::Math::random() * u64::MAX as f64) as u64
}
