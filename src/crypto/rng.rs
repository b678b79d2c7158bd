// src/crypto/rng.rs
//! Randomness for salts and temporary file names
//!
//! Everything that needs random bytes takes a `&mut G` where
//! `G: RngCore + CryptoRng`, so tests can pass a seeded [`StdRng`] and
//! production code passes [`os_rng`].

use crate::error::StreamError;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};

/// A CSPRNG seeded from the operating system.
///
/// Seeding is the only step that can fail; the generator itself never does.
pub fn os_rng() -> Result<StdRng, StreamError> {
    StdRng::try_from_os_rng().map_err(|e| {
        StreamError::Io(std::io::Error::other(format!("OS random source failed: {e}")))
    })
}

/// `len` random alphanumeric characters, for staging and backup file names.
pub fn random_suffix<G: RngCore + CryptoRng>(rng: &mut G, len: usize) -> String {
    (&mut *rng)
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
