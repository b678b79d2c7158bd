//! # Key Derivation
//!
//! Turns a password digest and a per-stream salt into everything a session
//! needs:
//!
//! - `enc_key`  - first `keyLen` bytes of PBKDF2-HMAC-SHA512 output
//! - `mac_seed` - next `keyLen` bytes; every chunk MAC key hangs off it
//! - `initial_counter` - first 16 bytes of SHA-256(salt), the CTR start block
//! - `verifier` - SHA-256(mac_seed || enc_key), stored in the header
//!
//! A fresh salt per stream means a fresh counter start per stream, so no IV is
//! ever transmitted and the same password never reuses a keystream. Derivation
//! itself cannot tell a wrong password from a right one; that is the
//! verifier's job.

pub mod pbkdf2;

use crate::aliases::{Aes256Key32, KdfOutput64, MacSeedKey32, PasswordDigest64};
use crate::consts::{AES256_KEY_LEN, DIGEST_LEN};
use crate::error::StreamError;
use sha2::{Digest, Sha256};

pub use self::pbkdf2::derive_secure_pbkdf2_key;

/// Key material for one stream. Lives for one session; zeroized on drop.
pub struct DerivedKeys {
    pub enc_key: Aes256Key32,
    pub mac_seed: MacSeedKey32,
    pub initial_counter: [u8; 16],
    pub verifier: [u8; DIGEST_LEN],
}

impl DerivedKeys {
    /// The CTR start block as the integer it encodes.
    pub fn initial_counter_value(&self) -> u128 {
        u128::from_be_bytes(self.initial_counter)
    }
}

/// Derive the session keys from a password digest and salt.
///
/// # Errors
///
/// [`StreamError::KeyDerivation`] when `rounds` is zero or `key_len` is not the
/// 32 bytes AES-256 takes.
pub fn derive_keys(
    password: &PasswordDigest64,
    salt: &[u8],
    key_len: u16,
    rounds: u32,
) -> Result<DerivedKeys, StreamError> {
    if key_len != AES256_KEY_LEN {
        return Err(StreamError::KeyDerivation(format!(
            "key length {key_len} not usable by AES-256 (expected {AES256_KEY_LEN})"
        )));
    }
    let key_len = key_len as usize;

    let mut stretched = KdfOutput64::new([0u8; 64]);
    derive_secure_pbkdf2_key(password, salt, rounds, &mut stretched)?;

    let mut enc_key = Aes256Key32::new([0u8; 32]);
    let mut mac_seed = MacSeedKey32::new([0u8; 32]);
    enc_key
        .expose_secret_mut()
        .copy_from_slice(&stretched.expose_secret()[..key_len]);
    mac_seed
        .expose_secret_mut()
        .copy_from_slice(&stretched.expose_secret()[key_len..2 * key_len]);

    let mut initial_counter = [0u8; 16];
    initial_counter.copy_from_slice(&Sha256::digest(salt)[..16]);

    let verifier = compute_verifier(&enc_key, &mac_seed);

    Ok(DerivedKeys {
        enc_key,
        mac_seed,
        initial_counter,
        verifier,
    })
}

/// SHA-256(mac_seed || enc_key)
#[inline]
pub fn compute_verifier(enc_key: &Aes256Key32, mac_seed: &MacSeedKey32) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(mac_seed.expose_secret());
    hasher.update(enc_key.expose_secret());
    hasher.finalize().into()
}
