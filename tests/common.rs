//! tests/common.rs
//! Constants and helpers shared across test files

#![allow(dead_code)] // each test binary uses a different subset

use aesstream_rs::aliases::{PasswordDigest64, PasswordString};
use aesstream_rs::{hash_password, StreamConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Fast KDF round count - performance testing is in benches/
pub const TEST_ROUNDS: u32 = 5;

pub const TEST_PASSWORD: &str = "correct-horse";

pub const TEST_DATA: &[u8] = b"HELLO!";

pub fn password(pw: &str) -> PasswordString {
    PasswordString::new(pw.to_string())
}

pub fn digest(pw: &str) -> PasswordDigest64 {
    hash_password(&password(pw))
}

pub fn config(chunk_cap: u32) -> StreamConfig {
    StreamConfig::new()
        .with_kdf_rounds(TEST_ROUNDS)
        .with_chunk_cap(chunk_cap)
}

/// Deterministic generator for reproducible salts and file names.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The salt an encryption seeded with `seed` draws first.
pub fn seeded_salt(seed: u64, len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    seeded(seed).fill_bytes(&mut salt);
    salt
}

/// Plaintext with no repeating 16-byte blocks.
pub fn sample_plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
