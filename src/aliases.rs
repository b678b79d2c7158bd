//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret material, built on [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every secret is wrapped from birth and zeroized on drop; reading one requires an
//! explicit `.expose_secret()`.
//!
//! ## Primitives
//! - [`Aes256Ctr`] - AES-256 with a 128-bit big-endian counter (cipher suite 0)
//! - [`HmacSha256`] - chunk authentication (hash suite 0)
//! - [`HmacSha512`] - PRF inside PBKDF2 (KDF suite 0)
//!
//! ## Fixed-Size Secrets
//! - [`Aes256Key32`] - AES-256 encryption key
//! - [`MacSeedKey32`] - seed from which every per-chunk MAC key is derived
//! - [`ChunkMacKey32`] - one chunk's MAC key
//! - [`KdfOutput64`] - raw PBKDF2 output before it is split
//! - [`PasswordDigest64`] - SHA-512 of the passphrase, the only form the codec sees
//!
//! ## Dynamic Secrets
//! - [`PasswordString`] - raw passphrase as typed by the user

use hmac::Hmac;
use sha2::{Sha256, Sha512};

pub type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type PasswordString = secure_gate::Dynamic<String>;

// Fixed-size secrets, alphabetical
pub type Aes256Key32 = SpanBuffer<32>;
pub type ChunkMacKey32 = SpanBuffer<32>;
pub type KdfOutput64 = SpanBuffer<64>;
pub type MacSeedKey32 = SpanBuffer<32>;
pub type PasswordDigest64 = SpanBuffer<64>;
