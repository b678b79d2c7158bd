//! Algorithm suites named by the three id bytes at the start of every header.
//!
//! Only id `0` exists for each today. Decoding maps the wire byte onto a variant
//! or fails, so adding a suite means adding a variant and letting the compiler
//! point at every `match` that needs to learn about it.

use crate::consts::{AES256_KEY_LEN, DIGEST_LEN};
use crate::error::StreamError;

/// Block cipher + mode used for the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CipherSuite {
    /// AES-256 in CTR mode with a 128-bit big-endian counter.
    Aes256Ctr = 0,
}

/// Hash used for the verifier, per-chunk keys and chunk tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HashSuite {
    /// SHA-256 / HMAC-SHA-256.
    Sha256 = 0,
}

/// Password-based key derivation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KdfSuite {
    /// PBKDF2 with HMAC-SHA-512 as PRF.
    Pbkdf2HmacSha512 = 0,
}

impl CipherSuite {
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Key length the cipher needs, in bytes.
    pub const fn key_len(self) -> u16 {
        match self {
            CipherSuite::Aes256Ctr => AES256_KEY_LEN,
        }
    }
}

impl HashSuite {
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn digest_len(self) -> usize {
        match self {
            HashSuite::Sha256 => DIGEST_LEN,
        }
    }
}

impl KdfSuite {
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CipherSuite {
    type Error = StreamError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(CipherSuite::Aes256Ctr),
            other => Err(StreamError::Format(format!(
                "unsupported cipher suite id {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for HashSuite {
    type Error = StreamError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(HashSuite::Sha256),
            other => Err(StreamError::Format(format!(
                "unsupported hash suite id {other}"
            ))),
        }
    }
}

impl TryFrom<u8> for KdfSuite {
    type Error = StreamError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(KdfSuite::Pbkdf2HmacSha512),
            other => Err(StreamError::Format(format!(
                "unsupported KDF suite id {other}"
            ))),
        }
    }
}
