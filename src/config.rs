//! Per-stream encryption parameters.

use crate::consts::{
    DEFAULT_CHUNK_CAP, DEFAULT_KDF_ROUNDS, DEFAULT_SALT_LEN, MAX_CHUNK_CAP, MAX_SALT_LEN,
};
use crate::error::StreamError;
use crate::suite::{CipherSuite, HashSuite, KdfSuite};

/// Parameters chosen by the encrypting side and recorded in the stream header.
///
/// Defaults: 32-byte salt, 10,000 PBKDF2 rounds, 64 KiB chunks. The key length
/// is not a knob; it follows from [`CipherSuite`].
///
/// Decryption never needs a `StreamConfig`: every parameter is read back from
/// the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    cipher: CipherSuite,
    hash: HashSuite,
    kdf: KdfSuite,
    salt_len: u16,
    kdf_rounds: u32,
    chunk_cap: u32,
}

impl StreamConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cipher: CipherSuite::Aes256Ctr,
            hash: HashSuite::Sha256,
            kdf: KdfSuite::Pbkdf2HmacSha512,
            salt_len: DEFAULT_SALT_LEN,
            kdf_rounds: DEFAULT_KDF_ROUNDS,
            chunk_cap: DEFAULT_CHUNK_CAP,
        }
    }

    #[must_use]
    pub const fn with_kdf_rounds(mut self, rounds: u32) -> Self {
        self.kdf_rounds = rounds;
        self
    }

    /// Maximum plaintext bytes per chunk (1 ..= 1 GiB).
    #[must_use]
    pub const fn with_chunk_cap(mut self, chunk_cap: u32) -> Self {
        self.chunk_cap = chunk_cap;
        self
    }

    #[must_use]
    pub const fn with_salt_len(mut self, salt_len: u16) -> Self {
        self.salt_len = salt_len;
        self
    }

    pub const fn cipher(&self) -> CipherSuite {
        self.cipher
    }

    pub const fn hash(&self) -> HashSuite {
        self.hash
    }

    pub const fn kdf(&self) -> KdfSuite {
        self.kdf
    }

    pub const fn key_len(&self) -> u16 {
        self.cipher.key_len()
    }

    pub const fn salt_len(&self) -> u16 {
        self.salt_len
    }

    pub const fn kdf_rounds(&self) -> u32 {
        self.kdf_rounds
    }

    pub const fn chunk_cap(&self) -> u32 {
        self.chunk_cap
    }

    /// Reject values the decoder would refuse, before anything is written.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.kdf_rounds == 0 {
            return Err(StreamError::KeyDerivation(
                "KDF rounds must be at least 1".into(),
            ));
        }
        if self.salt_len == 0 || self.salt_len > MAX_SALT_LEN {
            return Err(StreamError::KeyDerivation(format!(
                "salt length {} outside 1..={MAX_SALT_LEN}",
                self.salt_len
            )));
        }
        if self.chunk_cap == 0 || self.chunk_cap > MAX_CHUNK_CAP {
            return Err(StreamError::Format(format!(
                "chunk capacity {} outside 1..={MAX_CHUNK_CAP}",
                self.chunk_cap
            )));
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.key_len(), 32);
        assert_eq!(config.salt_len(), 32);
        assert_eq!(config.kdf_rounds(), 10_000);
        assert_eq!(config.chunk_cap(), 65_536);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = StreamConfig::new();
        assert!(matches!(
            base.with_kdf_rounds(0).validate(),
            Err(StreamError::KeyDerivation(_))
        ));
        assert!(matches!(
            base.with_salt_len(0).validate(),
            Err(StreamError::KeyDerivation(_))
        ));
        assert!(matches!(
            base.with_salt_len(129).validate(),
            Err(StreamError::KeyDerivation(_))
        ));
        assert!(matches!(
            base.with_chunk_cap(0).validate(),
            Err(StreamError::Format(_))
        ));
        assert!(matches!(
            base.with_chunk_cap(MAX_CHUNK_CAP + 1).validate(),
            Err(StreamError::Format(_))
        ));
        base.with_chunk_cap(MAX_CHUNK_CAP).validate().unwrap();
        base.with_chunk_cap(1).validate().unwrap();
    }
}
