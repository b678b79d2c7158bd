//! src/crypto/chunk_mac.rs
//! Per-chunk authentication keyed by position
//!
//! Every chunk gets its own HMAC-SHA256 key, `SHA-256(mac_seed || u64_be(offset))`,
//! where `offset` is where the chunk record starts inside the chunk section of
//! the stream. Moving a chunk, swapping two chunks, or splicing one in from
//! another stream changes the key it is checked under, so its tag fails.

use crate::aliases::{ChunkMacKey32, HmacSha256, MacSeedKey32};
use crate::consts::DIGEST_LEN;
use crate::error::StreamError;
use hmac::Mac;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Derives chunk keys and computes chunk tags for one session.
pub struct ChunkAuthenticator {
    mac_seed: MacSeedKey32,
}

impl ChunkAuthenticator {
    pub fn new(mac_seed: MacSeedKey32) -> Self {
        Self { mac_seed }
    }

    /// `SHA-256(mac_seed || u64_be(offset))`
    pub fn chunk_mac_key(&self, offset: u64) -> ChunkMacKey32 {
        let mut hasher = Sha256::new();
        hasher.update(self.mac_seed.expose_secret());
        hasher.update(offset.to_be_bytes());

        let mut key = ChunkMacKey32::new([0u8; 32]);
        key.expose_secret_mut().copy_from_slice(&hasher.finalize());
        key
    }

    /// HMAC over `u32_be(len) || ciphertext` under the key for `offset`.
    pub fn tag(&self, offset: u64, ciphertext: &[u8]) -> Result<[u8; DIGEST_LEN], StreamError> {
        let len = u32::try_from(ciphertext.len()).map_err(|_| {
            StreamError::Format(format!("chunk of {} bytes too large", ciphertext.len()))
        })?;

        let key = self.chunk_mac_key(offset);
        let mut mac = <HmacSha256 as Mac>::new_from_slice(key.expose_secret())
            .map_err(|e| StreamError::KeyDerivation(format!("chunk MAC key rejected: {e}")))?;
        mac.update(&len.to_be_bytes());
        mac.update(ciphertext);
        Ok(mac.finalize().into_bytes().into())
    }
}

/// Constant-time tag comparison. Unequal lengths never match.
#[inline]
pub fn verify_tag(expected: &[u8], computed: &[u8]) -> bool {
    if expected.len() != computed.len() {
        return false;
    }
    expected.ct_eq(computed).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> ChunkAuthenticator {
        ChunkAuthenticator::new(MacSeedKey32::new([0x42; 32]))
    }

    #[test]
    fn chunk_key_binds_the_offset() {
        let auth = authenticator();

        let mut concat = vec![0x42u8; 32];
        concat.extend_from_slice(&36u64.to_be_bytes());
        assert_eq!(
            auth.chunk_mac_key(36).expose_secret().as_slice(),
            Sha256::digest(&concat).as_slice()
        );
        assert_ne!(
            auth.chunk_mac_key(0).expose_secret(),
            auth.chunk_mac_key(36).expose_secret()
        );
    }

    #[test]
    fn tag_covers_length_prefix() {
        let auth = authenticator();
        let key = auth.chunk_mac_key(0);

        let mut mac = <HmacSha256 as Mac>::new_from_slice(key.expose_secret()).unwrap();
        mac.update(&[0, 0, 0, 3]);
        mac.update(b"abc");
        let expected: [u8; 32] = mac.finalize().into_bytes().into();

        assert_eq!(auth.tag(0, b"abc").unwrap(), expected);
    }

    #[test]
    fn same_bytes_at_another_offset_fail() {
        let auth = authenticator();
        let tag = auth.tag(0, b"payload").unwrap();
        assert!(verify_tag(&tag, &auth.tag(0, b"payload").unwrap()));
        assert!(!verify_tag(&tag, &auth.tag(43, b"payload").unwrap()));
    }

    #[test]
    fn verify_tag_length_mismatch() {
        assert!(!verify_tag(&[1, 2, 3], &[1, 2]));
        assert!(!verify_tag(&[], &[0]));
        assert!(verify_tag(&[], &[]));
    }
}
