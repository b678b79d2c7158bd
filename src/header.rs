//! # Stream Header
//!
//! Every stream opens with a 16-byte fixed part followed by the salt and the
//! password verifier:
//!
//! ```text
//! u8 cipher | u8 hash | u8 kdf | u8 reserved | u16 keyLen | u16 saltLen | u32 kdfRounds | u32 chunkCap
//! bytes[saltLen] salt
//! bytes[32]      verifier
//! ```
//!
//! All integers are big-endian. The bounds checked here guard against hostile
//! headers before anything is allocated or derived.

use crate::consts::{DIGEST_LEN, FIXED_HEADER_LEN, MAX_CHUNK_CAP, MAX_KEY_LEN, MAX_SALT_LEN};
use crate::decryptor::read::{read_exact_or, read_fixed_or};
use crate::error::StreamError;
use crate::suite::{CipherSuite, HashSuite, KdfSuite};
use std::io::Read;

/// The fixed 16-byte part of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader {
    pub cipher: CipherSuite,
    pub hash: HashSuite,
    pub kdf: KdfSuite,
    pub key_len: u16,
    pub salt_len: u16,
    pub kdf_rounds: u32,
    pub chunk_cap: u32,
}

impl FixedHeader {
    pub fn to_bytes(&self) -> [u8; FIXED_HEADER_LEN] {
        let mut out = [0u8; FIXED_HEADER_LEN];
        out[0] = self.cipher.id();
        out[1] = self.hash.id();
        out[2] = self.kdf.id();
        // out[3] reserved
        out[4..6].copy_from_slice(&self.key_len.to_be_bytes());
        out[6..8].copy_from_slice(&self.salt_len.to_be_bytes());
        out[8..12].copy_from_slice(&self.kdf_rounds.to_be_bytes());
        out[12..16].copy_from_slice(&self.chunk_cap.to_be_bytes());
        out
    }

    /// Parse and bound-check the fixed part. The reserved byte is ignored.
    pub fn from_bytes(buf: &[u8; FIXED_HEADER_LEN]) -> Result<Self, StreamError> {
        let cipher = CipherSuite::try_from(buf[0])?;
        let hash = HashSuite::try_from(buf[1])?;
        let kdf = KdfSuite::try_from(buf[2])?;

        let key_len = u16::from_be_bytes([buf[4], buf[5]]);
        let salt_len = u16::from_be_bytes([buf[6], buf[7]]);
        let kdf_rounds = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);
        let chunk_cap = u32::from_be_bytes([buf[12], buf[13], buf[14], buf[15]]);

        if key_len > MAX_KEY_LEN {
            return Err(StreamError::Format(format!(
                "key length {key_len} exceeds {MAX_KEY_LEN}"
            )));
        }
        if salt_len > MAX_SALT_LEN {
            return Err(StreamError::Format(format!(
                "salt length {salt_len} exceeds {MAX_SALT_LEN}"
            )));
        }
        if chunk_cap == 0 || chunk_cap > MAX_CHUNK_CAP {
            return Err(StreamError::Format(format!(
                "chunk capacity {chunk_cap} outside 1..={MAX_CHUNK_CAP}"
            )));
        }

        Ok(Self {
            cipher,
            hash,
            kdf,
            key_len,
            salt_len,
            kdf_rounds,
            chunk_cap,
        })
    }
}

/// Full header: fixed part, salt and verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    pub fixed: FixedHeader,
    pub salt: Vec<u8>,
    pub verifier: [u8; DIGEST_LEN],
}

impl StreamHeader {
    /// Encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.salt.len() + self.verifier.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.fixed.to_bytes());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.verifier);
        out
    }
}

/// Read and validate a stream header without deriving any keys.
///
/// Useful for tools that want to show a stream's parameters (rounds, chunk
/// size) without asking for a password. The reader is left positioned at the
/// first chunk record.
///
/// # Errors
///
/// - [`StreamError::Format`] - truncated header, unknown suite id, or a length
///   field outside its bound
/// - [`StreamError::Io`] - the reader failed
///
/// # Example
///
/// ```
/// use aesstream_rs::read_header;
/// use std::io::Cursor;
///
/// let mut bytes = vec![0, 0, 0, 0, 0, 32, 0, 4, 0, 0, 0x27, 0x10, 0, 1, 0, 0];
/// bytes.extend_from_slice(&[0xAA; 4]); // salt
/// bytes.extend_from_slice(&[0xBB; 32]); // verifier
///
/// let header = read_header(&mut Cursor::new(bytes))?;
/// assert_eq!(header.fixed.kdf_rounds, 10_000);
/// assert_eq!(header.fixed.chunk_cap, 65_536);
/// assert_eq!(header.salt, vec![0xAA; 4]);
/// # Ok::<(), aesstream_rs::StreamError>(())
/// ```
pub fn read_header<R: Read>(reader: &mut R) -> Result<StreamHeader, StreamError> {
    let fixed_bytes = read_fixed_or::<_, FIXED_HEADER_LEN>(reader, "header incomplete")?;
    let fixed = FixedHeader::from_bytes(&fixed_bytes)?;

    let mut salt = vec![0u8; fixed.salt_len as usize];
    read_exact_or(reader, &mut salt, "header incomplete: salt truncated")?;
    let verifier = read_fixed_or::<_, DIGEST_LEN>(reader, "header incomplete: verifier truncated")?;

    Ok(StreamHeader {
        fixed,
        salt,
        verifier,
    })
}
