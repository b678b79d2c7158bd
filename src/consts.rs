//! # Constants
//!
//! Wire-format sizes, header bounds and the defaults used by [`StreamConfig`](crate::StreamConfig).

/// Size of the fixed header part: 4 id bytes, `u16` keyLen, `u16` saltLen,
/// `u32` kdfRounds, `u32` chunkCap.
pub const FIXED_HEADER_LEN: usize = 16;

/// Upper bound on `keyLen` accepted from a header.
pub const MAX_KEY_LEN: u16 = 128;

/// Upper bound on `saltLen` accepted from a header.
pub const MAX_SALT_LEN: u16 = 128;

/// Largest chunk a stream may declare (1 GiB).
pub const MAX_CHUNK_CAP: u32 = 1 << 30;

/// Digest size of the hash suite; also the size of the verifier and every chunk tag.
pub const DIGEST_LEN: usize = 32;

/// Width of the big-endian length field that opens a chunk record.
pub const CHUNK_LEN_FIELD: usize = 4;

/// Chunk record prefix: length field followed by the tag.
pub const CHUNK_HEADER_LEN: usize = CHUNK_LEN_FIELD + DIGEST_LEN;

/// AES-256 key size; the only key length suite 0 can use.
pub const AES256_KEY_LEN: u16 = 32;

/// Default salt length written by the encryptor.
pub const DEFAULT_SALT_LEN: u16 = 32;

/// Default PBKDF2 round count.
pub const DEFAULT_KDF_ROUNDS: u32 = 10_000;

/// Default maximum plaintext bytes per chunk.
pub const DEFAULT_CHUNK_CAP: u32 = 65_536;

/// Length of the random suffix appended to staging and backup file names.
pub const TEMP_SUFFIX_LEN: usize = 8;
