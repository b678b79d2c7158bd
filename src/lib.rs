// src/lib.rs

//! Streaming passphrase encryption that works through pipes.
//!
//! A stream is a self-describing header followed by independently
//! authenticated chunks:
//!
//! - AES-256-CTR, one continuous keystream over the whole plaintext
//! - HMAC-SHA256 per chunk, keyed by the chunk's byte offset
//! - PBKDF2-HMAC-SHA512 over a SHA-512 pre-hash of the passphrase
//!
//! Nothing is ever seeked, memory use is bounded by the chunk size, and a
//! wrong password is detected from the header alone.

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod file_ops;
pub mod header;
pub mod suite;
pub mod transaction;
pub mod utils;

// High-level API
pub use config::StreamConfig;
pub use decryptor::{decrypt, verify};
pub use encryptor::encrypt;
pub use error::StreamError;
pub use file_ops::{run, run_file, Operation};

// Step-wise codec
pub use decryptor::{decrypt_begin, decrypt_stream, DecryptSession};
pub use encryptor::{encrypt_begin, encrypt_stream, EncryptSession};

pub use crypto::chunk_mac::{verify_tag, ChunkAuthenticator};
pub use crypto::kdf::{derive_keys, derive_secure_pbkdf2_key, DerivedKeys};
pub use crypto::rng::os_rng;
pub use header::{read_header, FixedHeader, StreamHeader};
pub use suite::{CipherSuite, HashSuite, KdfSuite};
pub use transaction::FileTransaction;
pub use utils::hash_password;
