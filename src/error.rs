//! # Error Types
//!
//! Every operation in this crate returns [`Result<T, StreamError>`](StreamError).
//! None of the variants are recoverable for the stream they came from: the codec
//! never skips a bad chunk, since doing so would desynchronize the keystream and
//! every later MAC offset.

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all stream and file operations.
#[derive(Error, Debug)]
pub enum StreamError {
    /// I/O error from the caller-supplied reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural violation of the wire format:
    /// - truncated fixed or variable header
    /// - unknown suite id
    /// - `keyLen`/`saltLen`/`chunkCap` outside their bounds
    /// - incomplete chunk header, zero or oversized chunk length, short chunk body
    #[error("Format error: {0}")]
    Format(String),

    /// Wrong passphrase (verifier mismatch at open time) or a chunk whose tag
    /// does not match. Chunk failures name the chunk index and offset.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Parameters the KDF or cipher primitives refuse (zero rounds, unusable
    /// key length, bad configuration).
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Filesystem failure while staging, renaming or rolling back an in-place
    /// operation. By the time this is returned the original content is back
    /// under its own name, or `path` names where it was preserved.
    #[error("Transaction error: {reason} ({})", path.display())]
    Transaction {
        reason: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StreamError {
    pub(crate) fn transaction(
        reason: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        StreamError::Transaction {
            reason: reason.into(),
            path: path.into(),
            source,
        }
    }
}
