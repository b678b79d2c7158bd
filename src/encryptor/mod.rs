// src/encryptor/mod.rs

//! Encryption facade.
//!
//! Core API: `encrypt(input, output, &password, &config)?`.
//! Step-wise API: `encrypt_begin` writes the header and returns a session,
//! `encrypt_stream` drives it over a reader.

pub(crate) mod encrypt;
pub(crate) mod session;
pub(crate) mod stream;
pub(crate) mod write;

pub use encrypt::{encrypt, encrypt_with_digest};
pub use session::{encrypt_begin, EncryptSession};
pub use stream::encrypt_stream;
pub use write::{write_chunk, write_header, write_octets};
