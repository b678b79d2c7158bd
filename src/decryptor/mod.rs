// src/decryptor/mod.rs

//! Decryption facade.
//!
//! Core API: `decrypt(input, output, &password)?` and `verify(input, &password)?`.
//! Step-wise API: `decrypt_begin` reads the header and checks the password,
//! `decrypt_stream` drives the session over the remaining chunks.

pub(crate) mod decrypt;
pub(crate) mod read;
pub(crate) mod session;
pub(crate) mod stream;

pub use decrypt::{decrypt, decrypt_with_digest, verify};
pub use read::{read_exact_or, read_fixed_or};
pub use session::{decrypt_begin, DecryptSession};
pub use stream::decrypt_stream;
