//! src/decryptor/decrypt.rs
//! High-level decryption entry points

use crate::aliases::{PasswordDigest64, PasswordString};
use crate::decryptor::session::decrypt_begin;
use crate::decryptor::stream::decrypt_stream;
use crate::error::StreamError;
use crate::utils::hash_password;
use std::io::{self, Read, Write};

/// Decrypt a stream produced by [`encrypt`](crate::encrypt).
///
/// Every parameter comes from the stream's header. Returns the number of
/// plaintext bytes written.
///
/// Authentication is per chunk: when a late chunk fails, earlier chunks have
/// already been written to `output`. Run [`verify`] first, or buffer, when the
/// caller needs all-or-nothing.
pub fn decrypt<R, W>(input: R, output: W, password: &PasswordString) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    decrypt_with_digest(input, output, &hash_password(password))
}

/// Decrypt with an already-hashed password.
pub fn decrypt_with_digest<R, W>(
    mut input: R,
    output: W,
    password: &PasswordDigest64,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    let mut session = decrypt_begin(&mut input, password)?;
    decrypt_stream(&mut session, input, output)
}

/// Authenticate an entire stream without producing any plaintext.
///
/// Succeeds only if the password is right and every chunk verifies.
pub fn verify<R: Read>(input: R, password: &PasswordString) -> Result<u64, StreamError> {
    decrypt_with_digest(input, io::sink(), &hash_password(password))
}
