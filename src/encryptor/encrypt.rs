//! src/encryptor/encrypt.rs
//! High-level encryption entry points

use crate::aliases::{PasswordDigest64, PasswordString};
use crate::config::StreamConfig;
use crate::crypto::rng::os_rng;
use crate::encryptor::session::encrypt_begin;
use crate::encryptor::stream::encrypt_stream;
use crate::error::StreamError;
use crate::utils::hash_password;
use rand::{CryptoRng, RngCore};
use std::io::{Read, Write};

/// Encrypt `input` into `output` with a fresh random salt.
///
/// Returns the number of plaintext bytes encrypted.
///
/// # Example
///
/// ```
/// use aesstream_rs::aliases::PasswordString;
/// use aesstream_rs::{decrypt, encrypt, StreamConfig};
/// use std::io::Cursor;
///
/// let password = PasswordString::new("correct-horse".to_string());
/// let config = StreamConfig::new().with_kdf_rounds(10).with_chunk_cap(4);
///
/// let mut sealed = Vec::new();
/// encrypt(Cursor::new(b"HELLO!"), &mut sealed, &password, &config)?;
///
/// let mut opened = Vec::new();
/// decrypt(Cursor::new(&sealed), &mut opened, &password)?;
/// assert_eq!(opened, b"HELLO!");
/// # Ok::<(), aesstream_rs::StreamError>(())
/// ```
pub fn encrypt<R, W>(
    input: R,
    output: W,
    password: &PasswordString,
    config: &StreamConfig,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    if password.expose_secret().is_empty() {
        return Err(StreamError::KeyDerivation("empty password".into()));
    }
    encrypt_with_digest(input, output, &hash_password(password), config, &mut os_rng()?)
}

/// Encrypt with an already-hashed password and a caller-supplied random source.
pub fn encrypt_with_digest<R, W, G>(
    input: R,
    mut output: W,
    password: &PasswordDigest64,
    config: &StreamConfig,
    rng: &mut G,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
    G: RngCore + CryptoRng,
{
    let mut session = encrypt_begin(password, config, rng, &mut output)?;
    encrypt_stream(&mut session, input, output)
}
