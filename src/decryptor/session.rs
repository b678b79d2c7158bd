//! src/decryptor/session.rs
//! Decryption session: header parsing, password check and the per-chunk open step
//!
//! The password is checked against the header's verifier before a single chunk
//! byte is read. Each chunk is authenticated before it is decrypted; a chunk
//! that fails never reaches the keystream or the output.

use crate::aliases::{Aes256Ctr, PasswordDigest64};
use crate::consts::{CHUNK_HEADER_LEN, DIGEST_LEN};
use crate::crypto::chunk_mac::{verify_tag, ChunkAuthenticator};
use crate::crypto::kdf::derive_keys;
use crate::error::StreamError;
use crate::header::{read_header, StreamHeader};
use aes::cipher::{KeyIvInit, StreamCipher};
use std::io::Read;
use tracing::{debug, trace, warn};

/// State for one stream being decrypted.
pub struct DecryptSession {
    cipher: Aes256Ctr,
    auth: ChunkAuthenticator,
    header: StreamHeader,
    offset: u64,
    chunks: u64,
}

impl DecryptSession {
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    pub fn chunk_cap(&self) -> usize {
        self.header.fixed.chunk_cap as usize
    }

    /// Offset of the next chunk record, relative to the end of the header.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn chunks_read(&self) -> u64 {
        self.chunks
    }

    /// Authenticate `ciphertext` against `tag` at the current offset, then
    /// decrypt it in place.
    ///
    /// On a tag mismatch `ciphertext` is left untouched, the keystream does not
    /// advance and the session must not be used further.
    pub fn open_chunk(
        &mut self,
        tag: &[u8; DIGEST_LEN],
        ciphertext: &mut [u8],
    ) -> Result<(), StreamError> {
        let expected = self.auth.tag(self.offset, ciphertext)?;
        if !verify_tag(tag, &expected) {
            warn!(chunk = self.chunks, offset = self.offset, "chunk authentication failed");
            return Err(StreamError::Authentication(format!(
                "chunk {} authentication failed at offset {}",
                self.chunks, self.offset
            )));
        }

        self.cipher.apply_keystream(ciphertext);

        trace!(chunk = self.chunks, offset = self.offset, len = ciphertext.len(), "opened chunk");
        self.offset += (CHUNK_HEADER_LEN + ciphertext.len()) as u64;
        self.chunks += 1;
        Ok(())
    }
}

/// Read the header, derive keys and check the password.
///
/// # Errors
///
/// - [`StreamError::Format`] - truncated or out-of-bounds header (checked
///   before any key derivation or allocation beyond the salt)
/// - [`StreamError::KeyDerivation`] - the header's rounds or key length are
///   unusable
/// - [`StreamError::Authentication`] - the password does not match the verifier
pub fn decrypt_begin<R: Read>(
    input: &mut R,
    password: &PasswordDigest64,
) -> Result<DecryptSession, StreamError> {
    let header = read_header(input)?;
    let fixed = &header.fixed;

    debug!(
        cipher = ?fixed.cipher,
        kdf_rounds = fixed.kdf_rounds,
        chunk_cap = fixed.chunk_cap,
        "decryption session started"
    );

    let keys = derive_keys(password, &header.salt, fixed.key_len, fixed.kdf_rounds)?;
    if !verify_tag(&header.verifier, &keys.verifier) {
        warn!("password verifier mismatch");
        return Err(StreamError::Authentication("password mismatch".into()));
    }

    let cipher = Aes256Ctr::new(keys.enc_key.expose_secret().into(), (&keys.initial_counter).into());

    Ok(DecryptSession {
        cipher,
        auth: ChunkAuthenticator::new(keys.mac_seed),
        header,
        offset: 0,
        chunks: 0,
    })
}
