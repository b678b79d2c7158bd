//! src/encryptor/session.rs
//! Encryption session: key setup, header emission and the per-chunk seal step
//!
//! This is the mirror of `decryptor/session.rs`. A session holds the CTR state,
//! the chunk authenticator and the running chunk offset. It performs no reads;
//! the loop that feeds it lives in `encryptor/stream.rs`.

use crate::aliases::{Aes256Ctr, PasswordDigest64};
use crate::config::StreamConfig;
use crate::consts::CHUNK_HEADER_LEN;
use crate::crypto::chunk_mac::ChunkAuthenticator;
use crate::crypto::kdf::derive_keys;
use crate::encryptor::write::{write_chunk, write_header};
use crate::error::StreamError;
use crate::header::{FixedHeader, StreamHeader};
use aes::cipher::{KeyIvInit, StreamCipher};
use rand::{CryptoRng, RngCore};
use std::io::Write;
use tracing::{debug, trace};

/// State for one stream being encrypted.
pub struct EncryptSession {
    cipher: Aes256Ctr,
    auth: ChunkAuthenticator,
    header: StreamHeader,
    offset: u64,
    chunks: u64,
}

impl EncryptSession {
    /// Header written at the start of this stream.
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Maximum plaintext bytes per chunk.
    pub fn chunk_cap(&self) -> usize {
        self.header.fixed.chunk_cap as usize
    }

    /// Offset the next chunk record will be written at, relative to the end of the header.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn chunks_written(&self) -> u64 {
        self.chunks
    }

    /// Encrypt `chunk` in place under the continuing keystream, tag it at the
    /// current offset and write the record.
    pub fn seal_chunk<W: Write>(
        &mut self,
        chunk: &mut [u8],
        output: &mut W,
    ) -> Result<(), StreamError> {
        if chunk.is_empty() || chunk.len() > self.chunk_cap() {
            return Err(StreamError::Format(format!(
                "chunk of {} bytes outside 1..={}",
                chunk.len(),
                self.chunk_cap()
            )));
        }

        self.cipher.apply_keystream(chunk);
        let tag = self.auth.tag(self.offset, chunk)?;
        write_chunk(output, &tag, chunk)?;

        trace!(chunk = self.chunks, offset = self.offset, len = chunk.len(), "sealed chunk");
        self.offset += (CHUNK_HEADER_LEN + chunk.len()) as u64;
        self.chunks += 1;
        Ok(())
    }
}

/// Start an encrypted stream: draw a salt, derive keys, write the header.
///
/// Nothing is written if the configuration is invalid or derivation fails.
pub fn encrypt_begin<W, G>(
    password: &PasswordDigest64,
    config: &StreamConfig,
    rng: &mut G,
    output: &mut W,
) -> Result<EncryptSession, StreamError>
where
    W: Write,
    G: RngCore + CryptoRng,
{
    config.validate()?;

    let mut salt = vec![0u8; config.salt_len() as usize];
    rng.fill_bytes(&mut salt);

    let keys = derive_keys(password, &salt, config.key_len(), config.kdf_rounds())?;

    let header = StreamHeader {
        fixed: FixedHeader {
            cipher: config.cipher(),
            hash: config.hash(),
            kdf: config.kdf(),
            key_len: config.key_len(),
            salt_len: config.salt_len(),
            kdf_rounds: config.kdf_rounds(),
            chunk_cap: config.chunk_cap(),
        },
        salt,
        verifier: keys.verifier,
    };
    write_header(output, &header)?;

    debug!(
        cipher = ?header.fixed.cipher,
        kdf_rounds = header.fixed.kdf_rounds,
        chunk_cap = header.fixed.chunk_cap,
        "encryption session started"
    );

    let cipher = Aes256Ctr::new(keys.enc_key.expose_secret().into(), (&keys.initial_counter).into());

    Ok(EncryptSession {
        cipher,
        auth: ChunkAuthenticator::new(keys.mac_seed),
        header,
        offset: 0,
        chunks: 0,
    })
}
