//! src/decryptor/stream.rs
//! Chunk-by-chunk streaming decryption

use crate::consts::{CHUNK_HEADER_LEN, CHUNK_LEN_FIELD, DIGEST_LEN};
use crate::decryptor::session::DecryptSession;
use crate::error::StreamError;
use crate::utils::read_up_to;
use std::io::{Read, Write};
use tracing::debug;
use zeroize::Zeroizing;

/// Decrypt chunk records from `input` until it ends cleanly.
///
/// A clean end is end-of-input exactly at a record boundary. Each chunk is
/// authenticated before it is decrypted and written, so `output` only ever
/// receives authenticated plaintext. It may, however, already hold earlier
/// chunks when a later one fails: authentication is per chunk, not per stream.
///
/// Returns the number of plaintext bytes written.
pub fn decrypt_stream<R, W>(
    session: &mut DecryptSession,
    mut input: R,
    mut output: W,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    let chunk_cap = session.chunk_cap();
    // Grown on demand so a hostile chunkCap alone cannot force a large allocation.
    let mut buffer: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::new());
    let mut total = 0u64;

    loop {
        let mut record_header = [0u8; CHUNK_HEADER_LEN];
        let n = read_up_to(&mut input, &mut record_header)?;
        if n == 0 {
            break;
        }
        if n < CHUNK_HEADER_LEN {
            return Err(StreamError::Format(format!(
                "incomplete chunk header at offset {} ({n} of {CHUNK_HEADER_LEN} bytes)",
                session.offset()
            )));
        }

        let mut len_bytes = [0u8; CHUNK_LEN_FIELD];
        len_bytes.copy_from_slice(&record_header[..CHUNK_LEN_FIELD]);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if len == 0 || len > chunk_cap {
            return Err(StreamError::Format(format!(
                "chunk length {len} at offset {} outside 1..={chunk_cap}",
                session.offset()
            )));
        }

        let mut tag = [0u8; DIGEST_LEN];
        tag.copy_from_slice(&record_header[CHUNK_LEN_FIELD..]);

        if buffer.len() < len {
            // Fresh allocation: the old one is wiped as it drops.
            buffer = Zeroizing::new(vec![0u8; len]);
        }
        let body = &mut buffer[..len];
        let got = read_up_to(&mut input, body)?;
        if got < len {
            return Err(StreamError::Format(format!(
                "chunk body truncated at offset {} ({got} of {len} bytes)",
                session.offset()
            )));
        }

        session.open_chunk(&tag, body)?;
        output.write_all(body)?;
        total += len as u64;
    }

    output.flush()?;
    debug!(bytes = total, chunks = session.chunks_read(), "decryption finished");
    Ok(total)
}
