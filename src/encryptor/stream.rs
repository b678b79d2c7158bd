//! src/encryptor/stream.rs
//! Chunked streaming encryption

use crate::encryptor::session::EncryptSession;
use crate::error::StreamError;
use crate::utils::read_up_to;
use std::io::{Read, Write};
use tracing::debug;
use zeroize::Zeroizing;

/// Encrypt everything `source` yields into chunk records on `destination`.
///
/// Reads fill a buffer of up to `chunkCap` bytes; end of input with an empty
/// buffer ends the stream. There is no trailer: a stream is complete after its
/// last chunk. Returns the number of plaintext bytes consumed.
pub fn encrypt_stream<R, W>(
    session: &mut EncryptSession,
    mut source: R,
    mut destination: W,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
{
    let mut buffer = Zeroizing::new(vec![0u8; session.chunk_cap()]);
    let mut total = 0u64;

    loop {
        let n = read_up_to(&mut source, &mut buffer)?;
        if n == 0 {
            break;
        }
        session.seal_chunk(&mut buffer[..n], &mut destination)?;
        total += n as u64;
    }

    destination.flush()?;
    debug!(
        bytes = total,
        chunks = session.chunks_written(),
        "encryption finished"
    );
    Ok(total)
}
