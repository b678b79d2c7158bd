//! src/encryptor/write.rs
//! Stream write helpers

use crate::consts::DIGEST_LEN;
use crate::error::StreamError;
use crate::header::StreamHeader;
use std::io::Write;

#[inline]
pub fn write_octets<W: Write>(writer: &mut W, data: &[u8]) -> Result<(), StreamError> {
    writer.write_all(data).map_err(StreamError::Io)
}

/// Fixed part, salt, verifier. Once per stream.
#[inline]
pub fn write_header<W: Write>(writer: &mut W, header: &StreamHeader) -> Result<(), StreamError> {
    write_octets(writer, &header.fixed.to_bytes())?;
    write_octets(writer, &header.salt)?;
    write_octets(writer, &header.verifier)
}

/// One chunk record: `u32_be(len) || tag || ciphertext`.
#[inline]
pub fn write_chunk<W: Write>(
    writer: &mut W,
    tag: &[u8; DIGEST_LEN],
    ciphertext: &[u8],
) -> Result<(), StreamError> {
    let len = u32::try_from(ciphertext.len())
        .map_err(|_| StreamError::Format(format!("chunk of {} bytes too large", ciphertext.len())))?;
    write_octets(writer, &len.to_be_bytes())?;
    write_octets(writer, tag)?;
    write_octets(writer, ciphertext)
}
