//! src/decryptor/read.rs
//! Short-read aware helpers for pulling header and chunk fields off a stream

use crate::error::StreamError;
use crate::utils::read_up_to;
use std::io::Read;

/// Fill `buf` completely or fail with [`StreamError::Format`] carrying `what`.
///
/// A stream that ends early is a malformed stream, not an I/O failure.
#[inline]
pub fn read_exact_or<R>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<(), StreamError>
where
    R: Read,
{
    let n = read_up_to(reader, buf)?;
    if n < buf.len() {
        return Err(StreamError::Format(format!(
            "{what} ({n} of {} bytes)",
            buf.len()
        )));
    }
    Ok(())
}

/// Read exactly `N` bytes into a stack array, or fail with a format error.
#[inline]
pub fn read_fixed_or<R, const N: usize>(reader: &mut R, what: &str) -> Result<[u8; N], StreamError>
where
    R: Read,
{
    let mut buf = [0u8; N];
    read_exact_or(reader, &mut buf, what)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn short_input_is_a_format_error() {
        let err = read_fixed_or::<_, 4>(&mut Cursor::new(b"ab"), "field").unwrap_err();
        assert_eq!(err.to_string(), "Format error: field (2 of 4 bytes)");
    }

    #[test]
    fn exact_input_is_consumed() {
        let mut cursor = Cursor::new(b"abcdef");
        assert_eq!(read_fixed_or::<_, 4>(&mut cursor, "field").unwrap(), *b"abcd");
        assert_eq!(cursor.position(), 4);
    }
}
