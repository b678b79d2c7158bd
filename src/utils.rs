//! Utility functions used across the library.

use crate::aliases::{PasswordDigest64, PasswordString};
use crate::error::StreamError;
use sha2::{Digest, Sha512};
use std::io::{ErrorKind, Read};

/// Pre-hash a passphrase with SHA-512.
///
/// The codec never sees the raw passphrase: this digest is what reaches PBKDF2.
/// Hashing first gives every passphrase, however short or however it was
/// typed, the same 64-byte shape.
#[inline]
pub fn hash_password(password: &PasswordString) -> PasswordDigest64 {
    let mut digest = PasswordDigest64::new([0u8; 64]);
    let hash = Sha512::digest(password.expose_secret().as_bytes());
    digest.expose_secret_mut().copy_from_slice(&hash);
    digest
}

/// Read until `buf` is full or the reader reports end of input.
///
/// Returns the number of bytes read; anything less than `buf.len()` means EOF.
/// Pipes hand out data in arbitrary pieces, so a single `read` is not enough
/// to tell a short chunk from a slow writer.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, StreamError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Io(e)),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Hands out at most two bytes per call, like a slow pipe.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.0.len().min(buf.len()).min(2);
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_up_to_fills_across_short_reads() {
        let mut buf = [0u8; 5];
        assert_eq!(read_up_to(&mut Trickle(b"abcdefg"), &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"abcde");
    }

    #[test]
    fn read_up_to_stops_at_eof() {
        let mut buf = [0u8; 8];
        assert_eq!(read_up_to(&mut Cursor::new(b"abc"), &mut buf).unwrap(), 3);
        assert_eq!(read_up_to(&mut Cursor::new(b""), &mut buf).unwrap(), 0);
    }

    #[test]
    fn password_digest_is_sha512() {
        let digest = hash_password(&PasswordString::new("abc".to_string()));
        assert_eq!(
            hex::encode(digest.expose_secret()),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }
}
