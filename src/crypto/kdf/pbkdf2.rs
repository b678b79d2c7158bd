//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{HmacSha512, KdfOutput64, PasswordDigest64};
use crate::error::StreamError;

use pbkdf2::pbkdf2;

/// Stretch the password digest into 64 bytes of key material with
/// PBKDF2-HMAC-SHA512, written straight into the caller's secure buffer.
///
/// The digest is the HMAC key, the salt the message; `rounds` must be ≥ 1.
#[inline(always)]
pub fn derive_secure_pbkdf2_key(
    password: &PasswordDigest64,
    salt: &[u8],
    rounds: u32,
    out_key: &mut KdfOutput64,
) -> Result<(), StreamError> {
    if rounds == 0 {
        return Err(StreamError::KeyDerivation(
            "PBKDF2 rounds must be ≥1".into(),
        ));
    }

    pbkdf2::<HmacSha512>(
        password.expose_secret(),
        salt,
        rounds,
        out_key.expose_secret_mut(),
    )
    .map_err(|e| StreamError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;
    Ok(())
}
