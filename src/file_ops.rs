//! # Operations on Streams and Files
//!
//! The surface the command-line glue drives: pick an [`Operation`], hand over a
//! password digest and either a reader/writer pair ([`run`]) or two paths
//! ([`run_file`]). When both paths name the same file the work is routed
//! through a [`FileTransaction`].

use crate::aliases::PasswordDigest64;
use crate::config::StreamConfig;
use crate::decryptor::decrypt_with_digest;
use crate::encryptor::encrypt_with_digest;
use crate::error::StreamError;
use crate::transaction::{same_file, FileTransaction};
use rand::{CryptoRng, RngCore};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
    /// Decrypt into a sink: authenticates the whole stream, produces nothing.
    Verify,
}

/// Run `op` from `input` to `output`. `output` is ignored for [`Operation::Verify`].
///
/// `config` and `rng` are only consulted when encrypting. Returns plaintext bytes processed.
pub fn run<R, W, G>(
    op: Operation,
    input: R,
    output: W,
    password: &PasswordDigest64,
    config: &StreamConfig,
    rng: &mut G,
) -> Result<u64, StreamError>
where
    R: Read,
    W: Write,
    G: RngCore + CryptoRng,
{
    match op {
        Operation::Encrypt => encrypt_with_digest(input, output, password, config, rng),
        Operation::Decrypt => decrypt_with_digest(input, output, password),
        Operation::Verify => decrypt_with_digest(input, io::sink(), password),
    }
}

/// Run `op` from the file at `input` to the file at `output`.
///
/// If `output` is the same file as `input` the result is staged next to it and
/// swapped in only once the whole stream has been processed; on any failure the
/// original is left as it was. Otherwise `output` is created or truncated and,
/// on failure, left holding whatever was written before the error.
pub fn run_file<G: RngCore + CryptoRng>(
    op: Operation,
    input: &Path,
    output: &Path,
    password: &PasswordDigest64,
    config: &StreamConfig,
    rng: &mut G,
) -> Result<u64, StreamError> {
    let reader = BufReader::new(File::open(input)?);

    if op == Operation::Verify {
        return run(op, reader, io::sink(), password, config, rng);
    }

    if !same_file(input, output)? {
        let mut writer = BufWriter::new(File::create(output)?);
        let n = run(op, reader, &mut writer, password, config, rng)?;
        writer.flush()?;
        return Ok(n);
    }

    let (txn, staged) = FileTransaction::begin(input, rng)?;
    let mut writer = BufWriter::new(staged);

    let result = run(op, reader, &mut writer, password, config, rng).and_then(|n| {
        let file = writer.into_inner().map_err(|e| StreamError::Io(e.into_error()))?;
        file.sync_all()?;
        Ok(n)
    });

    match result {
        Ok(n) => {
            txn.commit(rng)?;
            info!(path = %input.display(), bytes = n, ?op, "in-place operation complete");
            Ok(n)
        }
        Err(e) => {
            if let Err(cleanup) = txn.abort() {
                warn!(error = %cleanup, "staging cleanup failed");
            }
            Err(e)
        }
    }
}
