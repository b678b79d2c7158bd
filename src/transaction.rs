//! # In-Place File Transactions
//!
//! Encrypting or decrypting a file onto itself cannot write to the file it is
//! still reading. Instead the output goes to a staging file next to the
//! original, and [`FileTransaction::commit`] swaps it in with two renames:
//!
//! 1. original → backup (random suffix). On failure: staging removed, original untouched.
//! 2. staging → original name. On failure: backup renamed back, staging removed.
//! 3. backup removed.
//!
//! Until step 2 succeeds the original content is always reachable under its
//! own name or the backup name. Staging and backup live in the original's
//! directory so every rename stays on one filesystem.

use crate::consts::TEMP_SUFFIX_LEN;
use crate::crypto::rng::random_suffix;
use crate::error::StreamError;
use rand::{CryptoRng, RngCore};
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Attempts at finding an unused random sibling name before giving up.
const NAME_ATTEMPTS: usize = 16;

/// The filesystem operations a commit or rollback performs.
///
/// [`StdFileSystem`] is the real thing; tests substitute one that fails on
/// chosen calls.
pub trait FileSystem {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Passes straight through to `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    #[inline]
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    #[inline]
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// A staged in-place rewrite of one file.
///
/// Dropping a transaction without calling [`commit`](Self::commit) or
/// [`abort`](Self::abort) removes the staging file.
#[derive(Debug)]
pub struct FileTransaction<F: FileSystem = StdFileSystem> {
    source: PathBuf,
    staged: PathBuf,
    fs: F,
    armed: bool,
}

impl FileTransaction<StdFileSystem> {
    /// Stage an in-place rewrite of `source` on the real filesystem.
    pub fn begin<G: RngCore + CryptoRng>(source: &Path, rng: &mut G) -> Result<(Self, File), StreamError> {
        Self::begin_with(source, rng, StdFileSystem)
    }
}

impl<F: FileSystem> FileTransaction<F> {
    /// Stage an in-place rewrite of `source`, returning the transaction and the
    /// open staging file to write the new content into.
    ///
    /// Fails if the directory holding `source` is not writable.
    pub fn begin_with<G: RngCore + CryptoRng>(
        source: &Path,
        rng: &mut G,
        filesystem: F,
    ) -> Result<(Self, File), StreamError> {
        let source = fs::canonicalize(source)
            .map_err(|e| StreamError::transaction("cannot resolve source path", source, e))?;
        let dir = parent_dir(&source);

        let dir_meta = fs::metadata(&dir)
            .map_err(|e| StreamError::transaction("cannot inspect directory", &dir, e))?;
        if dir_meta.permissions().readonly() {
            return Err(StreamError::transaction(
                "directory is not writable for in-place operation",
                &dir,
                io::Error::from(ErrorKind::PermissionDenied),
            ));
        }

        let (staged, file) = create_staging_file(&source, rng)?;

        // Carry the original's permission bits over to the replacement.
        if let Ok(meta) = fs::metadata(&source) {
            if let Err(e) = file.set_permissions(meta.permissions()) {
                debug!(path = %staged.display(), error = %e, "could not copy permissions");
            }
        }

        debug!(source = %source.display(), staged = %staged.display(), "in-place transaction staged");
        Ok((
            Self {
                source,
                staged,
                fs: filesystem,
                armed: true,
            },
            file,
        ))
    }

    /// Resolved path of the file being rewritten.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path the new content is being written to.
    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    /// Swap the staged file in place of the original.
    ///
    /// The staging file must be fully written and closed (or synced) first.
    pub fn commit<G: RngCore + CryptoRng>(mut self, rng: &mut G) -> Result<(), StreamError> {
        self.armed = false;

        let backup = match unused_sibling(&self.source, rng) {
            Ok(path) => path,
            Err(e) => {
                self.discard_staged();
                return Err(e);
            }
        };

        if let Err(e) = self.fs.rename(&self.source, &backup) {
            self.discard_staged();
            return Err(StreamError::transaction(
                "unable to create restore point",
                &self.source,
                e,
            ));
        }

        if let Err(e) = self.fs.rename(&self.staged, &self.source) {
            warn!(source = %self.source.display(), "replacing original failed; rolling back");
            if let Err(restore) = self.fs.rename(&backup, &self.source) {
                // The staging file is kept too: nothing else holds the new content.
                warn!(backup = %backup.display(), error = %restore, "rollback failed");
                return Err(StreamError::transaction(
                    "unable to replace original and unable to restore it; original content preserved at",
                    &backup,
                    restore,
                ));
            }
            self.discard_staged();
            return Err(StreamError::transaction(
                "unable to rename transformed file back to original",
                &self.source,
                e,
            ));
        }

        if let Err(e) = self.fs.remove_file(&backup) {
            warn!(backup = %backup.display(), error = %e, "could not remove backup of original");
        }

        debug!(source = %self.source.display(), "in-place transaction committed");
        Ok(())
    }

    /// Give up: remove the staging file and leave the original alone.
    pub fn abort(mut self) -> Result<(), StreamError> {
        self.armed = false;
        match self.fs.remove_file(&self.staged) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StreamError::transaction(
                "unable to remove staging file",
                &self.staged,
                e,
            )),
        }
    }

    fn discard_staged(&self) {
        if let Err(e) = self.fs.remove_file(&self.staged) {
            warn!(staged = %self.staged.display(), error = %e, "could not remove staging file");
        }
    }
}

impl<F: FileSystem> Drop for FileTransaction<F> {
    fn drop(&mut self) {
        if self.armed {
            self.discard_staged();
        }
    }
}

/// Whether `a` and `b` name the same existing file.
///
/// Compares device and inode on Unix, so hard links and differently spelled
/// paths are caught. A `b` that does not exist is never the same file.
pub fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    let meta_b = match fs::metadata(b) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let meta_a = fs::metadata(a)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
    }

    #[cfg(not(unix))]
    {
        let _ = (meta_a, meta_b);
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// A sibling of `path` that does not currently exist.
fn unused_sibling<G: RngCore + CryptoRng>(path: &Path, rng: &mut G) -> Result<PathBuf, StreamError> {
    for _ in 0..NAME_ATTEMPTS {
        let candidate = sibling_with_suffix(path, &random_suffix(rng, TEMP_SUFFIX_LEN));
        match fs::symlink_metadata(&candidate) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(candidate),
            _ => continue,
        }
    }
    Err(StreamError::transaction(
        "no free temporary name",
        path,
        io::Error::from(ErrorKind::AlreadyExists),
    ))
}

/// Create a fresh staging file next to `path`; never opens an existing file.
fn create_staging_file<G: RngCore + CryptoRng>(
    path: &Path,
    rng: &mut G,
) -> Result<(PathBuf, File), StreamError> {
    let mut last_err = io::Error::from(ErrorKind::AlreadyExists);
    for _ in 0..NAME_ATTEMPTS {
        let candidate = sibling_with_suffix(path, &random_suffix(rng, TEMP_SUFFIX_LEN));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => last_err = e,
            Err(e) => {
                return Err(StreamError::transaction(
                    "unable to create staging file",
                    &candidate,
                    e,
                ))
            }
        }
    }
    Err(StreamError::transaction(
        "no free staging name",
        path,
        last_err,
    ))
}
