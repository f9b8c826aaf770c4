//! Compound compress/decompress operations.
//!
//! Compressing a path chooses between single-file and archive modes: a
//! directory input is first bundled into an intermediate archive, which is
//! compressed like any file and removed on every exit path. Decompressing
//! always lands in a temporary file first; the first 8 decoded bytes decide
//! whether the result is extracted as an archive or renamed into place. The
//! compressed file itself carries no magic — an archive is recognized only
//! after one successful decompression.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::compress::compress_file;
use crate::decompress::decompress_file;
use crate::error::HuffError;
use crate::progress::Callbacks;

const ARCHIVE_TEMP_SUFFIX: &str = ".arch_temp";
const DECOMPRESS_TEMP_SUFFIX: &str = ".tmp";

/// Compress a file or directory tree at `input` into a single compressed
/// file at `output`. Errors are reported through the log sink and returned
/// as [`HuffError::Compression`].
pub fn compress_path(
    input: &Path,
    output: &Path,
    callbacks: &Callbacks,
) -> Result<(), HuffError> {
    run_compress(input, output, callbacks).map_err(|e| {
        let e = HuffError::Compression(Box::new(e));
        callbacks.error(&e.to_string());
        e
    })
}

/// Decompress the file at `input` to `output`: a plain file for single-file
/// payloads, a directory tree when the payload is an archive. Errors are
/// reported through the log sink and returned as [`HuffError::Decompression`].
pub fn decompress_path(
    input: &Path,
    output: &Path,
    callbacks: &Callbacks,
) -> Result<(), HuffError> {
    run_decompress(input, output, callbacks).map_err(|e| {
        let e = HuffError::Decompression(Box::new(e));
        callbacks.error(&e.to_string());
        e
    })
}

fn run_compress(input: &Path, output: &Path, callbacks: &Callbacks) -> Result<(), HuffError> {
    if input.is_dir() {
        let temp = with_suffix(input, ARCHIVE_TEMP_SUFFIX);
        scopeguard::defer! { fs::remove_file(&temp).ok(); }
        callbacks.info(&format!("Archiving directory '{}'", input.display()));
        archive::archive_directory(input, &temp)?;
        compress_file(&temp, output, callbacks)
    } else {
        compress_file(input, output, callbacks)
    }
}

fn run_decompress(input: &Path, output: &Path, callbacks: &Callbacks) -> Result<(), HuffError> {
    let temp = with_suffix(output, DECOMPRESS_TEMP_SUFFIX);
    if let Err(e) = decompress_file(input, &temp, callbacks) {
        fs::remove_file(&temp).ok();
        return Err(e);
    }
    scopeguard::defer! { fs::remove_file(&temp).ok(); }

    if starts_with_archive_magic(&temp) {
        callbacks.info(&format!(
            "Archive detected, extracting to '{}'",
            output.display()
        ));
        remove_existing(output)?;
        archive::extract_archive(&temp, output).map_err(|e| {
            // No partially extracted tree survives a failed extraction.
            fs::remove_dir_all(output).ok();
            e
        })
    } else {
        remove_existing(output)?;
        fs::rename(&temp, output).map_err(|e| HuffError::FileWrite {
            source: e,
            path: output.to_path_buf(),
        })
    }
}

/// `path` with `suffix` appended to its final component.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// True when the file begins with the 8 archive magic bytes. Short or
/// unreadable files are simply not archives.
fn starts_with_archive_magic(path: &Path) -> bool {
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    let mut head = [0u8; 8];
    match file.read_exact(&mut head) {
        Ok(()) => &head == archive::ARCHIVE_MAGIC,
        Err(_) => false,
    }
}

/// Remove whatever currently sits at `path`, file or directory tree.
fn remove_existing(path: &Path) -> Result<(), HuffError> {
    if !path.exists() {
        return Ok(());
    }
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| HuffError::FileCreate {
        source: e,
        path: path.to_path_buf(),
    })
}
