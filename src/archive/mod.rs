//! Directory container format.
//!
//! An archive is a flat sequential stream: an 8-byte magic, a little-endian
//! u64 entry count, then one record per regular file — u64 path length, the
//! UTF-8 relative path with `/` separators, u64 content length, raw bytes.
//! The format stores no directory entries; extraction recreates parent
//! directories on demand from each entry's path. This module is format-only
//! and does not compress anything.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::HuffError;

/// The ASCII octets at offset 0 of every archive stream.
pub const ARCHIVE_MAGIC: &[u8; 8] = b"HUFFARCH";

const COPY_BUFFER_SIZE: usize = 4096;

/// Entry paths beyond this are treated as corruption rather than allocated.
const MAX_ENTRY_PATH_LENGTH: u64 = 64 * 1024;

/// Bundle every regular file under `directory` into a single archive at
/// `output`. The walk order is whatever the recursive traversal yields;
/// extraction does not depend on it.
pub fn archive_directory(directory: &Path, output: &Path) -> Result<(), HuffError> {
    if !directory.is_dir() {
        return Err(HuffError::FileNotFound {
            path: directory.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(directory) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let sink = File::create(output).map_err(|e| HuffError::FileCreate {
        source: e,
        path: output.to_path_buf(),
    })?;
    let mut writer = BufWriter::new(sink);
    let write_err = |e| HuffError::FileWrite {
        source: e,
        path: output.to_path_buf(),
    };

    writer.write_all(ARCHIVE_MAGIC).map_err(write_err)?;
    write_u64_le(&mut writer, files.len() as u64).map_err(write_err)?;

    for file in &files {
        let relative = file
            .strip_prefix(directory)
            .map_err(|_| HuffError::StripPrefix {
                prefix: directory.to_path_buf(),
                path: file.clone(),
            })?;
        let entry_path = relative_path_string(relative)?;

        let length = fs::metadata(file)
            .map_err(|e| HuffError::FileRead {
                source: e,
                path: file.clone(),
            })?
            .len();

        write_u64_le(&mut writer, entry_path.len() as u64).map_err(write_err)?;
        writer.write_all(entry_path.as_bytes()).map_err(write_err)?;
        write_u64_le(&mut writer, length).map_err(write_err)?;

        let mut content = File::open(file).map_err(|_| HuffError::FileNotFound {
            path: file.clone(),
        })?;
        let copied = copy_exact(&mut content, &mut writer, length).map_err(|e| {
            HuffError::FileRead {
                source: e,
                path: file.clone(),
            }
        })?;
        if copied < length {
            return Err(HuffError::FileRead {
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "file shrank while being archived",
                ),
                path: file.clone(),
            });
        }
    }

    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Extract an archive into `output_directory`, creating it (and each entry's
/// parents) as needed.
pub fn extract_archive(archive: &Path, output_directory: &Path) -> Result<(), HuffError> {
    let source = File::open(archive).map_err(|_| HuffError::FileNotFound {
        path: archive.to_path_buf(),
    })?;
    let mut reader = BufReader::new(source);
    let read_err = |e| HuffError::FileRead {
        source: e,
        path: archive.to_path_buf(),
    };

    // The output root is only created once the magic validates.
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic).map_err(read_err)?;
    if &magic != ARCHIVE_MAGIC {
        return Err(HuffError::InvalidFormat(
            "missing HUFFARCH magic".to_string(),
        ));
    }

    fs::create_dir_all(output_directory).map_err(|e| HuffError::FileCreate {
        source: e,
        path: output_directory.to_path_buf(),
    })?;

    let entry_count = read_u64_le(&mut reader).map_err(read_err)?;
    for _ in 0..entry_count {
        let path_length = read_u64_le(&mut reader).map_err(read_err)?;
        if path_length > MAX_ENTRY_PATH_LENGTH {
            return Err(HuffError::InvalidFormat(format!(
                "entry path length {} is implausible",
                path_length
            )));
        }
        let mut path_bytes = vec![0u8; path_length as usize];
        reader.read_exact(&mut path_bytes).map_err(read_err)?;
        let entry_path = String::from_utf8(path_bytes)
            .map_err(|_| HuffError::InvalidFormat("entry path is not UTF-8".to_string()))?;
        let relative = sanitized_entry_path(&entry_path)?;

        let content_length = read_u64_le(&mut reader).map_err(read_err)?;

        let target = output_directory.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| HuffError::FileCreate {
                source: e,
                path: parent.to_path_buf(),
            })?;
        }
        let sink = File::create(&target).map_err(|e| HuffError::FileCreate {
            source: e,
            path: target.clone(),
        })?;
        let mut writer = BufWriter::new(sink);

        let copied = copy_exact(&mut reader, &mut writer, content_length).map_err(read_err)?;
        if copied < content_length {
            return Err(HuffError::InvalidFormat(format!(
                "archive truncated inside entry '{}'",
                entry_path
            )));
        }
        writer.flush().map_err(|e| HuffError::FileWrite {
            source: e,
            path: target.clone(),
        })?;
    }
    Ok(())
}

/// Relative walk path -> archive entry path: UTF-8, `/`-separated.
fn relative_path_string(relative: &Path) -> Result<String, HuffError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    HuffError::InvalidFormat(format!(
                        "file name is not valid UTF-8: '{}'",
                        relative.display()
                    ))
                })?;
                parts.push(part);
            }
            _ => {
                return Err(HuffError::InvalidFormat(format!(
                    "unexpected path component in '{}'",
                    relative.display()
                )))
            }
        }
    }
    Ok(parts.join("/"))
}

/// Archive entry path -> relative filesystem path. Rejects absolute paths
/// and `..` components so a hostile archive cannot write outside the output
/// root.
fn sanitized_entry_path(entry_path: &str) -> Result<PathBuf, HuffError> {
    let path = PathBuf::from(entry_path);
    if entry_path.is_empty()
        || !path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(HuffError::InvalidFormat(format!(
            "unsafe entry path '{}'",
            entry_path
        )));
    }
    Ok(path)
}

fn write_u64_le<W: Write>(writer: &mut W, value: u64) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

fn read_u64_le<R: Read>(reader: &mut R) -> std::io::Result<u64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Copy up to `length` bytes through a fixed 4 KiB buffer. Returns the
/// number of bytes copied, which is less than `length` only when the source
/// runs dry.
fn copy_exact<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    length: u64,
) -> std::io::Result<u64> {
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut remaining = length;
    while remaining > 0 {
        let want = remaining.min(COPY_BUFFER_SIZE as u64) as usize;
        let got = reader.read(&mut buffer[..want])?;
        if got == 0 {
            break;
        }
        writer.write_all(&buffer[..got])?;
        remaining -= got as u64;
    }
    Ok(length - remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn u64_fields_are_little_endian() {
        let mut bytes = Vec::new();
        write_u64_le(&mut bytes, 0x0102_0304_0506_0708).unwrap();
        assert_eq!(bytes, vec![8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(
            read_u64_le(&mut Cursor::new(bytes)).unwrap(),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn copy_exact_reports_short_sources() {
        let mut source = Cursor::new(vec![1u8, 2, 3]);
        let mut sink = Vec::new();
        assert_eq!(copy_exact(&mut source, &mut sink, 10).unwrap(), 3);
        assert_eq!(sink, vec![1, 2, 3]);
    }

    #[test]
    fn entry_paths_use_forward_slashes() {
        let relative = Path::new("a").join("b").join("c.txt");
        assert_eq!(relative_path_string(&relative).unwrap(), "a/b/c.txt");
    }

    #[test]
    fn hostile_entry_paths_are_rejected() {
        for bad in ["../escape", "/etc/passwd", "a/../../b", ""] {
            assert!(
                matches!(sanitized_entry_path(bad), Err(HuffError::InvalidFormat(_))),
                "accepted '{}'",
                bad
            );
        }
        assert!(sanitized_entry_path("a/b/c.txt").is_ok());
    }
}
