use std::io;
use std::path::PathBuf;

/// The primary error type for all operations in the `huffpress` crate.
///
/// Component-level operations return the specific variant; the pipeline
/// wraps them into [`HuffError::Compression`] / [`HuffError::Decompression`]
/// for user-facing reporting, keeping the specific kind reachable through
/// [`std::error::Error::source`].
#[derive(Debug)]
pub enum HuffError {
    /// The input path does not exist or could not be opened for reading.
    FileNotFound { path: PathBuf },

    /// The input contains zero bytes; compression refuses empty input.
    FileEmpty { path: PathBuf },

    /// The output path could not be created (or a pre-existing item at the
    /// path could not be replaced).
    FileCreate { source: io::Error, path: PathBuf },

    /// An underlying read failed mid-stream.
    FileRead { source: io::Error, path: PathBuf },

    /// An underlying write failed.
    FileWrite { source: io::Error, path: PathBuf },

    /// Bytes read do not conform to the expected layout.
    InvalidFormat(String),

    /// No Huffman code exists for an input byte during encoding. Indicates a
    /// corrupt code table; cannot occur when the table was derived from the
    /// same input's frequencies.
    MissingCode { byte: u8 },

    /// The reader could not reconstruct a Huffman tree (truncated or corrupt
    /// input).
    TreeDeserialization(String),

    /// An error occurred when trying to strip a prefix from a file path
    /// while archiving a directory.
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// An error reported by the directory walker.
    Walk(walkdir::Error),

    /// Umbrella kind for the compress pipeline.
    Compression(Box<HuffError>),

    /// Umbrella kind for the decompress pipeline.
    Decompression(Box<HuffError>),
}

impl std::fmt::Display for HuffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HuffError::FileNotFound { path } => {
                write!(f, "File not found: '{}'", path.display())
            }
            HuffError::FileEmpty { path } => {
                write!(f, "Input file is empty: '{}'", path.display())
            }
            HuffError::FileCreate { source, path } => {
                write!(f, "Could not create '{}': {}", path.display(), source)
            }
            HuffError::FileRead { source, path } => {
                write!(f, "Error reading from '{}': {}", path.display(), source)
            }
            HuffError::FileWrite { source, path } => {
                write!(f, "Error writing to '{}': {}", path.display(), source)
            }
            HuffError::InvalidFormat(msg) => {
                write!(f, "Invalid file format or corrupted data: {}", msg)
            }
            HuffError::MissingCode { byte } => {
                write!(f, "No Huffman code found for byte value {}", byte)
            }
            HuffError::TreeDeserialization(msg) => {
                write!(f, "Failed to deserialize Huffman tree: {}", msg)
            }
            HuffError::StripPrefix { prefix, path } => write!(
                f,
                "Could not strip prefix '{}' from path '{}'",
                prefix.display(),
                path.display()
            ),
            HuffError::Walk(e) => write!(f, "Directory walk failed: {}", e),
            HuffError::Compression(e) => write!(f, "Compression failed: {}", e),
            HuffError::Decompression(e) => write!(f, "Decompression failed: {}", e),
        }
    }
}

impl std::error::Error for HuffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuffError::FileCreate { source, .. } => Some(source),
            HuffError::FileRead { source, .. } => Some(source),
            HuffError::FileWrite { source, .. } => Some(source),
            HuffError::Walk(e) => Some(e),
            HuffError::Compression(e) => Some(e.as_ref()),
            HuffError::Decompression(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for HuffError {
    fn from(err: walkdir::Error) -> Self {
        HuffError::Walk(err)
    }
}
