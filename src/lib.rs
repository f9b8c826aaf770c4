//! # HuffPress Core Library
//!
//! Lossless byte-oriented compression built on static Huffman coding, with
//! a container format that lets one compressed stream carry either a single
//! file or a whole directory tree.
//!
//! This crate backs the `huffpress` command-line application, but the
//! pipeline and codec APIs are usable directly.
//!
//! ## Key Modules
//!
//! - [`bitio`]: MSB-first bit reader/writer over byte streams.
//! - [`huffman`]: frequency tabulation, tree construction, code assignment,
//!   and the bit-packed tree wire form.
//! - [`compress`] / [`decompress`]: the single-file codec and its on-disk
//!   layout (tree, 8-byte original size, coded payload).
//! - [`archive`]: the `HUFFARCH` directory container format (format-only,
//!   no compression of its own).
//! - [`pipeline`]: the compound "compress a path" / "decompress a path"
//!   operations, including archive detection and temp-file lifecycle.
//! - [`progress`]: injected log/progress sinks for front-ends.
//!
//! ## Example
//!
//! ```no_run
//! use huffpress::pipeline;
//! use huffpress::progress::Callbacks;
//!
//! let callbacks = Callbacks::new();
//! pipeline::compress_path(
//!     "notes.txt".as_ref(),
//!     "notes.txt.hpf".as_ref(),
//!     &callbacks,
//! )?;
//! # Ok::<(), huffpress::HuffError>(())
//! ```

pub mod archive;
pub mod bitio;
pub mod cli;
pub mod compress;
pub mod decompress;
pub mod error;
pub mod huffman;
pub mod pipeline;
pub mod progress;

pub use error::HuffError;

/// Conventional extension for single compressed files. The format itself is
/// identified by content, not extension.
pub const COMPRESSED_FILE_EXT: &str = "hpf";

/// Conventional extension for compressed directory archives.
pub const ARCHIVE_FILE_EXT: &str = "hpa";
