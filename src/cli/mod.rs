use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::{ARCHIVE_FILE_EXT, COMPRESSED_FILE_EXT};

/// Command-line surface: `-c <input> <output>` compresses, `-d <input>
/// <output>` decompresses. Exactly one mode must be given.
#[derive(Parser, Debug)]
#[command(author, version, about = "Huffman file compressor with a directory archive mode")]
#[command(group = ArgGroup::new("mode").required(true).args(["compress", "decompress"]))]
pub struct Args {
    #[arg(short = 'c', long, help = format!(
        "Compress INPUT (a file, or a directory to pack as a .{ARCHIVE_FILE_EXT} archive) into OUTPUT"
    ))]
    pub compress: bool,

    #[arg(short = 'd', long, help = format!(
        "Decompress the .{COMPRESSED_FILE_EXT}/.{ARCHIVE_FILE_EXT} file at INPUT into OUTPUT (a file, or a directory when the payload is an archive)"
    ))]
    pub decompress: bool,

    /// Path to read.
    pub input: PathBuf,

    /// Path to write.
    pub output: PathBuf,
}

/// Parse the command line. Help and version requests print and exit 0;
/// parse errors print and come back as `Err`, so the caller exits non-zero.
pub fn run() -> Result<Args, clap::Error> {
    match Args::try_parse() {
        Ok(args) => Ok(args),
        Err(e)
            if e.kind() == ErrorKind::DisplayHelp || e.kind() == ErrorKind::DisplayVersion =>
        {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            Err(e)
        }
    }
}
