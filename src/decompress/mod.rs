//! Single-file decompression.
//!
//! Reader side of the compressed-file layout. The tree section is bit-packed
//! and not byte-aligned at its end, so after rebuilding the tree the reader
//! must realign before the size field — the writer flushed at that point.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::bitio::BitReader;
use crate::error::HuffError;
use crate::huffman::{HuffNode, HuffmanTree};
use crate::progress::{Callbacks, ProgressMeter};

/// Decompress `input` into `output`.
///
/// A payload that ends before the declared byte count is reached is a soft
/// failure: the decoded prefix is kept, the shortfall is reported through
/// the log sink, and the operation still returns `Ok`. Progress is reported
/// proportional to bytes decoded.
pub fn decompress_file(
    input: &Path,
    output: &Path,
    callbacks: &Callbacks,
) -> Result<(), HuffError> {
    let source = File::open(input).map_err(|_| HuffError::FileNotFound {
        path: input.to_path_buf(),
    })?;
    let mut reader = BitReader::new(source);

    let tree = HuffmanTree::deserialize_from(&mut reader)?;
    reader.align_to_byte();

    let original_size = read_size(&mut reader).ok_or_else(|| {
        HuffError::InvalidFormat("stream ended inside the original-size field".to_string())
    })?;

    let sink = File::create(output).map_err(|e| HuffError::FileCreate {
        source: e,
        path: output.to_path_buf(),
    })?;
    let mut writer = BufWriter::new(sink);

    let decoded = decode(&mut reader, &mut writer, &tree, original_size, callbacks).map_err(
        |e| HuffError::FileWrite {
            source: e,
            path: output.to_path_buf(),
        },
    )?;

    writer.flush().map_err(|e| HuffError::FileWrite {
        source: e,
        path: output.to_path_buf(),
    })?;

    if decoded < original_size {
        callbacks.error(&format!(
            "Expected {} bytes but the stream ended after {}; keeping the decoded prefix",
            original_size, decoded
        ));
    }
    Ok(())
}

/// Read the 8-byte big-endian original-size field bit-wise, honoring the
/// reader's current offset (the caller aligns first).
pub(crate) fn read_size<R: Read>(reader: &mut BitReader<R>) -> Option<u64> {
    let mut size = 0u64;
    for _ in 0..8 {
        size = (size << 8) | reader.read_byte()? as u64;
    }
    Some(size)
}

/// Walk the tree one bit at a time, left on `0` and right on `1`, emitting
/// the leaf byte and resetting to the root, until `original_size` bytes are
/// out or the stream ends. Returns the number of bytes emitted.
fn decode<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    writer: &mut W,
    tree: &HuffmanTree,
    original_size: u64,
    callbacks: &Callbacks,
) -> std::io::Result<u64> {
    let mut meter = ProgressMeter::new(callbacks, original_size);
    let mut current = tree.root();
    let mut written = 0u64;

    while written < original_size {
        let Some(bit) = reader.read_bit() else {
            break;
        };
        // A bare-leaf root only occurs in hand-crafted streams; it decodes
        // one byte per bit.
        if let HuffNode::Internal { left, right } = current {
            current = if bit { right.as_ref() } else { left.as_ref() };
        }
        if let HuffNode::Leaf { byte } = current {
            writer.write_all(&[*byte])?;
            written += 1;
            meter.add(1);
            current = tree.root();
        }
    }
    if written == original_size {
        meter.finish();
    }
    Ok(written)
}
