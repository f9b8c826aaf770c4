//! Single-file compression.
//!
//! Owns the writer side of the compressed-file layout: the bit-packed
//! Huffman tree, a flush-aligned 8-byte big-endian original-size field, and
//! the coded payload, zero-padded into the final byte. Compression is
//! two-pass: the first pass tabulates frequencies, the second emits codes.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::bitio::BitWriter;
use crate::error::HuffError;
use crate::huffman::{FrequencyMap, HuffmanTree};
use crate::progress::{Callbacks, ProgressMeter};

const CHUNK_SIZE: usize = 64 * 1024;

/// Compress `input` into `output`.
///
/// Fails with [`HuffError::FileEmpty`] on zero-byte input: an empty
/// frequency map has no tree, so there is nothing to write. Progress is
/// reported proportional to bytes encoded in the second pass.
pub fn compress_file(
    input: &Path,
    output: &Path,
    callbacks: &Callbacks,
) -> Result<(), HuffError> {
    // First pass: frequencies and total size.
    let source = File::open(input).map_err(|_| HuffError::FileNotFound {
        path: input.to_path_buf(),
    })?;
    let freq = FrequencyMap::from_reader(source).map_err(|e| HuffError::FileRead {
        source: e,
        path: input.to_path_buf(),
    })?;
    if freq.total() == 0 {
        return Err(HuffError::FileEmpty {
            path: input.to_path_buf(),
        });
    }

    let tree = HuffmanTree::from_frequencies(&freq).ok_or(HuffError::FileEmpty {
        path: input.to_path_buf(),
    })?;
    let codes = tree.code_table();
    callbacks.info(&format!(
        "Encoding {} bytes ({} distinct values)",
        freq.total(),
        freq.distinct()
    ));

    // Second pass: re-read the input and emit the container.
    let mut source = File::open(input).map_err(|_| HuffError::FileNotFound {
        path: input.to_path_buf(),
    })?;
    let sink = File::create(output).map_err(|e| HuffError::FileCreate {
        source: e,
        path: output.to_path_buf(),
    })?;
    let mut writer = BitWriter::new(BufWriter::new(sink));

    let write_err = |e| HuffError::FileWrite {
        source: e,
        path: output.to_path_buf(),
    };

    tree.serialize_into(&mut writer).map_err(write_err)?;
    write_size(&mut writer, freq.total()).map_err(write_err)?;

    let mut meter = ProgressMeter::new(callbacks, freq.total());
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = source.read(&mut chunk).map_err(|e| HuffError::FileRead {
            source: e,
            path: input.to_path_buf(),
        })?;
        if n == 0 {
            break;
        }
        for &byte in &chunk[..n] {
            let code = codes.get(&byte).ok_or(HuffError::MissingCode { byte })?;
            writer.write_bits(code).map_err(write_err)?;
        }
        meter.add(n as u64);
    }

    writer.finish().map_err(write_err)?;
    meter.finish();

    if let Ok(meta) = std::fs::metadata(output) {
        let ratio = 100.0 * (1.0 - meta.len() as f64 / freq.total() as f64);
        callbacks.info(&format!(
            "Compressed {} -> {} bytes (saved {:.1}%)",
            freq.total(),
            meta.len(),
            ratio
        ));
    }
    Ok(())
}

/// Write the original-size field: 8 bytes, big-endian. `write_byte` flushes
/// the bit buffer first, so the field starts on a byte boundary regardless
/// of where the tree section ended.
pub(crate) fn write_size<W: Write>(
    writer: &mut BitWriter<W>,
    size: u64,
) -> std::io::Result<()> {
    for i in (0..8).rev() {
        writer.write_byte((size >> (i * 8)) as u8)?;
    }
    Ok(())
}
