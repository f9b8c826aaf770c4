//! Bit-level I/O over byte streams.
//!
//! Both halves pack bits MSB-first: the first bit written becomes bit 7 of
//! the emitted byte, and the reader hands bits back in the same order. The
//! two sides are deliberately asymmetric around byte-aligned fields:
//! [`BitWriter::write_byte`] flushes the bit buffer (zero-padding it) before
//! emitting, while [`BitReader::read_byte`] is eight successive bit reads
//! and therefore honors any current bit offset. Callers that need to recover
//! a flush-aligned field must call [`BitReader::align_to_byte`] at the same
//! point the writer flushed.

pub mod bitreader;
pub mod bitwriter;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
