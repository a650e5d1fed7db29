//! Whole-stream Huffman compression and decompression
//!
//! Compressed layout, all multi-bit fields MSB-first:
//!
//! ```text
//! bytes[0..4) : original length, big-endian u32
//! bits[32..]  : serialized Huffman tree
//! bits[...]   : one code per original byte, in order
//! bits[final] : zero padding to the next byte boundary
//! ```

pub mod compressor;
pub mod decompressor;

pub use compressor::{CompressionStats, HuffmanCompressor};
pub use decompressor::{DecompressionStats, HuffmanDecompressor};

use crate::error::Result;
use std::io::{Read, Seek, Write};

/// Size of the length header in bytes
pub const HEADER_LEN: usize = 4;

/// Compress a seekable source into `sink` with the default configuration
pub fn compress<R: Read + Seek, W: Write>(source: R, sink: W) -> Result<()> {
    HuffmanCompressor::new().compress(source, sink).map(|_| ())
}

/// Decompress `source` into `sink` with the default configuration
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<()> {
    HuffmanDecompressor::new().decompress(source, sink).map(|_| ())
}

/// Compress a buffer into a new vector
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    HuffmanCompressor::new().compress_slice(data, &mut out)?;
    Ok(out)
}

/// Decompress a buffer into a new vector
pub fn decompress_to_vec(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    HuffmanDecompressor::new().decompress(data, &mut out)?;
    Ok(out)
}

/// Compress and then decompress `data`, returning the reconstruction
pub fn round_trip(data: &[u8]) -> Result<Vec<u8>> {
    decompress_to_vec(&compress_to_vec(data)?)
}
