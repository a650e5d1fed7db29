//! # Huffstream: Static Huffman Compression
//!
//! A two-pass, byte-oriented Huffman compressor and decompressor. The first
//! pass counts byte frequencies, the second emits one prefix-free code per
//! input byte behind a self-describing header.
//!
//! ## Key Features
//!
//! - **Deterministic Output**: equal-weight ties are broken by symbol order, so
//!   the same input always produces the same bytes
//! - **Self-Describing Format**: a 4-byte length header and a pre-order tree
//!   precede the payload; no side channel is needed to decode
//! - **Streaming I/O**: works over any `Read + Seek` source and `Write` sink
//! - **Hardened Decoder**: malformed trees, truncated headers and oversized
//!   lengths are reported as errors rather than panics
//!
//! ## Quick Start
//!
//! ```rust
//! use huffstream::{compress_to_vec, decompress_to_vec};
//!
//! let compressed = compress_to_vec(b"aaabbbaabbab").unwrap();
//! assert_eq!(compressed, [0x00, 0x00, 0x00, 0x0C, 0x58, 0x6C, 0x43, 0x9A]);
//!
//! let restored = decompress_to_vec(&compressed).unwrap();
//! assert_eq!(restored, b"aaabbbaabbab");
//! ```
//!
//! Streams and custom settings go through the codec types:
//!
//! ```rust
//! use huffstream::{CodecConfig, HuffmanCompressor, HuffmanDecompressor};
//! use std::io::Cursor;
//!
//! let config = CodecConfig::default().strict(true);
//! let compressor = HuffmanCompressor::with_config(config.clone()).unwrap();
//! let decompressor = HuffmanDecompressor::with_config(config).unwrap();
//!
//! let mut compressed = Vec::new();
//! let stats = compressor
//!     .compress(Cursor::new(b"abracadabra".to_vec()), &mut compressed)
//!     .unwrap();
//! assert_eq!(stats.payload_bits, 23);
//!
//! let mut restored = Vec::new();
//! decompressor.decompress(&compressed[..], &mut restored).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

#![warn(missing_docs)]

pub mod compression;
pub mod config;
pub mod entropy;
pub mod error;
pub mod io;

// Re-export core types
pub use config::{CodecConfig, Config};
pub use error::{HuffmanError, Result};
pub use io::{BitReader, BitWriter};

// Re-export entropy coding primitives
pub use entropy::{
    build_tree, deserialize_tree, serialize_tree, CodeTable, FrequencyMap, HuffmanNode,
};

// Re-export whole-stream compression
pub use compression::{
    compress, compress_to_vec, decompress, decompress_to_vec, round_trip, CompressionStats,
    DecompressionStats, HuffmanCompressor, HuffmanDecompressor,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing huffstream v{}", VERSION);
}
