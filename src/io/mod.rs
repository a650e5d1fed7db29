//! Bit-level I/O
//!
//! This module packs and unpacks individual bits, most-significant bit first,
//! on top of ordinary `std::io` byte streams.

pub mod bit_reader;
pub mod bit_writer;

pub use bit_reader::BitReader;
pub use bit_writer::BitWriter;
