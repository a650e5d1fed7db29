//! MSB-first bit writer

use std::io::Write;

use crate::error::Result;

/// Accumulates bits MSB-first and writes each completed byte to the sink.
///
/// A trailing partial byte is only written by [`flush`](BitWriter::flush) (or
/// [`finish`](BitWriter::finish)); dropping the writer without flushing loses
/// it.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    current: u8,
    pending: u8,
    bits_written: u64,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a bit writer over `sink`
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            current: 0,
            pending: 0,
            bits_written: 0,
            bytes_written: 0,
        }
    }

    /// Append one bit. Any nonzero value is written as 1.
    #[inline]
    pub fn write_bit<B: Into<u8>>(&mut self, bit: B) -> Result<()> {
        let bit: u8 = bit.into();
        self.current = (self.current << 1) | u8::from(bit != 0);
        self.pending += 1;
        self.bits_written += 1;

        if self.pending == 8 {
            self.emit()?;
        }
        Ok(())
    }

    /// Append a sequence of bits in order
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Append the 8 bits of `value`, most-significant first
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        for shift in (0..8).rev() {
            self.write_bit((value >> shift) & 1)?;
        }
        Ok(())
    }

    /// Write out a pending partial byte, padded with trailing zero bits.
    ///
    /// Does nothing when no bits are pending.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending == 0 {
            return Ok(());
        }
        self.current <<= 8 - self.pending;
        self.emit()
    }

    /// Flush pending bits and the sink, then hand the sink back
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Total bits accepted so far, excluding padding
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Total bytes handed to the sink so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bits waiting for their byte to complete (0..=7)
    pub fn pending_bits(&self) -> u8 {
        self.pending
    }

    fn emit(&mut self) -> Result<()> {
        self.sink.write_all(&[self.current])?;
        self.bytes_written += 1;
        self.current = 0;
        self.pending = 0;
        Ok(())
    }
}
