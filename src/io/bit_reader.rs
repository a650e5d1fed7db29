//! MSB-first bit reader

use std::io::{ErrorKind, Read};

use crate::config::codec::DEFAULT_BUFFER_SIZE;
use crate::error::{HuffmanError, Result};

/// Reads bits MSB-first from a byte source.
///
/// Bytes are pulled from the source in bulk into an internal buffer; bit
/// order is the same as reading one byte at a time. Requesting a bit after
/// the source is exhausted fails with [`HuffmanError::EndOfStream`].
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    buffer: Vec<u8>,
    filled: usize,
    pos: usize,
    current: u8,
    remaining: u8,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a reader with the default buffer size
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, DEFAULT_BUFFER_SIZE)
    }

    /// Create a reader that requests up to `capacity` bytes per read
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        Self {
            source,
            buffer: vec![0u8; capacity.max(1)],
            filled: 0,
            pos: 0,
            current: 0,
            remaining: 0,
            bits_read: 0,
            exhausted: false,
        }
    }

    /// Read the next bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            self.current = self.next_byte()?;
            self.remaining = 8;
        }
        self.remaining -= 1;
        self.bits_read += 1;
        Ok((self.current >> self.remaining) & 1 == 1)
    }

    /// Read 8 bits as a byte, most-significant first
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | u8::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Total bits handed out so far
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Give back the underlying source.
    ///
    /// Bytes already buffered but not consumed are lost.
    pub fn into_inner(self) -> R {
        self.source
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pos == self.filled {
            self.refill()?;
        }
        let byte = self.buffer[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    fn refill(&mut self) -> Result<()> {
        if self.exhausted {
            return Err(HuffmanError::EndOfStream);
        }
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(0) => {
                    self.exhausted = true;
                    return Err(HuffmanError::EndOfStream);
                }
                Ok(n) => {
                    self.filled = n;
                    self.pos = 0;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
