//! Byte frequency analysis

use std::io::{ErrorKind, Read};

use crate::config::codec::DEFAULT_BUFFER_SIZE;
use crate::error::Result;

/// Occurrence count of every byte value present in an input.
///
/// Only byte values that occur are keys; iteration is in ascending byte
/// order, so equal inputs always give equal maps and equal iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: [u64; 256],
    distinct: usize,
    total: u64,
}

impl Default for FrequencyMap {
    fn default() -> Self {
        Self {
            counts: [0u64; 256],
            distinct: 0,
            total: 0,
        }
    }
}

impl FrequencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data`
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut map = Self::new();
        map.update(data);
        map
    }

    /// Read `reader` to exhaustion, counting every byte.
    ///
    /// Counting starts at the reader's current position; the reader is left
    /// at its end.
    pub fn count<R: Read>(reader: R) -> Result<Self> {
        Self::count_with_buffer(reader, DEFAULT_BUFFER_SIZE)
    }

    /// [`count`](Self::count) with an explicit read buffer size
    pub fn count_with_buffer<R: Read>(mut reader: R, buffer_size: usize) -> Result<Self> {
        let mut map = Self::new();
        let mut buffer = vec![0u8; buffer_size.max(1)];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => map.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(map)
    }

    /// Add the bytes of `data` to the counts
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.add(byte, 1);
        }
    }

    fn add(&mut self, symbol: u8, count: u64) {
        if count == 0 {
            return;
        }
        let slot = &mut self.counts[symbol as usize];
        if *slot == 0 {
            self.distinct += 1;
        }
        *slot += count;
        self.total += count;
    }

    /// Count for `symbol`, or `None` when it never occurred
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Number of distinct byte values
    pub fn len(&self) -> usize {
        self.distinct
    }

    /// True when no byte has been counted
    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, i.e. the input length
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(symbol, count)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyMap {
    /// Build a map from explicit weights; repeated symbols accumulate and
    /// zero weights are ignored.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (symbol, count) in iter {
            map.add(symbol, count);
        }
        map
    }
}
