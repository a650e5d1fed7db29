//! Huffman decompressor

use std::io::{BufWriter, Read, Write};

use crate::compression::HEADER_LEN;
use crate::config::{CodecConfig, Config};
use crate::entropy::{deserialize_tree, HuffmanNode};
use crate::error::{HuffmanError, Result};
use crate::io::BitReader;

/// Statistics for one decompression call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompressionStats {
    /// Length announced by the header
    pub declared_len: u64,
    /// Bytes actually produced
    pub decoded_len: u64,
    /// Payload bits consumed after the tree
    pub payload_bits: u64,
    /// Payload ran out before `declared_len` bytes were decoded
    pub truncated: bool,
}

/// Huffman decompressor, the inverse of
/// [`HuffmanCompressor`](crate::HuffmanCompressor).
#[derive(Debug, Clone, Default)]
pub struct HuffmanDecompressor {
    config: CodecConfig,
}

impl HuffmanDecompressor {
    /// Create a decompressor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decompressor with a validated configuration
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decompress `input` into `output`.
    ///
    /// A payload that ends early stops decoding without error unless
    /// [`CodecConfig::strict_payload`] is set; the stats report it.
    pub fn decompress<R: Read, W: Write>(
        &self,
        mut input: R,
        output: W,
    ) -> Result<DecompressionStats> {
        let declared_len = read_length_header(&mut input)?;
        if declared_len > self.config.max_output_len {
            return Err(HuffmanError::malformed_input(format!(
                "declared length {} exceeds limit {}",
                declared_len, self.config.max_output_len
            )));
        }

        let mut reader = BitReader::with_capacity(input, self.config.read_buffer_size);
        let tree = deserialize_tree(&mut reader)?;
        let tree_bits = reader.bits_read();

        let mut sink = BufWriter::with_capacity(self.config.write_buffer_size, output);
        let decoded_len = match tree {
            HuffmanNode::Leaf { symbol, .. } => {
                write_repeated(&mut sink, symbol, declared_len)?;
                declared_len
            }
            ref root => decode_payload(root, &mut reader, &mut sink, declared_len)?,
        };
        sink.flush()?;

        let stats = DecompressionStats {
            declared_len,
            decoded_len,
            payload_bits: reader.bits_read() - tree_bits,
            truncated: decoded_len < declared_len,
        };

        if stats.truncated {
            if self.config.strict_payload {
                return Err(HuffmanError::malformed_input(format!(
                    "payload ended after {} of {} symbols",
                    decoded_len, declared_len
                )));
            }
            log::warn!(
                "payload ended after {} of {} symbols; output truncated",
                decoded_len,
                declared_len
            );
        }
        log::debug!(
            "decompressed {} bytes ({} payload bits)",
            stats.decoded_len,
            stats.payload_bits
        );
        Ok(stats)
    }
}

/// Read the 4-byte big-endian original length
fn read_length_header<R: Read>(input: &mut R) -> Result<u64> {
    let mut header = [0u8; HEADER_LEN];
    input
        .read_exact(&mut header)
        .map_err(|e| HuffmanError::from(e).truncated("length header"))?;
    Ok(u32::from_be_bytes(header) as u64)
}

/// Emit `symbol` `count` times; the single-leaf tree consumes no bits
fn write_repeated<W: Write>(sink: &mut W, symbol: u8, count: u64) -> Result<()> {
    let chunk = [symbol; 4096];
    let mut left = count;
    while left > 0 {
        let n = left.min(chunk.len() as u64) as usize;
        sink.write_all(&chunk[..n])?;
        left -= n as u64;
    }
    Ok(())
}

/// Walk the tree once per symbol; returns the number of symbols produced
fn decode_payload<R: Read, W: Write>(
    root: &HuffmanNode,
    reader: &mut BitReader<R>,
    sink: &mut W,
    count: u64,
) -> Result<u64> {
    let mut produced = 0u64;
    let mut node = root;

    while produced < count {
        let bit = match reader.read_bit() {
            Ok(bit) => bit,
            Err(HuffmanError::EndOfStream) => break,
            Err(e) => return Err(e),
        };

        if let HuffmanNode::Internal { left, right, .. } = node {
            node = if bit { &**right } else { &**left };
        }
        if let HuffmanNode::Leaf { symbol, .. } = node {
            sink.write_all(&[*symbol])?;
            produced += 1;
            node = root;
        }
    }

    Ok(produced)
}
