//! Two-pass Huffman compressor

use std::io::{BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::compression::HEADER_LEN;
use crate::config::{CodecConfig, Config};
use crate::entropy::{build_tree, serialize_tree, serialized_tree_bit_len};
use crate::entropy::{CodeTable, FrequencyMap, HuffmanNode};
use crate::error::{HuffmanError, Result};
use crate::io::BitWriter;

/// Statistics for one compression call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Input size in bytes
    pub original_len: u64,
    /// Output size in bytes, header included
    pub compressed_len: u64,
    /// Number of distinct byte values in the input
    pub distinct_symbols: usize,
    /// Bits taken by the serialized tree
    pub tree_bits: u64,
    /// Bits taken by the encoded payload
    pub payload_bits: u64,
    /// Longest code in bits
    pub max_code_length: usize,
}

impl CompressionStats {
    /// Output size over input size (lower is better)
    pub fn compression_ratio(&self) -> f64 {
        if self.original_len == 0 {
            0.0
        } else {
            self.compressed_len as f64 / self.original_len as f64
        }
    }
}

/// Static Huffman compressor.
///
/// The input is read twice: once to count byte frequencies, once to emit
/// codes. The output is the 4-byte big-endian input length, the serialized
/// tree, and the payload, packed MSB-first and zero-padded to a byte.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCompressor {
    config: CodecConfig,
}

impl HuffmanCompressor {
    /// Create a compressor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compressor with a validated configuration
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress a seekable source.
    ///
    /// Both passes start at the source's position on entry; the source must
    /// not change between them.
    pub fn compress<R, W>(&self, mut input: R, output: W) -> Result<CompressionStats>
    where
        R: Read + Seek,
        W: Write,
    {
        let start = input.stream_position()?;
        let frequencies =
            FrequencyMap::count_with_buffer(&mut input, self.config.read_buffer_size)?;
        let plan = EncodingPlan::new(frequencies)?;

        input.seek(SeekFrom::Start(start))?;
        let mut writer = plan.begin(output, self.config.write_buffer_size)?;

        let mut buffer = vec![0u8; self.config.read_buffer_size];
        let mut encoded = 0u64;
        loop {
            let n = match input.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            plan.encode(&mut writer, &buffer[..n])?;
            encoded += n as u64;
        }

        plan.finish(writer, encoded)
    }

    /// Compress an in-memory buffer; both passes run over the slice
    pub fn compress_slice<W: Write>(&self, data: &[u8], output: W) -> Result<CompressionStats> {
        let plan = EncodingPlan::new(FrequencyMap::from_bytes(data))?;
        let mut writer = plan.begin(output, self.config.write_buffer_size)?;
        plan.encode(&mut writer, data)?;
        plan.finish(writer, data.len() as u64)
    }

    /// Compress a source that cannot seek by buffering it in memory first
    pub fn compress_reader<R: Read, W: Write>(
        &self,
        mut input: R,
        output: W,
    ) -> Result<CompressionStats> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        self.compress_slice(&data, output)
    }
}

/// Tree and codes derived from the frequency pass
struct EncodingPlan {
    frequencies: FrequencyMap,
    tree: HuffmanNode,
    codes: CodeTable,
}

impl EncodingPlan {
    fn new(frequencies: FrequencyMap) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::invalid_input("cannot compress an empty source"));
        }
        if frequencies.total() > u32::MAX as u64 {
            return Err(HuffmanError::invalid_input(format!(
                "source of {} bytes does not fit the 32-bit length header",
                frequencies.total()
            )));
        }

        let tree = build_tree(&frequencies)?;
        let codes = CodeTable::generate(&tree);
        log::trace!(
            "huffman tree: {} leaves, depth {}, longest code {} bits",
            tree.leaf_count(),
            tree.depth(),
            codes.max_code_length()
        );

        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Write the length header and the tree; the payload follows through the
    /// returned writer.
    fn begin<W: Write>(&self, output: W, capacity: usize) -> Result<BitWriter<BufWriter<W>>> {
        let mut sink = BufWriter::with_capacity(capacity, output);
        sink.write_all(&(self.frequencies.total() as u32).to_be_bytes())?;

        let mut writer = BitWriter::new(sink);
        serialize_tree(&self.tree, &mut writer)?;
        Ok(writer)
    }

    fn encode<W: Write>(&self, writer: &mut BitWriter<W>, data: &[u8]) -> Result<()> {
        for &byte in data {
            let code = self.codes.get(byte).ok_or_else(|| {
                HuffmanError::invalid_input(format!(
                    "byte 0x{:02x} was not counted; source changed between passes",
                    byte
                ))
            })?;
            writer.write_bits(code)?;
        }
        Ok(())
    }

    fn finish<W: Write>(self, writer: BitWriter<W>, encoded: u64) -> Result<CompressionStats> {
        if encoded != self.frequencies.total() {
            return Err(HuffmanError::invalid_input(format!(
                "source changed between passes: counted {} bytes, encoded {}",
                self.frequencies.total(),
                encoded
            )));
        }

        let tree_bits = serialized_tree_bit_len(&self.tree) as u64;
        let payload_bits = writer.bits_written() - tree_bits;
        // the trailing partial byte is only counted once finish() emits it
        let body_bytes = (writer.bits_written() + 7) / 8;
        writer.finish()?;

        let stats = CompressionStats {
            original_len: encoded,
            compressed_len: HEADER_LEN as u64 + body_bytes,
            distinct_symbols: self.frequencies.len(),
            tree_bits,
            payload_bits,
            max_code_length: self.codes.max_code_length(),
        };
        log::debug!(
            "compressed {} bytes into {} ({} symbols, {} tree bits, {} payload bits)",
            stats.original_len,
            stats.compressed_len,
            stats.distinct_symbols,
            stats.tree_bits,
            stats.payload_bits
        );
        Ok(stats)
    }
}
