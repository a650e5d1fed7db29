//! Stream and safety settings for the compressor and decompressor.

use super::{parse_env_bool, parse_env_var, Config};
use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for either I/O buffer.
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Default size of the read and write buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Codec configuration shared by [`HuffmanCompressor`](crate::HuffmanCompressor)
/// and [`HuffmanDecompressor`](crate::HuffmanDecompressor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Bytes requested from the source per read
    pub read_buffer_size: usize,
    /// Bytes buffered before a write reaches the sink
    pub write_buffer_size: usize,
    /// Largest declared length a decompressor accepts
    pub max_output_len: u64,
    /// Treat a payload that ends before the declared length as malformed
    pub strict_payload: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            write_buffer_size: DEFAULT_BUFFER_SIZE,
            max_output_len: u32::MAX as u64,
            strict_payload: false,
        }
    }
}

impl CodecConfig {
    /// Return a copy with `strict_payload` set.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_payload = strict;
        self
    }

    /// Return a copy with a different decoded length limit.
    pub fn with_max_output_len(mut self, limit: u64) -> Self {
        self.max_output_len = limit;
        self
    }
}

impl Config for CodecConfig {
    fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 || self.read_buffer_size > MAX_BUFFER_SIZE {
            return Err(HuffmanError::configuration(format!(
                "read_buffer_size must be between 1 and {}",
                MAX_BUFFER_SIZE
            )));
        }
        if self.write_buffer_size == 0 || self.write_buffer_size > MAX_BUFFER_SIZE {
            return Err(HuffmanError::configuration(format!(
                "write_buffer_size must be between 1 and {}",
                MAX_BUFFER_SIZE
            )));
        }
        if self.max_output_len > u32::MAX as u64 {
            return Err(HuffmanError::configuration(
                "max_output_len cannot exceed the 32-bit length header",
            ));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.read_buffer_size = parse_env_var(
            &format!("{}CODEC_READ_BUFFER", prefix),
            config.read_buffer_size,
        );
        config.write_buffer_size = parse_env_var(
            &format!("{}CODEC_WRITE_BUFFER", prefix),
            config.write_buffer_size,
        );
        config.max_output_len =
            parse_env_var(&format!("{}CODEC_MAX_OUTPUT", prefix), config.max_output_len);
        config.strict_payload =
            parse_env_bool(&format!("{}CODEC_STRICT", prefix), config.strict_payload);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            read_buffer_size: 1024 * 1024,
            write_buffer_size: 1024 * 1024,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self {
            read_buffer_size: 512,
            write_buffer_size: 512,
            max_output_len: 16 * 1024 * 1024,
            strict_payload: false,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            read_buffer_size: 4 * 1024,
            write_buffer_size: 4 * 1024,
            max_output_len: 16 * 1024 * 1024,
            strict_payload: true,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            HuffmanError::configuration(format!("Failed to serialize codec config: {}", e))
        })?;
        std::fs::write(path, serialized).map_err(|e| {
            HuffmanError::configuration(format!("Failed to write codec config file: {}", e))
        })?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HuffmanError::configuration(format!("Failed to read codec config file: {}", e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            HuffmanError::configuration(format!("Failed to parse codec config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
