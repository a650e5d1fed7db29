//! Configuration APIs for huffstream
//!
//! The codec itself has no tunable algorithmic knobs: the format is fixed.
//! What can be configured is how it talks to its streams (buffer sizes), how
//! much output a decompressor is willing to produce for a declared length,
//! and whether a truncated payload is tolerated.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides validation, environment initialization,
//! presets, and JSON persistence for configuration types.
//!
//! ```rust
//! use huffstream::config::{CodecConfig, Config};
//!
//! let config = CodecConfig::performance_preset();
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use huffstream::config::{CodecConfig, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads HUFFSTREAM_CODEC_READ_BUFFER and friends, falling back to defaults
//! let config = CodecConfig::from_env()?;
//!
//! // Custom prefix
//! let config = CodecConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod codec;


pub use codec::CodecConfig;

/// Default environment variable prefix used by [`Config::from_env`].
pub const ENV_PREFIX: &str = "HUFFSTREAM_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `HUFFSTREAM_{COMPONENT}_{FIELD}`,
    /// for example `HUFFSTREAM_CODEC_READ_BUFFER=65536`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset tuned for throughput on large inputs.
    fn performance_preset() -> Self;

    /// Preset tuned for a small memory footprint.
    fn memory_preset() -> Self;

    /// Preset tuned for low, predictable latency per call.
    fn realtime_preset() -> Self;

    /// Balanced preset; the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load configuration from a JSON file and validate it.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.trim().to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
