//! Error handling for the huffstream library
//!
//! Every fallible operation returns [`Result`], carrying a [`HuffmanError`]
//! that tells the caller whether the input itself was unusable, the
//! compressed stream was damaged, or the underlying stream failed.

use thiserror::Error;

/// Main error type for the huffstream library
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// I/O errors from the underlying source or sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input that cannot be compressed (for example an empty source)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the issue
        message: String,
    },

    /// Compressed stream that violates the format
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Error message describing the violation
        message: String,
    },

    /// A bit was requested past the end of the source.
    ///
    /// Raised by [`BitReader`](crate::io::BitReader); the decoder translates it
    /// into either a graceful stop or [`HuffmanError::MalformedInput`].
    #[error("End of stream")]
    EndOfStream,

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl HuffmanError {
    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed_input<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::InvalidInput { .. } => false,
            Self::MalformedInput { .. } => false,
            Self::EndOfStream => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidInput { .. } => "input",
            Self::MalformedInput { .. } => "format",
            Self::EndOfStream => "eof",
            Self::Configuration { .. } => "config",
        }
    }

    /// Turn an end-of-stream signal into a malformed input error.
    ///
    /// Used wherever truncation is never valid (header and tree).
    pub(crate) fn truncated(self, what: &str) -> Self {
        match self {
            Self::EndOfStream => Self::malformed_input(format!("truncated {}", what)),
            Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::malformed_input(format!("truncated {}", what))
            }
            other => other,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = HuffmanError::invalid_input("empty source");
        assert_eq!(err.category(), "input");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        let io_err = HuffmanError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "test"));
        assert_eq!(io_err.category(), "io");
        assert!(io_err.is_recoverable());

        let format_err = HuffmanError::malformed_input("bad tag");
        assert_eq!(format_err.category(), "format");
        assert!(!format_err.is_recoverable());

        assert_eq!(HuffmanError::EndOfStream.category(), "eof");
        assert_eq!(HuffmanError::configuration("x").category(), "config");
    }

    #[test]
    fn test_error_display() {
        let err = HuffmanError::malformed_input("leaf symbol cut short");
        let display = format!("{}", err);
        assert!(display.contains("Malformed input"));
        assert!(display.contains("leaf symbol cut short"));

        let err = HuffmanError::invalid_input("empty source");
        assert!(format!("{}", err).contains("Invalid input"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: HuffmanError = io_error.into();

        assert_eq!(err.category(), "io");
        assert!(format!("{}", err).contains("I/O error"));
    }

    #[test]
    fn test_truncated_translation() {
        let err = HuffmanError::EndOfStream.truncated("tree");
        assert!(matches!(err, HuffmanError::MalformedInput { ref message } if message.contains("tree")));

        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        let err = HuffmanError::Io(eof).truncated("header");
        assert!(matches!(err, HuffmanError::MalformedInput { .. }));

        let other = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = HuffmanError::Io(other).truncated("header");
        assert!(matches!(err, HuffmanError::Io(_)));
    }

    #[test]
    fn test_error_debug() {
        let err = HuffmanError::malformed_input("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("MalformedInput"));
        assert!(debug_str.contains("debug test"));
    }
}
