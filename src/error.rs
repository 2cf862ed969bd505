//! Error types.
//!
//! - `TierError`: library-level failures while reading/writing tiers
//! - `AppError`: binary-level failure carrying a process exit code

use thiserror::Error;

/// Failure while parsing, serializing, or exchanging a pitch tier.
#[derive(Debug, Error)]
pub enum TierError {
    /// A fixed header line did not match its literal marker.
    #[error("line {line}: expected '{expected}' but was '{actual}'")]
    Header {
        line: usize,
        expected: &'static str,
        actual: String,
    },

    /// A numeric line could be parsed neither as a bare literal nor from its last token.
    #[error("line {line}: cannot parse a number from '{content}'")]
    Number { line: usize, content: String },

    /// The stream ended while lines remained to be read.
    #[error("line {line}: unexpected end of input (expected {expected})")]
    UnexpectedEof { line: usize, expected: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame track JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TierError {
    /// True for malformed text (header mismatch, bad number, truncated input).
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            TierError::Header { .. } | TierError::Number { .. } | TierError::UnexpectedEof { .. }
        )
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<TierError> for AppError {
    fn from(err: TierError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
