//! Error handling for pcmedit
//!
//! Every fallible operation returns [`PcmError`]. Validation failures are
//! raised before any sample is computed, so a failed operation never leaves
//! a half-edited buffer behind.

use thiserror::Error;

/// Result type alias for pcmedit operations
pub type Result<T> = std::result::Result<T, PcmError>;

/// Main error type for pcmedit operations
#[derive(Error, Debug)]
pub enum PcmError {
    // Buffer state
    #[error("No audio loaded")]
    NotLoaded,

    // Validation errors
    #[error("Cannot {operation}: expected {expected}, got {actual}")]
    FormatMismatch {
        operation: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Cannot trim {requested_secs:.3}s from audio that is only {available_secs:.3}s long")]
    OverTrim {
        requested_secs: f64,
        available_secs: f64,
    },

    #[error("Malformed PCM buffer: {len} bytes is not a multiple of the {sample_width}-byte sample width")]
    MalformedBuffer { len: usize, sample_width: usize },

    // File errors
    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PcmError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        PcmError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PcmError::NotLoaded => "NOT_LOADED",
            PcmError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            PcmError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            PcmError::OverTrim { .. } => "OVER_TRIM",
            PcmError::MalformedBuffer { .. } => "MALFORMED_BUFFER",
            PcmError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PcmError::FileNotFound { .. } => "FILE_NOT_FOUND",
            PcmError::InvalidAudio { .. } => "INVALID_AUDIO",
            PcmError::Io(_) => "IO_ERROR",
            PcmError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error can be fixed by adjusting the request and retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PcmError::NotLoaded
                | PcmError::FormatMismatch { .. }
                | PcmError::InvalidArgument { .. }
                | PcmError::OverTrim { .. }
                | PcmError::FileNotFound { .. }
                | PcmError::UnsupportedFormat { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PcmError::NotLoaded => vec![
                "Load a WAV file before editing",
                "Check that the previous load did not fail",
            ],
            PcmError::FormatMismatch { .. } => vec![
                "Convert both tracks to the same channel layout (to-mono / to-stereo)",
                "Appending requires identical sample rate, channels and bit depth",
            ],
            PcmError::InvalidArgument { .. } => vec![
                "Durations must be zero or positive numbers of seconds",
                "Directions are 'in'/'out' for fades and 'front'/'back' for pads and trims",
            ],
            PcmError::OverTrim { .. } => vec![
                "Shorten the front or back trim",
                "Check the audio length with the info command",
            ],
            PcmError::UnsupportedFormat { .. } => vec![
                "Convert the file to 16-bit PCM WAV first",
                "Only mono and stereo audio is supported",
            ],
            PcmError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            PcmError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            _ => vec![],
        }
    }
}
