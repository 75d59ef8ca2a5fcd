//! Error types shared across PKN Posting crates.

use std::path::PathBuf;

/// Top-level error type for composition and export operations.
#[derive(Debug, thiserror::Error)]
pub enum PknError {
    /// The prepared off-screen surface for a format was absent at capture time.
    #[error("Export surface not found: {format}")]
    MissingCaptureTarget { format: String },

    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PknError.
pub type PknResult<T> = Result<T, PknError>;

impl PknError {
    pub fn missing_target(format: impl Into<String>) -> Self {
        Self::MissingCaptureTarget {
            format: format.into(),
        }
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive {
            message: msg.into(),
        }
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error only affects a single format attempt.
    ///
    /// Archive and delivery failures sink a whole batch; everything else is
    /// recorded against the format that produced it.
    pub fn is_per_format(&self) -> bool {
        !matches!(self, Self::Archive { .. } | Self::Delivery { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_message_names_format() {
        let err = PknError::missing_target("16:9");
        assert_eq!(err.to_string(), "Export surface not found: 16:9");
        assert!(err.is_per_format());
    }

    #[test]
    fn test_archive_errors_are_batch_fatal() {
        assert!(!PknError::archive("zip writer closed").is_per_format());
        assert!(!PknError::delivery("disk full").is_per_format());
        assert!(PknError::capture("tainted canvas").is_per_format());
    }
}
