//! Shared error enums for aprs-core.

use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum AprsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AprsError>;

/// Why a single beacon encode produced nothing.
///
/// None of these are fatal: the beacon cycle logs them and skips the frame.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("source not configured")]
    NotConfigured,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed reading: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading has no timestamp")]
    MissingTimestamp,
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = AprsError::Config("ambiguity must be 0-4".into());
        assert_eq!(e.to_string(), "config error: ambiguity must be 0-4");

        let e = EncodeError::InvalidTimestamp(-1);
        assert_eq!(e.to_string(), "timestamp out of range: -1");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: EncodeError = io.into();
        assert!(matches!(e, EncodeError::Io(_)));
    }
}
