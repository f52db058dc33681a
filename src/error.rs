//! Error types for the image viewer.

use thiserror::Error;

/// Everything that can go wrong outside the pure gesture logic.
///
/// Navigation and zoom requests never fail; out-of-range requests are
/// ignored by the store instead of being reported here.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Stored configuration is not valid JSON for `ViewerConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but a value is out of range
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// `localStorage` missing or refused the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// The image element fired `error`
    #[error("Image failed to load: {url}")]
    ImageLoad { url: String },

    /// The image was still loading when the timeout expired
    #[error("Image load timed out after {ms} ms: {url}")]
    LoadTimeout { url: String, ms: u32 },
}

pub type ViewerResult<T> = Result<T, ViewerError>;

impl ViewerError {
    pub fn storage<T: Into<String>>(msg: T) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input() {
        let err = ViewerError::LoadTimeout {
            url: "https://cdn.example/a.jpg".into(),
            ms: 15000,
        };
        assert_eq!(
            err.to_string(),
            "Image load timed out after 15000 ms: https://cdn.example/a.jpg"
        );

        let err = ViewerError::invalid("load_timeout_ms", "must be at least 1000");
        assert_eq!(
            err.to_string(),
            "Invalid config value for `load_timeout_ms`: must be at least 1000"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ViewerError = parse.unwrap_err().into();
        assert!(matches!(err, ViewerError::ConfigParse(_)));
    }
}
