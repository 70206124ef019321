//! Error types for layout-tagger.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for layout-tagger operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Page numbers are 1-based
    #[error("Invalid page number: {0} (pages are numbered from 1)")]
    InvalidPageNumber(u32),

    /// Rendering zoom outside the supported range
    #[error("Invalid zoom: {0} (expected 1.0 to 10.0)")]
    InvalidZoom(f64),

    /// Detection threshold outside [0, 1]
    #[error("Invalid threshold: {0} (expected 0.0 to 1.0)")]
    InvalidThreshold(f64),

    /// Input or output file of the wrong kind
    #[error("Unsupported file {path}: expected a {expected} file")]
    UnsupportedInput {
        /// Offending path
        path: PathBuf,
        /// Expected file kind (e.g. "JSON")
        expected: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_number_error() {
        let err = Error::InvalidPageNumber(0);
        assert_eq!(
            err.to_string(),
            "Invalid page number: 0 (pages are numbered from 1)"
        );
    }

    #[test]
    fn test_invalid_zoom_error() {
        let err = Error::InvalidZoom(12.5);
        assert_eq!(err.to_string(), "Invalid zoom: 12.5 (expected 1.0 to 10.0)");
    }

    #[test]
    fn test_invalid_threshold_error() {
        let err = Error::InvalidThreshold(-0.5);
        assert_eq!(
            err.to_string(),
            "Invalid threshold: -0.5 (expected 0.0 to 1.0)"
        );
    }

    #[test]
    fn test_unsupported_input_error() {
        let err = Error::UnsupportedInput {
            path: PathBuf::from("scan.pdf"),
            expected: "JSON".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file scan.pdf: expected a JSON file"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("template.bbox_offset must be >= 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: template.bbox_offset must be >= 0"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<i32>>("{not: [a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::Yaml(_)));
    }
}
