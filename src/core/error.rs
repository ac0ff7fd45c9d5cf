//! Error handling and error types for iris-subset.
//!
//! Every fallible operation in the crate returns [`Result`], so failures from
//! dataset loading, subsampling and serialization propagate with `?` up to the
//! binary, which reports them and exits.

use crate::core::types::ClassLabel;
use std::io;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum SubsetError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset-related errors
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading { message: String },

    /// Subset serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// A sample carries a label outside the known class set
    #[error("Unknown class label {label} at row {row}")]
    UnknownClass { label: ClassLabel, row: usize },

    /// A class holds more samples than the quota allows
    #[error("Class {label} holds {count} samples, quota is {quota}")]
    QuotaExceeded {
        label: ClassLabel,
        count: usize,
        quota: usize,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },

    /// SafeTensors encoding/decoding errors
    #[error("SafeTensors error: {source}")]
    SafeTensors {
        #[from]
        source: safetensors::SafeTensorError,
    },
}

/// Type alias for Results using SubsetError
pub type Result<T> = std::result::Result<T, SubsetError>;

impl SubsetError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SubsetError::Config {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        SubsetError::Dataset {
            message: message.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        SubsetError::DataLoading {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        SubsetError::Serialization {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        SubsetError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        SubsetError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SubsetError::Config { .. } => "config",
            SubsetError::Dataset { .. } => "dataset",
            SubsetError::DataLoading { .. } => "data_loading",
            SubsetError::Serialization { .. } => "serialization",
            SubsetError::InvalidParameter { .. } => "invalid_parameter",
            SubsetError::DimensionMismatch { .. } => "dimension_mismatch",
            SubsetError::UnknownClass { .. } => "unknown_class",
            SubsetError::QuotaExceeded { .. } => "quota_exceeded",
            SubsetError::IO { .. } => "io",
            SubsetError::Csv { .. } => "csv",
            SubsetError::Json { .. } => "json",
            SubsetError::Bincode { .. } => "bincode",
            SubsetError::Toml { .. } => "toml",
            SubsetError::SafeTensors { .. } => "safetensors",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::SubsetError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SubsetError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::SubsetError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SubsetError::dataset(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SubsetError::config("test configuration error");
        assert_eq!(err.category(), "config");

        let err = SubsetError::serialization("bad header");
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_error_macros() {
        let err = config_error!("test error");
        assert!(matches!(err, SubsetError::Config { .. }));

        let err = dataset_error!("test error with param: {}", 42);
        assert!(matches!(err, SubsetError::Dataset { .. }));
    }

    #[test]
    fn test_parameter_errors() {
        let err = SubsetError::invalid_parameter("num_classes", "0", "must be at least 1");
        assert_eq!(err.category(), "invalid_parameter");
        assert!(err.to_string().contains("num_classes"));
    }

    #[test]
    fn test_unknown_class_display() {
        let err = SubsetError::UnknownClass { label: 7, row: 12 };
        let message = err.to_string();
        assert!(message.contains('7'));
        assert!(message.contains("12"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SubsetError = io_err.into();
        assert!(matches!(err, SubsetError::IO { .. }));
        assert_eq!(err.category(), "io");
    }
}
