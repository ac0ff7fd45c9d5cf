//! Dataset management module for iris-subset.
//!
//! Holds the in-memory [`Dataset`] type, the bundled Iris table and the CSV
//! loader, plus [`DatasetSource`] which picks between them.

pub mod dataset;
pub mod iris;
pub mod loader;

pub use dataset::{Dataset, DatasetMetadata, Sample};
pub use iris::{load_iris, IRIS_CLASS_NAMES};
pub use loader::{CsvConfig, CsvLoader, DataLoader, LoaderConfig};

use crate::core::error::{Result, SubsetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where the input dataset comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    /// The bundled Iris dataset
    Iris,
    /// A CSV file on disk
    Csv {
        /// Path to the CSV file
        path: PathBuf,
        /// Target column name or index (defaults to the last column)
        #[serde(default)]
        target_column: Option<String>,
        /// CSV parsing options
        #[serde(default)]
        csv: CsvConfig,
    },
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Iris
    }
}

impl DatasetSource {
    /// CSV source with default parsing options
    pub fn csv<P: Into<PathBuf>>(path: P) -> Self {
        DatasetSource::Csv {
            path: path.into(),
            target_column: None,
            csv: CsvConfig::default(),
        }
    }

    /// Validate the source description
    pub fn validate(&self) -> Result<()> {
        match self {
            DatasetSource::Iris => Ok(()),
            DatasetSource::Csv { path, .. } if path.as_os_str().is_empty() => Err(
                SubsetError::invalid_parameter("source.path", "\"\"", "must not be empty"),
            ),
            DatasetSource::Csv { csv, .. } => csv.validate(),
        }
    }

    /// Load the dataset this source describes
    pub fn load(&self) -> Result<Dataset> {
        match self {
            DatasetSource::Iris => load_iris(),
            DatasetSource::Csv {
                path,
                target_column,
                csv,
            } => {
                let config = LoaderConfig {
                    target_column: target_column.clone(),
                    dataset_name: None,
                };
                CsvLoader::new(config)
                    .with_csv_config(csv.clone())
                    .load(path)
            }
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Iris => write!(f, "iris"),
            DatasetSource::Csv { path, .. } => write!(f, "csv:{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_is_iris() {
        let source = DatasetSource::default();
        assert_eq!(source, DatasetSource::Iris);
        assert_eq!(source.to_string(), "iris");
        assert_eq!(source.load().unwrap().num_data(), 150);
    }

    #[test]
    fn test_csv_source_validation() {
        assert!(DatasetSource::csv("").validate().is_err());
        assert!(DatasetSource::csv("data.csv").validate().is_ok());

        let bad_delimiter = DatasetSource::Csv {
            path: PathBuf::from("data.csv"),
            target_column: None,
            csv: CsvConfig {
                delimiter: '\u{129}',
                ..CsvConfig::default()
            },
        };
        let err = bad_delimiter.validate().unwrap_err();
        assert!(err.to_string().contains("csv.delimiter"));
    }

    #[test]
    fn test_csv_source_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.csv");
        std::fs::write(&path, "a,b,label\n1,2,0\n3,4,1\n").unwrap();

        let dataset = DatasetSource::csv(&path).load().unwrap();
        assert_eq!(dataset.num_data(), 2);
        assert_eq!(dataset.metadata().name, "tiny");
    }
}
