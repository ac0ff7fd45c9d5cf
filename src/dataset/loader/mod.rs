//! Data loaders that turn external tables into a [`Dataset`].

pub mod csv;

pub use self::csv::{CsvConfig, CsvLoader};

use crate::core::error::Result;
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Data loader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Target column, by header name or numeric index. Defaults to the last column.
    pub target_column: Option<String>,
    /// Dataset name reported in metadata. Defaults to the file stem.
    pub dataset_name: Option<String>,
}

impl LoaderConfig {
    /// Create a new loader configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target column name or index
    pub fn with_target_column<S: Into<String>>(mut self, target: S) -> Self {
        self.target_column = Some(target.into());
        self
    }

    /// Set dataset name
    pub fn with_dataset_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dataset_name = Some(name.into());
        self
    }
}

/// Data loader trait
pub trait DataLoader {
    /// Load data from source
    fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset>;

    /// Get loader configuration
    fn config(&self) -> &LoaderConfig;
}
