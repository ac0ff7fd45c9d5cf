//! # iris-subset
//!
//! Deterministic per-class subsampling of labelled tabular data.
//!
//! The crate scans a dataset once, in its stored order, and keeps the first
//! `quota` samples of every known class. The scan stops as soon as every
//! class is full. The result is written as a pair of tensors (`features`,
//! `labels`) in SafeTensors format, or as a bincode/JSON record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iris_subset::{load_iris, save_subset, SerializationFormat, Subsampler};
//!
//! # fn main() -> iris_subset::Result<()> {
//! iris_subset::init()?;
//!
//! let iris = load_iris()?;
//! let subset = Subsampler::new(30).run(&iris)?;
//! assert_eq!(subset.len(), 90);
//!
//! save_subset("iris_subset_30_per_class.safetensors", &subset, SerializationFormat::SafeTensors)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: types, constants, the error type and logging setup
//! - [`config`]: run configuration from defaults, files and the environment
//! - [`dataset`]: the in-memory dataset, the bundled Iris table, CSV loading
//! - [`subsample`]: the quota subsampler and its [`Subset`] output
//! - [`io`]: subset serialization
//! - [`pipeline`]: load, subsample and save in one call

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms, non_snake_case, non_upper_case_globals)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Subsampling module
pub mod subsample;

// Serialization module
pub mod io;

// End-to-end run
pub mod pipeline;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{Result, SubsetError},
    types::*,
};

// Re-export configuration functionality
pub use config::{resolve_config, Config, ConfigBuilder, ConfigSource};

// Re-export dataset functionality
pub use dataset::{
    load_iris, CsvConfig, CsvLoader, DataLoader, Dataset, DatasetMetadata, DatasetSource,
    LoaderConfig, Sample,
};

// Re-export subsampling functionality
pub use subsample::{subsample, ClassQuota, SubsampleReport, Subsampler, Subset};

// Re-export serialization functionality
pub use io::{load_subset, save_subset, SerializationFormat, SubsetRecord, SubsetSerializer};

pub use pipeline::{run, RunSummary};

// Version information
pub use crate::core::constants::IRIS_SUBSET_VERSION as VERSION;

/// Initialize the library.
///
/// Installs `env_logger` with `RUST_LOG` defaulting to `info`. Safe to call
/// more than once.
///
/// # Examples
///
/// ```rust
/// fn main() -> iris_subset::Result<()> {
///     iris_subset::init()?;
///     assert!(iris_subset::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
