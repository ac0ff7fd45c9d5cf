//! Crate-wide constants and configuration defaults.

/// Per-class quota used when none is configured.
pub const DEFAULT_QUOTA: usize = 30;

/// Number of classes in the Iris dataset.
pub const IRIS_NUM_CLASSES: usize = 3;

/// Number of features per Iris sample.
pub const IRIS_NUM_FEATURES: usize = 4;

/// Number of samples in the Iris dataset.
pub const IRIS_NUM_SAMPLES: usize = 150;

/// Output file written when no path is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "iris_subset_30_per_class.safetensors";

/// Name of the feature tensor in SafeTensors output.
pub const FEATURES_TENSOR_NAME: &str = "features";

/// Name of the label tensor in SafeTensors output.
pub const LABELS_TENSOR_NAME: &str = "labels";

/// Crate version string.
pub const IRIS_SUBSET_VERSION: &str = env!("CARGO_PKG_VERSION");
