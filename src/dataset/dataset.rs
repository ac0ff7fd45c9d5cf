//! Core dataset structure for iris-subset.
//!
//! A [`Dataset`] holds a feature matrix and a parallel label vector in memory.
//! It is built once by a loader and only read afterwards.

use crate::core::error::{Result, SubsetError};
use crate::core::types::{ClassLabel, FeatureValue, RowIndex};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One labeled row: a feature vector and its class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature values, in dataset column order
    pub features: Vec<FeatureValue>,
    /// Class label
    pub label: ClassLabel,
}

impl Sample {
    /// Create a sample from a feature vector and a label
    pub fn new(features: Vec<FeatureValue>, label: ClassLabel) -> Self {
        Sample { features, label }
    }

    /// Number of features in this sample
    pub fn num_features(&self) -> usize {
        self.features.len()
    }
}

/// Dataset metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Dataset name, used in user-facing messages
    pub name: String,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Source file path
    pub source_path: Option<String>,
    /// Data format
    pub format: String,
    /// Custom properties
    pub properties: HashMap<String, String>,
}

impl Default for DatasetMetadata {
    fn default() -> Self {
        DatasetMetadata {
            name: "untitled".to_string(),
            created_at: chrono::Utc::now(),
            source_path: None,
            format: "memory".to_string(),
            properties: HashMap::new(),
        }
    }
}

/// Labeled tabular dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (num_data × num_features)
    features: Array2<FeatureValue>,
    /// Class labels (num_data,)
    labels: Array1<ClassLabel>,
    /// Feature names, one per column
    feature_names: Vec<String>,
    /// Human-readable class names, indexed by label
    class_names: Option<Vec<String>>,
    /// Dataset metadata
    metadata: DatasetMetadata,
}

impl Dataset {
    /// Create a new dataset from a feature matrix and a parallel label vector.
    ///
    /// Fails when the row counts differ.
    pub fn new(features: Array2<FeatureValue>, labels: Array1<ClassLabel>) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(SubsetError::dimension_mismatch(
                format!("features rows: {}", features.nrows()),
                format!("labels length: {}", labels.len()),
            ));
        }

        let feature_names = (0..features.ncols())
            .map(|i| format!("feature_{}", i))
            .collect();

        Ok(Dataset {
            features,
            labels,
            feature_names,
            class_names: None,
            metadata: DatasetMetadata::default(),
        })
    }

    /// Create a dataset from a list of samples
    pub fn from_samples(samples: &[Sample]) -> Result<Self> {
        let num_features = samples.first().map(Sample::num_features).unwrap_or(0);
        let mut flat = Vec::with_capacity(samples.len() * num_features);
        let mut labels = Vec::with_capacity(samples.len());

        for (row, sample) in samples.iter().enumerate() {
            if sample.num_features() != num_features {
                return Err(SubsetError::dimension_mismatch(
                    format!("{} features", num_features),
                    format!("{} features at row {}", sample.num_features(), row),
                ));
            }
            flat.extend_from_slice(&sample.features);
            labels.push(sample.label);
        }

        let features = Array2::from_shape_vec((samples.len(), num_features), flat)
            .map_err(|e| SubsetError::dataset(format!("Failed to shape feature matrix: {}", e)))?;
        Self::new(features, Array1::from_vec(labels))
    }

    /// Set feature names
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.num_features() {
            return Err(SubsetError::dimension_mismatch(
                format!("features columns: {}", self.num_features()),
                format!("feature names length: {}", names.len()),
            ));
        }
        self.feature_names = names;
        Ok(self)
    }

    /// Set class names (index `i` names label `i`)
    pub fn with_class_names(mut self, names: Vec<String>) -> Self {
        self.class_names = Some(names);
        self
    }

    /// Replace the dataset metadata
    pub fn with_metadata(mut self, metadata: DatasetMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get number of data points
    pub fn num_data(&self) -> usize {
        self.features.nrows()
    }

    /// Get number of features
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Check whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.num_data() == 0
    }

    /// Get the feature matrix
    pub fn features(&self) -> &Array2<FeatureValue> {
        &self.features
    }

    /// Get the label vector
    pub fn labels(&self) -> &Array1<ClassLabel> {
        &self.labels
    }

    /// Get feature names
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Get class names, if known
    pub fn class_names(&self) -> Option<&[String]> {
        self.class_names.as_deref()
    }

    /// Get the name of a class label, if known
    pub fn class_name(&self, label: ClassLabel) -> Option<&str> {
        let index = usize::try_from(label).ok()?;
        self.class_names
            .as_ref()
            .and_then(|names| names.get(index))
            .map(String::as_str)
    }

    /// Get dataset metadata
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    /// Get mutable dataset metadata
    pub fn metadata_mut(&mut self) -> &mut DatasetMetadata {
        &mut self.metadata
    }

    /// Get an owned copy of one row
    pub fn sample(&self, index: RowIndex) -> Option<Sample> {
        if index >= self.num_data() {
            return None;
        }
        Some(Sample {
            features: self.features.row(index).to_vec(),
            label: self.labels[index],
        })
    }

    /// Iterate rows in order as (feature view, label) pairs
    pub fn iter(&self) -> impl Iterator<Item = (ArrayView1<'_, FeatureValue>, ClassLabel)> + '_ {
        self.features
            .outer_iter()
            .zip(self.labels.iter().copied())
    }

    /// Count samples per class label
    pub fn class_counts(&self) -> BTreeMap<ClassLabel, usize> {
        let mut counts = BTreeMap::new();
        for &label in self.labels.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct labels present in the dataset, ascending
    pub fn distinct_labels(&self) -> BTreeSet<ClassLabel> {
        self.labels.iter().copied().collect()
    }
}
