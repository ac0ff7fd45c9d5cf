//! The subsampler's output: accepted samples in their original order.

use crate::core::error::{Result, SubsetError};
use crate::core::types::{ClassLabel, FeatureValue};
use crate::dataset::Sample;
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;

/// Ordered, append-only sequence of accepted samples.
///
/// Every class holds at most `quota` samples and every label is one of
/// `classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subset {
    samples: Vec<Sample>,
    quota: usize,
    classes: Vec<ClassLabel>,
    num_features: usize,
}

impl Subset {
    pub(crate) fn empty(quota: usize, classes: Vec<ClassLabel>, num_features: usize) -> Self {
        Subset {
            samples: Vec::new(),
            quota,
            classes,
            num_features,
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        debug_assert_eq!(sample.num_features(), self.num_features);
        self.samples.push(sample);
    }

    /// Rebuild a subset from stored parts, checking its invariants
    pub fn from_parts(
        samples: Vec<Sample>,
        quota: usize,
        classes: Vec<ClassLabel>,
        num_features: usize,
    ) -> Result<Self> {
        let mut counts: BTreeMap<ClassLabel, usize> =
            classes.iter().map(|&class| (class, 0)).collect();

        for (row, sample) in samples.iter().enumerate() {
            if sample.num_features() != num_features {
                return Err(SubsetError::dimension_mismatch(
                    format!("{} features", num_features),
                    format!("{} features at row {}", sample.num_features(), row),
                ));
            }

            let count = counts
                .get_mut(&sample.label)
                .ok_or(SubsetError::UnknownClass {
                    label: sample.label,
                    row,
                })?;
            *count += 1;
            if *count > quota {
                return Err(SubsetError::QuotaExceeded {
                    label: sample.label,
                    count: *count,
                    quota,
                });
            }
        }

        Ok(Subset {
            samples,
            quota,
            classes: counts.into_keys().collect(),
            num_features,
        })
    }

    /// Number of accepted samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no sample was accepted
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Per-class quota the subset was built with
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Known classes, ascending
    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    /// Feature vector length
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Accepted samples, in original order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consume the subset, returning its samples
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Iterate accepted samples
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Labels of the accepted samples, in order
    pub fn labels(&self) -> Vec<ClassLabel> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Accepted count for every known class, including empty ones
    pub fn class_counts(&self) -> BTreeMap<ClassLabel, usize> {
        let mut counts: BTreeMap<ClassLabel, usize> =
            self.classes.iter().map(|&class| (class, 0)).collect();
        for sample in &self.samples {
            *counts.entry(sample.label).or_insert(0) += 1;
        }
        counts
    }

    /// Stack the samples into a feature matrix and a label vector
    pub fn to_arrays(&self) -> Result<(Array2<FeatureValue>, Array1<ClassLabel>)> {
        let flat: Vec<FeatureValue> = self
            .samples
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let features = Array2::from_shape_vec((self.len(), self.num_features), flat)
            .map_err(|e| SubsetError::dataset(format!("Failed to stack subset features: {}", e)))?;

        Ok((features, Array1::from_vec(self.labels())))
    }
}

impl<'a> IntoIterator for &'a Subset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![1.0, 2.0], 0),
            Sample::new(vec![3.0, 4.0], 1),
            Sample::new(vec![5.0, 6.0], 0),
        ]
    }

    #[test]
    fn test_from_parts() {
        let subset = Subset::from_parts(samples(), 2, vec![0, 1, 2], 2).unwrap();
        assert_eq!(subset.len(), 3);
        assert_eq!(subset.labels(), vec![0, 1, 0]);

        let counts = subset.class_counts();
        assert_eq!(counts[&0], 2);
        assert_eq!(counts[&1], 1);
        assert_eq!(counts[&2], 0);
    }

    #[test]
    fn test_from_parts_rejects_overfull_class() {
        let err = Subset::from_parts(samples(), 1, vec![0, 1], 2).unwrap_err();
        assert!(matches!(err, SubsetError::QuotaExceeded { label: 0, count: 2, quota: 1 }));
    }

    #[test]
    fn test_from_parts_rejects_unknown_class() {
        let err = Subset::from_parts(samples(), 5, vec![0], 2).unwrap_err();
        assert!(matches!(err, SubsetError::UnknownClass { label: 1, row: 1 }));
    }

    #[test]
    fn test_from_parts_rejects_ragged_rows() {
        let mut rows = samples();
        rows.push(Sample::new(vec![1.0], 1));
        assert!(Subset::from_parts(rows, 5, vec![0, 1], 2).is_err());
    }

    #[test]
    fn test_to_arrays() {
        let subset = Subset::from_parts(samples(), 2, vec![0, 1], 2).unwrap();
        let (features, labels) = subset.to_arrays().unwrap();
        assert_eq!(features.shape(), &[3, 2]);
        assert_eq!(features[[2, 0]], 5.0);
        assert_eq!(labels.to_vec(), vec![0, 1, 0]);
    }

    #[test]
    fn test_empty_subset_arrays() {
        let subset = Subset::empty(0, vec![0, 1, 2], 4);
        let (features, labels) = subset.to_arrays().unwrap();
        assert_eq!(features.shape(), &[0, 4]);
        assert!(labels.is_empty());
    }
}
