//! Quota-based per-class subsampling.
//!
//! A [`Subsampler`] makes one in-order pass over a labelled dataset and keeps
//! the first `quota` samples of every known class. The pass ends as soon as
//! every class is full, so no row after the one that completes the last
//! class is ever looked at.

pub mod quota;
pub mod subset;

pub use quota::{Acceptance, ClassQuota};
pub use subset::Subset;

use crate::core::constants::{DEFAULT_QUOTA, IRIS_NUM_CLASSES};
use crate::core::error::{Result, SubsetError};
use crate::core::types::{class_range, ClassLabel, RowIndex};
use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Summary of one subsampling pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsampleReport {
    /// Rows examined before the pass ended
    pub rows_scanned: usize,
    /// Whether every known class reached the quota
    pub quota_filled: bool,
    /// Accepted count per known class
    pub class_counts: BTreeMap<ClassLabel, usize>,
}

impl SubsampleReport {
    /// Total accepted samples
    pub fn accepted(&self) -> usize {
        self.class_counts.values().sum()
    }

    /// Known classes that ended below `quota`
    pub fn deficient_classes(&self, quota: usize) -> Vec<ClassLabel> {
        self.class_counts
            .iter()
            .filter(|(_, &count)| count < quota)
            .map(|(&label, _)| label)
            .collect()
    }
}

/// Row indices chosen by a pass, with its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Accepted row indices, strictly increasing
    pub indices: Vec<RowIndex>,
    pub report: SubsampleReport,
}

/// Keeps the first `quota` samples of each known class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsampler {
    quota: usize,
    classes: Vec<ClassLabel>,
}

impl Default for Subsampler {
    fn default() -> Self {
        Subsampler::new(DEFAULT_QUOTA)
    }
}

impl Subsampler {
    /// Subsampler over the three Iris classes
    pub fn new(quota: usize) -> Self {
        Subsampler {
            quota,
            classes: class_range(IRIS_NUM_CLASSES).collect(),
        }
    }

    /// Use classes `0..num_classes`
    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.classes = class_range(num_classes).collect();
        self
    }

    /// Use an explicit class set; duplicates are dropped
    pub fn with_classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = ClassLabel>,
    {
        self.classes = classes
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        self
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    /// Choose rows from a label sequence.
    ///
    /// Labels are consumed lazily; iteration stops right after the
    /// acceptance that fills the last class. A label outside the known
    /// classes fails the whole pass.
    pub fn select_indices<I>(&self, labels: I) -> Result<Selection>
    where
        I: IntoIterator<Item = ClassLabel>,
    {
        let mut counters = ClassQuota::new(self.classes.iter().copied(), self.quota);
        let mut indices = Vec::new();
        let mut rows_scanned = 0;

        if !counters.is_satisfied() {
            for (row, label) in labels.into_iter().enumerate() {
                rows_scanned = row + 1;
                match counters.try_accept(label) {
                    Acceptance::Accepted => {
                        indices.push(row);
                        if counters.is_satisfied() {
                            log::debug!("Quota filled after {} rows", rows_scanned);
                            break;
                        }
                    }
                    Acceptance::Full => {}
                    Acceptance::Unknown => {
                        return Err(SubsetError::UnknownClass { label, row });
                    }
                }
            }
        }

        Ok(Selection {
            indices,
            report: SubsampleReport {
                rows_scanned,
                quota_filled: counters.is_satisfied(),
                class_counts: counters.counts().clone(),
            },
        })
    }

    /// Subsample `dataset`
    pub fn run(&self, dataset: &Dataset) -> Result<Subset> {
        self.run_with_report(dataset).map(|(subset, _)| subset)
    }

    /// Subsample `dataset`, also returning the pass report
    pub fn run_with_report(&self, dataset: &Dataset) -> Result<(Subset, SubsampleReport)> {
        log::info!(
            "Subsampling {} rows: quota {} per class over {} classes",
            dataset.num_data(),
            self.quota,
            self.classes.len()
        );

        let selection = self.select_indices(dataset.labels().iter().copied())?;

        let mut subset = Subset::empty(self.quota, self.classes.clone(), dataset.num_features());
        for &row in &selection.indices {
            let sample = dataset.sample(row).ok_or_else(|| {
                SubsetError::dataset(format!("Selected row {} is out of range", row))
            })?;
            subset.push(sample);
        }

        let report = selection.report;
        if report.quota_filled {
            log::info!(
                "Accepted {} samples after scanning {} of {} rows",
                subset.len(),
                report.rows_scanned,
                dataset.num_data()
            );
        } else {
            for label in report.deficient_classes(self.quota) {
                log::warn!(
                    "Class {} has only {} of {} requested samples",
                    label,
                    report.class_counts.get(&label).copied().unwrap_or(0),
                    self.quota
                );
            }
        }

        Ok((subset, report))
    }
}

/// Keep the first `quota` samples of each Iris class in `dataset`
pub fn subsample(dataset: &Dataset, quota: usize) -> Result<Subset> {
    Subsampler::new(quota).run(dataset)
}
