//! Per-class acceptance counters.

use crate::core::types::ClassLabel;
use std::collections::BTreeMap;

/// Outcome of offering one sample to a [`ClassQuota`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// The class was below quota; its count was incremented
    Accepted,
    /// The class already holds `quota` samples
    Full,
    /// The label is not one of the known classes
    Unknown,
}

/// Accepted-sample counts per known class.
///
/// Counts start at zero, only grow, and never exceed the quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassQuota {
    quota: usize,
    counts: BTreeMap<ClassLabel, usize>,
    /// Number of classes whose count equals the quota
    filled: usize,
}

impl ClassQuota {
    /// Create zeroed counters for the given classes
    pub fn new<I>(classes: I, quota: usize) -> Self
    where
        I: IntoIterator<Item = ClassLabel>,
    {
        let counts: BTreeMap<ClassLabel, usize> =
            classes.into_iter().map(|class| (class, 0)).collect();
        let filled = if quota == 0 { counts.len() } else { 0 };

        ClassQuota {
            quota,
            counts,
            filled,
        }
    }

    /// Per-class quota
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Number of known classes
    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Whether `label` is a known class
    pub fn is_known(&self, label: ClassLabel) -> bool {
        self.counts.contains_key(&label)
    }

    /// Accepted count for `label`, or `None` for an unknown class
    pub fn count(&self, label: ClassLabel) -> Option<usize> {
        self.counts.get(&label).copied()
    }

    /// All counts, ordered by label
    pub fn counts(&self) -> &BTreeMap<ClassLabel, usize> {
        &self.counts
    }

    /// Total number of accepted samples
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Offer one sample of class `label`
    pub fn try_accept(&mut self, label: ClassLabel) -> Acceptance {
        let quota = self.quota;
        match self.counts.get_mut(&label) {
            None => Acceptance::Unknown,
            Some(count) if *count >= quota => Acceptance::Full,
            Some(count) => {
                *count += 1;
                if *count == quota {
                    self.filled += 1;
                }
                Acceptance::Accepted
            }
        }
    }

    /// True once every known class holds exactly `quota` samples
    pub fn is_satisfied(&self) -> bool {
        self.filled == self.counts.len()
    }

    /// Known classes still below quota
    pub fn deficient_classes(&self) -> Vec<ClassLabel> {
        self.counts
            .iter()
            .filter(|(_, &count)| count < self.quota)
            .map(|(&label, _)| label)
            .collect()
    }
}
