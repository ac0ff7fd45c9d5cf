//! Core data types for iris-subset.

/// Feature value type. Feature matrices are stored as `f32`, the dtype the
/// saved feature tensors carry.
pub type FeatureValue = f32;

/// Class label type. 64-bit signed integers, matching the `I64` label tensor.
pub type ClassLabel = i64;

/// Row index into a dataset.
pub type RowIndex = usize;

/// Returns the labels `0..num_classes`, the default set of known classes.
pub fn class_range(num_classes: usize) -> impl Iterator<Item = ClassLabel> {
    (0..num_classes).map(|class| class as ClassLabel)
}
