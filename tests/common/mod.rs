//! Common test utilities for iris-subset integration tests.

#![allow(dead_code)]

use iris_subset::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Dataset whose rows carry `labels`; feature `j` of row `i` is `i * 10 + j`
pub fn dataset_from_labels(labels: &[ClassLabel], num_features: usize) -> Dataset {
    let features = Array2::from_shape_fn((labels.len(), num_features), |(i, j)| {
        (i * 10 + j) as f32
    });
    Dataset::new(features, Array1::from_vec(labels.to_vec())).unwrap()
}

/// `per_class` rows of each class, interleaved 0, 1, 2, 0, 1, 2, ...
pub fn create_round_robin_labels(per_class: usize, num_classes: usize) -> Vec<ClassLabel> {
    (0..per_class * num_classes)
        .map(|i| (i % num_classes) as ClassLabel)
        .collect()
}

/// `counts[c]` rows of class `c`, stored class by class
pub fn create_sorted_labels(counts: &[usize]) -> Vec<ClassLabel> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(class, &count)| std::iter::repeat(class as ClassLabel).take(count))
        .collect()
}

/// `counts[c]` rows of class `c` in a seeded random order
pub fn create_shuffled_labels(counts: &[usize], seed: u64) -> Vec<ClassLabel> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut labels = create_sorted_labels(counts);
    labels.shuffle(&mut rng);
    labels
}

/// Rows a full scan would keep: the first `quota` of each class in `classes`
pub fn reference_selection(
    labels: &[ClassLabel],
    quota: usize,
    classes: &[ClassLabel],
) -> Vec<usize> {
    let mut seen = std::collections::HashMap::new();
    labels
        .iter()
        .enumerate()
        .filter(|&(_, label)| classes.contains(label))
        .filter(|&(_, &label)| {
            let count = seen.entry(label).or_insert(0usize);
            *count += 1;
            *count <= quota
        })
        .map(|(row, _)| row)
        .collect()
}

/// Write a CSV file with a header, `feature_{j}` columns and a `species`
/// column holding `class_names[label]`
pub fn create_named_class_csv<P: AsRef<Path>>(
    path: P,
    features: &Array2<f32>,
    labels: &[usize],
    class_names: &[&str],
) -> std::io::Result<()> {
    let mut content = String::new();

    let header: Vec<String> = (0..features.ncols())
        .map(|j| format!("feature_{}", j))
        .collect();
    content.push_str(&header.join(","));
    content.push_str(",species\n");

    for (i, &label) in labels.iter().enumerate() {
        let values: Vec<String> = features.row(i).iter().map(|v| v.to_string()).collect();
        content.push_str(&values.join(","));
        content.push(',');
        content.push_str(class_names[label]);
        content.push('\n');
    }

    fs::write(path, content)
}
