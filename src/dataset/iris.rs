//! The bundled Iris dataset.
//!
//! 150 samples, 4 features, 3 classes of 50 samples each, stored class by
//! class. Values follow the widely used scikit-learn copy, including its two
//! corrected setosa rows (35 and 38).

use crate::core::constants::{IRIS_NUM_CLASSES, IRIS_NUM_FEATURES, IRIS_NUM_SAMPLES};
use crate::core::error::{Result, SubsetError};
use crate::dataset::loader::{CsvLoader, LoaderConfig};
use crate::dataset::Dataset;

const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Class names, indexed by label
pub const IRIS_CLASS_NAMES: [&str; IRIS_NUM_CLASSES] = ["setosa", "versicolor", "virginica"];

/// Load the bundled Iris dataset
pub fn load_iris() -> Result<Dataset> {
    let loader = CsvLoader::new(
        LoaderConfig::new()
            .with_target_column("target")
            .with_dataset_name("Iris"),
    );
    let mut dataset = loader
        .load_reader(IRIS_CSV.as_bytes())?
        .with_class_names(IRIS_CLASS_NAMES.iter().map(|s| s.to_string()).collect());

    if dataset.num_data() != IRIS_NUM_SAMPLES || dataset.num_features() != IRIS_NUM_FEATURES {
        return Err(SubsetError::dimension_mismatch(
            format!("({}, {})", IRIS_NUM_SAMPLES, IRIS_NUM_FEATURES),
            format!("({}, {})", dataset.num_data(), dataset.num_features()),
        ));
    }

    let metadata = dataset.metadata_mut();
    metadata.format = "builtin".to_string();
    metadata.source_path = None;

    log::debug!("Loaded bundled Iris dataset: {} samples", dataset.num_data());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iris_shape() {
        let iris = load_iris().unwrap();
        assert_eq!(iris.num_data(), 150);
        assert_eq!(iris.num_features(), 4);
        assert_eq!(iris.feature_names()[0], "sepal length (cm)");
        assert_eq!(iris.feature_names()[3], "petal width (cm)");
        assert_eq!(iris.metadata().name, "Iris");
    }

    #[test]
    fn test_iris_classes() {
        let iris = load_iris().unwrap();
        let counts = iris.class_counts();
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&count| count == 50));
        assert_eq!(iris.class_name(0), Some("setosa"));
        assert_eq!(iris.class_name(2), Some("virginica"));
    }

    #[test]
    fn test_iris_values() {
        let iris = load_iris().unwrap();
        let first = iris.sample(0).unwrap();
        assert_eq!(first.features, vec![5.1, 3.5, 1.4, 0.2]);
        assert_eq!(first.label, 0);

        let last = iris.sample(149).unwrap();
        assert_eq!(last.features, vec![5.9, 3.0, 5.1, 1.8]);
        assert_eq!(last.label, 2);

        // Corrected rows
        assert_eq!(iris.sample(34).unwrap().features, vec![4.9, 3.1, 1.5, 0.2]);
        assert_eq!(iris.sample(37).unwrap().features, vec![4.9, 3.6, 1.4, 0.1]);
    }
}
