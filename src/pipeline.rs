//! Load, subsample and save in one call.

use crate::config::Config;
use crate::core::error::{Result, SubsetError};
use crate::io::serialization::{create_serializer, save_subset_with, SerializationFormat};
use crate::subsample::{SubsampleReport, Subsampler, Subset};
use std::path::PathBuf;

/// Outcome of a [`run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name of the input dataset
    pub dataset_name: String,
    /// Rows in the input dataset
    pub dataset_rows: usize,
    /// The saved subset
    pub subset: Subset,
    pub report: SubsampleReport,
    pub output_path: PathBuf,
    pub format: SerializationFormat,
}

impl RunSummary {
    /// Number of saved samples
    pub fn num_samples(&self) -> usize {
        self.subset.len()
    }

    /// The one-line console message
    pub fn message(&self) -> String {
        format!(
            "Saved {} samples from the {} dataset.",
            self.num_samples(),
            self.dataset_name
        )
    }
}

/// Run the whole pipeline described by `config`
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let dataset = config.source.load()?;
    log::info!(
        "Loaded {} dataset: {} rows, {} features",
        dataset.metadata().name,
        dataset.num_data(),
        dataset.num_features()
    );

    let sampler = Subsampler::new(config.quota).with_classes(config.known_classes());
    let present = dataset.distinct_labels();
    for label in sampler.classes() {
        if !present.contains(label) {
            log::warn!("Class {} does not occur in the dataset", label);
        }
    }

    if let Some(names) = dataset.class_names() {
        log::debug!("Encoded {} named classes as labels 0..{}", names.len(), names.len());
        if names.len() > sampler.classes().len() {
            log::warn!(
                "Dataset names {} classes but only {} are known; set num_classes or classes",
                names.len(),
                sampler.classes().len()
            );
        }
    }

    let (subset, report) = sampler
        .run_with_report(&dataset)
        .map_err(|e| match e {
            SubsetError::UnknownClass { label, row } => SubsetError::invalid_parameter(
                "classes",
                format!("{:?}", sampler.classes()),
                format!(
                    "label {} at row {} is not a known class; \
                     set num_classes or classes to include it",
                    label, row
                ),
            ),
            other => other,
        })?;

    let format = config.resolved_format();
    let serializer = create_serializer(format, config.pretty_json);
    save_subset_with(&config.output_path, &subset, serializer.as_ref())?;

    Ok(RunSummary {
        dataset_name: dataset.metadata().name.clone(),
        dataset_rows: dataset.num_data(),
        subset,
        report,
        output_path: config.output_path.clone(),
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::io::load_subset;

    #[test]
    fn test_default_run_on_iris() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("iris_subset_30_per_class.safetensors");
        let config = ConfigBuilder::new().output_path(&output).build().unwrap();

        let summary = run(&config).unwrap();
        assert_eq!(summary.num_samples(), 90);
        assert_eq!(summary.dataset_rows, 150);
        assert_eq!(summary.report.rows_scanned, 130);
        assert_eq!(summary.format, SerializationFormat::SafeTensors);
        assert_eq!(summary.message(), "Saved 90 samples from the Iris dataset.");

        let reloaded = load_subset(&output, SerializationFormat::SafeTensors).unwrap();
        assert_eq!(reloaded, summary.subset);
    }

    fn four_species_csv(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("garden.csv");
        std::fs::write(
            &path,
            "x,species\n1,rosa\n2,tulipa\n3,iris\n4,lilium\n5,rosa\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_extra_named_class_points_at_class_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .source(crate::dataset::DatasetSource::csv(four_species_csv(dir.path())))
            .output_path(dir.path().join("out.json"))
            .build()
            .unwrap();

        let err = run(&config).unwrap_err();
        assert_eq!(err.category(), "invalid_parameter");
        let message = err.to_string();
        assert!(message.contains("label 3 at row 3"));
        assert!(message.contains("num_classes"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_named_classes_with_matching_class_count() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .quota(1)
            .num_classes(4)
            .source(crate::dataset::DatasetSource::csv(four_species_csv(dir.path())))
            .output_path(dir.path().join("out.json"))
            .build()
            .unwrap();

        let summary = run(&config).unwrap();
        assert_eq!(summary.num_samples(), 4);
        assert_eq!(summary.report.rows_scanned, 4);
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output_path = dir.path().join("out.json");
        config.num_classes = 0;

        assert!(run(&config).is_err());
        assert!(!config.output_path.exists());
    }
}
