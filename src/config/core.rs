//! Core configuration structure for iris-subset.

use crate::core::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_QUOTA, IRIS_NUM_CLASSES};
use crate::core::error::{Result, SubsetError};
use crate::core::types::{class_range, ClassLabel};
use crate::dataset::DatasetSource;
use crate::io::SerializationFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable names
pub const ENV_QUOTA: &str = "IRIS_SUBSET_QUOTA";
pub const ENV_NUM_CLASSES: &str = "IRIS_SUBSET_NUM_CLASSES";
pub const ENV_OUTPUT: &str = "IRIS_SUBSET_OUTPUT";
pub const ENV_FORMAT: &str = "IRIS_SUBSET_FORMAT";
pub const ENV_INPUT: &str = "IRIS_SUBSET_INPUT";

/// Run configuration.
///
/// The defaults reproduce the stock run: 30 samples of each Iris class
/// written to `iris_subset_30_per_class.safetensors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Samples kept per class
    pub quota: usize,
    /// Known classes are `0..num_classes` unless `classes` is set
    pub num_classes: usize,
    /// Explicit known class labels
    pub classes: Option<Vec<ClassLabel>>,
    /// Output file
    pub output_path: PathBuf,
    /// Output format; inferred from `output_path` when unset
    pub format: Option<SerializationFormat>,
    /// Indent JSON output
    pub pretty_json: bool,
    /// Input dataset
    pub source: DatasetSource,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quota: DEFAULT_QUOTA,
            num_classes: IRIS_NUM_CLASSES,
            classes: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: None,
            pretty_json: false,
            source: DatasetSource::Iris,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        match &self.classes {
            Some(classes) if classes.is_empty() => {
                return Err(SubsetError::invalid_parameter(
                    "classes",
                    "[]",
                    "must list at least one class",
                ));
            }
            Some(_) => {}
            None if self.num_classes == 0 => {
                return Err(SubsetError::invalid_parameter(
                    "num_classes",
                    "0",
                    "must be at least 1",
                ));
            }
            None => {}
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(SubsetError::invalid_parameter(
                "output_path",
                "\"\"",
                "must not be empty",
            ));
        }

        self.source.validate()?;

        if let (Some(explicit), Some(inferred)) =
            (self.format, SerializationFormat::from_path(&self.output_path))
        {
            if explicit != inferred {
                log::warn!(
                    "Writing {} to {} despite its {} extension",
                    explicit,
                    self.output_path.display(),
                    inferred
                );
            }
        }

        Ok(())
    }

    /// Known class labels, ascending
    pub fn known_classes(&self) -> Vec<ClassLabel> {
        match &self.classes {
            Some(classes) => {
                let mut classes = classes.clone();
                classes.sort_unstable();
                classes.dedup();
                classes
            }
            None => class_range(self.num_classes).collect(),
        }
    }

    /// Explicit format, else the one implied by the output extension, else
    /// SafeTensors
    pub fn resolved_format(&self) -> SerializationFormat {
        self.format
            .or_else(|| SerializationFormat::from_path(&self.output_path))
            .unwrap_or_default()
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SubsetError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SubsetError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| SubsetError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SubsetError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(SubsetError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| SubsetError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Default configuration with `IRIS_SUBSET_*` overrides applied
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Override fields from `IRIS_SUBSET_*` environment variables
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Override fields from any key lookup using the environment variable
    /// names
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_QUOTA) {
            self.quota = val
                .trim()
                .parse()
                .map_err(|_| SubsetError::config(format!("Invalid {}: {}", ENV_QUOTA, val)))?;
        }

        if let Some(val) = lookup(ENV_NUM_CLASSES) {
            self.num_classes = val.trim().parse().map_err(|_| {
                SubsetError::config(format!("Invalid {}: {}", ENV_NUM_CLASSES, val))
            })?;
            self.classes = None;
        }

        if let Some(val) = lookup(ENV_OUTPUT) {
            self.output_path = PathBuf::from(val);
        }

        if let Some(val) = lookup(ENV_FORMAT) {
            self.format = Some(
                val.parse()
                    .map_err(|_| SubsetError::config(format!("Invalid {}: {}", ENV_FORMAT, val)))?,
            );
        }

        if let Some(val) = lookup(ENV_INPUT) {
            self.source = DatasetSource::csv(val);
        }

        self.validate()
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the per-class quota
    pub fn quota(mut self, quota: usize) -> Self {
        self.config.quota = quota;
        self
    }

    /// Use classes `0..num_classes`
    pub fn num_classes(mut self, num_classes: usize) -> Self {
        if num_classes == 0 {
            self.validation_errors
                .push("num_classes must be at least 1".to_string());
        }
        self.config.num_classes = num_classes;
        self.config.classes = None;
        self
    }

    /// Use an explicit class list
    pub fn classes(mut self, classes: Vec<ClassLabel>) -> Self {
        if classes.is_empty() {
            self.validation_errors
                .push("classes must list at least one class".to_string());
        }
        self.config.classes = Some(classes);
        self
    }

    /// Set the input dataset
    pub fn source(mut self, source: DatasetSource) -> Self {
        self.config.source = source;
        self
    }

    /// Set the output file
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the output format
    pub fn format(mut self, format: SerializationFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    /// Indent JSON output
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.config.pretty_json = pretty;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            return Err(SubsetError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
