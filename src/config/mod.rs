//! Configuration for iris-subset runs.
//!
//! A [`Config`] is resolved in layers: defaults, then an optional `.toml` or
//! `.json` file named by `IRIS_SUBSET_CONFIG`, then `IRIS_SUBSET_*`
//! environment overrides.

pub mod core;

pub use self::core::{
    Config, ConfigBuilder, ENV_FORMAT, ENV_INPUT, ENV_NUM_CLASSES, ENV_OUTPUT, ENV_QUOTA,
};

use crate::core::error::Result;
use std::path::PathBuf;

/// Environment variable naming a config file
pub const ENV_CONFIG_FILE: &str = "IRIS_SUBSET_CONFIG";

/// Where the base configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// A configuration file
    File(PathBuf),
}

/// Resolve the run configuration from the process environment
pub fn resolve_config() -> Result<(Config, ConfigSource)> {
    resolve_config_from(|key| std::env::var(key).ok())
}

/// Resolve the run configuration using `lookup` in place of the environment
pub fn resolve_config_from<F>(lookup: F) -> Result<(Config, ConfigSource)>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut config, source) = match lookup(ENV_CONFIG_FILE) {
        Some(path) => {
            let path = PathBuf::from(path);
            (Config::load_from_file(&path)?, ConfigSource::File(path))
        }
        None => (Config::default(), ConfigSource::Default),
    };

    config.apply_overrides_from(lookup)?;
    log::debug!("Resolved configuration ({:?}): {:?}", source, config);
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSource;

    #[test]
    fn test_resolve_defaults() {
        let (config, source) = resolve_config_from(|_| None).unwrap();
        assert_eq!(source, ConfigSource::Default);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(&path, "quota = 4\noutput_path = \"a.json\"\n").unwrap();
        let path_str = path.to_string_lossy().to_string();

        let (config, source) = resolve_config_from(|key| match key {
            ENV_CONFIG_FILE => Some(path_str.clone()),
            ENV_QUOTA => Some("6".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(source, ConfigSource::File(path.clone()));
        assert_eq!(config.quota, 6);
        assert_eq!(config.output_path, PathBuf::from("a.json"));
        assert_eq!(config.source, DatasetSource::Iris);
    }

    #[test]
    fn test_resolve_missing_file() {
        let result = resolve_config_from(|key| {
            (key == ENV_CONFIG_FILE).then(|| "/nonexistent/run.toml".to_string())
        });
        assert!(result.is_err());
    }
}
