//! CSV file loader for iris-subset.
//!
//! Reads a delimited table with one label column and numeric feature columns.
//! Integer labels are used as-is. Any other label text is treated as a class
//! name and encoded in order of first appearance.

use super::{DataLoader, LoaderConfig};
use crate::core::error::{Result, SubsetError};
use crate::core::types::{ClassLabel, FeatureValue};
use crate::dataset::Dataset;
use csv::{ReaderBuilder, StringRecord};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Has header row
    pub has_header: bool,
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote_char: char,
    /// Comment character
    pub comment_char: Option<char>,
    /// Maximum number of rows to read
    pub max_rows: Option<usize>,
    /// Trim whitespace from fields
    pub trim: bool,
}

impl CsvConfig {
    /// Check that the options can drive a byte-oriented CSV reader
    pub fn validate(&self) -> Result<()> {
        ascii_byte("csv.delimiter", self.delimiter)?;
        ascii_byte("csv.quote_char", self.quote_char)?;
        if let Some(c) = self.comment_char {
            ascii_byte("csv.comment_char", c)?;
        }
        if self.max_rows == Some(0) {
            return Err(SubsetError::invalid_parameter(
                "csv.max_rows",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            has_header: true,
            delimiter: ',',
            quote_char: '"',
            comment_char: None,
            max_rows: None,
            trim: true,
        }
    }
}

/// CSV data loader
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Loader configuration
    config: LoaderConfig,
    /// CSV-specific configuration
    csv_config: CsvConfig,
}

impl CsvLoader {
    /// Create a new CSV loader
    pub fn new(config: LoaderConfig) -> Self {
        CsvLoader {
            config,
            csv_config: CsvConfig::default(),
        }
    }

    /// Create CSV loader with custom configuration
    pub fn with_csv_config(mut self, csv_config: CsvConfig) -> Self {
        self.csv_config = csv_config;
        self
    }

    /// Set delimiter character
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.csv_config.delimiter = delimiter;
        self
    }

    /// Set whether file has header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.csv_config.has_header = has_header;
        self
    }

    /// Set comment character
    pub fn with_comment_char(mut self, comment_char: char) -> Self {
        self.csv_config.comment_char = Some(comment_char);
        self
    }

    /// Set maximum rows to read
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.csv_config.max_rows = Some(max_rows);
        self
    }

    /// Get CSV configuration
    pub fn csv_config(&self) -> &CsvConfig {
        &self.csv_config
    }

    /// Load CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        log::info!("Loading CSV file: {}", path.display());

        if !path.is_file() {
            return Err(SubsetError::data_loading(format!(
                "Not a readable file: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            SubsetError::data_loading(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let mut dataset = self.load_reader(file)?;
        let metadata = dataset.metadata_mut();
        metadata.source_path = Some(path.display().to_string());
        if self.config.dataset_name.is_none() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                metadata.name = stem.to_string();
            }
        }

        Ok(dataset)
    }

    /// Load CSV data from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        self.csv_config.validate()?;

        let trim = if self.csv_config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(ascii_byte("csv.delimiter", self.csv_config.delimiter)?)
            .quote(ascii_byte("csv.quote_char", self.csv_config.quote_char)?)
            .comment(
                self.csv_config
                    .comment_char
                    .map(|c| ascii_byte("csv.comment_char", c))
                    .transpose()?,
            )
            .has_headers(self.csv_config.has_header)
            .trim(trim)
            .from_reader(reader);

        let headers = if self.csv_config.has_header {
            Some(reader.headers()?.clone())
        } else {
            None
        };

        let mut records = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            if let Some(max_rows) = self.csv_config.max_rows {
                if records.len() >= max_rows {
                    log::debug!("Reached max_rows limit of {}, stopping", max_rows);
                    break;
                }
            }

            let record = result.map_err(|e| {
                SubsetError::data_loading(format!("CSV parsing error at record {}: {}", line_num + 1, e))
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(SubsetError::data_loading("CSV input contains no data rows"));
        }

        log::info!("Loaded {} rows with {} columns", records.len(), records[0].len());
        self.convert_to_dataset(&records, headers.as_ref())
    }

    /// Convert CSV records to Dataset
    fn convert_to_dataset(
        &self,
        records: &[StringRecord],
        headers: Option<&StringRecord>,
    ) -> Result<Dataset> {
        let num_rows = records.len();
        let num_cols = records[0].len();
        if num_cols < 2 {
            return Err(SubsetError::data_loading(
                "CSV input needs at least one feature column and one target column",
            ));
        }

        let target_col_idx = self.determine_target_column(headers, num_cols)?;
        let feature_cols: Vec<usize> = (0..num_cols).filter(|&i| i != target_col_idx).collect();
        log::debug!(
            "CSV parsing: num_cols={}, target_col_idx={}, feature_cols={:?}",
            num_cols,
            target_col_idx,
            feature_cols
        );

        let mut features = Array2::<FeatureValue>::zeros((num_rows, feature_cols.len()));
        let mut raw_labels = Vec::with_capacity(num_rows);

        for (row_idx, record) in records.iter().enumerate() {
            for (feat_idx, &col_idx) in feature_cols.iter().enumerate() {
                features[[row_idx, feat_idx]] =
                    parse_feature_value(&record[col_idx], row_idx, col_idx)?;
            }

            let label = record[target_col_idx].trim();
            if label.is_empty() {
                return Err(SubsetError::data_loading(format!(
                    "Missing target value at row {}",
                    row_idx + 1
                )));
            }
            raw_labels.push(label);
        }

        let (labels, class_names) = encode_labels(&raw_labels);
        let feature_names = generate_feature_names(headers, &feature_cols);

        let mut dataset = Dataset::new(features, Array1::from_vec(labels))?
            .with_feature_names(feature_names)?;
        if let Some(names) = class_names {
            log::debug!("Encoded {} class names: {:?}", names.len(), names);
            dataset = dataset.with_class_names(names);
        }

        let metadata = dataset.metadata_mut();
        metadata.format = "csv".to_string();
        if let Some(ref name) = self.config.dataset_name {
            metadata.name = name.clone();
        }
        metadata
            .properties
            .insert("num_rows".to_string(), num_rows.to_string());
        metadata
            .properties
            .insert("num_cols".to_string(), num_cols.to_string());
        metadata
            .properties
            .insert("delimiter".to_string(), self.csv_config.delimiter.to_string());

        Ok(dataset)
    }

    /// Determine target column index
    fn determine_target_column(&self, headers: Option<&StringRecord>, num_cols: usize) -> Result<usize> {
        let target_col = match self.config.target_column {
            Some(ref target_col) => target_col,
            None => return Ok(num_cols - 1),
        };

        if let Some(idx) = headers.and_then(|h| h.iter().position(|name| name == target_col)) {
            return Ok(idx);
        }

        match target_col.parse::<usize>() {
            Ok(idx) if idx < num_cols => Ok(idx),
            Ok(idx) => Err(SubsetError::data_loading(format!(
                "Target column index {} out of bounds (num_cols: {})",
                idx, num_cols
            ))),
            Err(_) => Err(SubsetError::data_loading(format!(
                "Target column '{}' not found",
                target_col
            ))),
        }
    }
}

impl DataLoader for CsvLoader {
    fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        self.load_csv(path)
    }

    fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

/// The csv reader works on single bytes, so only ASCII characters fit
fn ascii_byte(parameter: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(SubsetError::invalid_parameter(
            parameter,
            format!("{:?}", c),
            "must be an ASCII character",
        ))
    }
}

/// Parse a feature cell, rejecting empty, non-numeric and non-finite values
fn parse_feature_value(value: &str, row: usize, col: usize) -> Result<FeatureValue> {
    value
        .trim()
        .parse::<FeatureValue>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            SubsetError::data_loading(format!(
                "Invalid feature value '{}' at row {}, column {}",
                value,
                row + 1,
                col
            ))
        })
}

/// Parse an integral label, accepting `2` as well as `2.0`
fn parse_integer_label(value: &str) -> Option<ClassLabel> {
    if let Ok(label) = value.parse::<ClassLabel>() {
        return Some(label);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as ClassLabel)
}

/// Encode raw label strings.
///
/// Returns the labels and, when the column holds class names, the names in
/// label order.
fn encode_labels(raw: &[&str]) -> (Vec<ClassLabel>, Option<Vec<String>>) {
    let numeric: Option<Vec<ClassLabel>> = raw.iter().map(|s| parse_integer_label(s)).collect();
    if let Some(labels) = numeric {
        return (labels, None);
    }

    let mut index: HashMap<&str, ClassLabel> = HashMap::new();
    let mut names = Vec::new();
    let labels = raw
        .iter()
        .map(|&name| {
            *index.entry(name).or_insert_with(|| {
                names.push(name.to_string());
                (names.len() - 1) as ClassLabel
            })
        })
        .collect();

    (labels, Some(names))
}

/// Generate feature names
fn generate_feature_names(headers: Option<&StringRecord>, feature_cols: &[usize]) -> Vec<String> {
    match headers {
        Some(headers) => feature_cols.iter().map(|&i| headers[i].to_string()).collect(),
        None => feature_cols.iter().map(|&i| format!("feature_{}", i)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_config_default() {
        let config = CsvConfig::default();
        assert!(config.has_header);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quote_char, '"');
        assert!(config.trim);
    }

    #[test]
    fn test_csv_loader_configuration() {
        let loader = CsvLoader::new(LoaderConfig::new())
            .with_delimiter(';')
            .with_header(false)
            .with_max_rows(1000);

        assert_eq!(loader.csv_config().delimiter, ';');
        assert!(!loader.csv_config().has_header);
        assert_eq!(loader.csv_config().max_rows, Some(1000));
    }

    #[test]
    fn test_parse_feature_values() {
        assert_eq!(parse_feature_value("123.5", 0, 0).unwrap(), 123.5);
        assert_eq!(parse_feature_value("  -1.25 ", 0, 0).unwrap(), -1.25);
        assert!(parse_feature_value("", 0, 0).is_err());
        assert!(parse_feature_value("NaN", 0, 0).is_err());
        assert!(parse_feature_value("abc", 0, 0).is_err());
    }

    #[test]
    fn test_encode_numeric_labels() {
        let (labels, names) = encode_labels(&["0", "2", "1.0", "2"]);
        assert_eq!(labels, vec![0, 2, 1, 2]);
        assert!(names.is_none());
    }

    #[test]
    fn test_encode_named_labels() {
        let (labels, names) = encode_labels(&["setosa", "virginica", "setosa", "versicolor"]);
        assert_eq!(labels, vec![0, 1, 0, 2]);
        assert_eq!(
            names.unwrap(),
            vec!["setosa".to_string(), "virginica".to_string(), "versicolor".to_string()]
        );
    }

    #[test]
    fn test_csv_loading() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "feature1,feature2,target")?;
        writeln!(temp_file, "1.0,2.0,0")?;
        writeln!(temp_file, "3.0,4.0,1")?;
        writeln!(temp_file, "5.0,6.0,0")?;

        let loader = CsvLoader::new(LoaderConfig::new().with_target_column("target"));
        let dataset = loader.load(temp_file.path())?;

        assert_eq!(dataset.num_data(), 3);
        assert_eq!(dataset.num_features(), 2);
        assert_eq!(dataset.feature_names(), &["feature1", "feature2"]);
        assert_eq!(dataset.features()[[2, 1]], 6.0);
        assert_eq!(dataset.labels().to_vec(), vec![0, 1, 0]);
        assert_eq!(dataset.metadata().format, "csv");
        assert!(dataset.metadata().source_path.is_some());
        Ok(())
    }

    #[test]
    fn test_target_column_by_index_without_header() -> Result<()> {
        let data = "1,0.5,1.5\n0,2.5,3.5\n";
        let loader = CsvLoader::new(LoaderConfig::new().with_target_column("0")).with_header(false);
        let dataset = loader.load_reader(data.as_bytes())?;

        assert_eq!(dataset.labels().to_vec(), vec![1, 0]);
        assert_eq!(dataset.feature_names(), &["feature_1", "feature_2"]);
        assert_eq!(dataset.features()[[1, 0]], 2.5);
        Ok(())
    }

    #[test]
    fn test_named_classes_and_comments() -> Result<()> {
        let data = "a,b,species\n# skipped\n1,2,setosa\n3,4,virginica\n";
        let loader = CsvLoader::new(LoaderConfig::new().with_dataset_name("flowers"))
            .with_comment_char('#');
        let dataset = loader.load_reader(data.as_bytes())?;

        assert_eq!(dataset.num_data(), 2);
        assert_eq!(dataset.class_name(1), Some("virginica"));
        assert_eq!(dataset.metadata().name, "flowers");
        Ok(())
    }

    #[test]
    fn test_max_rows() -> Result<()> {
        let data = "x,y\n1,0\n2,1\n3,2\n";
        let dataset = CsvLoader::new(LoaderConfig::new())
            .with_max_rows(2)
            .load_reader(data.as_bytes())?;
        assert_eq!(dataset.num_data(), 2);
        Ok(())
    }

    #[test]
    fn test_max_rows_stops_before_extra_row() -> Result<()> {
        let data = "x,y\n1,0\n2,1\nnot,a number\n";
        let dataset = CsvLoader::new(LoaderConfig::new())
            .with_max_rows(2)
            .load_reader(data.as_bytes())?;
        assert_eq!(dataset.labels().to_vec(), vec![0, 1]);
        Ok(())
    }

    #[test]
    fn test_zero_max_rows_rejected() {
        let err = CsvLoader::new(LoaderConfig::new())
            .with_max_rows(0)
            .load_reader("x,y\n1,0\n2,1\n3,2\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            SubsetError::InvalidParameter { ref parameter, .. } if parameter == "csv.max_rows"
        ));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = CsvLoader::new(LoaderConfig::new())
            .with_delimiter('\u{129}')
            .load_reader("x\u{129}y\n1\u{129}0\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            SubsetError::InvalidParameter { ref parameter, .. } if parameter == "csv.delimiter"
        ));
    }

    #[test]
    fn test_csv_config_validation() {
        assert!(CsvConfig::default().validate().is_ok());

        let quote = CsvConfig {
            quote_char: '\u{201c}',
            ..CsvConfig::default()
        };
        assert_eq!(quote.validate().unwrap_err().category(), "invalid_parameter");

        let comment = CsvConfig {
            comment_char: Some('\u{a7}'),
            ..CsvConfig::default()
        };
        assert!(comment.validate().is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        let loader = CsvLoader::new(LoaderConfig::new());
        assert!(loader.load_reader("x,y\n".as_bytes()).is_err());
        assert!(loader.load_reader("x,y\nfoo,1\n".as_bytes()).is_err());
        assert!(loader.load_reader("x,y\n1,\n".as_bytes()).is_err());
        assert!(loader.load("/definitely/not/here.csv").is_err());

        let missing_target = CsvLoader::new(LoaderConfig::new().with_target_column("label"));
        assert!(missing_target.load_reader("x,y\n1,0\n".as_bytes()).is_err());
    }
}
