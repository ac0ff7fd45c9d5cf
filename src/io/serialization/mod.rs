//! Subset serialization.
//!
//! Three formats are supported: SafeTensors (a `features`/`labels` tensor
//! pair, the default), bincode and JSON (both a serde [`SubsetRecord`]).
//! Each format implements [`SubsetSerializer`]; [`create_serializer`] picks
//! one and [`save_subset`]/[`load_subset`] wrap it with file I/O.

pub mod bincode;
pub mod json;
pub mod safetensors;

use crate::core::error::{Result, SubsetError};
use crate::core::types::ClassLabel;
use crate::dataset::Sample;
use crate::subsample::Subset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// `features` (F32) and `labels` (I64) tensors
    SafeTensors,
    /// Compact binary [`SubsetRecord`]
    Bincode,
    /// Human-readable [`SubsetRecord`]
    Json,
}

impl Default for SerializationFormat {
    fn default() -> Self {
        SerializationFormat::SafeTensors
    }
}

impl std::fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationFormat::SafeTensors => write!(f, "safetensors"),
            SerializationFormat::Bincode => write!(f, "bincode"),
            SerializationFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SerializationFormat {
    type Err = SubsetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "safetensors" | "st" => Ok(SerializationFormat::SafeTensors),
            "bincode" | "bin" => Ok(SerializationFormat::Bincode),
            "json" => Ok(SerializationFormat::Json),
            _ => Err(SubsetError::serialization(format!("Unknown format: {}", s))),
        }
    }
}

impl SerializationFormat {
    /// Detect the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "safetensors" | "st" => Some(SerializationFormat::SafeTensors),
                "bin" | "bincode" => Some(SerializationFormat::Bincode),
                "json" => Some(SerializationFormat::Json),
                _ => None,
            })
    }

    /// Conventional file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            SerializationFormat::SafeTensors => "safetensors",
            SerializationFormat::Bincode => "bin",
            SerializationFormat::Json => "json",
        }
    }
}

/// Serde form of a [`Subset`], used by the bincode and JSON formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetRecord {
    pub quota: usize,
    pub classes: Vec<ClassLabel>,
    pub num_features: usize,
    pub samples: Vec<Sample>,
}

impl From<&Subset> for SubsetRecord {
    fn from(subset: &Subset) -> Self {
        SubsetRecord {
            quota: subset.quota(),
            classes: subset.classes().to_vec(),
            num_features: subset.num_features(),
            samples: subset.samples().to_vec(),
        }
    }
}

impl TryFrom<SubsetRecord> for Subset {
    type Error = SubsetError;

    fn try_from(record: SubsetRecord) -> Result<Self> {
        Subset::from_parts(
            record.samples,
            record.quota,
            record.classes,
            record.num_features,
        )
    }
}

/// Encodes and decodes subsets in one format
pub trait SubsetSerializer {
    /// Encode a subset
    fn serialize(&self, subset: &Subset) -> Result<Vec<u8>>;

    /// Decode a subset, checking its invariants
    fn deserialize(&self, data: &[u8]) -> Result<Subset>;

    /// The format this serializer handles
    fn format(&self) -> SerializationFormat;
}

/// Create the serializer for `format`
pub fn create_serializer(
    format: SerializationFormat,
    pretty_json: bool,
) -> Box<dyn SubsetSerializer> {
    match format {
        SerializationFormat::SafeTensors => Box::new(safetensors::SafeTensorsSerializer::new()),
        SerializationFormat::Bincode => Box::new(bincode::BincodeSerializer::new()),
        SerializationFormat::Json => Box::new(json::JsonSerializer::new().with_pretty(pretty_json)),
    }
}

/// Write `subset` to `path`
pub fn save_subset<P: AsRef<Path>>(
    path: P,
    subset: &Subset,
    format: SerializationFormat,
) -> Result<()> {
    save_subset_with(path, subset, create_serializer(format, false).as_ref())
}

/// Write `subset` to `path` with a given serializer
pub fn save_subset_with<P: AsRef<Path>>(
    path: P,
    subset: &Subset,
    serializer: &dyn SubsetSerializer,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = serializer.serialize(subset)?;
    std::fs::write(path, &bytes)?;

    log::info!(
        "Wrote {} samples to {} ({}, {} bytes)",
        subset.len(),
        path.display(),
        serializer.format(),
        bytes.len()
    );
    Ok(())
}

/// Read a subset from `path`
pub fn load_subset<P: AsRef<Path>>(path: P, format: SerializationFormat) -> Result<Subset> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let subset = create_serializer(format, false).deserialize(&data)?;

    log::debug!("Read {} samples from {}", subset.len(), path.display());
    Ok(subset)
}
