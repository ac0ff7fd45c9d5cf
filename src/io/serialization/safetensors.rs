//! SafeTensors encoding of a subset.
//!
//! Two tensors are written: `features` (F32, shape `[N, F]`) and `labels`
//! (I64, shape `[N]`). The quota, the known classes and a timestamp go into
//! the string metadata of the header.

use crate::core::constants::{FEATURES_TENSOR_NAME, LABELS_TENSOR_NAME};
use crate::core::error::{Result, SubsetError};
use crate::core::types::{ClassLabel, FeatureValue};
use crate::dataset::Sample;
use crate::io::serialization::{SerializationFormat, SubsetSerializer};
use crate::subsample::Subset;
use ::safetensors::tensor::{SafeTensors, TensorView};
use ::safetensors::Dtype;
use std::collections::HashMap;

const META_QUOTA: &str = "quota";
const META_CLASSES: &str = "classes";
const META_NUM_SAMPLES: &str = "num_samples";
const META_CREATED_AT: &str = "created_at";

/// SafeTensors serializer
#[derive(Debug, Clone, Default)]
pub struct SafeTensorsSerializer;

impl SafeTensorsSerializer {
    pub fn new() -> Self {
        SafeTensorsSerializer
    }

    fn metadata(subset: &Subset) -> HashMap<String, String> {
        let classes = subset
            .classes()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");

        HashMap::from([
            (META_QUOTA.to_string(), subset.quota().to_string()),
            (META_CLASSES.to_string(), classes),
            (META_NUM_SAMPLES.to_string(), subset.len().to_string()),
            (META_CREATED_AT.to_string(), chrono::Utc::now().to_rfc3339()),
        ])
    }
}

impl SubsetSerializer for SafeTensorsSerializer {
    fn serialize(&self, subset: &Subset) -> Result<Vec<u8>> {
        let (features, labels) = subset.to_arrays()?;

        let feature_bytes: Vec<u8> = features.iter().flat_map(|x| x.to_le_bytes()).collect();
        let label_bytes: Vec<u8> = labels.iter().flat_map(|x| x.to_le_bytes()).collect();

        let views = vec![
            (
                FEATURES_TENSOR_NAME,
                TensorView::new(Dtype::F32, features.shape().to_vec(), &feature_bytes)?,
            ),
            (
                LABELS_TENSOR_NAME,
                TensorView::new(Dtype::I64, labels.shape().to_vec(), &label_bytes)?,
            ),
        ];

        Ok(::safetensors::serialize(views, &Some(Self::metadata(subset)))?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Subset> {
        let (_, header) = SafeTensors::read_metadata(data)?;
        let metadata = header
            .metadata()
            .as_ref()
            .ok_or_else(|| SubsetError::serialization("SafeTensors header has no metadata"))?;

        let quota: usize = parse_metadata(metadata, META_QUOTA)?;
        let classes = metadata
            .get(META_CLASSES)
            .ok_or_else(|| missing_key(META_CLASSES))?
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<ClassLabel>().map_err(|_| {
                    SubsetError::serialization(format!("Invalid class label in metadata: {}", s))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let tensors = SafeTensors::deserialize(data)?;
        let features = tensors.tensor(FEATURES_TENSOR_NAME)?;
        let labels = tensors.tensor(LABELS_TENSOR_NAME)?;

        expect_dtype(FEATURES_TENSOR_NAME, features.dtype(), Dtype::F32)?;
        expect_dtype(LABELS_TENSOR_NAME, labels.dtype(), Dtype::I64)?;

        let (num_samples, num_features) = match features.shape() {
            [rows, cols] => (*rows, *cols),
            other => {
                return Err(SubsetError::dimension_mismatch(
                    "rank-2 features tensor",
                    format!("shape {:?}", other),
                ))
            }
        };
        if labels.shape() != [num_samples] {
            return Err(SubsetError::dimension_mismatch(
                format!("labels shape [{}]", num_samples),
                format!("{:?}", labels.shape()),
            ));
        }

        let values: Vec<FeatureValue> = features
            .data()
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        let label_values: Vec<ClassLabel> = labels
            .data()
            .chunks_exact(8)
            .map(|chunk| {
                i64::from_le_bytes([
                    chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
                ])
            })
            .collect();

        let samples = label_values
            .into_iter()
            .enumerate()
            .map(|(row, label)| {
                let start = row * num_features;
                Sample::new(values[start..start + num_features].to_vec(), label)
            })
            .collect();

        Subset::from_parts(samples, quota, classes, num_features)
    }

    fn format(&self) -> SerializationFormat {
        SerializationFormat::SafeTensors
    }
}

fn missing_key(key: &str) -> SubsetError {
    SubsetError::serialization(format!("SafeTensors metadata is missing '{}'", key))
}

fn parse_metadata<T: std::str::FromStr>(
    metadata: &HashMap<String, String>,
    key: &str,
) -> Result<T> {
    let raw = metadata.get(key).ok_or_else(|| missing_key(key))?;
    raw.parse().map_err(|_| {
        SubsetError::serialization(format!("Invalid SafeTensors metadata {} = {}", key, raw))
    })
}

fn expect_dtype(name: &str, actual: Dtype, expected: Dtype) -> Result<()> {
    if actual != expected {
        return Err(SubsetError::serialization(format!(
            "Tensor '{}' has dtype {:?}, expected {:?}",
            name, actual, expected
        )));
    }
    Ok(())
}
