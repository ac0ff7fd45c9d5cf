//! JSON encoding of a subset.

use crate::core::error::Result;
use crate::io::serialization::{SerializationFormat, SubsetRecord, SubsetSerializer};
use crate::subsample::Subset;

/// JSON serializer
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        JsonSerializer { pretty: false }
    }

    /// Indent the output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl SubsetSerializer for JsonSerializer {
    fn serialize(&self, subset: &Subset) -> Result<Vec<u8>> {
        let record = SubsetRecord::from(subset);
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&record)?
        } else {
            serde_json::to_vec(&record)?
        };
        Ok(bytes)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Subset> {
        let record: SubsetRecord = serde_json::from_slice(data)?;
        Subset::try_from(record)
    }

    fn format(&self) -> SerializationFormat {
        SerializationFormat::Json
    }
}
