//! Bincode encoding of a subset.

use crate::core::error::Result;
use crate::io::serialization::{SerializationFormat, SubsetRecord, SubsetSerializer};
use crate::subsample::Subset;

/// Bincode serializer
#[derive(Debug, Clone, Default)]
pub struct BincodeSerializer;

impl BincodeSerializer {
    pub fn new() -> Self {
        BincodeSerializer
    }
}

impl SubsetSerializer for BincodeSerializer {
    fn serialize(&self, subset: &Subset) -> Result<Vec<u8>> {
        Ok(::bincode::serialize(&SubsetRecord::from(subset))?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Subset> {
        let record: SubsetRecord = ::bincode::deserialize(data)?;
        Subset::try_from(record)
    }

    fn format(&self) -> SerializationFormat {
        SerializationFormat::Bincode
    }
}
