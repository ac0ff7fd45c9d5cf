//! Input/Output operations for subsets.

pub mod serialization;

pub use serialization::{
    create_serializer, load_subset, save_subset, save_subset_with, SerializationFormat,
    SubsetRecord, SubsetSerializer,
};
