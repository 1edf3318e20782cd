//! YAML documents.

use super::{DataFormat, DataSerializer};
use crate::error::SerializationResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// YAML sequences of entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSerializer;

impl DataSerializer for YamlSerializer {
    fn format(&self) -> DataFormat {
        DataFormat::Yaml
    }

    fn to_text<T: Serialize>(&self, items: &[T]) -> SerializationResult<String> {
        Ok(serde_yaml::to_string(items)?)
    }

    fn from_text<T: DeserializeOwned>(&self, text: &str) -> SerializationResult<Vec<T>> {
        Ok(serde_yaml::from_str(text)?)
    }
}
