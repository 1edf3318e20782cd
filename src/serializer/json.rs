//! Pretty-printed JSON documents.

use super::{DataFormat, DataSerializer};
use crate::error::SerializationResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON arrays of entities, two-space indented.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl DataSerializer for JsonSerializer {
    fn format(&self) -> DataFormat {
        DataFormat::Json
    }

    fn to_text<T: Serialize>(&self, items: &[T]) -> SerializationResult<String> {
        Ok(serde_json::to_string_pretty(items)?)
    }

    fn from_text<T: DeserializeOwned>(&self, text: &str) -> SerializationResult<Vec<T>> {
        Ok(serde_json::from_str(text)?)
    }
}
