//! JSON and YAML persistence of entity lists.
//!
//! Both formats store a list of entities with camelCase field names, ISO
//! dates and marks by symbolic name; an assignment carries its module
//! inline. Reading a file runs every entity through its validating
//! constructor, so a tampered file fails loudly instead of producing
//! invalid values. [`DataSerializer::deserialize_with`] validates dated
//! values against a pinned [`Validator`] instead of today.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use online_courses::model::Instructor;
//! use online_courses::serializer::{DataSerializer, JsonSerializer};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let instructors = vec![Instructor::new("Ігор", "Булат", 34)?];
//! let path = Path::new("data/instructors.json");
//!
//! JsonSerializer.serialize(&instructors, path)?;
//! let loaded: Vec<Instructor> = JsonSerializer.deserialize(path)?;
//! assert_eq!(loaded, instructors);
//! # Ok(())
//! # }
//! ```

mod json;
mod yaml;

pub use json::JsonSerializer;
pub use yaml::YamlSerializer;

use crate::error::{SerializationError, SerializationResult};
use crate::model::Entity;
use crate::validation::Validator;
use log::{error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// On-disk data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    pub const ALL: [DataFormat; 2] = [DataFormat::Json, DataFormat::Yaml];

    /// Upper-case name (`"JSON"`, `"YAML"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataFormat {
    type Err = SerializationError;

    /// Case-insensitive; `yml` is accepted for YAML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(SerializationError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A text format that stores lists of entities in files.
///
/// Implementors only provide the in-memory encoding; file handling (parent
/// directory creation, missing and empty files) is shared.
pub trait DataSerializer {
    fn format(&self) -> DataFormat;

    /// Encode `items` as document text.
    fn to_text<T: Serialize>(&self, items: &[T]) -> SerializationResult<String>;

    /// Decode document text into a list.
    fn from_text<T: DeserializeOwned>(&self, text: &str) -> SerializationResult<Vec<T>>;

    /// Write `items` to `path`, creating parent directories as needed.
    fn serialize<T: Serialize>(&self, items: &[T], path: &Path) -> SerializationResult<()> {
        let text = self.to_text(items).inspect_err(|e| {
            error!("Failed to encode {} items as {}: {e}", items.len(), self.format());
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SerializationError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, text).map_err(|source| {
            error!("Failed to write {}: {source}", path.display());
            SerializationError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!(
            "Serialized {} items to {} file: {}",
            items.len(),
            self.format(),
            path.display()
        );
        Ok(())
    }

    /// Decode document text and validate every value against `validator`.
    fn from_text_with<T: Entity>(
        &self,
        text: &str,
        validator: &Validator,
    ) -> SerializationResult<Vec<T>> {
        self.from_text::<T::Record>(text)?
            .into_iter()
            .map(|record| T::from_record(record, validator).map_err(SerializationError::from))
            .collect()
    }

    /// Read a list from `path`; a missing or empty file yields an empty list.
    ///
    /// Dated values are validated against today.
    fn deserialize<T: DeserializeOwned>(&self, path: &Path) -> SerializationResult<Vec<T>> {
        let Some(text) = read_document(path)? else {
            return Ok(Vec::new());
        };
        let items = self.from_text(&text).inspect_err(|e| {
            error!("Failed to decode {} file {}: {e}", self.format(), path.display());
        })?;
        log_loaded(self.format(), items.len(), path);
        Ok(items)
    }

    /// Read a list of entities from `path`, validating against `validator`.
    fn deserialize_with<T: Entity>(
        &self,
        path: &Path,
        validator: &Validator,
    ) -> SerializationResult<Vec<T>> {
        let Some(text) = read_document(path)? else {
            return Ok(Vec::new());
        };
        let items = self.from_text_with(&text, validator).inspect_err(|e| {
            error!(
                "Failed to load {} values from {} file {}: {e}",
                T::KIND,
                self.format(),
                path.display()
            );
        })?;
        log_loaded(self.format(), items.len(), path);
        Ok(items)
    }
}

fn log_loaded(format: DataFormat, count: usize, path: &Path) {
    info!("Deserialized {count} items from {format} file: {}", path.display());
}

/// Text of the document at `path`, or `None` when it is missing or blank.
fn read_document(path: &Path) -> SerializationResult<Option<String>> {
    if !path.exists() {
        warn!("File not found: {}, returning empty list", path.display());
        return Ok(None);
    }

    let text = fs::read_to_string(path).map_err(|source| SerializationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        warn!("File is empty: {}, returning empty list", path.display());
        return Ok(None);
    }
    Ok(Some(text))
}
