//! Saving and loading entity lists by label and format.
//!
//! [`PersistenceManager`] resolves file locations through [`AppConfig`] and
//! dispatches to the matching serializer, so callers only name an entity
//! label (`"students"`) and a [`DataFormat`]. Loaded values pass through
//! the manager's [`Validator`], so dated values are checked against the same
//! reference date they were created under.

use crate::config::AppConfig;
use crate::error::{SerializationError, SerializationResult};
use crate::model::Entity;
use crate::repository::Repository;
use crate::serializer::{DataFormat, DataSerializer, JsonSerializer, YamlSerializer};
use crate::validation::Validator;
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct PersistenceManager {
    config: AppConfig,
    validator: Validator,
}

impl PersistenceManager {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            validator: Validator::new(),
        }
    }

    /// Validate loaded values against `validator` instead of today.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Write `items` to the configured file for `entity` and return its path.
    pub fn save<T: Serialize>(
        &self,
        items: &[T],
        entity: &str,
        format: DataFormat,
    ) -> SerializationResult<PathBuf> {
        let path = self.path_for(entity, format)?;
        let result = match format {
            DataFormat::Json => JsonSerializer.serialize(items, &path),
            DataFormat::Yaml => YamlSerializer.serialize(items, &path),
        };
        if let Err(e) = &result {
            error!("Failed to save {entity} as {format}: {e}");
        }
        result?;

        info!("Saved {} {entity} to {}", items.len(), path.display());
        Ok(path)
    }

    /// Read the configured file for `entity`; a missing file yields an empty list.
    pub fn load<T: Entity>(&self, entity: &str, format: DataFormat) -> SerializationResult<Vec<T>> {
        let path = self.path_for(entity, format)?;
        let items = match format {
            DataFormat::Json => JsonSerializer.deserialize_with(&path, &self.validator),
            DataFormat::Yaml => YamlSerializer.deserialize_with(&path, &self.validator),
        }
        .inspect_err(|e| error!("Failed to load {entity} from {format}: {e}"))?;

        info!("Loaded {} {entity} from {}", items.len(), path.display());
        Ok(items)
    }

    /// Save `items` once per supported format.
    pub fn save_all_formats<T: Serialize>(
        &self,
        items: &[T],
        entity: &str,
    ) -> SerializationResult<Vec<PathBuf>> {
        Self::supported_formats()
            .iter()
            .map(|&format| self.save(items, entity, format))
            .collect()
    }

    /// Snapshot `repository` and save it under `entity`.
    pub fn save_repository<T: Entity + Serialize>(
        &self,
        repository: &Repository<T>,
        entity: &str,
        format: DataFormat,
    ) -> SerializationResult<PathBuf> {
        self.save(&repository.get_all(), entity, format)
    }

    /// Load `entity` and add every value to `repository`, returning how many
    /// were new.
    pub fn load_into<T: Entity>(
        &self,
        repository: &Repository<T>,
        entity: &str,
        format: DataFormat,
    ) -> SerializationResult<usize> {
        let items: Vec<T> = self.load(entity, format)?;
        Ok(items.into_iter().filter(|item| repository.add(item.clone())).count())
    }

    /// Whether `format` names a format this manager can read and write.
    pub fn is_format_supported(format: &str) -> bool {
        format.parse::<DataFormat>().is_ok()
    }

    pub fn supported_formats() -> &'static [DataFormat] {
        &DataFormat::ALL
    }

    fn path_for(&self, entity: &str, format: DataFormat) -> SerializationResult<PathBuf> {
        if entity.trim().is_empty() {
            return Err(SerializationError::EmptyEntityType);
        }
        Ok(self.config.file_path(entity, format))
    }
}
