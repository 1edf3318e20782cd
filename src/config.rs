//! Layered application configuration.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`COURSES_*` prefix, `__` separates sections)
//! 2. A TOML file (`courses.toml` in the working directory, or an explicit path)
//! 3. Built-in defaults
//!
//! `COURSES_PROCESSING__THREAD_POOL_SIZE=8` maps to `processing.thread_pool_size`,
//! `COURSES_DATA__FILES__STUDENTS_JSON=/srv/students.json` to a per-entity
//! file override.
//!
//! # Usage
//!
//! ```no_run
//! use online_courses::config::AppConfig;
//! use online_courses::serializer::DataFormat;
//!
//! let config = AppConfig::load().expect("config");
//! let path = config.file_path("students", DataFormat::Json);
//! println!("students live at {}", path.display());
//! ```

use crate::error::ConfigError;
use crate::serializer::DataFormat;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "courses.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "COURSES_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// Where data files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    /// Per-entity overrides keyed `<entity>_<extension>`, e.g. `students_json`.
    #[serde(default)]
    pub files: BTreeMap<String, PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            files: BTreeMap::new(),
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from("./data")
}

/// Worker pool and task settings for the processors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default = "default_thread_pool_size")]
    pub thread_pool_size: usize,
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
    /// How many generated records the demo adds per entity.
    #[serde(default = "default_test_data_count")]
    pub test_data_count: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: default_thread_pool_size(),
            task_timeout_secs: default_task_timeout_secs(),
            test_data_count: default_test_data_count(),
        }
    }
}

fn default_thread_pool_size() -> usize {
    4
}

fn default_task_timeout_secs() -> u64 {
    30
}

fn default_test_data_count() -> usize {
    10
}

impl AppConfig {
    /// Load from defaults, `courses.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Like [`AppConfig::load`], reading the TOML layer from `path` instead.
    /// A missing file contributes nothing.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::figment_with(path.as_ref()))
    }

    /// The provider chain used by [`AppConfig::load`].
    pub fn figment() -> Figment {
        Self::figment_with(Path::new(DEFAULT_CONFIG_FILE))
    }

    fn figment_with(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the processors cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.thread_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "processing.thread_pool_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.processing.task_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "processing.task_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.data.base_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.base_path".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn base_data_path(&self) -> &Path {
        &self.data.base_path
    }

    /// Data file for `entity` in `format`.
    ///
    /// An override under `data.files` wins: absolute paths are used as is,
    /// relative ones resolve against the base path. Without one the file is
    /// `<entity>.<extension>` under the base path.
    pub fn file_path(&self, entity: &str, format: DataFormat) -> PathBuf {
        let entity = entity.trim().to_lowercase();
        let key = format!("{entity}_{}", format.extension());

        match self.data.files.get(&key) {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.data.base_path.join(path),
            None => self
                .data
                .base_path
                .join(format!("{entity}.{}", format.extension())),
        }
    }

    pub fn json_file_path(&self, entity: &str) -> PathBuf {
        self.file_path(entity, DataFormat::Json)
    }

    pub fn yaml_file_path(&self, entity: &str) -> PathBuf {
        self.file_path(entity, DataFormat::Yaml)
    }

    pub fn thread_pool_size(&self) -> usize {
        self.processing.thread_pool_size
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.processing.task_timeout_secs)
    }

    pub fn test_data_count(&self) -> usize {
        self.processing.test_data_count
    }
}
