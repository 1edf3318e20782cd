//! Error types for online courses operations.
//!
//! Entity construction reports every broken rule at once through
//! [`ValidationError`]. The collaborators around the core (CSV parsing,
//! serialization, configuration) each carry their own error enum, all of
//! which convert into the crate-level [`CoursesError`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Main error type for online courses operations.
#[derive(Debug, thiserror::Error)]
pub enum CoursesError {
    /// Entity data broke one or more validation rules
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A delimited text file could not be read or parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Reading or writing a JSON/YAML data file failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A background task panicked or was cancelled
    #[error("Task '{task}' failed: {message}")]
    Task { task: String, message: String },

    /// A background task did not finish within its time budget
    #[error("Task '{task}' timed out after {timeout:?}")]
    Timeout { task: String, timeout: Duration },
}

/// A single broken rule: which field, what value, and why.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldViolation {
    field: String,
    invalid_value: String,
    message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        invalid_value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            invalid_value: invalid_value.into(),
            message: message.into(),
        }
    }

    /// Wire name of the offending field (`firstName`, `enrollmentDate`, ...).
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn invalid_value(&self) -> &str {
        &self.invalid_value
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: invalid value '{}' — {}",
            self.field, self.invalid_value, self.message
        )
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation failures raised while building entity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more field rules failed. The message lists all of them.
    #[error("{}", join_violations(.violations))]
    InvalidData {
        entity: String,
        violations: Vec<FieldViolation>,
    },

    /// A field used for a prefix-based identity is too short.
    ///
    /// Only reachable by building an entity without validation.
    #[error(
        "Cannot derive {entity} identity: field '{field}' value '{value}' is shorter than {required} characters"
    )]
    Identity {
        entity: String,
        field: String,
        value: String,
        required: usize,
    },
}

impl ValidationError {
    /// Build an aggregated error for `entity` from collected violations.
    pub fn invalid_data(entity: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self::InvalidData {
            entity: entity.into(),
            violations,
        }
    }

    /// All violations carried by this error (empty for identity failures).
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::InvalidData { violations, .. } => violations,
            Self::Identity { .. } => &[],
        }
    }

    /// Whether any violation concerns the given wire field name.
    pub fn has_violation_for(&self, field: &str) -> bool {
        self.violations().iter().any(|v| v.field() == field)
    }
}

/// Errors raised while reading entities from delimited text files.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: malformed record: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Line {line}: expected {expected} fields for {entity}, found {found}")]
    FieldCount {
        line: u64,
        entity: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid number '{value}' for {field}")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: invalid date '{value}' for {field}, expected YYYY-MM-DD")]
    InvalidDate {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: unknown mark '{value}'")]
    InvalidMark { line: u64, value: String },

    #[error("Line {line}: {source}")]
    Validation {
        line: u64,
        #[source]
        source: ValidationError,
    },
}

/// Errors raised by the JSON/YAML serializers and the persistence manager.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A stored record no longer passes validation.
    #[error("Invalid stored value: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Entity type must not be empty")]
    EmptyEntityType,
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}

/// Result type alias for online courses operations.
pub type CoursesResult<T> = Result<T, CoursesError>;

/// Result type for entity construction and identity derivation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for CSV ingestion.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for serializers and persistence.
pub type SerializationResult<T> = Result<T, SerializationError>;
