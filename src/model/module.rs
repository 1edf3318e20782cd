//! Course module value type.

use super::entity::{Entity, identity_prefix};
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{Validator, Violations};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A validated unit of course material.
///
/// Title is 3 to 30 characters, content 3 to 2000. Identity is `TIT-CON`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModuleRecord")]
pub struct Module {
    title: String,
    content: String,
}

impl Module {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> ValidationResult<Self> {
        let title = title.into();
        let content = content.into();

        let mut violations = Violations::new(Self::KIND);
        violations
            .text("title", &title, 3, 30)
            .text("content", &content, 3, 2000);
        violations.finish()?;

        debug!("Module created: {title}");
        Ok(Self { title, content })
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content length in characters.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }

    /// Title length in characters.
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }
}

impl Entity for Module {
    const KIND: &'static str = "Module";

    type Record = ModuleRecord;

    fn from_record(record: ModuleRecord, _validator: &Validator) -> ValidationResult<Self> {
        Module::new(record.title, record.content)
    }

    fn try_identity(&self) -> ValidationResult<String> {
        Ok(format!(
            "{}-{}",
            identity_prefix(Self::KIND, "title", &self.title)?,
            identity_prefix(Self::KIND, "content", &self.content)?
        ))
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Module({})", self.title)
    }
}

/// Module fields as stored in a data file, before validation.
#[derive(Debug, Deserialize)]
pub struct ModuleRecord {
    title: String,
    content: String,
}

impl TryFrom<ModuleRecord> for Module {
    type Error = ValidationError;

    fn try_from(record: ModuleRecord) -> Result<Self, Self::Error> {
        Module::new(record.title, record.content)
    }
}

/// Named orderings over modules.
pub mod ordering {
    use super::Module;
    use std::cmp::Ordering;

    pub fn by_title(a: &Module, b: &Module) -> Ordering {
        a.title.cmp(&b.title)
    }

    pub fn by_content(a: &Module, b: &Module) -> Ordering {
        a.content.cmp(&b.content)
    }

    /// Shorter content first, then title.
    pub fn by_content_length(a: &Module, b: &Module) -> Ordering {
        a.content_length()
            .cmp(&b.content_length())
            .then_with(|| by_title(a, b))
    }

    /// Shorter titles first, then title.
    pub fn by_title_length(a: &Module, b: &Module) -> Ordering {
        a.title_length()
            .cmp(&b.title_length())
            .then_with(|| by_title(a, b))
    }

    /// Title plus content length, then title.
    pub fn by_total_length(a: &Module, b: &Module) -> Ordering {
        (a.title_length() + a.content_length())
            .cmp(&(b.title_length() + b.content_length()))
            .then_with(|| by_title(a, b))
    }
}
