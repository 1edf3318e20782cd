//! Instructor value type.

use super::entity::{Entity, identity_prefix};
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{Validator, Violations};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Lowest accepted expertise level.
pub const MIN_EXPERTISE: u8 = 1;
/// Highest accepted expertise level.
pub const MAX_EXPERTISE: u8 = 60;

/// A validated instructor.
///
/// Names are 3 to 50 characters, expertise is 1 to 60. Identity is
/// `FIRLAS-<expertise>`: the first three letters of each name, uppercased.
///
/// Instructors carry no dates, so construction needs no
/// [`Validator`](crate::validation::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InstructorRecord")]
pub struct Instructor {
    first_name: String,
    last_name: String,
    expertise: u8,
}

impl Instructor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        expertise: i64,
    ) -> ValidationResult<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        let mut violations = Violations::new(Self::KIND);
        violations
            .text("firstName", &first_name, 3, 50)
            .text("lastName", &last_name, 3, 50)
            .number(
                "expertise",
                expertise,
                i64::from(MIN_EXPERTISE),
                i64::from(MAX_EXPERTISE),
            );
        violations.finish()?;

        let instructor = Self {
            first_name,
            last_name,
            // range checked above
            expertise: expertise as u8,
        };
        debug!("Instructor created: {instructor}");
        Ok(instructor)
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(first_name: &str, last_name: &str, expertise: u8) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            expertise,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn expertise(&self) -> u8 {
        self.expertise
    }

    /// `"First Last"` as entered.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Instructor {
    const KIND: &'static str = "Instructor";

    type Record = InstructorRecord;

    fn from_record(record: InstructorRecord, _validator: &Validator) -> ValidationResult<Self> {
        Instructor::new(record.first_name, record.last_name, record.expertise)
    }

    fn try_identity(&self) -> ValidationResult<String> {
        Ok(format!(
            "{}{}-{}",
            identity_prefix(Self::KIND, "firstName", &self.first_name)?,
            identity_prefix(Self::KIND, "lastName", &self.last_name)?,
            self.expertise
        ))
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instructor({} {}, expertise {})",
            self.first_name, self.last_name, self.expertise
        )
    }
}

/// Instructor fields as stored in a data file, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRecord {
    first_name: String,
    last_name: String,
    expertise: i64,
}

impl TryFrom<InstructorRecord> for Instructor {
    type Error = ValidationError;

    fn try_from(record: InstructorRecord) -> Result<Self, Self::Error> {
        Instructor::new(record.first_name, record.last_name, record.expertise)
    }
}

/// Named orderings over instructors.
pub mod ordering {
    use super::Instructor;
    use std::cmp::Ordering;

    /// Highest expertise first.
    pub fn by_expertise(a: &Instructor, b: &Instructor) -> Ordering {
        b.expertise.cmp(&a.expertise)
    }

    /// Last name, then first name.
    pub fn by_last_name(a: &Instructor, b: &Instructor) -> Ordering {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    }

    /// First name, then last name.
    pub fn by_first_name(a: &Instructor, b: &Instructor) -> Ordering {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
    }

    /// Shorter last names first, alphabetical within equal length.
    pub fn by_last_name_length(a: &Instructor, b: &Instructor) -> Ordering {
        a.last_name
            .chars()
            .count()
            .cmp(&b.last_name.chars().count())
            .then_with(|| a.last_name.cmp(&b.last_name))
    }

    /// Highest expertise first, then last name and first name.
    pub fn by_expertise_then_name(a: &Instructor, b: &Instructor) -> Ordering {
        by_expertise(a, b).then_with(|| by_last_name(a, b))
    }
}
