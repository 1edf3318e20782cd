//! Course value type.

use super::entity::{Entity, identity_prefix};
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{Validator, Violations};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Lowest credit value a course may carry.
pub const MIN_CREDITS: u8 = 1;
/// Highest credit value a course may carry.
pub const MAX_CREDITS: u8 = 5;

/// A validated course offering.
///
/// ## Validation Rules
///
/// - Title: 3 to 100 characters after trimming
/// - Description: 3 to 500 characters after trimming
/// - Credits: 1 to 5
/// - Start date: strictly within one year either side of today
///
/// Identity is `TIT-DES-<credits><start date>`, for example
/// `JAV-LEA-32025-06-01`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CourseRecord")]
pub struct Course {
    title: String,
    description: String,
    credits: u8,
    start_date: NaiveDate,
}

impl Course {
    /// Create a course, validating against today's date.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        credits: i64,
        start_date: NaiveDate,
    ) -> ValidationResult<Self> {
        Self::new_with(&Validator::new(), title, description, credits, start_date)
    }

    /// Create a course, validating against `validator`'s reference date.
    pub fn new_with(
        validator: &Validator,
        title: impl Into<String>,
        description: impl Into<String>,
        credits: i64,
        start_date: NaiveDate,
    ) -> ValidationResult<Self> {
        let title = title.into();
        let description = description.into();

        let mut violations = Violations::new(Self::KIND);
        violations
            .text("title", &title, 3, 100)
            .text("description", &description, 3, 500)
            .number(
                "credits",
                credits,
                i64::from(MIN_CREDITS),
                i64::from(MAX_CREDITS),
            )
            .schedule_date(validator, "startDate", start_date);
        violations.finish()?;

        let course = Self {
            title,
            description,
            // range checked above
            credits: credits as u8,
            start_date,
        };
        debug!("Course created: {course}");
        Ok(course)
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(
        title: &str,
        description: &str,
        credits: u8,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            credits,
            start_date,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

impl Entity for Course {
    const KIND: &'static str = "Course";

    type Record = CourseRecord;

    fn from_record(record: CourseRecord, validator: &Validator) -> ValidationResult<Self> {
        Course::new_with(
            validator,
            record.title,
            record.description,
            record.credits,
            record.start_date,
        )
    }

    fn try_identity(&self) -> ValidationResult<String> {
        Ok(format!(
            "{}-{}-{}{}",
            identity_prefix(Self::KIND, "title", &self.title)?,
            identity_prefix(Self::KIND, "description", &self.description)?,
            self.credits,
            self.start_date
        ))
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course({}, {} credits, starts {})",
            self.title, self.credits, self.start_date
        )
    }
}

/// Course fields as stored in a data file, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    title: String,
    description: String,
    credits: i64,
    start_date: NaiveDate,
}

impl TryFrom<CourseRecord> for Course {
    type Error = ValidationError;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        Self::from_record(record, &Validator::new())
    }
}

/// Named orderings over courses.
pub mod ordering {
    use super::Course;
    use std::cmp::Ordering;

    /// Title, then description.
    pub fn by_title(a: &Course, b: &Course) -> Ordering {
        a.title
            .cmp(&b.title)
            .then_with(|| a.description.cmp(&b.description))
    }

    pub fn by_description(a: &Course, b: &Course) -> Ordering {
        a.description.cmp(&b.description)
    }

    pub fn by_credits(a: &Course, b: &Course) -> Ordering {
        a.credits.cmp(&b.credits)
    }

    pub fn by_start_date(a: &Course, b: &Course) -> Ordering {
        a.start_date.cmp(&b.start_date)
    }

    /// Most credits first, earlier start dates first within equal credits.
    pub fn by_credits_desc_then_date(a: &Course, b: &Course) -> Ordering {
        b.credits
            .cmp(&a.credits)
            .then_with(|| a.start_date.cmp(&b.start_date))
    }
}
