//! Student value type.

use super::entity::{Entity, identity_prefix};
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{Validator, Violations};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A validated student enrollment.
///
/// ## Validation Rules
///
/// - First and last name: 3 to 50 characters after trimming
/// - Email: required, `local@domain`
/// - Enrollment date: after today minus five years, not in a future year
///
/// Identity is the e-mail address.
///
/// ## Examples
///
/// ```rust
/// use online_courses::model::Student;
/// use online_courses::validation::Validator;
/// use chrono::NaiveDate;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let validator = Validator::at(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
///     let student = Student::new_with(
///         &validator,
///         "Yuriy",
///         "Vasuluk",
///         "yuriy.vasuluk@chnu.edu.ua",
///         NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
///     )?;
///     assert_eq!(student.email(), "yuriy.vasuluk@chnu.edu.ua");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StudentRecord")]
pub struct Student {
    first_name: String,
    last_name: String,
    email: String,
    enrollment_date: NaiveDate,
}

impl Student {
    /// Create a student, validating against today's date.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> ValidationResult<Self> {
        Self::new_with(
            &Validator::new(),
            first_name,
            last_name,
            email,
            enrollment_date,
        )
    }

    /// Create a student, validating against `validator`'s reference date.
    pub fn new_with(
        validator: &Validator,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        enrollment_date: NaiveDate,
    ) -> ValidationResult<Self> {
        let student = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            enrollment_date,
        };
        debug!("Attempting to create {student}");
        student.validate(validator)?;
        debug!("Student created: {}", student.email);
        Ok(student)
    }

    /// Build without validation, for exercising identity failure paths.
    #[cfg(test)]
    pub(crate) fn new_unchecked(
        first_name: &str,
        last_name: &str,
        email: &str,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            enrollment_date,
        }
    }

    fn validate(&self, validator: &Validator) -> ValidationResult<()> {
        let mut violations = Violations::new(Self::KIND);
        violations
            .text("firstName", &self.first_name, 3, 50)
            .text("lastName", &self.last_name, 3, 50)
            .email("email", &self.email)
            .enrollment_date(validator, "enrollmentDate", self.enrollment_date);
        violations.finish()
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    /// Display key `FIRLAS-EMA-<enrollment date>`.
    pub fn full_name(&self) -> ValidationResult<String> {
        Ok(format!(
            "{}{}-{}-{}",
            identity_prefix(Self::KIND, "firstName", &self.first_name)?,
            identity_prefix(Self::KIND, "lastName", &self.last_name)?,
            identity_prefix(Self::KIND, "email", &self.email)?,
            self.enrollment_date
        ))
    }

    /// `"First Last"` as entered.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Student {
    const KIND: &'static str = "Student";

    type Record = StudentRecord;

    fn from_record(record: StudentRecord, validator: &Validator) -> ValidationResult<Self> {
        Student::new_with(
            validator,
            record.first_name,
            record.last_name,
            record.email,
            record.enrollment_date,
        )
    }

    fn try_identity(&self) -> ValidationResult<String> {
        Ok(self.email.clone())
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        ordering::by_email(self, other)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student({}, {}, {}, {})",
            self.first_name, self.last_name, self.email, self.enrollment_date
        )
    }
}

/// Student fields as stored in a data file, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    first_name: String,
    last_name: String,
    email: String,
    enrollment_date: NaiveDate,
}

impl TryFrom<StudentRecord> for Student {
    type Error = ValidationError;

    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        Self::from_record(record, &Validator::new())
    }
}

/// Named orderings over students.
pub mod ordering {
    use super::Student;
    use std::cmp::Ordering;

    pub fn by_email(a: &Student, b: &Student) -> Ordering {
        a.email.cmp(&b.email)
    }

    pub fn by_enrollment_date(a: &Student, b: &Student) -> Ordering {
        a.enrollment_date.cmp(&b.enrollment_date)
    }

    /// Last name, then first name, then e-mail.
    pub fn by_name(a: &Student, b: &Student) -> Ordering {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.email.cmp(&b.email))
    }

    /// Last name descending, ties broken by first name and e-mail ascending.
    pub fn by_name_desc(a: &Student, b: &Student) -> Ordering {
        b.last_name
            .cmp(&a.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.email.cmp(&b.email))
    }

    pub fn by_first_name(a: &Student, b: &Student) -> Ordering {
        a.first_name.cmp(&b.first_name)
    }

    pub fn by_email_length(a: &Student, b: &Student) -> Ordering {
        a.email.chars().count().cmp(&b.email.chars().count())
    }
}
