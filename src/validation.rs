//! Field-level validation rules and the violation collector.
//!
//! Entities never validate themselves piecemeal: each constructor feeds all
//! of its fields through a [`Violations`] collector and either gets a clean
//! bill or one [`ValidationError`] listing every broken rule.
//!
//! # Design Principles
//!
//! - Rules are pure predicates: no logging, no allocation beyond the check
//! - String lengths are measured in characters after trimming whitespace
//! - Numeric ranges are inclusive, date windows are exclusive on both ends
//! - "Today" is a property of a [`Validator`], never read implicitly by a rule

use crate::error::{FieldViolation, ValidationError, ValidationResult};
use chrono::{Datelike, Local, Months, NaiveDate};
use log::{debug, warn};
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

const EMPTY_MESSAGE: &str = "cannot be empty";
const EMAIL_MESSAGE: &str = "must be a valid email address";
const ENROLLMENT_MESSAGE: &str = "must be within 5 years from today and not in future year";
const SCHEDULE_MESSAGE: &str = "must be within 1 year from today";

/// Years a student enrollment stays valid, counted back from today.
pub const ENROLLMENT_WINDOW_YEARS: u32 = 5;

/// Years a course start or assignment due date may lie from today.
pub const SCHEDULE_WINDOW_YEARS: u32 = 1;

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[\w!#$%&'*+/=?^`{|}~-]+(?:\.[\w!#$%&'*+/=?^`{|}~-]+)*@\w(?:[\w-]*\w)?(?:\.\w(?:[\w-]*\w)?)*$",
    )
    .ok()
});

/// Whether `text`, trimmed, has between `min` and `max` characters inclusive.
pub fn is_string_length_between(text: &str, min: usize, max: usize) -> bool {
    let length = text.trim().chars().count();
    length >= min && length <= max
}

/// Whether `value` lies in `[min, max]`.
pub fn is_number_between<N: PartialOrd>(value: N, min: N, max: N) -> bool {
    value >= min && value <= max
}

/// Whether `date` lies strictly between `min` and `max`.
pub fn is_date_between(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> bool {
    date > min && date < max
}

/// Whether `text` has the shape `local@domain`.
///
/// Dotted atoms on both sides, Unicode word characters allowed. An empty
/// string is not an address.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text))
}

/// Date-sensitive rules evaluated against a fixed reference day.
///
/// `Validator::default()` pins the local calendar date at construction.
/// Tests and batch jobs that must be reproducible pin their own day with
/// [`Validator::at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    today: NaiveDate,
}

impl Validator {
    /// Validator anchored at the current local date.
    pub fn new() -> Self {
        Self::at(Local::now().date_naive())
    }

    /// Validator anchored at `today`.
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Exclusive lower bound for enrollment dates (today minus five years).
    pub fn enrollment_floor(&self) -> NaiveDate {
        years_before(self.today, ENROLLMENT_WINDOW_YEARS)
    }

    /// Exclusive bounds for course start and assignment due dates.
    pub fn schedule_window(&self) -> (NaiveDate, NaiveDate) {
        (
            years_before(self.today, SCHEDULE_WINDOW_YEARS),
            years_after(self.today, SCHEDULE_WINDOW_YEARS),
        )
    }

    /// Enrollment must be after today minus five years and not in a future year.
    pub fn is_valid_enrollment_date(&self, date: NaiveDate) -> bool {
        date > self.enrollment_floor() && date.year() <= self.today.year()
    }

    /// Start/due dates must lie strictly within one year either side of today.
    pub fn is_valid_schedule_date(&self, date: NaiveDate) -> bool {
        let (min, max) = self.schedule_window();
        is_date_between(date, min, max)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// Month arithmetic clamps Feb 29 to Feb 28; the fallbacks only trigger at the
// edges of chrono's representable range.
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

fn years_after(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MAX)
}

/// Collects every broken rule of one entity before failing.
///
/// ```rust
/// use online_courses::validation::Violations;
///
/// let mut violations = Violations::new("Instructor");
/// violations
///     .text("firstName", "Ivan", 3, 50)
///     .number("expertise", 99, 1, 60);
/// let error = violations.finish().unwrap_err();
/// assert!(error.to_string().starts_with("expertise: invalid value '99'"));
/// ```
#[derive(Debug)]
pub struct Violations {
    entity: &'static str,
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new(entity: &'static str) -> Self {
        debug!("Validating {entity}");
        Self {
            entity,
            items: Vec::new(),
        }
    }

    /// Record a violation unless `valid` holds.
    pub fn check(
        &mut self,
        valid: bool,
        field: &str,
        value: impl Display,
        message: &str,
    ) -> &mut Self {
        if !valid {
            self.items
                .push(FieldViolation::new(field, value.to_string(), message));
        }
        self
    }

    /// Required text of `min..=max` characters after trimming.
    pub fn text(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let message = format!("must be between {min} and {max} characters");
        self.check(!value.trim().is_empty(), field, value, EMPTY_MESSAGE)
            .check(
                is_string_length_between(value, min, max),
                field,
                value,
                &message,
            )
    }

    /// Integer in `min..=max`, reported with a bound-specific message.
    pub fn number(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        let below = format!("must be at least {min}");
        let above = format!("must be at most {max}");
        self.check(value >= min, field, value, &below)
            .check(value <= max, field, value, &above)
    }

    /// Required, well-formed e-mail address.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let blank = value.trim().is_empty();
        self.check(!blank, field, value, EMPTY_MESSAGE)
            .check(blank || is_valid_email(value), field, value, EMAIL_MESSAGE)
    }

    pub fn enrollment_date(
        &mut self,
        validator: &Validator,
        field: &str,
        value: NaiveDate,
    ) -> &mut Self {
        self.check(
            validator.is_valid_enrollment_date(value),
            field,
            value,
            ENROLLMENT_MESSAGE,
        )
    }

    pub fn schedule_date(
        &mut self,
        validator: &Validator,
        field: &str,
        value: NaiveDate,
    ) -> &mut Self {
        self.check(
            validator.is_valid_schedule_date(value),
            field,
            value,
            SCHEDULE_MESSAGE,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Succeed when nothing was recorded, otherwise fail with all violations.
    pub fn finish(self) -> ValidationResult<()> {
        if self.items.is_empty() {
            debug!("{} passed validation", self.entity);
            return Ok(());
        }

        let error = ValidationError::invalid_data(self.entity, self.items);
        warn!("{} failed validation: {error}", self.entity);
        Err(error)
    }
}
