//! Assignment value type.

use super::entity::Entity;
use super::mark::Mark;
use super::module::Module;
use crate::error::{ValidationError, ValidationResult};
use crate::validation::{Validator, Violations};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A graded piece of work attached to a module.
///
/// The module is embedded by value. Due date lies strictly within one year
/// either side of today and max points is 1 to 100. Identity is
/// `<module identity>-<due date>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AssignmentRecord")]
pub struct Assignment {
    module: Module,
    due_date: NaiveDate,
    max_points: u8,
    mark: Mark,
}

impl Assignment {
    /// Create an assignment, validating against today's date.
    pub fn new(
        module: Module,
        due_date: NaiveDate,
        max_points: i64,
        mark: Mark,
    ) -> ValidationResult<Self> {
        Self::new_with(&Validator::new(), module, due_date, max_points, mark)
    }

    /// Create an assignment, validating against `validator`'s reference date.
    pub fn new_with(
        validator: &Validator,
        module: Module,
        due_date: NaiveDate,
        max_points: i64,
        mark: Mark,
    ) -> ValidationResult<Self> {
        let mut violations = Violations::new(Self::KIND);
        violations
            .schedule_date(validator, "dueDate", due_date)
            .number("maxPoints", max_points, 1, 100);
        violations.finish()?;

        let assignment = Self {
            module,
            due_date,
            // range checked above
            max_points: max_points as u8,
            mark,
        };
        debug!("Assignment created: {assignment}");
        Ok(assignment)
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn max_points(&self) -> u8 {
        self.max_points
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Student-facing text for the awarded mark.
    pub fn mark_description(&self) -> &'static str {
        self.mark.description()
    }
}

impl Entity for Assignment {
    const KIND: &'static str = "Assignment";

    type Record = AssignmentRecord;

    fn from_record(record: AssignmentRecord, validator: &Validator) -> ValidationResult<Self> {
        Assignment::new_with(
            validator,
            record.module,
            record.due_date,
            record.max_points,
            record.mark,
        )
    }

    fn try_identity(&self) -> ValidationResult<String> {
        Ok(format!("{}-{}", self.module.try_identity()?, self.due_date))
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        ordering::by_due_date(self, other)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Assignment({}, due {}, {} points, {})",
            self.module.title(),
            self.due_date,
            self.max_points,
            self.mark
        )
    }
}

/// Assignment fields as stored in a data file, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    module: Module,
    due_date: NaiveDate,
    max_points: i64,
    mark: Mark,
}

impl TryFrom<AssignmentRecord> for Assignment {
    type Error = ValidationError;

    fn try_from(record: AssignmentRecord) -> Result<Self, Self::Error> {
        Self::from_record(record, &Validator::new())
    }
}

/// Named orderings over assignments.
pub mod ordering {
    use super::Assignment;
    use crate::model::Entity;
    use std::cmp::Ordering;

    pub fn by_due_date(a: &Assignment, b: &Assignment) -> Ordering {
        a.due_date.cmp(&b.due_date)
    }

    /// Most points first.
    pub fn by_max_points(a: &Assignment, b: &Assignment) -> Ordering {
        b.max_points.cmp(&a.max_points)
    }

    /// Ascending mark rank.
    pub fn by_mark(a: &Assignment, b: &Assignment) -> Ordering {
        a.mark.cmp(&b.mark)
    }

    /// Module identity, then due date.
    pub fn by_module_and_date(a: &Assignment, b: &Assignment) -> Ordering {
        a.module
            .identity()
            .cmp(&b.module.identity())
            .then_with(|| by_due_date(a, b))
    }

    pub fn by_module_title(a: &Assignment, b: &Assignment) -> Ordering {
        a.module.title().cmp(b.module.title())
    }

    /// Ascending mark, then most points, then earliest due date.
    pub fn by_mark_points_date(a: &Assignment, b: &Assignment) -> Ordering {
        by_mark(a, b)
            .then_with(|| by_max_points(a, b))
            .then_with(|| by_due_date(a, b))
    }
}
