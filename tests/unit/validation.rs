//! Field rules and date windows, observed through entity constructors.

use crate::common::{date, validator};
use crate::{assert_error_message_contains, assert_validation_success, assert_violation};
use online_courses::model::{Assignment, Course, Instructor, Mark, Module, Student};
use online_courses::validation::{self, Validator};
use online_courses::ValidationError;

#[test]
fn test_enrollment_window_edges() {
    let validator = validator();

    // Floor is 2021-10-18 and excluded.
    assert_violation!(
        Student::new_with(&validator, "Ivan", "Petrenko", "ivan@chnu.edu.ua", date(2021, 10, 18)),
        "enrollmentDate"
    );
    assert_validation_success!(Student::new_with(
        &validator,
        "Ivan",
        "Petrenko",
        "ivan@chnu.edu.ua",
        date(2021, 10, 19)
    ));

    // Later this year is fine, next year is not.
    assert_validation_success!(Student::new_with(
        &validator,
        "Ivan",
        "Petrenko",
        "ivan@chnu.edu.ua",
        date(2026, 12, 31)
    ));
    assert_violation!(
        Student::new_with(&validator, "Ivan", "Petrenko", "ivan@chnu.edu.ua", date(2027, 1, 1)),
        "enrollmentDate"
    );
}

#[test]
fn test_schedule_window_is_exclusive() {
    let validator = validator();
    let (min, max) = validator.schedule_window();
    assert_eq!(min, date(2025, 10, 18));
    assert_eq!(max, date(2027, 10, 18));

    for (start, valid) in [
        (date(2025, 10, 18), false),
        (date(2025, 10, 19), true),
        (date(2027, 10, 17), true),
        (date(2027, 10, 18), false),
    ] {
        let result = Course::new_with(&validator, "Rust", "Systems", 3, start);
        assert_eq!(result.is_ok(), valid, "start date {start}");
    }

    let module = Module::new("Ownership", "Moves and borrows").unwrap();
    assert_violation!(
        Assignment::new_with(&validator, module, date(2027, 10, 18), 10, Mark::Passed),
        "dueDate"
    );
}

#[test]
fn test_leap_day_reference() {
    let validator = Validator::at(date(2028, 2, 29));
    assert_eq!(validator.enrollment_floor(), date(2023, 2, 28));
    assert_eq!(validator.schedule_window(), (date(2027, 2, 28), date(2029, 2, 28)));
}

#[test]
fn test_every_violation_is_reported() {
    let error = Instructor::new("", "Bo", 0).unwrap_err();

    let fields: Vec<&str> = error.violations().iter().map(|v| v.field()).collect();
    assert_eq!(fields, vec!["firstName", "firstName", "lastName", "expertise"]);

    let message = error.to_string();
    assert!(message.contains("firstName: invalid value '' — cannot be empty"));
    assert!(message.contains("lastName: invalid value 'Bo' — must be between 3 and 50 characters"));
    assert!(message.contains("expertise: invalid value '0' — must be at least 1"));
    assert_eq!(message.matches("; ").count(), 3);
}

#[test]
fn test_blank_email_reports_only_emptiness() {
    let validator = validator();
    let error =
        Student::new_with(&validator, "Ivan", "Petrenko", "   ", date(2024, 9, 1)).unwrap_err();
    assert_eq!(error.violations().len(), 1);
    assert_eq!(error.violations()[0].message(), "cannot be empty");

    assert_error_message_contains!(
        Student::new_with(&validator, "Ivan", "Petrenko", "ivan@", date(2024, 9, 1)),
        "must be a valid email address"
    );
}

#[test]
fn test_email_shapes() {
    for valid in [
        "ivan@chnu.edu.ua",
        "first.last+tag@example.com",
        "юрій@пошта.укр",
    ] {
        assert!(validation::is_valid_email(valid), "{valid}");
    }
    for invalid in ["", "plain", "@domain.com", "a@", "a@b..c", "a b@c.d", ".a@b.c"] {
        assert!(!validation::is_valid_email(invalid), "{invalid}");
    }
}

#[test]
fn test_numeric_boundaries() {
    assert_validation_success!(Instructor::new("Ivan", "Petrenko", 1));
    assert_validation_success!(Instructor::new("Ivan", "Petrenko", 60));
    assert_violation!(Instructor::new("Ivan", "Petrenko", 61), "expertise");

    let validator = validator();
    let start = date(2026, 11, 1);
    assert_violation!(Course::new_with(&validator, "Rust", "Systems", 0, start), "credits");
    assert_violation!(Course::new_with(&validator, "Rust", "Systems", 6, start), "credits");
    assert_violation!(Course::new_with(&validator, "Rust", "Systems", -3, start), "credits");
}

#[test]
fn test_text_lengths_count_characters() {
    // 30 Cyrillic characters fit a 30-character limit even though they take 60 bytes.
    let title = "Ж".repeat(30);
    assert_validation_success!(Module::new(title.as_str(), "Content"));
    assert_violation!(Module::new("Ж".repeat(31), "Content"), "title");
    assert_violation!(Module::new("  ab  ", "Content"), "title");
}

#[test]
fn test_error_shape() {
    match Module::new("", "") {
        Err(ValidationError::InvalidData { entity, violations }) => {
            assert_eq!(entity, "Module");
            assert_eq!(violations.len(), 4);
        }
        other => panic!("expected InvalidData, got {other:?}"),
    }
}
