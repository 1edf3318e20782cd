//! Common test utilities.
//!
//! Every fixture validates against [`reference_date`] so date windows do not
//! drift with the calendar.

use chrono::NaiveDate;
use online_courses::Validator;

pub mod fixtures;

/// Day all fixtures are validated against.
pub fn reference_date() -> NaiveDate {
    date(2026, 10, 18)
}

pub fn validator() -> Validator {
    Validator::at(reference_date())
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Route library logs through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert that a result failed validation on `field`.
#[macro_export]
macro_rules! assert_violation {
    ($result:expr, $field:expr) => {
        match $result {
            Err(err) => assert!(
                err.has_violation_for($field),
                "Expected a violation for '{}', got: {}",
                $field,
                err
            ),
            Ok(value) => panic!(
                "Expected a violation for '{}', but {:?} was accepted",
                $field, value
            ),
        }
    };
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err,
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but the call succeeded",
                $substring
            ),
        }
    };
}

/// Custom assertion macro for successful validation
#[macro_export]
macro_rules! assert_validation_success {
    ($result:expr) => {
        match $result {
            Ok(_) => {}
            Err(err) => panic!("Expected validation to succeed, but got error: {}", err),
        }
    };
}
