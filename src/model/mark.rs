//! Assignment marks.
//!
//! Marks are totally ordered by their numeric rank, so `Mark::Low <
//! Mark::Excellent` and sorting a list of marks ascending puts
//! `NotPassed` first. On the wire a mark is its symbolic name
//! (`"EXCELLENT"`, `"NOT_PASSED"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grade awarded for an assignment, from `NotPassed` (0) to `Excellent` (5).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mark {
    NotPassed = 0,
    Low = 1,
    Satisfactory = 2,
    Passed = 3,
    Good = 4,
    Excellent = 5,
}

impl Mark {
    /// Every mark in ascending rank.
    pub const ALL: [Mark; 6] = [
        Mark::NotPassed,
        Mark::Low,
        Mark::Satisfactory,
        Mark::Passed,
        Mark::Good,
        Mark::Excellent,
    ];

    /// Numeric rank of the mark.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Mark with the given numeric rank, if any.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|mark| mark.value() == value)
    }

    /// Symbolic name used in data files.
    pub fn name(self) -> &'static str {
        match self {
            Mark::NotPassed => "NOT_PASSED",
            Mark::Low => "LOW",
            Mark::Satisfactory => "SATISFACTORY",
            Mark::Passed => "PASSED",
            Mark::Good => "GOOD",
            Mark::Excellent => "EXCELLENT",
        }
    }

    /// Message shown to the student receiving this mark.
    pub fn description(self) -> &'static str {
        match self {
            Mark::Excellent => "Your mark is excellent",
            Mark::Good => "Your mark is good.",
            Mark::Passed => "You passed the exam",
            Mark::Satisfactory => "Your mark is satisfactory.",
            Mark::Low => "Your mark is low.",
            Mark::NotPassed => "You did not pass the exam.",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when text names no mark.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mark '{0}'")]
pub struct UnknownMark(pub String);

impl FromStr for Mark {
    type Err = UnknownMark;

    /// Accepts the symbolic name in any case, or the numeric rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Self::from_value(value).ok_or_else(|| UnknownMark(s.to_string()));
        }

        let normalized = trimmed.to_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|mark| mark.name() == normalized)
            .ok_or_else(|| UnknownMark(s.to_string()))
    }
}
