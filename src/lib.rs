//! Online courses catalogue library for Rust.
//!
//! Validated value types for students, courses, instructors, modules and
//! assignments, thread-safe repositories that keep them unique by a derived
//! identity, and the collaborators around them: CSV ingestion, JSON/YAML
//! persistence, layered configuration and parallel processors.
//!
//! # Core Components
//!
//! - [`model`] - Entity types validated at construction
//! - [`Repository`] - Identity-indexed, insertion-ordered storage with queries
//! - [`Validator`] - Field rules and date windows relative to a reference day
//!
//! # Quick Start
//!
//! ```rust
//! use online_courses::model::Course;
//! use online_courses::repository::CourseRepository;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let today = chrono::Local::now().date_naive();
//! let courses = CourseRepository::for_entity();
//! courses.add(Course::new("Rust", "Systems programming", 4, today)?);
//! courses.add(Course::new("Java", "Enterprise development", 3, today)?);
//!
//! assert_eq!(courses.total_credits(), 7);
//! assert_eq!(courses.sort_by_title()[0].title(), "Java");
//! # Ok(())
//! # }
//! ```
//!
//! Invalid input never produces a value:
//!
//! ```rust
//! use online_courses::model::Instructor;
//!
//! let error = Instructor::new("", "Булат", 61).unwrap_err();
//! assert!(error.has_violation_for("firstName"));
//! assert!(error.has_violation_for("expertise"));
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod parallel;
pub mod parser;
pub mod persistence;
pub mod repository;
pub mod serializer;
pub mod validation;

pub use config::AppConfig;
pub use error::{CoursesError, CoursesResult, FieldViolation, ValidationError, ValidationResult};
pub use model::{Assignment, Course, Entity, Instructor, Mark, Module, Student};
pub use persistence::PersistenceManager;
pub use repository::{Repository, SortOrder};
pub use serializer::DataFormat;
pub use validation::Validator;
