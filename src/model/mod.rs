//! Validated domain values for the online courses catalogue.
//!
//! Every type in this module is immutable and can only be obtained through
//! a validating constructor (or by deserializing, which runs the same
//! constructor). Holding a `Course` therefore means holding a course whose
//! title, description, credits and start date passed every rule.
//!
//! ## Design Principles
//!
//! - **Validate once**: rules run at construction, never again
//! - **Report everything**: one error lists all broken rules of a value
//! - **Identity is derived**: each kind defines the key a repository dedupes on
//! - **Orderings are functions**: named comparators live in each `ordering`
//!   submodule so they can be passed straight to `sort_by`

pub mod assignment;
pub mod course;
mod entity;
pub mod instructor;
mod mark;
pub mod module;
pub mod student;

pub use assignment::Assignment;
pub use course::Course;
pub use entity::{Entity, IDENTITY_PREFIX_LEN};
pub use instructor::Instructor;
pub use mark::{Mark, UnknownMark};
pub use module::Module;
pub use student::Student;
