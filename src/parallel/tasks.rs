//! Named read-only tasks shared by the executor and async processors.
//!
//! Every task takes a repository snapshot, logs the thread it runs on and
//! returns a plain value.

use super::thread_name;
use crate::model::{Instructor, Student};
use crate::repository::{CourseRepository, InstructorRepository, StudentRepository};
use log::info;
use std::fmt;
use std::time::Duration;

/// E-mail domain the demonstration task set filters on.
pub const DEFAULT_DOMAIN: &str = "chnu.edu.ua";
/// Credit threshold for the course counting task.
pub const DEFAULT_MIN_CREDITS: u8 = 3;
/// Expertise threshold for the instructor search task.
pub const DEFAULT_MIN_EXPERTISE: u8 = 5;

pub fn filter_students_by_domain(repository: &StudentRepository, domain: &str) -> Vec<Student> {
    let thread = thread_name();
    info!("Thread [{thread}] started filtering students by domain: {domain}");
    let result = repository.find_by_email_domain(domain);
    info!(
        "Thread [{thread}] completed filtering. Found {} students",
        result.len()
    );
    result
}

pub fn count_courses_with_min_credits(repository: &CourseRepository, min_credits: u8) -> usize {
    let thread = thread_name();
    info!("Thread [{thread}] started counting courses with credits >= {min_credits}");
    let count = repository.count_with_min_credits(min_credits);
    info!("Thread [{thread}] completed counting. Found {count} courses");
    count
}

pub fn find_instructors_with_min_expertise(
    repository: &InstructorRepository,
    min_expertise: u8,
) -> Vec<Instructor> {
    let thread = thread_name();
    info!("Thread [{thread}] started finding instructors with expertise >= {min_expertise}");
    let result = repository.find_by_min_expertise(min_expertise);
    info!(
        "Thread [{thread}] completed finding. Found {} instructors",
        result.len()
    );
    result
}

pub fn total_credits(repository: &CourseRepository) -> u64 {
    let thread = thread_name();
    info!("Thread [{thread}] started calculating total credits");
    let total = repository.total_credits();
    info!("Thread [{thread}] completed calculating. Total credits: {total}");
    total
}

pub fn average_expertise(repository: &InstructorRepository) -> f64 {
    let thread = thread_name();
    info!("Thread [{thread}] started calculating average expertise");
    let average = repository.average_expertise();
    info!("Thread [{thread}] completed calculating. Average expertise: {average:.2}");
    average
}

/// Log one line per student and return how many were listed.
pub fn print_students(repository: &StudentRepository) -> usize {
    let thread = thread_name();
    let students = repository.get_all();
    info!("Thread [{thread}] processing {} students", students.len());
    for student in &students {
        info!("  {} - {}", student.display_name(), student.email());
    }
    info!("Thread [{thread}] completed printing students");
    students.len()
}

/// What a task produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutput {
    Students(Vec<Student>),
    Instructors(Vec<Instructor>),
    Count(usize),
    Credits(u64),
    Average(f64),
    Printed(usize),
}

impl fmt::Display for TaskOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Students(students) => write!(f, "{} students", students.len()),
            Self::Instructors(instructors) => write!(f, "{} instructors", instructors.len()),
            Self::Count(count) => write!(f, "{count}"),
            Self::Credits(credits) => write!(f, "{credits} credits"),
            Self::Average(average) => write!(f, "{average:.2}"),
            Self::Printed(count) => write!(f, "{count} printed"),
        }
    }
}

/// Result of one task run by a processor.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub name: &'static str,
    pub thread: String,
    pub elapsed: Duration,
    pub output: TaskOutput,
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on [{}] in {} ms: {}",
            self.name,
            self.thread,
            self.elapsed.as_millis(),
            self.output
        )
    }
}
