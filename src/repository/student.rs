//! Student queries.

use super::Repository;
use super::query::{equals_ignore_case, search_term};
use crate::model::Student;
use crate::model::student::ordering;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;

impl Repository<Student> {
    /// Last name, first name, e-mail.
    pub fn sort_by_name(&self) -> Vec<Student> {
        self.sorted_by(ordering::by_name)
    }

    /// Last name descending, ties by first name and e-mail ascending.
    pub fn sort_by_name_desc(&self) -> Vec<Student> {
        self.sorted_by(ordering::by_name_desc)
    }

    pub fn sort_by_enrollment_date(&self) -> Vec<Student> {
        self.sorted_by(ordering::by_enrollment_date)
    }

    pub fn sort_by_enrollment_date_desc(&self) -> Vec<Student> {
        self.sorted_by(|a, b| ordering::by_enrollment_date(b, a))
    }

    pub fn sort_by_email_length(&self) -> Vec<Student> {
        self.sorted_by(ordering::by_email_length)
    }

    pub fn sort_by_first_name(&self) -> Vec<Student> {
        self.sorted_by(ordering::by_first_name)
    }

    pub fn find_by_last_name_containing(&self, partial_name: &str) -> Vec<Student> {
        let results = self.filter_containing(partial_name, Student::last_name);
        debug!(
            "Found {} students with last name containing '{partial_name}'",
            results.len()
        );
        results
    }

    /// Exact first-name match, ignoring case.
    pub fn find_by_first_name(&self, first_name: &str) -> Vec<Student> {
        if search_term(first_name).is_none() {
            warn!("Attempted to search students with empty first name");
            return Vec::new();
        }
        self.filter_by(|s| equals_ignore_case(s.first_name(), first_name))
    }

    /// Enrolled within `start..=end`.
    pub fn find_by_enrollment_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Student> {
        self.filter_in_range(start, end, Student::enrollment_date)
    }

    /// Students whose address ends with `@<domain>`, ignoring case.
    pub fn find_by_email_domain(&self, domain: &str) -> Vec<Student> {
        let Some(domain) = search_term(domain) else {
            warn!("Attempted to search students with empty domain");
            return Vec::new();
        };
        let suffix = format!("@{domain}");
        let results = self.filter_by(|s| s.email().to_lowercase().ends_with(&suffix));
        debug!("Found {} students with email domain '{domain}'", results.len());
        results
    }

    pub fn group_by_last_name(&self) -> BTreeMap<String, Vec<Student>> {
        self.group_by(|s| s.last_name().to_string())
    }

    pub fn count_by_enrollment_date(&self) -> BTreeMap<NaiveDate, usize> {
        self.count_by(Student::enrollment_date)
    }

    pub fn all_emails(&self) -> Vec<String> {
        self.map_all(|s| s.email().to_string())
    }

    /// `"First Last"` for every student.
    pub fn all_full_names(&self) -> Vec<String> {
        self.map_all(Student::display_name)
    }

    /// Earliest enrollment; the first one stored wins ties.
    pub fn find_oldest(&self) -> Option<Student> {
        let oldest = self.min_by_key(Student::enrollment_date);
        if let Some(student) = &oldest {
            info!("Oldest student: {} ({})", student.email(), student.enrollment_date());
        }
        oldest
    }

    /// Latest enrollment; the first one stored wins ties.
    pub fn find_newest(&self) -> Option<Student> {
        let newest = self.max_by_key(Student::enrollment_date);
        if let Some(student) = &newest {
            info!("Newest student: {} ({})", student.email(), student.enrollment_date());
        }
        newest
    }

    pub fn count_by_last_name(&self, last_name: &str) -> usize {
        if search_term(last_name).is_none() {
            return 0;
        }
        self.count_matching(|s| equals_ignore_case(s.last_name(), last_name))
    }

    /// Whether an address matches `email`, ignoring case.
    pub fn has_student_with_email(&self, email: &str) -> bool {
        search_term(email).is_some() && self.any_match(|s| equals_ignore_case(s.email(), email))
    }

    /// Whether every student enrolled strictly after `date`.
    pub fn all_enrolled_after(&self, date: NaiveDate) -> bool {
        self.all_match(|s| s.enrollment_date() > date)
    }

    /// Log every student, one per line.
    pub fn log_all(&self) {
        for student in self.get_all() {
            info!("{} {} - {}", student.first_name(), student.last_name(), student.email());
        }
    }
}
