//! Instructor queries.

use super::Repository;
use super::query::{equals_ignore_case, search_term};
use crate::model::Instructor;
use crate::model::instructor::ordering;
use log::{debug, info, warn};
use std::collections::BTreeMap;

impl Repository<Instructor> {
    /// Highest expertise first.
    pub fn sort_by_expertise(&self) -> Vec<Instructor> {
        self.sorted_by(ordering::by_expertise)
    }

    pub fn sort_by_last_name(&self) -> Vec<Instructor> {
        self.sorted_by(ordering::by_last_name)
    }

    pub fn sort_by_first_name(&self) -> Vec<Instructor> {
        self.sorted_by(ordering::by_first_name)
    }

    pub fn sort_by_last_name_length(&self) -> Vec<Instructor> {
        self.sorted_by(ordering::by_last_name_length)
    }

    pub fn sort_by_expertise_and_name(&self) -> Vec<Instructor> {
        self.sorted_by(ordering::by_expertise_then_name)
    }

    /// Exact last-name match, ignoring case.
    pub fn find_by_last_name(&self, last_name: &str) -> Vec<Instructor> {
        if search_term(last_name).is_none() {
            warn!("Attempted to search instructors with empty last name");
            return Vec::new();
        }
        let results = self.filter_by(|i| equals_ignore_case(i.last_name(), last_name));
        debug!(
            "Found {} instructors with last name '{last_name}'",
            results.len()
        );
        results
    }

    pub fn find_by_expertise_range(&self, min: u8, max: u8) -> Vec<Instructor> {
        self.filter_in_range(min, max, Instructor::expertise)
    }

    pub fn find_by_min_expertise(&self, min_expertise: u8) -> Vec<Instructor> {
        self.filter_by(|i| i.expertise() >= min_expertise)
    }

    pub fn find_by_first_name_containing(&self, partial_name: &str) -> Vec<Instructor> {
        self.filter_containing(partial_name, Instructor::first_name)
    }

    pub fn group_by_last_name(&self) -> BTreeMap<String, Vec<Instructor>> {
        self.group_by(|i| i.last_name().to_string())
    }

    pub fn total_expertise(&self) -> u64 {
        self.sum_by(|i| u64::from(i.expertise()))
    }

    /// Mean expertise, `0.0` when there are no instructors.
    pub fn average_expertise(&self) -> f64 {
        let average = self.average_by(|i| f64::from(i.expertise()));
        debug!("Average expertise: {average:.2}");
        average
    }

    pub fn instructor_with_max_expertise(&self) -> Option<Instructor> {
        self.max_by_key(Instructor::expertise)
    }

    pub fn all_instructors_with_max_expertise(&self) -> Vec<Instructor> {
        self.all_with_max(Instructor::expertise)
    }

    /// `"First Last"` for every instructor.
    pub fn all_full_names(&self) -> Vec<String> {
        self.map_all(Instructor::display_name)
    }

    pub fn has_instructor_with_expertise(&self, expertise: u8) -> bool {
        self.any_match(|i| i.expertise() == expertise)
    }

    pub fn all_instructors_have_min_expertise(&self, min_expertise: u8) -> bool {
        self.all_match(|i| i.expertise() >= min_expertise)
    }

    /// Log every instructor, one per line.
    pub fn log_all(&self) {
        for instructor in self.get_all() {
            info!("{} - expertise {}", instructor.display_name(), instructor.expertise());
        }
    }
}
