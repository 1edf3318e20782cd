//! Assignment queries.

use super::Repository;
use crate::model::assignment::ordering;
use crate::model::{Assignment, Mark};
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

impl Repository<Assignment> {
    pub fn sort_by_due_date(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_due_date)
    }

    pub fn sort_by_due_date_desc(&self) -> Vec<Assignment> {
        self.sorted_by(|a, b| ordering::by_due_date(b, a))
    }

    /// Most points first.
    pub fn sort_by_max_points(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_max_points)
    }

    /// Ascending mark rank: `NotPassed` first, `Excellent` last.
    pub fn sort_by_mark(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_mark)
    }

    pub fn sort_by_module_and_date(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_module_and_date)
    }

    pub fn sort_by_module_title(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_module_title)
    }

    /// Ascending mark, then most points, then earliest due date.
    pub fn sort_by_mark_points_date(&self) -> Vec<Assignment> {
        self.sorted_by(ordering::by_mark_points_date)
    }

    pub fn find_by_mark(&self, mark: Mark) -> Vec<Assignment> {
        let results = self.filter_by(|a| a.mark() == mark);
        debug!("Found {} assignments with mark {mark}", results.len());
        results
    }

    pub fn find_by_points_range(&self, min: u8, max: u8) -> Vec<Assignment> {
        self.filter_in_range(min, max, Assignment::max_points)
    }

    /// Due strictly before `date`.
    pub fn find_by_due_date_before(&self, date: NaiveDate) -> Vec<Assignment> {
        self.filter_by(|a| a.due_date() < date)
    }

    /// Due strictly after `date`.
    pub fn find_by_due_date_after(&self, date: NaiveDate) -> Vec<Assignment> {
        self.filter_by(|a| a.due_date() > date)
    }

    /// Assignments whose module title contains `module_title`, ignoring case.
    pub fn find_by_module_title(&self, module_title: &str) -> Vec<Assignment> {
        self.filter_containing(module_title, |a| a.module().title())
    }

    pub fn group_by_mark(&self) -> BTreeMap<Mark, Vec<Assignment>> {
        self.group_by(Assignment::mark)
    }

    pub fn group_by_module_title(&self) -> BTreeMap<String, Vec<Assignment>> {
        self.group_by(|a| a.module().title().to_string())
    }

    pub fn total_max_points(&self) -> u64 {
        self.sum_by(|a| u64::from(a.max_points()))
    }

    pub fn average_max_points(&self) -> f64 {
        self.average_by(|a| f64::from(a.max_points()))
    }

    pub fn assignment_with_max_points(&self) -> Option<Assignment> {
        self.max_by_key(Assignment::max_points)
    }

    pub fn all_assignments_with_max_points(&self) -> Vec<Assignment> {
        self.all_with_max(Assignment::max_points)
    }

    /// Distinct module titles in first-seen order.
    pub fn all_module_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = Vec::new();
        for title in self.map_all(|a| a.module().title().to_string()) {
            if !titles.contains(&title) {
                titles.push(title);
            }
        }
        titles
    }

    pub fn has_assignment_with_points(&self, points: u8) -> bool {
        self.any_match(|a| a.max_points() == points)
    }

    pub fn all_assignments_have_min_points(&self, min_points: u8) -> bool {
        self.all_match(|a| a.max_points() >= min_points)
    }

    /// Log every assignment, one per line.
    pub fn log_all(&self) {
        for assignment in self.get_all() {
            info!(
                "{} - due {} - {} points - {}",
                assignment.module().title(),
                assignment.due_date(),
                assignment.max_points(),
                assignment.mark()
            );
        }
    }
}
