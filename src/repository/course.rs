//! Course queries.

use super::Repository;
use crate::model::Course;
use crate::model::course::ordering;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

impl Repository<Course> {
    /// Title, then description.
    pub fn sort_by_title(&self) -> Vec<Course> {
        self.sorted_by(ordering::by_title)
    }

    pub fn sort_by_credits(&self) -> Vec<Course> {
        self.sorted_by(ordering::by_credits)
    }

    pub fn sort_by_credits_desc(&self) -> Vec<Course> {
        self.sorted_by(|a, b| ordering::by_credits(b, a))
    }

    pub fn sort_by_start_date(&self) -> Vec<Course> {
        self.sorted_by(ordering::by_start_date)
    }

    pub fn sort_by_description(&self) -> Vec<Course> {
        self.sorted_by(ordering::by_description)
    }

    /// Most credits first, earlier start first within equal credits.
    pub fn sort_by_credits_and_date(&self) -> Vec<Course> {
        self.sorted_by(ordering::by_credits_desc_then_date)
    }

    pub fn find_by_title_containing(&self, partial_title: &str) -> Vec<Course> {
        let results = self.filter_containing(partial_title, Course::title);
        debug!(
            "Found {} courses with title containing '{partial_title}'",
            results.len()
        );
        results
    }

    /// Credits within `min..=max`.
    pub fn find_by_credits_range(&self, min: u8, max: u8) -> Vec<Course> {
        self.filter_in_range(min, max, Course::credits)
    }

    /// Starting strictly after `date`.
    pub fn find_by_start_date_after(&self, date: NaiveDate) -> Vec<Course> {
        self.filter_by(|c| c.start_date() > date)
    }

    pub fn find_by_description_containing(&self, keyword: &str) -> Vec<Course> {
        self.filter_containing(keyword, Course::description)
    }

    pub fn group_by_credits(&self) -> BTreeMap<u8, Vec<Course>> {
        self.group_by(Course::credits)
    }

    pub fn total_credits(&self) -> u64 {
        let total = self.sum_by(|c| u64::from(c.credits()));
        debug!("Total credits across all courses: {total}");
        total
    }

    /// Mean credits, `0.0` when there are no courses.
    pub fn average_credits(&self) -> f64 {
        self.average_by(|c| f64::from(c.credits()))
    }

    pub fn course_with_max_credits(&self) -> Option<Course> {
        let course = self.max_by_key(Course::credits);
        match &course {
            Some(c) => info!("Course with max credits: {} ({} credits)", c.title(), c.credits()),
            None => info!("No courses found"),
        }
        course
    }

    pub fn all_courses_with_max_credits(&self) -> Vec<Course> {
        self.all_with_max(Course::credits)
    }

    pub fn all_titles(&self) -> Vec<String> {
        self.map_all(|c| c.title().to_string())
    }

    pub fn has_course_with_credits(&self, credits: u8) -> bool {
        self.any_match(|c| c.credits() == credits)
    }

    /// Whether every course carries at least `min_credits`; `true` when empty.
    pub fn all_courses_have_min_credits(&self, min_credits: u8) -> bool {
        self.all_match(|c| c.credits() >= min_credits)
    }

    /// Number of courses with at least `min_credits`.
    pub fn count_with_min_credits(&self, min_credits: u8) -> usize {
        self.count_matching(|c| c.credits() >= min_credits)
    }

    /// Log every course, one per line.
    pub fn log_all(&self) {
        for course in self.get_all() {
            info!("{} - {} credits", course.title(), course.credits());
        }
    }
}
