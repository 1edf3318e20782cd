//! Module queries.

use super::Repository;
use super::query::{equals_ignore_case, search_term};
use crate::model::Module;
use crate::model::module::ordering;
use log::info;
use std::collections::BTreeMap;

impl Repository<Module> {
    pub fn sort_by_title(&self) -> Vec<Module> {
        self.sorted_by(ordering::by_title)
    }

    pub fn sort_by_content(&self) -> Vec<Module> {
        self.sorted_by(ordering::by_content)
    }

    pub fn sort_by_content_length(&self) -> Vec<Module> {
        self.sorted_by(ordering::by_content_length)
    }

    pub fn sort_by_title_length(&self) -> Vec<Module> {
        self.sorted_by(ordering::by_title_length)
    }

    pub fn sort_by_total_length(&self) -> Vec<Module> {
        self.sorted_by(ordering::by_total_length)
    }

    pub fn find_by_title_containing(&self, partial_title: &str) -> Vec<Module> {
        self.filter_containing(partial_title, Module::title)
    }

    pub fn find_by_content_containing(&self, keyword: &str) -> Vec<Module> {
        self.filter_containing(keyword, Module::content)
    }

    pub fn find_by_title_length_range(&self, min: usize, max: usize) -> Vec<Module> {
        self.filter_in_range(min, max, Module::title_length)
    }

    pub fn find_by_content_length_range(&self, min: usize, max: usize) -> Vec<Module> {
        self.filter_in_range(min, max, Module::content_length)
    }

    pub fn group_by_title_length(&self) -> BTreeMap<usize, Vec<Module>> {
        self.group_by(Module::title_length)
    }

    pub fn total_content_length(&self) -> u64 {
        self.sum_by(|m| m.content_length() as u64)
    }

    pub fn average_content_length(&self) -> f64 {
        self.average_by(|m| m.content_length() as f64)
    }

    pub fn module_with_longest_content(&self) -> Option<Module> {
        self.max_by_key(Module::content_length)
    }

    pub fn all_titles(&self) -> Vec<String> {
        self.map_all(|m| m.title().to_string())
    }

    pub fn all_titles_upper_case(&self) -> Vec<String> {
        self.map_all(|m| m.title().to_uppercase())
    }

    /// Exact title match, ignoring case.
    pub fn has_module_with_title(&self, title: &str) -> bool {
        search_term(title).is_some() && self.any_match(|m| equals_ignore_case(m.title(), title))
    }

    pub fn all_modules_have_min_content_length(&self, min_length: usize) -> bool {
        self.all_match(|m| m.content_length() >= min_length)
    }

    /// Log every module, one per line.
    pub fn log_all(&self) {
        for module in self.get_all() {
            info!("{} - {} characters", module.title(), module.content_length());
        }
    }
}
