//! Reusable query template over repository snapshots.
//!
//! Every per-entity query (`sort_by_title`, `find_by_credits_range`,
//! `group_by_mark`, ...) is a one-liner over the methods below. Each method
//! takes a fresh [`Repository::get_all`] snapshot, so queries never observe
//! a half-applied mutation and never hold the lock while user code runs.
//!
//! Conventions shared by all queries:
//!
//! - sorts are stable and return a new `Vec`
//! - text matching trims the needle and ignores case; a blank needle matches
//!   nothing
//! - ranges are inclusive and an inverted range matches nothing
//! - averages over an empty repository are `0.0`
//! - groups keep encounter order inside each group

use super::Repository;
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Normalized search needle, or `None` when blank.
pub fn search_term(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Whether `haystack` contains the already-normalized `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive equality after trimming `candidate`.
pub fn equals_ignore_case(value: &str, candidate: &str) -> bool {
    value.to_lowercase() == candidate.trim().to_lowercase()
}

impl<T: Clone + PartialEq> Repository<T> {
    /// Snapshot sorted with `compare`.
    pub fn sorted_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
        let mut items = self.get_all();
        items.sort_by(compare);
        items
    }

    /// Values matching `predicate`, in insertion order.
    pub fn filter_by(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.get_all().into_iter().filter(|item| predicate(item)).collect()
    }

    /// Values whose `field` contains `text`, ignoring case.
    ///
    /// A blank `text` logs a warning and matches nothing.
    pub fn filter_containing(&self, text: &str, field: impl Fn(&T) -> &str) -> Vec<T> {
        let Some(needle) = search_term(text) else {
            warn!(
                "Attempted to search {} with empty text",
                self.entity_type()
            );
            return Vec::new();
        };
        self.filter_by(|item| contains_ignore_case(field(item), &needle))
    }

    /// Values whose `key` lies in `min..=max`; nothing when `min > max`.
    pub fn filter_in_range<K: PartialOrd + std::fmt::Debug>(
        &self,
        min: K,
        max: K,
        key: impl Fn(&T) -> K,
    ) -> Vec<T> {
        if min > max {
            warn!(
                "Invalid {} range: min={min:?} > max={max:?}",
                self.entity_type()
            );
            return Vec::new();
        }
        self.filter_by(|item| {
            let value = key(item);
            value >= min && value <= max
        })
    }

    /// Project every value through `map`.
    pub fn map_all<R>(&self, map: impl Fn(&T) -> R) -> Vec<R> {
        self.get_all().iter().map(map).collect()
    }

    /// Number of values matching `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.get_all().iter().filter(|item| predicate(item)).count()
    }

    pub fn any_match(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.get_all().iter().any(predicate)
    }

    /// Whether every value matches; `true` for an empty repository.
    pub fn all_match(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.get_all().iter().all(predicate)
    }

    pub fn sum_by(&self, value: impl Fn(&T) -> u64) -> u64 {
        self.get_all().iter().map(value).sum()
    }

    /// Arithmetic mean of `value`, `0.0` when empty.
    pub fn average_by(&self, value: impl Fn(&T) -> f64) -> f64 {
        let items = self.get_all();
        if items.is_empty() {
            return 0.0;
        }
        items.iter().map(value).sum::<f64>() / items.len() as f64
    }

    /// First value with the greatest `key`.
    pub fn max_by_key<K: Ord>(&self, key: impl Fn(&T) -> K) -> Option<T> {
        self.get_all()
            .into_iter()
            .reduce(|best, item| if key(&item) > key(&best) { item } else { best })
    }

    /// First value with the smallest `key`.
    pub fn min_by_key<K: Ord>(&self, key: impl Fn(&T) -> K) -> Option<T> {
        self.get_all().into_iter().min_by_key(|item| key(item))
    }

    /// Every value sharing the greatest `key`, in insertion order.
    pub fn all_with_max<K: Ord>(&self, key: impl Fn(&T) -> K) -> Vec<T> {
        let items = self.get_all();
        let Some(max) = items.iter().map(&key).max() else {
            return Vec::new();
        };
        items.into_iter().filter(|item| key(item) == max).collect()
    }

    /// Partition by `key`; keys sorted, values in encounter order.
    pub fn group_by<K: Ord>(&self, key: impl Fn(&T) -> K) -> BTreeMap<K, Vec<T>> {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for item in self.get_all() {
            groups.entry(key(&item)).or_default().push(item);
        }
        debug!(
            "Grouped {} items into {} groups",
            self.entity_type(),
            groups.len()
        );
        groups
    }

    /// Count values per `key`.
    pub fn count_by<K: Ord>(&self, key: impl Fn(&T) -> K) -> BTreeMap<K, usize> {
        let mut counts: BTreeMap<K, usize> = BTreeMap::new();
        for item in self.get_all() {
            *counts.entry(key(&item)).or_default() += 1;
        }
        counts
    }
}
