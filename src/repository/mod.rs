//! Identity-indexed, insertion-ordered repositories.
//!
//! A [`Repository`] stores values of one entity kind, refuses a second value
//! whose derived identity is already present, and hands out independent
//! snapshots for reading. Per-entity query methods (sorting, filtering,
//! grouping, aggregates) are built on the template in [`query`] and live in
//! the sibling modules.
//!
//! # Concurrency
//!
//! * Internal state sits behind a `std::sync::RwLock`
//! * Duplicate check and append happen under one write lock, so concurrent
//!   adds never admit two values with the same identity
//! * Cloning a repository clones the handle: both clones see the same data
//!
//! # Example Usage
//!
//! ```rust
//! use online_courses::model::Instructor;
//! use online_courses::repository::InstructorRepository;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = InstructorRepository::for_entity();
//! assert!(repository.add(Instructor::new("Галина", "Унгурян", 26)?));
//! assert!(!repository.add(Instructor::new("Галина", "Унгурян", 26)?));
//!
//! assert!(repository.contains_identity("ГАЛУНГ-26"));
//! assert_eq!(repository.size(), 1);
//! # Ok(())
//! # }
//! ```

mod assignment;
mod course;
mod instructor;
mod module;
pub mod query;
mod student;

use crate::model::{Assignment, Course, Entity, Instructor, Module, Student};
use log::{debug, info, warn};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type StudentRepository = Repository<Student>;
pub type CourseRepository = Repository<Course>;
pub type InstructorRepository = Repository<Instructor>;
pub type ModuleRepository = Repository<Module>;
pub type AssignmentRepository = Repository<Assignment>;

/// Function deriving the identity key of a stored value.
pub type IdentityFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Direction for identity sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `"asc"`/`"desc"` in any case; anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if text.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sort order: {s}"))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe collection of unique-by-identity values.
///
/// No operation returns an error: misses and rejections surface as `false`,
/// `None` or an empty result, with a log line explaining why.
pub struct Repository<T> {
    items: Arc<RwLock<Vec<T>>>,
    identity: IdentityFn<T>,
    entity_type: Arc<str>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            identity: Arc::clone(&self.identity),
            entity_type: Arc::clone(&self.entity_type),
        }
    }
}

impl<T> Repository<T> {
    /// Label used in log lines.
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn size(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the Vec half-mutated, so
    // poisoned guards are safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity_type", &self.entity_type)
            .field("size", &self.size())
            .finish()
    }
}

impl<T: Entity> Repository<T> {
    /// Repository keyed by [`Entity::identity`] and labelled [`Entity::KIND`].
    pub fn for_entity() -> Self {
        Self::new(|item: &T| item.identity(), T::KIND)
    }

    /// Snapshot in the entity's natural order.
    pub fn sort_naturally(&self) -> Vec<T> {
        self.sorted_by(T::natural_cmp)
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::for_entity()
    }
}

impl<T: Clone + PartialEq> Repository<T> {
    /// Create an empty repository with a custom identity function.
    pub fn new(
        identity: impl Fn(&T) -> String + Send + Sync + 'static,
        entity_type: impl Into<String>,
    ) -> Self {
        let entity_type: String = entity_type.into();
        debug!("Created repository for {entity_type}");
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            identity: Arc::new(identity),
            entity_type: Arc::from(entity_type),
        }
    }

    /// Identity this repository derives for `item`.
    pub fn identity_of(&self, item: &T) -> String {
        (self.identity)(item)
    }

    /// Append `item` unless a value with the same identity is stored.
    pub fn add(&self, item: T) -> bool {
        let identity = self.identity_of(&item);
        let mut items = self.write();

        if items.iter().any(|existing| self.identity_of(existing) == identity) {
            warn!(
                "Cannot add {} - already exists with identity: {identity}",
                self.entity_type
            );
            return false;
        }

        items.push(item);
        debug!("Added {}: {identity}", self.entity_type);
        true
    }

    /// Remove the first value equal to `item` in every field.
    pub fn remove(&self, item: &T) -> bool {
        let mut items = self.write();
        match items.iter().position(|existing| existing == item) {
            Some(index) => {
                items.remove(index);
                debug!("Removed {}: {}", self.entity_type, self.identity_of(item));
                true
            }
            None => {
                warn!(
                    "Failed to remove {}: {}",
                    self.entity_type,
                    self.identity_of(item)
                );
                false
            }
        }
    }

    /// Remove the value with the given identity.
    pub fn remove_by_identity(&self, identity: &str) -> bool {
        let mut items = self.write();
        match items
            .iter()
            .position(|existing| self.identity_of(existing) == identity)
        {
            Some(index) => {
                items.remove(index);
                debug!("Removed {} by identity: {identity}", self.entity_type);
                true
            }
            None => {
                warn!(
                    "No {} found with identity: {identity} to remove",
                    self.entity_type
                );
                false
            }
        }
    }

    /// Whether a value equal to `item` in every field is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.read().iter().any(|existing| existing == item)
    }

    pub fn contains_identity(&self, identity: &str) -> bool {
        self.read()
            .iter()
            .any(|existing| self.identity_of(existing) == identity)
    }

    pub fn find_by_identity(&self, identity: &str) -> Option<T> {
        let found = self
            .read()
            .iter()
            .find(|existing| self.identity_of(existing) == identity)
            .cloned();

        match &found {
            Some(_) => debug!("Found {} with identity: {identity}", self.entity_type),
            None => debug!("No {} found with identity: {identity}", self.entity_type),
        }
        found
    }

    /// Independent copy of all values in insertion order.
    pub fn get_all(&self) -> Vec<T> {
        let snapshot = self.read().clone();
        debug!(
            "Retrieved all {} items. Count: {}",
            self.entity_type,
            snapshot.len()
        );
        snapshot
    }

    pub fn clear(&self) {
        let mut items = self.write();
        let removed = items.len();
        items.clear();
        info!(
            "Cleared repository. Removed {removed} {} items",
            self.entity_type
        );
    }

    /// Snapshot sorted by identity; `order` is `"asc"` or `"desc"` in any case.
    ///
    /// Any other text falls back to ascending with a warning.
    pub fn sort_by_identity(&self, order: &str) -> Vec<T> {
        let order = SortOrder::parse(order).unwrap_or_else(|| {
            warn!("Invalid sort order: {order}. Using 'asc' by default");
            SortOrder::Asc
        });
        self.sorted_by_identity(order)
    }

    /// Snapshot sorted by identity in the given direction.
    pub fn sorted_by_identity(&self, order: SortOrder) -> Vec<T> {
        let mut keyed: Vec<(String, T)> = self
            .get_all()
            .into_iter()
            .map(|item| (self.identity_of(&item), item))
            .collect();

        match order {
            SortOrder::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
            SortOrder::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
        }

        debug!(
            "Sorted {} items by identity in {order} order",
            self.entity_type
        );
        keyed.into_iter().map(|(_, item)| item).collect()
    }
}
