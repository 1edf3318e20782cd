//! Behaviour shared by every stored entity kind.

use crate::error::{ValidationError, ValidationResult};
use crate::validation::Validator;
use serde::de::DeserializeOwned;
use std::cmp::Ordering;

/// Characters taken from a field when building a prefix identity.
pub const IDENTITY_PREFIX_LEN: usize = 3;

/// A validated value that can live in a [`Repository`](crate::repository::Repository).
///
/// Identity decides uniqueness inside a repository; the natural ordering is
/// what `sort_naturally` uses. Neither has to agree with `PartialEq`, which
/// compares every field.
pub trait Entity: Clone + PartialEq + Send + Sync + 'static {
    /// Label used in log lines and error messages.
    const KIND: &'static str;

    /// Unvalidated wire shape read back from a data file.
    type Record: DeserializeOwned;

    /// Build from a deserialized record, validating against `validator`.
    fn from_record(record: Self::Record, validator: &Validator) -> ValidationResult<Self>;

    /// Derived identity key.
    ///
    /// # Panics
    ///
    /// Panics when the identity cannot be derived, which validated values
    /// never trigger. Use [`Entity::try_identity`] to observe the failure.
    fn identity(&self) -> String {
        match self.try_identity() {
            Ok(identity) => identity,
            Err(error) => panic!("{error}"),
        }
    }

    /// Derived identity key, or why it cannot be formed.
    fn try_identity(&self) -> ValidationResult<String>;

    /// Default ordering for this entity kind.
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

/// First three characters of `value`, uppercased.
///
/// Fails instead of truncating when `value` is shorter than three characters.
pub(crate) fn identity_prefix(
    entity: &str,
    field: &str,
    value: &str,
) -> ValidationResult<String> {
    if value.chars().count() < IDENTITY_PREFIX_LEN {
        return Err(ValidationError::Identity {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            required: IDENTITY_PREFIX_LEN,
        });
    }

    Ok(value
        .chars()
        .take(IDENTITY_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase())
}
