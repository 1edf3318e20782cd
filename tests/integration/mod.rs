//! Components working together.

pub mod concurrency;
pub mod persistence;
pub mod processing;
pub mod repository;
