//! Single-component tests against the public API.

pub mod entities;
pub mod validation;
