//! Concurrent loading and read-only processing over populated repositories.
//!
//! Three execution styles sit side by side so their results can be compared:
//!
//! - [`ParallelDataLoader`] fills repositories from CSV files on tokio's
//!   blocking pool, one task per file
//! - [`ExecutorProcessor`] runs the named [`tasks`] on a fixed-size rayon pool
//! - [`AsyncProcessor`] composes the same work as tokio tasks with a per-task
//!   timeout
//!
//! [`comparison`] checks that sequential, data-parallel, pooled and async
//! evaluation of the same query agree.

pub mod comparison;
pub mod tasks;

mod async_processor;
mod executor;
mod loader;

pub use async_processor::{AsyncProcessor, DataProcessingResult};
pub use executor::ExecutorProcessor;
pub use loader::{DataFiles, LoadSummary, ParallelDataLoader};
pub use tasks::{TaskOutput, TaskReport};

use std::time::Instant;

/// Name of the calling thread for log lines.
pub(crate) fn thread_name() -> String {
    std::thread::current()
        .name()
        .map_or_else(|| format!("{:?}", std::thread::current().id()), str::to_string)
}

pub(crate) fn elapsed_ms(start: Instant) -> u128 {
    start.elapsed().as_millis()
}
