//! Side-by-side evaluation of the same course query in every execution style.

use super::{AsyncProcessor, ExecutorProcessor, elapsed_ms, thread_name};
use crate::error::{CoursesError, CoursesResult};
use crate::repository::CourseRepository;
use log::{info, warn};
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};

/// One approach's answer and how long it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub value: u64,
    pub elapsed: Duration,
}

impl Measurement {
    fn time(work: impl FnOnce() -> u64) -> Self {
        let start = Instant::now();
        let value = work();
        Self {
            value,
            elapsed: start.elapsed(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms)", self.value, self.elapsed.as_millis())
    }
}

/// Counts of courses with a credit floor, per approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonReport {
    pub min_credits: u8,
    pub sequential: Measurement,
    pub parallel: Measurement,
    pub executor: Measurement,
    pub asynchronous: Measurement,
}

impl ComparisonReport {
    pub fn all_agree(&self) -> bool {
        let expected = self.sequential.value;
        [self.parallel, self.executor, self.asynchronous]
            .iter()
            .all(|m| m.value == expected)
    }
}

/// Credit sums, data-parallel and async.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumReport {
    pub parallel: Measurement,
    pub asynchronous: Measurement,
}

impl SumReport {
    pub fn agree(&self) -> bool {
        self.parallel.value == self.asynchronous.value
    }
}

pub fn count_sequential(courses: &CourseRepository, min_credits: u8) -> usize {
    courses
        .get_all()
        .iter()
        .filter(|c| c.credits() >= min_credits)
        .count()
}

pub fn count_parallel(courses: &CourseRepository, min_credits: u8) -> usize {
    courses
        .get_all()
        .par_iter()
        .filter(|c| c.credits() >= min_credits)
        .count()
}

pub fn sum_credits_parallel(courses: &CourseRepository) -> u64 {
    courses
        .get_all()
        .par_iter()
        .map(|c| u64::from(c.credits()))
        .sum()
}

/// Count courses with at least `min_credits` four ways and report each.
pub async fn compare_filtering(
    courses: &CourseRepository,
    min_credits: u8,
    thread_pool_size: usize,
    processor: &AsyncProcessor,
) -> CoursesResult<ComparisonReport> {
    info!(
        "Thread [{}] comparing filtering approaches for credits >= {min_credits}",
        thread_name()
    );

    let sequential = Measurement::time(|| count_sequential(courses, min_credits) as u64);
    info!("Sequential iterator: {sequential}");

    let parallel = Measurement::time(|| count_parallel(courses, min_credits) as u64);
    info!("Parallel iterator: {parallel}");

    let executor = ExecutorProcessor::new(thread_pool_size)?;
    let pooled = courses.clone();
    let executor = tokio::task::spawn_blocking(move || {
        Measurement::time(|| executor.filter_courses(&pooled, min_credits) as u64)
    })
    .await
    .map_err(|e| CoursesError::Task {
        task: "executor filtering".to_string(),
        message: e.to_string(),
    })?;
    info!("Executor pool: {executor}");

    let start = Instant::now();
    let value = processor.filter_courses(courses, min_credits).await? as u64;
    let asynchronous = Measurement {
        value,
        elapsed: start.elapsed(),
    };
    info!("Async tasks: {asynchronous}");

    let report = ComparisonReport {
        min_credits,
        sequential,
        parallel,
        executor,
        asynchronous,
    };
    if report.all_agree() {
        info!("All approaches returned {}", report.sequential.value);
    } else {
        warn!("Approaches disagree: {report:?}");
    }
    Ok(report)
}

/// Sum course credits with a parallel iterator and with an async task.
pub async fn compare_sums(
    courses: &CourseRepository,
    processor: &AsyncProcessor,
) -> CoursesResult<SumReport> {
    let parallel = Measurement::time(|| sum_credits_parallel(courses));
    info!("Parallel sum: {parallel}");

    let start = Instant::now();
    let value = processor.sum_credits(courses).await?;
    let asynchronous = Measurement {
        value,
        elapsed: start.elapsed(),
    };
    info!("Async sum: {asynchronous}, compared in {} ms", elapsed_ms(start));

    Ok(SumReport {
        parallel,
        asynchronous,
    })
}
