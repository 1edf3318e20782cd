//! Fixed-size worker pool running the named tasks.

use super::tasks::{self, TaskOutput, TaskReport};
use super::{elapsed_ms, thread_name};
use crate::config::AppConfig;
use crate::error::{ConfigError, CoursesError, CoursesResult};
use crate::repository::{CourseRepository, InstructorRepository, StudentRepository};
use log::info;
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Runs tasks on a dedicated rayon pool of `thread_pool_size` threads.
#[derive(Debug)]
pub struct ExecutorProcessor {
    pool: ThreadPool,
}

impl ExecutorProcessor {
    pub fn new(thread_pool_size: usize) -> CoursesResult<Self> {
        // rayon reads 0 as "pick for me"
        if thread_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "processing.thread_pool_size".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|index| format!("courses-worker-{index}"))
            .build()
            .map_err(|e| CoursesError::Task {
                task: "thread pool".to_string(),
                message: e.to_string(),
            })?;
        info!("Created executor with {thread_pool_size} threads");
        Ok(Self { pool })
    }

    pub fn from_config(config: &AppConfig) -> CoursesResult<Self> {
        Self::new(config.thread_pool_size())
    }

    pub fn pool_size(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run the six demonstration tasks concurrently and wait for all of them.
    ///
    /// Reports come back in submission order regardless of completion order.
    pub fn execute_all(
        &self,
        students: &StudentRepository,
        courses: &CourseRepository,
        instructors: &InstructorRepository,
    ) -> Vec<TaskReport> {
        info!("Executing tasks on {} threads", self.pool_size());
        let start = Instant::now();
        let reports: Mutex<Vec<(usize, TaskReport)>> = Mutex::new(Vec::new());

        self.pool.scope(|scope| {
            submit(scope, &reports, 0, "print students", move || {
                TaskOutput::Printed(tasks::print_students(students))
            });
            submit(scope, &reports, 1, "filter students by domain", move || {
                TaskOutput::Students(tasks::filter_students_by_domain(
                    students,
                    tasks::DEFAULT_DOMAIN,
                ))
            });
            submit(scope, &reports, 2, "count courses by credits", move || {
                TaskOutput::Count(tasks::count_courses_with_min_credits(
                    courses,
                    tasks::DEFAULT_MIN_CREDITS,
                ))
            });
            submit(scope, &reports, 3, "find instructors by expertise", move || {
                TaskOutput::Instructors(tasks::find_instructors_with_min_expertise(
                    instructors,
                    tasks::DEFAULT_MIN_EXPERTISE,
                ))
            });
            submit(scope, &reports, 4, "total credits", move || {
                TaskOutput::Credits(tasks::total_credits(courses))
            });
            submit(scope, &reports, 5, "average expertise", move || {
                TaskOutput::Average(tasks::average_expertise(instructors))
            });
        });

        let mut reports = reports.into_inner().unwrap_or_else(PoisonError::into_inner);
        reports.sort_by_key(|(index, _)| *index);
        for (index, report) in &reports {
            info!("Task {}: {report}", index + 1);
        }
        info!("All tasks completed in {} ms", elapsed_ms(start));

        reports.into_iter().map(|(_, report)| report).collect()
    }

    /// Count courses with at least `min_credits` on the pool.
    pub fn filter_courses(&self, courses: &CourseRepository, min_credits: u8) -> usize {
        let start = Instant::now();
        let count = self
            .pool
            .install(|| tasks::count_courses_with_min_credits(courses, min_credits));
        info!(
            "Executor filtering completed in {} ms. Result: {count}",
            elapsed_ms(start)
        );
        count
    }
}

fn submit<'scope, F>(
    scope: &Scope<'scope>,
    reports: &'scope Mutex<Vec<(usize, TaskReport)>>,
    index: usize,
    name: &'static str,
    task: F,
) where
    F: FnOnce() -> TaskOutput + Send + 'scope,
{
    scope.spawn(move |_| {
        let start = Instant::now();
        let output = task();
        let report = TaskReport {
            name,
            thread: thread_name(),
            elapsed: start.elapsed(),
            output,
        };
        reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((index, report));
    });
}
