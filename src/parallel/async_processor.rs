//! Tokio composition of repository queries.

use super::{elapsed_ms, tasks, thread_name};
use crate::config::AppConfig;
use crate::error::{CoursesError, CoursesResult};
use crate::model::Student;
use crate::repository::{CourseRepository, InstructorRepository, StudentRepository};
use log::{error, info};
use std::fmt;
use std::time::{Duration, Instant};

/// Aggregates gathered by [`AsyncProcessor::process_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataProcessingResult {
    pub student_count: usize,
    pub total_credits: u64,
    pub average_expertise: f64,
    pub course_titles: Vec<String>,
}

impl fmt::Display for DataProcessingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataProcessingResult{{students={}, totalCredits={}, avgExpertise={:.2}, courses=[{}]}}",
            self.student_count,
            self.total_credits,
            self.average_expertise,
            self.course_titles.join(", ")
        )
    }
}

/// Runs each query as its own blocking tokio task, bounded by a timeout.
#[derive(Debug, Clone, Copy)]
pub struct AsyncProcessor {
    timeout: Duration,
}

impl Default for AsyncProcessor {
    fn default() -> Self {
        Self::new(AppConfig::default().task_timeout())
    }
}

impl AsyncProcessor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.task_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Student count, total credits, average expertise and course titles,
    /// computed concurrently. Fails if any part fails or times out.
    pub async fn process_all(
        &self,
        students: &StudentRepository,
        courses: &CourseRepository,
        instructors: &InstructorRepository,
    ) -> CoursesResult<DataProcessingResult> {
        info!("Starting async processing of all data");
        let start = Instant::now();

        let (student_repo, credit_repo, title_repo, instructor_repo) = (
            students.clone(),
            courses.clone(),
            courses.clone(),
            instructors.clone(),
        );
        let (student_count, total_credits, average_expertise, course_titles) = tokio::try_join!(
            self.run("student count", move || student_repo.size()),
            self.run("total credits", move || tasks::total_credits(&credit_repo)),
            self.run("average expertise", move || {
                tasks::average_expertise(&instructor_repo)
            }),
            self.run("course titles", move || title_repo.all_titles()),
        )?;

        let result = DataProcessingResult {
            student_count,
            total_credits,
            average_expertise,
            course_titles,
        };
        info!("Async processing completed in {} ms", elapsed_ms(start));
        Ok(result)
    }

    /// Count courses with at least `min_credits`.
    pub async fn filter_courses(
        &self,
        courses: &CourseRepository,
        min_credits: u8,
    ) -> CoursesResult<usize> {
        let start = Instant::now();
        let courses = courses.clone();
        let count = self
            .run("filter courses", move || {
                tasks::count_courses_with_min_credits(&courses, min_credits)
            })
            .await?;
        info!(
            "Async filtering completed in {} ms. Result: {count}",
            elapsed_ms(start)
        );
        Ok(count)
    }

    /// Sum of all course credits.
    pub async fn sum_credits(&self, courses: &CourseRepository) -> CoursesResult<u64> {
        let courses = courses.clone();
        self.run("sum credits", move || tasks::total_credits(&courses))
            .await
    }

    /// Students of `domain1` followed by students of `domain2`, filtered
    /// concurrently.
    pub async fn combine_student_filtering(
        &self,
        students: &StudentRepository,
        domain1: &str,
        domain2: &str,
    ) -> CoursesResult<Vec<Student>> {
        let (first_repo, second_repo) = (students.clone(), students.clone());
        let (first_domain, second_domain) = (domain1.to_string(), domain2.to_string());

        let (mut first, second) = tokio::try_join!(
            self.run("filter first domain", move || {
                tasks::filter_students_by_domain(&first_repo, &first_domain)
            }),
            self.run("filter second domain", move || {
                tasks::filter_students_by_domain(&second_repo, &second_domain)
            }),
        )?;

        info!(
            "Combining results: {} + {} students",
            first.len(),
            second.len()
        );
        first.extend(second);
        Ok(first)
    }

    async fn run<R, F>(&self, task: &'static str, work: F) -> CoursesResult<R>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(move || {
            info!("Thread [{}] running {task}", thread_name());
            work()
        });

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join_error)) => {
                error!("Task '{task}' failed: {join_error}");
                Err(CoursesError::Task {
                    task: task.to_string(),
                    message: join_error.to_string(),
                })
            }
            Err(_) => {
                error!("Task '{task}' timed out after {:?}", self.timeout);
                Err(CoursesError::Timeout {
                    task: task.to_string(),
                    timeout: self.timeout,
                })
            }
        }
    }
}
