//! Concurrent CSV loading into shared repositories.

use super::{elapsed_ms, thread_name};
use crate::parser::{self, CsvRecord};
use crate::repository::{
    CourseRepository, InstructorRepository, ModuleRepository, Repository, StudentRepository,
};
use crate::validation::Validator;
use log::{error, info};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task::JoinHandle;

/// The four CSV files a full load reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub students: PathBuf,
    pub courses: PathBuf,
    pub instructors: PathBuf,
    pub modules: PathBuf,
}

impl DataFiles {
    /// `students.csv`, `courses.csv`, `instructors.csv` and `modules.csv` under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            students: dir.join("students.csv"),
            courses: dir.join("courses.csv"),
            instructors: dir.join("instructors.csv"),
            modules: dir.join("modules.csv"),
        }
    }
}

/// How many new values each file contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub students: usize,
    pub courses: usize,
    pub instructors: usize,
    pub modules: usize,
}

impl LoadSummary {
    pub fn total(&self) -> usize {
        self.students + self.courses + self.instructors + self.modules
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} students, {} courses, {} instructors, {} modules",
            self.students, self.courses, self.instructors, self.modules
        )
    }
}

/// Loads the four entity files at once, one blocking task per file.
///
/// Holds handles to the target repositories; values already present (by
/// identity) are skipped and not counted.
#[derive(Debug, Clone)]
pub struct ParallelDataLoader {
    students: StudentRepository,
    courses: CourseRepository,
    instructors: InstructorRepository,
    modules: ModuleRepository,
    validator: Validator,
}

impl ParallelDataLoader {
    pub fn new(
        students: StudentRepository,
        courses: CourseRepository,
        instructors: InstructorRepository,
        modules: ModuleRepository,
    ) -> Self {
        Self {
            students,
            courses,
            instructors,
            modules,
            validator: Validator::new(),
        }
    }

    /// Validate dates against `validator` instead of today.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Load every file concurrently. A file that cannot be read contributes 0.
    pub async fn load_all(&self, files: &DataFiles) -> LoadSummary {
        info!("Starting parallel data loading from files");
        let start = Instant::now();

        let (students, courses, instructors, modules) = tokio::join!(
            settle(self.spawn_load(self.students.clone(), &files.students)),
            settle(self.spawn_load(self.courses.clone(), &files.courses)),
            settle(self.spawn_load(self.instructors.clone(), &files.instructors)),
            settle(self.spawn_load(self.modules.clone(), &files.modules)),
        );
        let summary = LoadSummary {
            students,
            courses,
            instructors,
            modules,
        };

        info!("Parallel data loading completed in {} ms", elapsed_ms(start));
        info!("Loaded: {summary}");
        summary
    }

    fn spawn_load<T>(&self, repository: Repository<T>, path: &Path) -> JoinHandle<usize>
    where
        T: CsvRecord,
    {
        let path = path.to_path_buf();
        let validator = self.validator;
        tokio::task::spawn_blocking(move || load_file(&repository, &path, &validator))
    }
}

fn load_file<T>(repository: &Repository<T>, path: &Path, validator: &Validator) -> usize
where
    T: CsvRecord,
{
    let thread = thread_name();
    info!(
        "Thread [{thread}] started loading {} values from {}",
        T::KIND,
        path.display()
    );

    match parser::parse_file_with::<T>(path, validator) {
        Ok(values) => {
            let added = values
                .into_iter()
                .filter(|value| repository.add(value.clone()))
                .count();
            info!("Thread [{thread}] completed loading {added} {} values", T::KIND);
            added
        }
        Err(e) => {
            error!("Thread [{thread}] error loading {} values: {e}", T::KIND);
            0
        }
    }
}

async fn settle(handle: JoinHandle<usize>) -> usize {
    handle.await.unwrap_or_else(|e| {
        error!("Loading task failed: {e}");
        0
    })
}
