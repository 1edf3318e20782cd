//! # Online Courses Demo
//!
//! Walks through the library end to end: concurrent CSV loading, pooled and
//! async processing, a comparison of execution styles, and validated
//! repository operations persisted as JSON.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin courses-demo
//! cargo run --bin courses-demo -- my-courses.toml
//! RUST_LOG=debug cargo run --bin courses-demo
//! ```
//!
//! Data files are read from and written to `data.base_path` (default
//! `./data`). When a CSV file is missing, a sample with
//! `processing.test_data_count` rows is generated first.
//!
//! ## Exit Codes
//!
//! - `0`: All parts completed
//! - `1`: Configuration could not be loaded or a part failed

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use log::{error, info, warn};
use online_courses::config::AppConfig;
use online_courses::model::{Course, Instructor, Student};
use online_courses::parallel::{
    AsyncProcessor, DataFiles, ExecutorProcessor, ParallelDataLoader, comparison, tasks,
};
use online_courses::repository::{
    CourseRepository, InstructorRepository, ModuleRepository, StudentRepository,
};
use online_courses::{CoursesResult, DataFormat, PersistenceManager};
use std::fs;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from(&path),
        None => AppConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        error!("Demo failed: {e}");
        process::exit(1);
    }
}

async fn run(config: &AppConfig) -> CoursesResult<()> {
    info!("=== PARALLEL DATA LOADING AND PROCESSING DEMONSTRATION ===");

    let students = StudentRepository::for_entity();
    let courses = CourseRepository::for_entity();
    let instructors = InstructorRepository::for_entity();
    let modules = ModuleRepository::for_entity();

    info!("=== PART 1: Parallel Data Loading from CSV Files ===");
    let files = DataFiles::in_dir(config.base_data_path());
    seed_sample_files(&files, config.test_data_count());
    let loader = ParallelDataLoader::new(
        students.clone(),
        courses.clone(),
        instructors.clone(),
        modules.clone(),
    );
    loader.load_all(&files).await;
    info!("Final repository sizes after parallel loading:");
    info!("  Students: {}", students.size());
    info!("  Courses: {}", courses.size());
    info!("  Instructors: {}", instructors.size());
    info!("  Modules: {}", modules.size());

    info!("=== PART 2: Data Processing with a Worker Pool ===");
    let executor = ExecutorProcessor::from_config(config)?;
    let reports = executor.execute_all(&students, &courses, &instructors);
    info!("Worker pool completed {} tasks", reports.len());

    info!("=== PART 3: Async Processing with Tokio Tasks ===");
    let processor = AsyncProcessor::from_config(config);
    let result = processor
        .process_all(&students, &courses, &instructors)
        .await?;
    info!("Async processing result: {result}");
    let combined = processor
        .combine_student_filtering(&students, tasks::DEFAULT_DOMAIN, "student.ua")
        .await?;
    info!("Combined filtered students: {}", combined.len());

    info!("=== PART 4: Comparison of Processing Approaches ===");
    let report = comparison::compare_filtering(
        &courses,
        tasks::DEFAULT_MIN_CREDITS,
        config.thread_pool_size(),
        &processor,
    )
    .await?;
    info!("All approaches agree: {}", report.all_agree());
    let sums = comparison::compare_sums(&courses, &processor).await?;
    info!("Credit sums agree: {}", sums.agree());

    info!("=== PART 5: Manual Repository Operations with Validation ===");
    repository_with_validation(config)
}

fn repository_with_validation(config: &AppConfig) -> CoursesResult<()> {
    let today = Local::now().date_naive();
    let manager = PersistenceManager::new(config.clone());

    let students = StudentRepository::for_entity();
    for (first, last, email, day) in [
        ("Lesia", "Melnyk", "lesia.melnyk@chnu.edu.ua", 1),
        ("Liliya", "Fivko", "liliya.fivko@student.ua", 5),
        ("Ivan", "Bondaryk", "ivan.bondaryk@chnu.edu.ua", 3),
    ] {
        let enrolled = enrollment_day(today, day);
        students.add(Student::new(first, last, email, enrolled)?);
    }
    info!("Added {} valid students to repository", students.size());

    let courses = CourseRepository::for_entity();
    for (title, description, credits, months) in [
        ("Java Programming", "Java Basics", 5, 1),
        ("Data Structures", "Algorithms", 3, 2),
        ("Web Development", "HTML and CSS", 4, 3),
    ] {
        let start = today.checked_add_months(Months::new(months)).unwrap_or(today);
        courses.add(Course::new(title, description, credits, start)?);
    }
    info!("Added {} valid courses to repository", courses.size());

    let instructors = InstructorRepository::for_entity();
    for (first, last, expertise) in [
        ("Igor", "Bylat", 34),
        ("Denys", "Malyk", 20),
        ("Inessa", "Kir", 39),
    ] {
        instructors.add(Instructor::new(first, last, expertise)?);
    }
    info!("Added {} valid instructors to repository", instructors.size());

    match Instructor::new("Al", "", 99) {
        Ok(_) => warn!("Invalid instructor was accepted"),
        Err(e) => info!("Rejected invalid instructor: {e}"),
    }

    info!("Saving validated objects to files...");
    manager.save_repository(&students, "students", DataFormat::Json)?;
    manager.save_repository(&courses, "courses", DataFormat::Json)?;
    manager.save_repository(&instructors, "instructors", DataFormat::Json)?;
    info!("All objects saved successfully!");
    Ok(())
}

/// Day `day` of the September that most recently started, capped at `today`.
fn enrollment_day(today: NaiveDate, day: u32) -> NaiveDate {
    let year = if today.month() >= 9 {
        today.year()
    } else {
        today.year() - 1
    };
    NaiveDate::from_ymd_opt(year, 9, day)
        .filter(|d| *d <= today)
        .unwrap_or(today)
}

/// Write sample CSV files for any of `files` that do not exist yet.
fn seed_sample_files(files: &DataFiles, count: usize) {
    let today = Local::now().date_naive();
    let samples = [
        (&files.students, sample_students(today, count)),
        (&files.courses, sample_courses(today, count)),
        (&files.instructors, sample_instructors(count)),
        (&files.modules, sample_modules(count)),
    ];

    for (path, contents) in samples {
        if path.exists() {
            continue;
        }
        if let Err(e) = write_sample(path, &contents) {
            warn!("Could not write sample data to {}: {e}", path.display());
        } else {
            info!("Generated sample data: {}", path.display());
        }
    }
}

fn write_sample(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

fn sample_students(today: NaiveDate, count: usize) -> String {
    let domains = ["chnu.edu.ua", "student.ua"];
    let mut csv = String::from("# firstName,lastName,email,enrollmentDate\n");
    for i in 0..count {
        let enrolled = today.checked_sub_days(Days::new(30 * (i % 50) as u64)).unwrap_or(today);
        csv.push_str(&format!(
            "Student{i},Surname{i},student{i}@{},{enrolled}\n",
            domains[i % domains.len()]
        ));
    }
    csv
}

fn sample_courses(today: NaiveDate, count: usize) -> String {
    let mut csv = String::from("# title,description,credits,startDate\n");
    for i in 0..count {
        let start = today.checked_add_days(Days::new(7 * (i % 50) as u64)).unwrap_or(today);
        csv.push_str(&format!(
            "Course {i},Description of course {i},{},{start}\n",
            i % 5 + 1
        ));
    }
    csv
}

fn sample_instructors(count: usize) -> String {
    let mut csv = String::from("# firstName,lastName,expertise\n");
    for i in 0..count {
        csv.push_str(&format!("Tutor{i},Lecturer{i},{}\n", i % 40 + 1));
    }
    csv
}

fn sample_modules(count: usize) -> String {
    const TOPICS: [&str; 10] = [
        "Ownership", "Borrowing", "Lifetimes", "Traits", "Generics", "Closures", "Iterators",
        "Macros", "Async", "Testing",
    ];
    let mut csv = String::from("# title,content\n");
    for i in 0..count {
        let topic = TOPICS[i % TOPICS.len()];
        csv.push_str(&format!("{topic} {},{topic} in practice\n", i / TOPICS.len() + 1));
    }
    csv
}
