//! Loading files in parallel and running the same queries through the worker
//! pool, async tasks and plain iterators.

use crate::common::{fixtures, init_logging, validator};
use online_courses::parallel::comparison;
use online_courses::parallel::{
    AsyncProcessor, DataFiles, ExecutorProcessor, ParallelDataLoader, TaskOutput,
};
use online_courses::repository::{
    CourseRepository, InstructorRepository, ModuleRepository, StudentRepository,
};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_data_files(dir: &TempDir) -> DataFiles {
    let files = DataFiles::in_dir(dir.path());
    fs::write(
        &files.students,
        "# firstName,lastName,email,enrollmentDate\n\
         Yurii,Vasylchuk,yurii.vasylchuk@chnu.edu.ua,2024-09-01\n\
         Lesia,Melnyk,lesia.melnyk@chnu.edu.ua,2023-09-01\n\
         Liliya,Fivko,liliya.fivko@student.ua,2023-09-05\n\
         Ivan,Bondaryk,broken-address,2025-02-03\n",
    )
    .unwrap();
    fs::write(
        &files.courses,
        "Java Programming,Java Basics,5,2026-11-18\n\
         Data Structures,Algorithms,3,2026-12-18\n\
         Databases,Relational modelling,2,2027-03-01\n",
    )
    .unwrap();
    fs::write(&files.instructors, "Ігор,Булат,34\nГалина,Унгурян,26\n").unwrap();
    fs::write(&files.modules, "Ownership,Moves and borrows\nTraits,Shared behaviour\n").unwrap();
    files
}

#[tokio::test]
async fn test_loader_then_processors() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let files = write_data_files(&dir);

    let students = StudentRepository::for_entity();
    let courses = CourseRepository::for_entity();
    let instructors = InstructorRepository::for_entity();
    let modules = ModuleRepository::for_entity();

    let summary = ParallelDataLoader::new(
        students.clone(),
        courses.clone(),
        instructors.clone(),
        modules.clone(),
    )
    .with_validator(validator())
    .load_all(&files)
    .await;

    assert_eq!(summary.students, 3);
    assert_eq!(summary.courses, 3);
    assert_eq!(summary.instructors, 2);
    assert_eq!(summary.modules, 2);
    assert_eq!(summary.total(), 10);
    assert_eq!(modules.size(), 2);

    let processor = AsyncProcessor::new(Duration::from_secs(5));
    let result = processor
        .process_all(&students, &courses, &instructors)
        .await
        .unwrap();
    assert_eq!(result.student_count, 3);
    assert_eq!(result.total_credits, 10);
    assert_eq!(result.average_expertise, 30.0);
    assert_eq!(
        result.course_titles,
        vec!["Java Programming", "Data Structures", "Databases"]
    );

    let combined = processor
        .combine_student_filtering(&students, "chnu.edu.ua", "student.ua")
        .await
        .unwrap();
    let emails: Vec<&str> = combined.iter().map(|s| s.email()).collect();
    assert_eq!(
        emails,
        vec![
            "yurii.vasylchuk@chnu.edu.ua",
            "lesia.melnyk@chnu.edu.ua",
            "liliya.fivko@student.ua"
        ]
    );
}

#[tokio::test]
async fn test_loader_counts_missing_files_as_empty() {
    let dir = TempDir::new().unwrap();
    let files = DataFiles::in_dir(dir.path());
    fs::write(&files.modules, "Async,Futures and executors\n").unwrap();

    let summary = ParallelDataLoader::new(
        StudentRepository::for_entity(),
        CourseRepository::for_entity(),
        InstructorRepository::for_entity(),
        ModuleRepository::for_entity(),
    )
    .load_all(&files)
    .await;

    assert_eq!(summary.total(), 1);
    assert_eq!(summary.modules, 1);
}

#[test]
fn test_executor_runs_every_task_on_fixtures() {
    let validator = validator();
    let students = fixtures::student_repository(&validator);
    let courses = fixtures::course_repository(&validator);
    let instructors = fixtures::instructor_repository();

    let executor = ExecutorProcessor::new(3).unwrap();
    let reports = executor.execute_all(&students, &courses, &instructors);
    let outputs: Vec<TaskOutput> = reports.into_iter().map(|r| r.output).collect();

    assert_eq!(outputs.len(), 6);
    assert_eq!(outputs[0], TaskOutput::Printed(5));
    assert!(matches!(&outputs[1], TaskOutput::Students(s) if s.len() == 3));
    assert_eq!(outputs[2], TaskOutput::Count(4));
    assert!(matches!(&outputs[3], TaskOutput::Instructors(i) if i.len() == 5));
    assert_eq!(outputs[4], TaskOutput::Credits(19));
    assert_eq!(outputs[5], TaskOutput::Average(32.6));
}

#[test]
fn test_executor_rejects_empty_pool() {
    assert!(ExecutorProcessor::new(0).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_strategies_agree_on_fixtures() {
    let courses = fixtures::course_repository(&validator());
    let processor = AsyncProcessor::default();

    for min_credits in 1..=5 {
        let report = comparison::compare_filtering(&courses, min_credits, 2, &processor)
            .await
            .unwrap();
        assert!(report.all_agree(), "disagreement at {min_credits}: {report:?}");
        assert_eq!(
            report.sequential.value,
            courses.count_with_min_credits(min_credits) as u64
        );
    }

    let sums = comparison::compare_sums(&courses, &processor).await.unwrap();
    assert!(sums.agree());
    assert_eq!(sums.parallel.value, 19);
}

#[tokio::test]
async fn test_concurrent_filters_share_one_repository() {
    let courses = fixtures::course_repository(&validator());
    let processor = AsyncProcessor::default();

    let counts = futures::future::join_all(
        (1..=5).map(|min_credits| processor.filter_courses(&courses, min_credits)),
    )
    .await;
    let counts: Vec<usize> = counts.into_iter().map(Result::unwrap).collect();

    assert_eq!(counts, vec![5, 5, 4, 3, 2]);
}

#[test]
fn test_sum_credits_outside_a_runtime_macro() {
    let courses = fixtures::course_repository(&validator());
    let processor = AsyncProcessor::new(Duration::from_secs(5));

    let total = tokio_test::block_on(processor.sum_credits(&courses)).unwrap();
    assert_eq!(total, 19);
}
