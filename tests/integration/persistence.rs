//! CSV ingestion, JSON/YAML persistence and the configuration that ties
//! them to file locations.

use crate::common::{fixtures, init_logging, validator};
use crate::assert_error_message_contains;
use online_courses::config::AppConfig;
use online_courses::error::{ParseError, SerializationError};
use online_courses::model::{Assignment, Course, Instructor, Mark, Module, Student};
use online_courses::parser::{self, ParseOutcome};
use online_courses::repository::StudentRepository;
use online_courses::serializer::{DataFormat, DataSerializer, JsonSerializer, YamlSerializer};
use online_courses::{PersistenceManager, Validator};
use chrono::Duration;
use std::fs;
use tempfile::TempDir;

fn manager_in(dir: &TempDir) -> PersistenceManager {
    let mut config = AppConfig::default();
    config.data.base_path = dir.path().to_path_buf();
    PersistenceManager::new(config).with_validator(validator())
}

#[test]
fn test_csv_to_json_and_back() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("students.csv");
    fs::write(
        &csv,
        "# firstName,lastName,email,enrollmentDate\n\
         Lesia,Melnyk,lesia.melnyk@chnu.edu.ua,2023-09-01\n\
         \n\
         Liliya,Fivko,liliya.fivko@student.ua,2023-09-05\n\
         Ivan,Bondaryk,ivan.bondaryk@chnu.edu.ua,not-a-date\n",
    )
    .unwrap();

    let students: Vec<Student> = parser::parse_file_with(&csv, &validator()).unwrap();
    assert_eq!(students.len(), 2);

    let repository = StudentRepository::for_entity();
    for student in students {
        repository.add(student);
    }

    let manager = manager_in(&dir);
    let path = manager
        .save_repository(&repository, "students", DataFormat::Json)
        .unwrap();
    assert_eq!(path, dir.path().join("students.json"));

    let loaded: Vec<Student> = manager.load("students", DataFormat::Json).unwrap();
    assert_eq!(loaded, repository.get_all());
}

#[test]
fn test_every_entity_round_trips_through_yaml() {
    let dir = TempDir::new().unwrap();
    let validator = validator();

    let students = fixtures::students(&validator);
    let courses = fixtures::courses(&validator);
    let instructors = fixtures::instructors();
    let modules = fixtures::modules();
    let assignments = fixtures::assignments(&validator);

    let path = |name: &str| dir.path().join(format!("{name}.yaml"));
    YamlSerializer.serialize(&students, &path("students")).unwrap();
    YamlSerializer.serialize(&courses, &path("courses")).unwrap();
    YamlSerializer.serialize(&instructors, &path("instructors")).unwrap();
    YamlSerializer.serialize(&modules, &path("modules")).unwrap();
    YamlSerializer.serialize(&assignments, &path("assignments")).unwrap();

    let back: Vec<Student> = YamlSerializer.deserialize_with(&path("students"), &validator).unwrap();
    assert_eq!(back, students);
    let back: Vec<Course> = YamlSerializer.deserialize_with(&path("courses"), &validator).unwrap();
    assert_eq!(back, courses);
    let back: Vec<Instructor> = YamlSerializer.deserialize(&path("instructors")).unwrap();
    assert_eq!(back, instructors);
    let back: Vec<Module> = YamlSerializer.deserialize(&path("modules")).unwrap();
    assert_eq!(back, modules);
    let back: Vec<Assignment> =
        YamlSerializer.deserialize_with(&path("assignments"), &validator).unwrap();
    assert_eq!(back, assignments);

    let text = fs::read_to_string(path("assignments")).unwrap();
    assert!(text.contains("mark: EXCELLENT"));
    assert!(text.contains("maxPoints: 100"));
    let text = fs::read_to_string(path("courses")).unwrap();
    assert!(text.contains("startDate: 2026-11-18"));
}

#[test]
fn test_stored_dates_are_checked_against_the_loading_validator() {
    let dir = TempDir::new().unwrap();
    let validator = validator();
    let manager = manager_in(&dir);
    manager
        .save(&fixtures::courses(&validator), "courses", DataFormat::Yaml)
        .unwrap();

    let later = Validator::at(validator.today() + Duration::days(800));
    let result = manager.with_validator(later).load::<Course>("courses", DataFormat::Yaml);
    assert!(matches!(result, Err(SerializationError::Validation(_))));
}

#[test]
fn test_json_rejects_tampered_values() {
    let text = r#"[{"title": "Ownership", "content": "x"}]"#;
    let result: Result<Vec<Module>, _> = JsonSerializer.from_text(text);
    assert!(matches!(result, Err(SerializationError::Json(_))));

    let text = r#"[{"module": {"title": "Ownership", "content": "Moves"},
                   "dueDate": "2026-11-10", "maxPoints": 80, "mark": "BRILLIANT"}]"#;
    let result: Result<Vec<Assignment>, _> = JsonSerializer.from_text(text);
    assert!(result.is_err());
}

#[test]
fn test_blank_entity_label() {
    let dir = TempDir::new().unwrap();
    assert_error_message_contains!(
        manager_in(&dir).load::<Course>("", DataFormat::Yaml),
        "Entity type must not be empty"
    );
}

#[test]
fn test_configured_override_is_used() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.data.base_path = dir.path().to_path_buf();
    config
        .data
        .files
        .insert("instructors_json".into(), "staff/tutors.json".into());
    let manager = PersistenceManager::new(config);

    let path = manager
        .save(&fixtures::instructors(), "Instructors", DataFormat::Json)
        .unwrap();
    assert_eq!(path, dir.path().join("staff").join("tutors.json"));
    assert!(path.exists());
}

#[test]
fn test_parse_outcome_reports_line_numbers() {
    let text = "Ownership,Moves and borrows\nGo,Goroutines\nTraits\nTesting,Unit tests\n";
    let outcome: ParseOutcome<Module> = parser::parse_str(text);

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.rejected.len(), 2);
    assert!(matches!(outcome.rejected[0], ParseError::Validation { line: 2, .. }));
    assert!(matches!(
        outcome.rejected[1],
        ParseError::FieldCount { line: 3, expected: 2, found: 1, .. }
    ));
}

#[test]
fn test_assignment_lines() {
    let validator = validator();
    let assignment: Assignment =
        parser::parse_line("Ownership,Moves and borrows,2026-11-10,80,good", &validator).unwrap();
    assert_eq!(assignment.mark(), Mark::Good);
    assert_eq!(assignment.module().title(), "Ownership");

    assert!(matches!(
        parser::parse_line::<Assignment>("Ownership,Moves,2026-11-10,80,brilliant", &validator),
        Err(ParseError::InvalidMark { line: 1, .. })
    ));
}

#[test]
fn test_missing_csv_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        parser::parse_courses_file(dir.path().join("none.csv")),
        Err(ParseError::FileNotFound(_))
    ));
}
