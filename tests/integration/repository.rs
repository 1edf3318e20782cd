//! Generic repository operations across entity kinds.

use crate::common::{date, fixtures, validator};
use online_courses::model::{Course, Entity, Instructor, Mark, Module, Student};
use online_courses::repository::{
    CourseRepository, InstructorRepository, ModuleRepository, Repository, SortOrder,
};

#[test]
fn test_duplicates_by_identity_are_rejected() {
    let validator = validator();
    let repository = CourseRepository::for_entity();
    let course =
        Course::new_with(&validator, "Java Programming", "Learn Java", 3, date(2026, 11, 1))
            .unwrap();
    // Different title tail and description tail, same identity.
    let twin =
        Course::new_with(&validator, "Javelin", "Learning", 3, date(2026, 11, 1)).unwrap();

    assert!(repository.add(course.clone()));
    assert!(!repository.add(twin.clone()));
    assert_eq!(repository.size(), 1);
    assert!(!repository.contains(&twin));
    assert!(repository.contains_identity(&twin.identity()));
    assert_eq!(repository.find_by_identity(&twin.identity()), Some(course));
}

#[test]
fn test_insertion_order_is_kept() {
    let repository = fixtures::instructor_repository();
    let names: Vec<String> = repository
        .get_all()
        .iter()
        .map(|i| i.first_name().to_string())
        .collect();
    assert_eq!(names, vec!["Ігор", "Галина", "Іван", "Анна", "Дмитро"]);
}

#[test]
fn test_remove_and_re_add() {
    let repository = fixtures::instructor_repository();
    let galyna = Instructor::new("Галина", "Унгурян", 26).unwrap();

    assert!(repository.remove(&galyna));
    assert!(!repository.remove(&galyna));
    assert!(!repository.remove_by_identity("ГАЛУНГ-26"));
    assert_eq!(repository.size(), 4);

    assert!(repository.add(galyna));
    assert_eq!(repository.get_all().last().unwrap().first_name(), "Галина");
}

#[test]
fn test_snapshots_are_independent() {
    let repository = fixtures::module_repository();
    let mut snapshot = repository.get_all();
    snapshot.clear();
    snapshot.push(Module::new("Macros", "Declarative macros").unwrap());

    assert_eq!(repository.size(), 4);
    assert!(!repository.contains_identity("MAC-DEC"));
}

#[test]
fn test_sort_by_identity_orders() {
    let repository = fixtures::module_repository();
    let ascending: Vec<String> = repository
        .sort_by_identity("asc")
        .iter()
        .map(|m| m.title().to_string())
        .collect();
    assert_eq!(ascending, vec!["Async", "Ownership", "Testing", "Traits"]);

    let descending = repository.sort_by_identity("DESC");
    assert_eq!(descending[0].title(), "Traits");

    // Unknown orders fall back to ascending.
    let fallback: Vec<String> = repository
        .sort_by_identity("sideways")
        .iter()
        .map(|m| m.title().to_string())
        .collect();
    assert_eq!(fallback, ascending);

    assert_eq!(SortOrder::parse("Asc"), Some(SortOrder::Asc));
    assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
}

#[test]
fn test_clear_and_empty_queries() {
    let repository = fixtures::instructor_repository();
    repository.clear();
    assert!(repository.is_empty());
    assert!(repository.get_all().is_empty());
    assert_eq!(repository.average_expertise(), 0.0);
    assert!(repository.instructor_with_max_expertise().is_none());
    assert!(repository.all_instructors_have_min_expertise(60));
}

#[test]
fn test_clones_share_storage() {
    let repository = ModuleRepository::for_entity();
    let handle = repository.clone();
    handle.add(Module::new("Traits", "Shared behaviour").unwrap());
    assert_eq!(repository.size(), 1);
}

#[test]
fn test_custom_identity_function() {
    let repository: Repository<Student> =
        Repository::new(|s: &Student| s.last_name().to_lowercase(), "Surname");
    for student in fixtures::students(&validator()) {
        repository.add(student);
    }
    // Two Melnyks share a key.
    assert_eq!(repository.size(), 4);
    assert_eq!(repository.entity_type(), "Surname");
    assert!(repository.contains_identity("melnyk"));
}

#[test]
fn test_specialized_queries_on_fixtures() {
    let validator = validator();

    let students = fixtures::student_repository(&validator);
    assert_eq!(students.find_by_email_domain("CHNU.edu.ua").len(), 3);
    assert_eq!(students.find_by_last_name_containing("mel").len(), 2);
    assert_eq!(students.find_oldest().unwrap().first_name(), "Olena");
    assert_eq!(students.group_by_last_name()["Melnyk"].len(), 2);

    let courses = fixtures::course_repository(&validator);
    assert_eq!(courses.total_credits(), 19);
    assert_eq!(courses.all_courses_with_max_credits().len(), 2);
    assert_eq!(courses.course_with_max_credits().unwrap().title(), "Java Programming");
    assert_eq!(courses.sort_by_start_date()[0].title(), "Rust Systems");
    assert_eq!(courses.find_by_credits_range(3, 4).len(), 2);

    let instructors = fixtures::instructor_repository();
    assert_eq!(instructors.all_instructors_with_max_expertise().len(), 2);
    assert_eq!(
        instructors.instructor_with_max_expertise().unwrap().first_name(),
        "Анна"
    );
    assert_eq!(instructors.total_expertise(), 163);

    let assignments = fixtures::assignment_repository(&validator);
    assert_eq!(assignments.sort_by_mark()[0].mark(), Mark::Low);
    assert_eq!(assignments.find_by_module_title("owner").len(), 2);
    assert_eq!(assignments.total_max_points(), 340);
}

#[test]
fn test_instructor_repository_alias() {
    let repository: InstructorRepository = Repository::for_entity();
    assert_eq!(repository.entity_type(), "Instructor");
}
