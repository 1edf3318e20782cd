//! Identities, natural orderings and marks.

use crate::common::{date, fixtures, validator};
use online_courses::model::{Assignment, Course, Entity, Instructor, Mark, Module, Student};

#[test]
fn test_identities() {
    let validator = validator();

    let course =
        Course::new_with(&validator, "Java Programming", "Learn Java", 3, date(2026, 11, 1))
            .unwrap();
    assert_eq!(course.identity(), "JAV-LEA-32026-11-01");

    let instructor = Instructor::new("Галина", "Унгурян", 26).unwrap();
    assert_eq!(instructor.identity(), "ГАЛУНГ-26");

    let module = Module::new("ownership", "moves and borrows").unwrap();
    assert_eq!(module.identity(), "OWN-MOV");

    let assignment =
        Assignment::new_with(&validator, module, date(2026, 11, 10), 80, Mark::Good).unwrap();
    assert_eq!(assignment.identity(), "OWN-MOV-2026-11-10");

    let student = Student::new_with(
        &validator,
        "Юрій",
        "Васильчук",
        "yurii@chnu.edu.ua",
        date(2024, 9, 1),
    )
    .unwrap();
    assert_eq!(student.identity(), "yurii@chnu.edu.ua");
    assert_eq!(student.full_name().unwrap(), "ЮРІВАС-YUR-2024-09-01");
}

#[test]
fn test_try_identity_agrees_with_identity() {
    let validator = validator();
    for course in fixtures::courses(&validator) {
        assert_eq!(course.try_identity().unwrap(), course.identity());
    }
    for instructor in fixtures::instructors() {
        assert_eq!(instructor.try_identity().unwrap(), instructor.identity());
    }
}

#[test]
fn test_natural_orderings() {
    let validator = validator();

    let mut students = fixtures::students(&validator);
    students.sort_by(Student::natural_cmp);
    let emails: Vec<&str> = students.iter().map(Student::email).collect();
    let mut expected = emails.clone();
    expected.sort_unstable();
    assert_eq!(emails, expected);

    let mut assignments = fixtures::assignments(&validator);
    assignments.sort_by(Assignment::natural_cmp);
    assert_eq!(assignments[0].due_date(), date(2026, 10, 20));
    assert_eq!(assignments[3].due_date(), date(2026, 12, 1));
}

#[test]
fn test_equality_compares_all_fields() {
    let a = Instructor::new("Ігор", "Булат", 34).unwrap();
    let b = Instructor::new("Ігор", "Булат", 34).unwrap();
    let c = Instructor::new("Ігор", "Булат", 35).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a.identity(), c.identity());
}

#[test]
fn test_mark_order_and_parsing() {
    assert!(Mark::NotPassed < Mark::Low);
    assert!(Mark::Good < Mark::Excellent);
    assert_eq!(Mark::ALL.iter().max(), Some(&Mark::Excellent));

    assert_eq!("excellent".parse::<Mark>().unwrap(), Mark::Excellent);
    assert_eq!("Not Passed".parse::<Mark>().unwrap(), Mark::NotPassed);
    assert_eq!("not-passed".parse::<Mark>().unwrap(), Mark::NotPassed);
    assert_eq!("3".parse::<Mark>().unwrap(), Mark::Passed);
    assert!("brilliant".parse::<Mark>().is_err());

    assert_eq!(Mark::from_value(4), Some(Mark::Good));
    assert_eq!(Mark::from_value(6), None);
    assert_eq!(Mark::Satisfactory.value(), 2);
}

#[test]
fn test_assignment_mark_description() {
    let validator = validator();
    let assignment = &fixtures::assignments(&validator)[1];
    assert_eq!(assignment.mark(), Mark::Excellent);
    assert_eq!(assignment.mark_description(), Mark::Excellent.description());
}
