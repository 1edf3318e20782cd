//! Sample entities and populated repositories.

use super::date;
use online_courses::model::{Assignment, Course, Instructor, Mark, Module, Student};
use online_courses::repository::{
    AssignmentRepository, CourseRepository, InstructorRepository, ModuleRepository,
    StudentRepository,
};
use online_courses::Validator;

pub fn students(validator: &Validator) -> Vec<Student> {
    [
        ("Юрій", "Васильчук", "yurii.vasylchuk@chnu.edu.ua", date(2024, 9, 1)),
        ("Lesia", "Melnyk", "lesia.melnyk@chnu.edu.ua", date(2023, 9, 1)),
        ("Liliya", "Fivko", "liliya.fivko@student.ua", date(2023, 9, 5)),
        ("Ivan", "Bondaryk", "ivan.bondaryk@chnu.edu.ua", date(2025, 2, 3)),
        ("Olena", "Melnyk", "olena.melnyk@gmail.com", date(2022, 1, 20)),
    ]
    .into_iter()
    .map(|(first, last, email, enrolled)| {
        Student::new_with(validator, first, last, email, enrolled).expect("valid student fixture")
    })
    .collect()
}

pub fn courses(validator: &Validator) -> Vec<Course> {
    [
        ("Java Programming", "Java Basics", 5, date(2026, 11, 18)),
        ("Data Structures", "Algorithms", 3, date(2026, 12, 18)),
        ("Web Development", "HTML and CSS", 4, date(2027, 1, 18)),
        ("Rust Systems", "Ownership and concurrency", 5, date(2026, 9, 1)),
        ("Databases", "Relational modelling", 2, date(2027, 3, 1)),
    ]
    .into_iter()
    .map(|(title, description, credits, start)| {
        Course::new_with(validator, title, description, credits, start)
            .expect("valid course fixture")
    })
    .collect()
}

pub fn instructors() -> Vec<Instructor> {
    [
        ("Ігор", "Булат", 34),
        ("Галина", "Унгурян", 26),
        ("Іван", "Данилюк", 23),
        ("Анна", "Шепетюк", 40),
        ("Дмитро", "Плаксій", 40),
    ]
    .into_iter()
    .map(|(first, last, expertise)| {
        Instructor::new(first, last, expertise).expect("valid instructor fixture")
    })
    .collect()
}

pub fn modules() -> Vec<Module> {
    [
        ("Ownership", "Moves, borrows and lifetimes"),
        ("Traits", "Shared behaviour"),
        ("Async", "Futures, executors and tasks in depth"),
        ("Testing", "Unit tests"),
    ]
    .into_iter()
    .map(|(title, content)| Module::new(title, content).expect("valid module fixture"))
    .collect()
}

pub fn assignments(validator: &Validator) -> Vec<Assignment> {
    let modules = modules();
    [
        (0, date(2026, 11, 10), 100, Mark::Good),
        (1, date(2026, 11, 1), 90, Mark::Excellent),
        (0, date(2026, 12, 1), 50, Mark::Satisfactory),
        (2, date(2026, 10, 20), 100, Mark::Low),
    ]
    .into_iter()
    .map(|(module, due, points, mark)| {
        Assignment::new_with(validator, modules[module].clone(), due, points, mark)
            .expect("valid assignment fixture")
    })
    .collect()
}

pub fn student_repository(validator: &Validator) -> StudentRepository {
    let repository = StudentRepository::for_entity();
    for student in students(validator) {
        repository.add(student);
    }
    repository
}

pub fn course_repository(validator: &Validator) -> CourseRepository {
    let repository = CourseRepository::for_entity();
    for course in courses(validator) {
        repository.add(course);
    }
    repository
}

pub fn instructor_repository() -> InstructorRepository {
    let repository = InstructorRepository::for_entity();
    for instructor in instructors() {
        repository.add(instructor);
    }
    repository
}

pub fn module_repository() -> ModuleRepository {
    let repository = ModuleRepository::for_entity();
    for module in modules() {
        repository.add(module);
    }
    repository
}

pub fn assignment_repository(validator: &Validator) -> AssignmentRepository {
    let repository = AssignmentRepository::for_entity();
    for assignment in assignments(validator) {
        repository.add(assignment);
    }
    repository
}
