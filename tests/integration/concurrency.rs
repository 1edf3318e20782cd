//! Shared repositories under parallel writers and readers.

use crate::common::{date, validator};
use online_courses::model::{Course, Instructor};
use online_courses::repository::{CourseRepository, InstructorRepository};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_parallel_adds_of_one_identity_admit_exactly_one() {
    let repository = InstructorRepository::for_entity();
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repository = repository.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                repository.add(Instructor::new("Ігор", "Булат", 34).unwrap())
            })
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|added| *added)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(repository.size(), 1);
}

const WRITERS: [&str; 8] = ["Anna", "Bohdan", "Carla", "Danylo", "Emma", "Fedir", "Greta", "Hanna"];

#[test]
fn test_parallel_writers_with_distinct_values() {
    let repository = InstructorRepository::for_entity();

    thread::scope(|scope| {
        for name in WRITERS {
            let repository = &repository;
            scope.spawn(move || {
                for expertise in 1..=5 {
                    let instructor = Instructor::new(name, "Thread", expertise).unwrap();
                    assert!(repository.add(instructor));
                }
            });
        }
    });

    assert_eq!(repository.size(), 40);
    // Each writer's values appear in the order that writer added them.
    for name in WRITERS {
        let expertise: Vec<u8> = repository
            .get_all()
            .iter()
            .filter(|i| i.first_name() == name)
            .map(Instructor::expertise)
            .collect();
        assert_eq!(expertise, vec![1, 2, 3, 4, 5]);
    }
}

#[test]
fn test_readers_see_consistent_snapshots() {
    let validator = validator();
    let repository = CourseRepository::for_entity();

    thread::scope(|scope| {
        scope.spawn(|| {
            for day in 1..=28 {
                let course = Course::new_with(
                    &validator,
                    "Concurrency",
                    "Threads and locks",
                    3,
                    date(2026, 11, day),
                )
                .unwrap();
                repository.add(course);
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = repository.get_all();
                    let total = repository.total_credits();
                    // Every stored course is worth 3 credits, so any snapshot is a multiple of 3.
                    assert_eq!(snapshot.iter().map(|c| u64::from(c.credits())).sum::<u64>() % 3, 0);
                    assert_eq!(total % 3, 0);
                }
            });
        }
    });

    assert_eq!(repository.size(), 28);
}

#[test]
fn test_removal_races_remove_once() {
    let repository = InstructorRepository::for_entity();
    repository.add(Instructor::new("Анна", "Шепетюк", 40).unwrap());

    let removed = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| repository.remove_by_identity("АННШЕП-40")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| *r)
            .count()
    });

    assert_eq!(removed, 1);
    assert!(repository.is_empty());
}
