// End-to-end behavior of the student store through the public API

use rand::SeedableRng;
use rand::rngs::StdRng;
use rosterstore::{
    ErrorKind, Record, RecordFactory, Store, StoreError, Student, StudentFactory, StudentValidator, ValidatorRegistry,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_group_filter_scenario() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path().join("students.csv"), StudentValidator);

    store.clear().unwrap();
    store.add(&Student::new("John", "Wick", "IA-31", 40)).unwrap();
    store.add(&Student::new("Harry", "Potter", "IA-32", 25)).unwrap();

    let results = store.filter(|s| s.group == "IA-31").unwrap();
    assert_eq!(results, vec![Student::new("John", "Wick", "IA-31", 40)]);
}

#[test]
fn test_seeded_students_survive_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = Store::open(temp.path().join("students.csv"), StudentValidator);

    let students = StudentFactory.generate_many(25, &mut StdRng::seed_from_u64(2024));
    store.clear().unwrap();
    store.add_all(&students).unwrap();

    assert_eq!(store.count().unwrap(), 25);
    assert_eq!(store.get_all().unwrap(), students);
    for (i, student) in students.iter().enumerate() {
        assert_eq!(store.find_by_index(i).unwrap().as_ref(), Some(student));
    }
    assert_eq!(store.find_by_index(students.len()).unwrap(), None);
}

#[test]
fn test_file_is_plain_csv() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("students.csv");
    let store = Store::open(&path, StudentValidator);

    store
        .add_all(&[
            Student::new("Jimi", "Hendrix", "IA-34", 60),
            Student::new("Marshall", "Mathers", "IA-32", 51),
        ])
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Jimi,Hendrix,IA-34,60\nMarshall,Mathers,IA-32,51\n");
    assert_eq!(
        Student::deserialize_line(content.lines().next().unwrap()).unwrap(),
        Student::new("Jimi", "Hendrix", "IA-34", 60)
    );
}

#[test]
fn test_hand_edited_file_fails_fast() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("students.csv");
    fs::write(&path, "John,Wick,IA-31,40\nJohn,Wick\n").unwrap();

    let store = Store::open(&path, StudentValidator);
    for err in [
        store.get_all().unwrap_err(),
        store.filter(|_| true).unwrap_err(),
        store.find_by_index(1).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, StoreError::Format { line: 2, .. }));
    }
}

#[test]
fn test_registry_validator_in_store() {
    let temp = TempDir::new().unwrap();
    let mut registry = ValidatorRegistry::new();
    registry.register::<Student, _>(StudentValidator);

    let store = Store::open(temp.path().join("students.csv"), registry);
    store.add(&Student::new(" ", "Blank", "IA-33", 30)).unwrap();

    let err = store.get_all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
