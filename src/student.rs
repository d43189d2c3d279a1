// Student record kind

use crate::error::{FormatError, ValidationError};
use crate::factory::RecordFactory;
use crate::record::{Record, join_fields, split_fields};
use crate::validator::Validator;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// One enrolled student
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub surname: String,
    pub group: String,
    pub age: i32,
}

impl Student {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, group: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            group: group.into(),
            age,
        }
    }
}

impl Record for Student {
    const FIELD_COUNT: usize = 4;

    fn kind() -> &'static str {
        "student"
    }

    fn serialize_line(&self) -> String {
        let age = self.age.to_string();
        join_fields(&[self.name.as_str(), self.surname.as_str(), self.group.as_str(), age.as_str()])
    }

    fn deserialize_line(line: &str) -> Result<Self, FormatError> {
        let fields = split_fields(line, Self::FIELD_COUNT)?;
        let age = fields[3].parse().map_err(|e| FormatError::InvalidNumber {
            field: "age",
            value: fields[3].to_string(),
            source: e,
        })?;

        Ok(Self::new(fields[0], fields[1], fields[2], age))
    }
}

/// Rejects negative ages and blank names
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentValidator;

impl Validator<Student> for StudentValidator {
    fn validate(&self, student: &Student) -> Result<(), ValidationError> {
        if student.name.trim().is_empty() {
            return Err(ValidationError::Rule(format!(
                "student name cannot be empty or whitespace-only: {:?}",
                student.serialize_line()
            )));
        }
        if student.age < 0 {
            return Err(ValidationError::Rule(format!(
                "student age cannot be negative: {}",
                student.age
            )));
        }
        Ok(())
    }
}

const NAMES: &[&str] = &["John", "Harry", "Arnold", "Jimi", "Johnny", "Marshall"];
const SURNAMES: &[&str] = &["Wick", "Potter", "Schwarzenegger", "Hendrix", "Depp", "Mathers"];
const GROUPS: &[&str] = &["IA-31", "IA-32", "IA-33", "IA-34"];

/// Produces students drawn from a fixed pool of names and groups, aged 20 to 60
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentFactory;

impl RecordFactory for StudentFactory {
    type Record = Student;

    fn empty(&self) -> Student {
        Student::default()
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Student {
        Student {
            name: pick(NAMES, rng),
            surname: pick(SURNAMES, rng),
            group: pick(GROUPS, rng),
            age: rng.random_range(20..=60),
        }
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&str], rng: &mut R) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}
