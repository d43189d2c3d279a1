// Presentation formatters for student listings

use crate::student::Student;

/// Renders a record as one line of human-readable text
pub trait Formatter<T> {
    fn format(&self, record: &T) -> String;
}

/// "Student {surname} {age} years old"
#[derive(Debug, Clone, Copy, Default)]
pub struct SurnameAge;

impl Formatter<Student> for SurnameAge {
    fn format(&self, s: &Student) -> String {
        format!("Student {} {} years old", s.surname, s.age)
    }
}

/// "Hello, I am {name}"
#[derive(Debug, Clone, Copy, Default)]
pub struct Greeting;

impl Formatter<Student> for Greeting {
    fn format(&self, s: &Student) -> String {
        format!("Hello, I am {}", s.name)
    }
}

/// "{name} {surname}"
#[derive(Debug, Clone, Copy, Default)]
pub struct FullName;

impl Formatter<Student> for FullName {
    fn format(&self, s: &Student) -> String {
        format!("{} {}", s.name, s.surname)
    }
}

/// Lazily format each record in `records`
pub fn format_each<'a, T, F>(records: &'a [T], formatter: &'a F) -> impl Iterator<Item = String> + 'a
where
    F: Formatter<T> + ?Sized,
{
    records.iter().map(move |r| formatter.format(r))
}
