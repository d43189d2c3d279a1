//! Example 01: Basic Usage
//!
//! This example walks through every store operation on a small roster of
//! students: clear, add, add_all, get_all, filter and find_by_index.
//!
//! Run with: cargo run --example 01_basic_usage

use eyre::Result;
use rosterstore::format::{FullName, Greeting, SurnameAge};
use rosterstore::{Formatter, Store, Student, StudentValidator, format_each};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;
    let data_path = temp_dir.path().join("students.csv");

    println!("RosterStore Basic Usage Example");
    println!("===============================\n");
    println!("Data file: {}\n", data_path.display());

    let store = Store::open(&data_path, StudentValidator);

    // Start from an empty file
    println!("1. CLEAR - Resetting the store...");
    store.clear()?;
    println!("   Records: {}\n", store.count()?);

    // Single inserts
    println!("2. ADD - Appending two students one at a time...");
    store.add(&Student::new("John", "Wick", "IA-31", 40))?;
    store.add(&Student::new("Harry", "Potter", "IA-32", 25))?;
    println!("   Records: {}\n", store.count()?);

    // Batch insert (all-or-nothing by default)
    println!("3. ADD_ALL - Appending a batch of four...");
    store.add_all(&[
        Student::new("Arnold", "Schwarzenegger", "IA-33", 50),
        Student::new("Jimi", "Hendrix", "IA-34", 60),
        Student::new("Johnny", "Depp", "IA-31", 60),
        Student::new("Marshall", "Mathers", "IA-32", 51),
    ])?;
    println!("   Records: {}\n", store.count()?);

    println!("4. GET_ALL - Every student in file order:");
    for line in format_each(&store.get_all()?, &SurnameAge) {
        println!("   {}", line);
    }
    println!();

    println!("5. FILTER - Students in group IA-31:");
    for line in format_each(&store.filter(|s| s.group == "IA-31")?, &Greeting) {
        println!("   {}", line);
    }
    println!();

    println!("6. FIND_BY_INDEX - Student at position 1:");
    match store.find_by_index(1)? {
        Some(student) => println!("   {}", FullName.format(&student)),
        None => println!("   Not found"),
    }
    match store.find_by_index(100)? {
        Some(_) => println!("   Unexpected record at position 100"),
        None => println!("   Position 100: not found (as expected)"),
    }
    println!();

    println!("7. RAW FILE - What is on disk:");
    for line in std::fs::read_to_string(&data_path)?.lines() {
        println!("   {}", line);
    }

    println!("\nExample completed successfully!");
    Ok(())
}
