use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rosterstore::format::{FullName, Greeting, SurnameAge};
use rosterstore::{Config, Formatter, RecordFactory, Store, Student, StudentFactory, StudentValidator, format_each};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "rosterstore")]
#[command(about = "RosterStore CLI - Student records in a flat CSV file")]
#[command(version)]
struct Cli {
    /// Path to the data file (overrides config)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove every record
    Clear,

    /// Append one student
    Add {
        name: String,
        surname: String,
        group: String,
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },

    /// Show every student
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show the student at a 0-based position
    Get {
        index: usize,
        #[arg(long)]
        json: bool,
    },

    /// Show students matching all given conditions
    Filter {
        #[arg(short, long)]
        group: Option<String>,
        #[arg(long)]
        min_age: Option<i32>,
        #[arg(long)]
        max_age: Option<i32>,
        #[arg(long)]
        json: bool,
    },

    /// Print the number of stored records
    Count,

    /// Append randomly generated students
    Seed {
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Reset the file and run a walkthrough of every operation
    Demo,
}

type StudentStore = Store<Student, StudentValidator>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;

    // Setup tracing
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, config.level()?))
        .with_writer(std::io::stderr)
        .init();

    let path = cli.file.unwrap_or_else(|| config.file.clone());
    let store = Store::with_options(&path, StudentValidator, config.store_options());

    run(&store, cli.command).wrap_err_with(|| format!("Command failed on {:?}", path))
}

fn run(store: &StudentStore, command: Commands) -> Result<()> {
    match command {
        Commands::Clear => {
            store.clear()?;
            println!("Cleared {}", store.path().display());
        }
        Commands::Add {
            name,
            surname,
            group,
            age,
        } => {
            store.add(&Student::new(name, surname, group, age))?;
            println!("Added 1 student");
        }
        Commands::List { json } => {
            let students = store.get_all()?;
            print_students(&students, json)?;
        }
        Commands::Get { index, json } => match store.find_by_index(index)? {
            Some(student) => print_students(std::slice::from_ref(&student), json)?,
            None => {
                eprintln!("{}", format!("No student at index {}", index).yellow());
                std::process::exit(1);
            }
        },
        Commands::Filter {
            group,
            min_age,
            max_age,
            json,
        } => {
            let students = store.filter(|s| {
                group.as_deref().is_none_or(|g| s.group == g)
                    && min_age.is_none_or(|min| s.age >= min)
                    && max_age.is_none_or(|max| s.age <= max)
            })?;
            print_students(&students, json)?;
        }
        Commands::Count => {
            println!("{}", store.count()?);
        }
        Commands::Seed { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let students = StudentFactory.generate_many(count, &mut rng);
            store.add_all(&students)?;
            println!("Added {} students", students.len());
        }
        Commands::Demo => demo(store)?,
    }

    Ok(())
}

fn demo(store: &StudentStore) -> Result<()> {
    store.clear()?;
    store.add(&Student::new("John", "Wick", "IA-31", 40))?;
    store.add(&Student::new("Harry", "Potter", "IA-32", 25))?;
    store.add_all(&[
        Student::new("Arnold", "Schwarzenegger", "IA-33", 50),
        Student::new("Jimi", "Hendrix", "IA-34", 60),
        Student::new("Johnny", "Depp", "IA-31", 60),
        Student::new("Marshall", "Mathers", "IA-32", 51),
    ])?;

    println!("{}", "==== DISPLAY ALL STUDENTS ====".bold());
    for line in format_each(&store.get_all()?, &SurnameAge) {
        println!("{}", line);
    }

    println!("\n{}", "==== DISPLAY STUDENTS BY FILTER ====".bold());
    for line in format_each(&store.filter(|s| s.group == "IA-31")?, &Greeting) {
        println!("{}", line);
    }

    println!("\n{}", "==== DISPLAY STUDENT BY INDEX ====".bold());
    match store.find_by_index(1)? {
        Some(student) => println!("{}", FullName.format(&student)),
        None => println!("{}", "No student at index 1".yellow()),
    }

    Ok(())
}

fn print_students(students: &[Student], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(students).context("Failed to serialize students")?;
        println!("{}", out);
        return Ok(());
    }

    if students.is_empty() {
        println!("{}", "No students".dimmed());
        return Ok(());
    }

    println!(
        "{:<12} {:<16} {:<8} {:>4}",
        "NAME".bold(),
        "SURNAME".bold(),
        "GROUP".bold(),
        "AGE".bold()
    );
    for s in students {
        println!("{:<12} {:<16} {:<8} {:>4}", s.name, s.surname, s.group.cyan(), s.age);
    }
    Ok(())
}

fn log_level(verbose: u8, configured: Level) -> Level {
    match verbose {
        0 => configured,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
