// RosterStore - Flat-file CSV record store with per-record validation

pub mod config;
pub mod error;
pub mod factory;
pub mod format;
pub mod record;
pub mod store;
pub mod student;
pub mod validator;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ErrorKind, FormatError, Result, StoreError, ValidationError};
pub use factory::RecordFactory;
pub use format::{Formatter, format_each};
pub use record::{DELIMITER, Record};
pub use store::{Store, StoreOptions};
pub use student::{Student, StudentFactory, StudentValidator};
pub use validator::{AcceptAll, Validator, ValidatorRegistry};
