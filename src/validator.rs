// Pluggable validation for decoded records

use crate::error::ValidationError;
use crate::record::Record;
use std::any::Any;
use std::collections::HashMap;

/// Rule deciding whether a freshly decoded record is usable
pub trait Validator<T> {
    fn validate(&self, record: &T) -> Result<(), ValidationError>;
}

impl<T, F> Validator<T> for F
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    fn validate(&self, record: &T) -> Result<(), ValidationError> {
        self(record)
    }
}

/// Validator that accepts every record
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<T> Validator<T> for AcceptAll {
    fn validate(&self, _record: &T) -> Result<(), ValidationError> {
        Ok(())
    }
}

type BoxedValidator<T> = Box<dyn Validator<T> + Send + Sync>;

/// Validators keyed by record kind
///
/// Lets one value serve stores of several record kinds. Validating a kind
/// with no registered rule fails with [`ValidationError::UnsupportedType`].
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validator for record kind `T`, replacing any previous one
    pub fn register<T, V>(&mut self, validator: V) -> &mut Self
    where
        T: Record,
        V: Validator<T> + Send + Sync + 'static,
    {
        let boxed: BoxedValidator<T> = Box::new(validator);
        self.validators.insert(T::kind(), Box::new(boxed));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.validators.contains_key(kind)
    }
}

impl<T: Record> Validator<T> for ValidatorRegistry {
    fn validate(&self, record: &T) -> Result<(), ValidationError> {
        let validator = self
            .validators
            .get(T::kind())
            .and_then(|v| v.downcast_ref::<BoxedValidator<T>>())
            .ok_or_else(|| ValidationError::UnsupportedType(T::kind().to_string()))?;
        validator.validate(record)
    }
}
