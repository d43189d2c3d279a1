// Record construction for seeding

use crate::record::Record;
use rand::RngCore;

/// Builds blank and randomized records of one kind
pub trait RecordFactory {
    type Record: Record;

    /// A record with every field at its zero value
    fn empty(&self) -> Self::Record;

    /// A random but valid record
    fn generate(&self, rng: &mut dyn RngCore) -> Self::Record;

    fn generate_many(&self, count: usize, rng: &mut dyn RngCore) -> Vec<Self::Record> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}
