//! Process-unique opaque identifiers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

/// Deterministic UUID stream for one generation run.
///
/// Ids are drawn from a dedicated RNG forked off the pipeline RNG, so a
/// fixed seed reproduces the full id sequence. Consumers treat the ids as
/// opaque; uniqueness holds for the lifetime of the run.
pub struct IdSource {
    rng: StdRng,
}

impl IdSource {
    /// Forks an id stream off the given RNG.
    pub fn from_rng(rng: &mut impl RngCore) -> Self {
        Self::from_seed(rng.next_u64())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.r#gen()).into_uuid()
    }
}
