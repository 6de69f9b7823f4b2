use super::Engine;
use crate::SeedSequence;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};

/// Engine backed by a `rand` generator, seeded by filling its byte seed
/// from a [`SeedSequence`].
#[derive(Debug, Clone)]
pub struct SeededEngine<R> {
    rng: R,
}

pub type StdEngine = SeededEngine<StdRng>;
pub type ChaCha8Engine = SeededEngine<ChaCha8Rng>;
pub type ChaCha12Engine = SeededEngine<ChaCha12Rng>;
pub type ChaCha20Engine = SeededEngine<ChaCha20Rng>;

impl<R> SeededEngine<R>
where
    R: SeedableRng + RngCore,
{
    pub fn from_sequence(seeds: &SeedSequence) -> Self {
        let mut seed = R::Seed::default();
        seeds.generate_bytes(seed.as_mut());
        Self {
            rng: R::from_seed(seed),
        }
    }
}

impl<R> Default for SeededEngine<R>
where
    R: SeedableRng + RngCore,
{
    fn default() -> Self {
        Self::from_sequence(&SeedSequence::default())
    }
}

impl<R> Engine for SeededEngine<R>
where
    R: SeedableRng + RngCore + Clone + std::fmt::Debug + Send + Sync + 'static,
{
    const MIN: u64 = 0;
    const MAX: u64 = u64::MAX;

    fn next_value(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn reseed(&mut self, seeds: &SeedSequence) {
        *self = Self::from_sequence(seeds);
    }
}
