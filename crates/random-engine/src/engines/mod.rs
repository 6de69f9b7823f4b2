//! Concrete pseudo-random engines.
//!
//! Each engine implements [`Engine`], the static interface wrapped by
//! [`GeneratorAdapter`](crate::GeneratorAdapter) to become a runtime
//! [`BitGenerator`](crate::BitGenerator).

mod lcg;
mod mersenne;
mod seeded;
mod shuffle;
mod subtract_with_carry;

pub use lcg::{LinearCongruential, MinStdRand, MinStdRand0};
pub use mersenne::{Mt19937, Mt19937_64};
pub use seeded::{ChaCha12Engine, ChaCha20Engine, ChaCha8Engine, SeededEngine, StdEngine};
pub use shuffle::{KnuthB, ShuffleOrder};
pub use subtract_with_carry::{Ranlux24Base, Ranlux48Base, SubtractWithCarry};

use crate::SeedSequence;

/// Statically typed random engine producing raw values in `[MIN, MAX]`.
///
/// `Default` constructs the engine with its default seed.
pub trait Engine: Clone + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Smallest value `next_value` can return.
    const MIN: u64;
    /// Largest value `next_value` can return.
    const MAX: u64;

    /// Advance the engine and return the next raw value.
    fn next_value(&mut self) -> u64;

    /// Replace the engine state with one derived from `seeds`.
    fn reseed(&mut self, seeds: &SeedSequence);
}
