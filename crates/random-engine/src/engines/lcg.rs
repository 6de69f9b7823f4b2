use super::Engine;
use crate::SeedSequence;

/// Multiplicative linear congruential engine `x' = A * x mod M`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearCongruential<const A: u64, const M: u64> {
    state: u64,
}

/// Minimal standard engine, revised multiplier.
pub type MinStdRand = LinearCongruential<48271, 2_147_483_647>;
/// Minimal standard engine, original multiplier.
pub type MinStdRand0 = LinearCongruential<16807, 2_147_483_647>;

impl<const A: u64, const M: u64> LinearCongruential<A, M> {
    pub const DEFAULT_SEED: u64 = 1;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::normalize(seed % M),
        }
    }

    // The multiplier has no constant term, so zero is a fixed point.
    fn normalize(state: u64) -> u64 {
        if state == 0 {
            1
        } else {
            state
        }
    }
}

impl<const A: u64, const M: u64> Default for LinearCongruential<A, M> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl<const A: u64, const M: u64> Engine for LinearCongruential<A, M> {
    const MIN: u64 = 1;
    const MAX: u64 = M - 1;

    fn next_value(&mut self) -> u64 {
        self.state = ((self.state as u128 * A as u128) % M as u128) as u64;
        self.state
    }

    fn reseed(&mut self, seeds: &SeedSequence) {
        let words_per_value = if M <= 1 << 32 { 1 } else { 2 };
        let mut words = [0u32; 5];
        let words = &mut words[..3 + words_per_value];
        seeds.generate(words);
        let value = words[3..]
            .iter()
            .enumerate()
            .fold(0u128, |acc, (j, &w)| acc | ((w as u128) << (32 * j)));
        self.state = Self::normalize((value % M as u128) as u64);
    }
}
