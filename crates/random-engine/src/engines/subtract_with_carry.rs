use super::{Engine, LinearCongruential};
use crate::SeedSequence;

type SeedingEngine = LinearCongruential<40014, 2_147_483_563>;

/// Subtract-with-carry engine over `W`-bit words with short lag `S` and
/// long lag `R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtractWithCarry<const W: u32, const S: usize, const R: usize> {
    state: [u64; R],
    carry: u64,
    index: usize,
}

/// Base engine of the 24-bit RANLUX generator.
pub type Ranlux24Base = SubtractWithCarry<24, 10, 24>;
/// Base engine of the 48-bit RANLUX generator.
pub type Ranlux48Base = SubtractWithCarry<48, 5, 12>;

impl<const W: u32, const S: usize, const R: usize> SubtractWithCarry<W, S, R> {
    pub const DEFAULT_SEED: u64 = 19_780_503;
    const MODULUS: u128 = 1 << W;
    const WORDS: usize = W.div_ceil(32) as usize;

    pub fn new(seed: u64) -> Self {
        let mut lcg = SeedingEngine::new(if seed == 0 { Self::DEFAULT_SEED } else { seed });
        let mut state = [0u64; R];
        for slot in state.iter_mut() {
            let value = (0..Self::WORDS).fold(0u128, |acc, j| {
                acc + ((lcg.next_value() as u128) << (32 * j))
            });
            *slot = (value % Self::MODULUS) as u64;
        }
        Self::from_state(state)
    }

    fn from_state(state: [u64; R]) -> Self {
        let carry = u64::from(state[R - 1] == 0);
        Self {
            state,
            carry,
            index: 0,
        }
    }
}

impl<const W: u32, const S: usize, const R: usize> Default for SubtractWithCarry<W, S, R> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl<const W: u32, const S: usize, const R: usize> Engine for SubtractWithCarry<W, S, R> {
    const MIN: u64 = 0;
    const MAX: u64 = (1 << W) - 1;

    fn next_value(&mut self) -> u64 {
        let short = (self.index + R - S) % R;
        let lagged = self.state[short];
        let current = self.state[self.index];
        let value = if lagged >= current + self.carry {
            let value = lagged - current - self.carry;
            self.carry = 0;
            value
        } else {
            let value = ((Self::MODULUS - (current + self.carry) as u128) + lagged as u128) as u64;
            self.carry = 1;
            value
        };
        self.state[self.index] = value;
        self.index = (self.index + 1) % R;
        value
    }

    fn reseed(&mut self, seeds: &SeedSequence) {
        let mut words = vec![0u32; R * Self::WORDS];
        seeds.generate(&mut words);
        let mut state = [0u64; R];
        for (slot, chunk) in state.iter_mut().zip(words.chunks(Self::WORDS)) {
            let value = chunk
                .iter()
                .enumerate()
                .fold(0u128, |acc, (j, &w)| acc + ((w as u128) << (32 * j)));
            *slot = (value % Self::MODULUS) as u64;
        }
        *self = Self::from_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nth<E: Engine>(engine: &mut E, n: usize) -> u64 {
        for _ in 1..n {
            engine.next_value();
        }
        engine.next_value()
    }

    #[test]
    fn test_ranlux24_base_10000th_value() {
        assert_eq!(nth(&mut Ranlux24Base::default(), 10000), 7937952);
    }

    #[test]
    fn test_ranlux48_base_10000th_value() {
        assert_eq!(nth(&mut Ranlux48Base::default(), 10000), 61839128582725);
    }

    #[test]
    fn test_zero_seed_uses_default() {
        assert_eq!(Ranlux24Base::new(0), Ranlux24Base::default());
    }

    #[test]
    fn test_values_stay_in_range() {
        let mut engine = Ranlux24Base::new(12345);
        for _ in 0..5000 {
            assert!(engine.next_value() <= Ranlux24Base::MAX);
        }
    }

    #[test]
    fn test_reseed_from_sequence() {
        let mut engine = Ranlux48Base::default();
        engine.reseed(&SeedSequence::from_seed(42));
        let values: Vec<u64> = (0..3).map(|_| engine.next_value()).collect();
        assert_eq!(values, vec![7518005764358, 216009087449920, 269407931432350]);
    }
}
