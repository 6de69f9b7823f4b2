use super::{Engine, MinStdRand0};
use crate::SeedSequence;

/// Shuffle-order engine: a table of `K` base outputs, one of which is
/// returned and replaced on every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOrder<E, const K: usize> {
    base: E,
    table: [u64; K],
    current: u64,
}

/// Knuth's shuffle of the original minimal standard engine.
pub type KnuthB = ShuffleOrder<MinStdRand0, 256>;

impl<E: Engine, const K: usize> ShuffleOrder<E, K> {
    pub fn from_base(base: E) -> Self {
        let mut engine = Self {
            base,
            table: [0; K],
            current: 0,
        };
        engine.fill_table();
        engine
    }

    pub fn base(&self) -> &E {
        &self.base
    }

    fn fill_table(&mut self) {
        for slot in self.table.iter_mut() {
            *slot = self.base.next_value();
        }
        self.current = self.base.next_value();
    }

    fn slot(&self) -> usize {
        let span = (E::MAX - E::MIN) as f64 + 1.0;
        let j = (K as f64 * ((self.current - E::MIN) as f64 / span)) as usize;
        j.min(K - 1)
    }
}

impl<E: Engine, const K: usize> Default for ShuffleOrder<E, K> {
    fn default() -> Self {
        Self::from_base(E::default())
    }
}

impl<E: Engine, const K: usize> Engine for ShuffleOrder<E, K> {
    const MIN: u64 = E::MIN;
    const MAX: u64 = E::MAX;

    fn next_value(&mut self) -> u64 {
        let j = self.slot();
        self.current = self.table[j];
        self.table[j] = self.base.next_value();
        self.current
    }

    fn reseed(&mut self, seeds: &SeedSequence) {
        self.base.reseed(seeds);
        self.fill_table();
    }
}
