//! Runtime generator interface and the process-wide generator registry.

use crate::engines::{
    ChaCha12Engine, ChaCha20Engine, ChaCha8Engine, Engine, KnuthB, MinStdRand, MinStdRand0,
    Mt19937, Mt19937_64, Ranlux24Base, Ranlux48Base, StdEngine,
};
use crate::registry::Registry;
use crate::SeedSequence;
use rand::RngCore;
use std::sync::LazyLock;

/// Object-safe interface over every registered engine.
///
/// The `RngCore` supertrait yields uniformly distributed bits extracted
/// from the raw engine output, so `rand` and `rand_distr` samplers can
/// draw from any generator regardless of its native range.
pub trait BitGenerator: RngCore + Send + Sync {
    /// Smallest raw value the engine produces.
    fn min(&self) -> u64;

    /// Largest raw value the engine produces.
    fn max(&self) -> u64;

    /// Raw engine output in `[min, max]`.
    fn next_value(&mut self) -> u64;

    /// Reinitialize from a seed sequence. Equal sequences give equal
    /// future output.
    fn reseed(&mut self, seeds: &SeedSequence);

    /// Independent copy with identical state.
    fn clone_box(&self) -> BoxedGenerator;
}

pub type BoxedGenerator = Box<dyn BitGenerator>;

impl Clone for BoxedGenerator {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn BitGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitGenerator")
            .field("min", &self.min())
            .field("max", &self.max())
            .finish_non_exhaustive()
    }
}

/// Wraps a statically typed [`Engine`] as a [`BitGenerator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorAdapter<E> {
    engine: E,
}

impl<E: Engine> GeneratorAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Collect `bits` uniformly distributed bits from raw outputs.
    ///
    /// Each raw value contributes the bits of the largest power-of-two
    /// span that fits the engine range. Values above that span are
    /// rejected.
    fn uniform_bits(&mut self, bits: u32) -> u64 {
        let range = E::MAX.wrapping_sub(E::MIN).wrapping_add(1);
        if range == 0 {
            let raw = self.engine.next_value();
            return if bits >= 64 { raw } else { raw & ((1 << bits) - 1) };
        }

        let width = 63 - range.leading_zeros();
        let span = 1u64 << width;
        let mut acc = 0u64;
        let mut filled = 0;
        while filled < bits {
            let value = self.engine.next_value() - E::MIN;
            if value >= span {
                continue;
            }
            let take = width.min(bits - filled);
            acc |= (value & ((1 << take) - 1)) << filled;
            filled += take;
        }
        acc
    }
}

impl<E: Engine> RngCore for GeneratorAdapter<E> {
    fn next_u32(&mut self) -> u32 {
        self.uniform_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.uniform_bits(64)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<E: Engine> BitGenerator for GeneratorAdapter<E> {
    fn min(&self) -> u64 {
        E::MIN
    }

    fn max(&self) -> u64 {
        E::MAX
    }

    fn next_value(&mut self) -> u64 {
        self.engine.next_value()
    }

    fn reseed(&mut self, seeds: &SeedSequence) {
        self.engine.reseed(seeds);
    }

    fn clone_box(&self) -> BoxedGenerator {
        Box::new(self.clone())
    }
}

pub type GeneratorRegistry = Registry<BoxedGenerator>;

static GENERATORS: LazyLock<GeneratorRegistry> = LazyLock::new(|| {
    let mut registry = Registry::new();
    register_builtin_generators(&mut registry);
    tracing::debug!(count = registry.len(), "registered built-in generators");
    registry
});

/// Process-wide generator registry, populated on first access.
pub fn generator_registry() -> &'static GeneratorRegistry {
    &GENERATORS
}

/// Register every built-in engine under its canonical name.
pub fn register_builtin_generators(registry: &mut GeneratorRegistry) {
    registry
        .register("minstd_rand", boxed::<MinStdRand>)
        .register("minstd_rand0", boxed::<MinStdRand0>)
        .register("mt19937", boxed::<Mt19937>)
        .register("mt19937_64", boxed::<Mt19937_64>)
        .register("ranlux24_base", boxed::<Ranlux24Base>)
        .register("ranlux48_base", boxed::<Ranlux48Base>)
        .register("knuth_b", boxed::<KnuthB>)
        .register("std_rng", boxed::<StdEngine>)
        .register("chacha8_rng", boxed::<ChaCha8Engine>)
        .register("chacha12_rng", boxed::<ChaCha12Engine>)
        .register("chacha20_rng", boxed::<ChaCha20Engine>);
}

fn boxed<E: Engine>() -> BoxedGenerator {
    Box::new(GeneratorAdapter::<E>::default())
}
