//! Seed sequences for reproducible generator initialization.

use rand::Rng;

/// Ordered list of 32-bit seed words, expanded into engine state with the
/// standard seed-sequence mixing algorithm.
///
/// Two sequences with the same words always generate the same output, so
/// any engine reseeded from them produces the same future values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSequence {
    words: Vec<u32>,
}

impl SeedSequence {
    /// Number of words drawn by [`SeedSequence::from_entropy`].
    pub const ENTROPY_WORDS: usize = 8;

    pub fn new(words: impl IntoIterator<Item = u32>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    /// One-word sequence for an explicit scalar seed.
    pub fn from_seed(seed: u32) -> Self {
        Self { words: vec![seed] }
    }

    /// Sequence drawn from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        let mut rng = rand::thread_rng();
        Self::new((0..Self::ENTROPY_WORDS).map(|_| rng.gen::<u32>()))
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fill `dest` with well-mixed 32-bit values derived from the stored words.
    pub fn generate(&self, dest: &mut [u32]) {
        let n = dest.len();
        if n == 0 {
            return;
        }
        dest.fill(0x8b8b_8b8b);

        let s = self.words.len();
        let t = if n >= 623 {
            11
        } else if n >= 68 {
            7
        } else if n >= 39 {
            5
        } else if n >= 7 {
            3
        } else {
            (n - 1) / 2
        };
        let p = (n - t) / 2;
        let q = p + t;
        let m = (s + 1).max(n);

        for k in 0..m {
            let r1 = 1_664_525u32.wrapping_mul(scramble(
                dest[k % n] ^ dest[(k + p) % n] ^ dest[(k + n - 1) % n],
            ));
            let r2 = if k == 0 {
                r1.wrapping_add(s as u32)
            } else if k <= s {
                r1.wrapping_add((k % n) as u32)
                    .wrapping_add(self.words[k - 1])
            } else {
                r1.wrapping_add((k % n) as u32)
            };
            dest[(k + p) % n] = dest[(k + p) % n].wrapping_add(r1);
            dest[(k + q) % n] = dest[(k + q) % n].wrapping_add(r2);
            dest[k % n] = r2;
        }

        for k in m..m + n {
            let r3 = 1_566_083_941u32.wrapping_mul(scramble(
                dest[k % n]
                    .wrapping_add(dest[(k + p) % n])
                    .wrapping_add(dest[(k + n - 1) % n]),
            ));
            let r4 = r3.wrapping_sub((k % n) as u32);
            dest[(k + p) % n] ^= r3;
            dest[(k + q) % n] ^= r4;
            dest[k % n] = r4;
        }
    }

    /// Fill a byte seed from generated words, little-endian.
    pub fn generate_bytes(&self, dest: &mut [u8]) {
        let mut words = vec![0u32; dest.len().div_ceil(4)];
        self.generate(&mut words);
        for (chunk, word) in dest.chunks_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
        }
    }
}

fn scramble(x: u32) -> u32 {
    x ^ (x >> 27)
}
