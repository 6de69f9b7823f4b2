use super::Engine;
use crate::SeedSequence;

macro_rules! mersenne_twister {
    (
        $(#[$meta:meta])*
        $name:ident: $word:ty {
            n: $n:expr, m: $m:expr, r: $r:expr, a: $a:expr,
            u: $u:expr, d: $d:expr, s: $s:expr, b: $b:expr,
            t: $t:expr, c: $c:expr, l: $l:expr, f: $f:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            state: [$word; $n],
            index: usize,
        }

        impl $name {
            pub const DEFAULT_SEED: $word = 5489;
            const UPPER_MASK: $word = <$word>::MAX << $r;
            const LOWER_MASK: $word = !Self::UPPER_MASK;

            pub fn new(seed: $word) -> Self {
                let mut state = [0; $n];
                state[0] = seed;
                for i in 1..$n {
                    let prev = state[i - 1];
                    state[i] = ($f as $word)
                        .wrapping_mul(prev ^ (prev >> (<$word>::BITS - 2)))
                        .wrapping_add(i as $word);
                }
                Self { state, index: $n }
            }

            fn twist(&mut self) {
                for i in 0..$n {
                    let y = (self.state[i] & Self::UPPER_MASK)
                        | (self.state[(i + 1) % $n] & Self::LOWER_MASK);
                    let mut next = self.state[(i + $m) % $n] ^ (y >> 1);
                    if y & 1 != 0 {
                        next ^= $a;
                    }
                    self.state[i] = next;
                }
                self.index = 0;
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(Self::DEFAULT_SEED)
            }
        }

        impl Engine for $name {
            const MIN: u64 = 0;
            const MAX: u64 = <$word>::MAX as u64;

            fn next_value(&mut self) -> u64 {
                if self.index >= $n {
                    self.twist();
                }
                let mut z = self.state[self.index];
                self.index += 1;
                z ^= (z >> $u) & $d;
                z ^= (z << $s) & $b;
                z ^= (z << $t) & $c;
                z ^= z >> $l;
                z as u64
            }

            fn reseed(&mut self, seeds: &SeedSequence) {
                const WORDS: usize = (<$word>::BITS / 32) as usize;
                let mut words = vec![0u32; $n * WORDS];
                seeds.generate(&mut words);
                for (slot, chunk) in self.state.iter_mut().zip(words.chunks(WORDS)) {
                    *slot = chunk
                        .iter()
                        .enumerate()
                        .fold(0, |acc, (j, &w)| acc | ((w as $word) << (32 * j)));
                }
                if self.state[0] & Self::UPPER_MASK == 0
                    && self.state[1..].iter().all(|&x| x == 0)
                {
                    self.state[0] = 1 << (<$word>::BITS - 1);
                }
                self.index = $n;
            }
        }
    };
}

mersenne_twister! {
    /// 32-bit Mersenne Twister.
    Mt19937: u32 {
        n: 624, m: 397, r: 31, a: 0x9908_B0DF,
        u: 11, d: 0xFFFF_FFFF, s: 7, b: 0x9D2C_5680,
        t: 15, c: 0xEFC6_0000, l: 18, f: 1_812_433_253u32,
    }
}

mersenne_twister! {
    /// 64-bit Mersenne Twister.
    Mt19937_64: u64 {
        n: 312, m: 156, r: 31, a: 0xB502_6F5A_A966_19E9,
        u: 29, d: 0x5555_5555_5555_5555, s: 17, b: 0x71D6_7FFF_EDA6_0000,
        t: 37, c: 0xFFF7_EEE0_0000_0000, l: 43, f: 6_364_136_223_846_793_005u64,
    }
}
