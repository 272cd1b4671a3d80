//! Splittable pseudo-random seeds.
//!
//! A [`Seed`] is four 32-bit words of xoshiro128** state. Every operation is a
//! pure function of those bits and returns a new seed rather than advancing
//! one in place, so a generator can hand independent streams to its parts by
//! [splitting](Seed::split) instead of threading a mutable RNG around.

use crate::error::{Error, Result};
use std::fmt;

/// Largest integer an `f64` represents exactly, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Smallest integer an `f64` represents exactly, `-(2^53 - 1)`.
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;
const GOLDEN_GAMMA: u32 = 0x9e37_79b9;

/// Jump polynomials equivalent to 2^64 calls to [`Seed::step`].
const JUMP: [u32; 4] = [0x8764_000b, 0xf542_d2d3, 0x6fa0_35c3, 0x77f2_db5b];

/// 2^32, the width of one scrambled output.
const OUTPUT_SPAN: f64 = 4_294_967_296.0;

/// Splittable random seed for deterministic test generation.
///
/// Seeds can be split to create independent random streams,
/// ensuring deterministic and reproducible test runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u32; 4]);

impl Seed {
    /// Use the given state words verbatim.
    ///
    /// The all-zero state is a fixed point of the generator and yields a
    /// constant stream; [`Seed::from_key`] and [`Seed::random`] never produce it.
    pub const fn from_words(words: [u32; 4]) -> Self {
        Seed(words)
    }

    /// Derive a seed from a textual key.
    ///
    /// The key's bytes are folded with FNV-1a, then four avalanche rounds each
    /// produce one state word. The same key always yields the same seed.
    pub fn from_key(key: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in key.bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }

        let mut words = [0; 4];
        for word in &mut words {
            hash = avalanche(hash);
            *word = hash;
        }
        Seed(words)
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        use rand::Rng;
        let mut words: [u32; 4] = rand::thread_rng().gen();
        if words == [0; 4] {
            words[0] = GOLDEN_GAMMA;
        }
        Seed(words)
    }

    /// The raw state words.
    pub fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Advance the state by one round without producing a number.
    pub fn step(self) -> Self {
        let [mut s0, mut s1, mut s2, mut s3] = self.0;
        let t = s1 << 9;

        s2 ^= s0;
        s3 ^= s1;
        s1 ^= s2;
        s0 ^= s3;
        s2 ^= t;
        s3 = s3.rotate_left(11);

        Seed([s0, s1, s2, s3])
    }

    /// Advance the state by 2^64 steps.
    pub fn jump(self) -> Self {
        let mut accumulated = [0_u32; 4];
        let mut current = self;

        for polynomial in JUMP {
            for bit in 0..32 {
                if polynomial & (1 << bit) != 0 {
                    for (acc, word) in accumulated.iter_mut().zip(current.0) {
                        *acc ^= word;
                    }
                }
                current = current.step();
            }
        }

        Seed(accumulated)
    }

    /// Split a seed into two independent seeds.
    ///
    /// The first is one step ahead, the second 2^64 steps ahead, so the two
    /// streams only meet again after exhausting the generator's period.
    pub fn split(self) -> (Self, Self) {
        (self.step(), self.jump())
    }

    /// The scrambled output of the current state.
    fn scramble(&self) -> u32 {
        self.0[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9)
    }

    /// A fraction in `[0, 1)` taken from the current state.
    pub fn next_unit(&self) -> f64 {
        f64::from(self.scramble()) / OUTPUT_SPAN
    }

    /// A number in `[range.min(), range.max()]`.
    pub fn next_num(&self, range: NumRange) -> f64 {
        let value = range.min + self.next_unit() * (range.max - range.min);
        value.min(range.max)
    }

    /// An integer uniformly chosen from the closed range, both endpoints included.
    pub fn next_int(&self, range: IntRange) -> i64 {
        let span = (i128::from(range.max) - i128::from(range.min) + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i128;
        let value = (i128::from(range.min) + offset).min(i128::from(range.max));
        // Clamped into [min, max] above, so the narrowing cannot truncate.
        value as i64
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [s0, s1, s2, s3] = self.0;
        write!(f, "Seed({s0:#010x}, {s1:#010x}, {s2:#010x}, {s3:#010x})")
    }
}

/// One xor/shift/add avalanche round.
fn avalanche(mut h: u32) -> u32 {
    h = h.wrapping_add(h << 10);
    h ^= h >> 6;
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h.wrapping_add(GOLDEN_GAMMA)
}

/// A closed floating point range, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumRange {
    min: f64,
    max: f64,
}

impl NumRange {
    /// Both bounds must be finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
                message: "bounds must be finite numbers".to_string(),
            });
        }
        if max < min {
            return Err(Error::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
                message: "max must not be less than min".to_string(),
            });
        }
        Ok(NumRange { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for NumRange {
    /// `[0, 1]`.
    fn default() -> Self {
        NumRange { min: 0.0, max: 1.0 }
    }
}

/// A closed integer range, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    /// Requires `min <= max`.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if max < min {
            return Err(Error::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
                message: "max must not be less than min".to_string(),
            });
        }
        Ok(IntRange { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Default for IntRange {
    /// `[MIN_SAFE_INTEGER, MAX_SAFE_INTEGER]`.
    fn default() -> Self {
        IntRange {
            min: MIN_SAFE_INTEGER,
            max: MAX_SAFE_INTEGER,
        }
    }
}
