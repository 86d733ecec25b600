//! Seeded linear congruential generator.
//!
//! Every k-means run owns a fresh generator starting from the same seed, so
//! identical inputs always produce identical palettes.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233280;

#[derive(Debug, Clone)]
pub struct LcgRng {
    seed: u64,
}

impl LcgRng {
    pub fn new() -> Self {
        Self { seed: 0 }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.seed = (self.seed * MULTIPLIER + INCREMENT) % MODULUS;
        self.seed as f64 / MODULUS as f64
    }

    /// Uniform index in `0..len`, as `floor(next_f64() * len)`.
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64).floor() as usize
    }
}

impl Default for LcgRng {
    fn default() -> Self {
        Self::new()
    }
}
