// src/random.rs

use rand::Rng;

/// Source of uniform floats in `[0, 1)`.
///
/// Every `rand::Rng` is one, so a seeded `StdRng` gives reproducible drawings.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`, exactly `low` when both bounds are equal.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
