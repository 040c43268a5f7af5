use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform randomness used to lay out boards.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..bound`, `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        let pick = (self.uniform() * bound as f64) as usize;
        // rounding can land exactly on `bound`
        pick.min(bound - 1)
    }

    /// Fisher-Yates shuffle, every permutation is equally likely for a fair source.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// Adapts any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<SmallRng> {
    /// Reproducible source, equal seeds give equal boards.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
