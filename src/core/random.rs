use crate::domain::ports::RandomSource;
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Adapts any `rand` generator to [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ThreadRng> {
    /// Process-wide default source used outside of tests.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}
