// Source of uniform random draws for particle creation. Swappable so tests can
// replay exact trajectories.

use rand::rngs::ThreadRng;
use rand::Rng;

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator.
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

pub type ThreadRandom = RngSource<ThreadRng>;

pub fn thread_random() -> ThreadRandom {
    RngSource(rand::thread_rng())
}
