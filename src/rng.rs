//! The RNG collaborator contract (§6), used by [`getRandom`](crate::table::AtomTable::get_random).

/// A source of uniform random integers in `[0, n)`.
pub trait Rng {
    /// Draws a uniform value in `[0, n)`. `n` is always `> 0` when called
    /// by the core.
    fn randint(&mut self, n: usize) -> usize;
}

/// Adapts any [`rand::Rng`] to the core's narrow [`Rng`] contract.
#[derive(Debug)]
pub struct RandRng<R>(pub R);

impl<R: rand::Rng> Rng for RandRng<R> {
    fn randint(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rand_adapter_stays_in_range() {
        let mut rng = RandRng(rand::thread_rng());
        for _ in 0..100 {
            assert!(rng.randint(7) < 7);
        }
    }
}
