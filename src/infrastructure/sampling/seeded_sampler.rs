use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic sampler over a ChaCha8 stream.
///
/// The draw is fully pinned down so outputs are portable:
/// - stream: `ChaCha8Rng::seed_from_u64(seed)`, consumed with `next_u64`
/// - index in `[0, n)`: Lemire's widening multiply with rejection
/// - `k` of `n`: forward partial Fisher-Yates, first `k` slots in draw order
pub struct SeededSampler {
    rng: ChaCha8Rng,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[0, bound)`; `bound` must be non-zero
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "bound must be non-zero");
        let mut product = u128::from(self.rng.next_u64()) * u128::from(bound);
        let mut low = product as u64;
        if low < bound {
            let threshold = bound.wrapping_neg() % bound;
            while low < threshold {
                product = u128::from(self.rng.next_u64()) * u128::from(bound);
                low = product as u64;
            }
        }
        (product >> 64) as u64
    }

    /// `k` distinct positions out of `0..n`, in draw order. `k` is capped at `n`.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut slots: Vec<usize> = (0..n).collect();
        self.partial_shuffle(&mut slots, k);
        slots.truncate(k);
        slots
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let n = items.len();
        self.partial_shuffle(items, n);
    }

    fn partial_shuffle<T>(&mut self, items: &mut [T], k: usize) {
        let n = items.len();
        for i in 0..k {
            let j = i + self.below((n - i) as u64) as usize;
            items.swap(i, j);
        }
    }
}
