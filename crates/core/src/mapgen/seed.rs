//! Seeded random source threaded through every generation stage.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Seeds used by consecutive levels are this far apart.
pub const LEVEL_SEED_STRIDE: u64 = 1000;

pub struct GenRng {
    inner: ChaCha8Rng,
}

impl GenRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        ((u128::from(self.inner.next_u64()) * bound as u128) >> 64) as usize
    }

    pub fn range_inclusive(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        min_value + self.below(max_value - min_value + 1)
    }

    /// True with probability `numerator / denominator`.
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        denominator > 0 && (self.below(denominator as usize) as u32) < numerator
    }

    pub fn coin_flip(&mut self) -> bool {
        self.inner.next_u64() & 1 == 0
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let swap_with = self.below(index + 1);
            items.swap(index, swap_with);
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }
}

pub fn attempt_seed(base_seed: u64, attempt_index: u32) -> u64 {
    base_seed.wrapping_add(u64::from(attempt_index))
}

pub fn level_seed(level: u32) -> u64 {
    u64::from(level).wrapping_mul(LEVEL_SEED_STRIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_inclusive_stays_inside_requested_bounds() {
        let mut rng = GenRng::from_seed(12_345);
        for _ in 0..500 {
            let value = rng.range_inclusive(7, 13);
            assert!((7..=13).contains(&value));
        }
        assert_eq!(rng.range_inclusive(4, 4), 4);
    }

    #[test]
    fn same_seed_replays_the_same_stream() {
        let mut left = GenRng::from_seed(99);
        let mut right = GenRng::from_seed(99);
        let left_values: Vec<_> = (0..32).map(|_| left.below(1_000)).collect();
        let right_values: Vec<_> = (0..32).map(|_| right.below(1_000)).collect();
        assert_eq!(left_values, right_values);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = GenRng::from_seed(7);
        let mut values: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut values);
        assert_ne!(values, (0..50).collect::<Vec<_>>(), "50 items should not stay in order");
        values.sort_unstable();
        assert_eq!(values, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn chance_respects_its_extremes() {
        let mut rng = GenRng::from_seed(3);
        assert!((0..100).all(|_| rng.chance(5, 5)));
        assert!((0..100).all(|_| !rng.chance(0, 5)));
        assert!(!rng.chance(1, 0));
    }

    #[test]
    fn pick_on_empty_slice_is_none() {
        let mut rng = GenRng::from_seed(1);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert_eq!(rng.pick(&[42]), Some(&42));
    }

    #[test]
    fn level_and_attempt_seeds_follow_the_stride() {
        assert_eq!(level_seed(1), 1_000);
        assert_eq!(level_seed(3), 3_000);
        assert_eq!(attempt_seed(level_seed(2), 4), 2_004);
        assert_eq!(attempt_seed(u64::MAX, 1), 0);
    }
}
