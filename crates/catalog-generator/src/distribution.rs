//! Random sampling primitives shared by every entity generator.
//!
//! A [`Distribution`] wraps a seeded [`StdRng`]. One instance is created per
//! run and passed by `&mut` into each generator, so two runs with the same
//! seed and configuration produce identical data, UUIDs included.

use catalog_core::CountRange;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Seeded source of every random decision made during generation.
pub struct Distribution {
    seed: u64,
    rng: StdRng,
}

impl Distribution {
    /// Create a distribution from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a distribution from `seed`, drawing a fresh one when absent.
    ///
    /// The seed actually used is available through [`Distribution::seed`] so
    /// that an unseeded run can still be replayed.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_seed(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Integer in `[min, max]`, both inclusive. Returns `min` when `max < min`.
    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// Real number in `[min, max)`. Returns `min` when the interval is empty.
    pub fn uniform_double(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// True with probability `percentage / 100`.
    pub fn weighted_boolean(&mut self, percentage: u8) -> bool {
        self.rng.random_range(0..100u8) < percentage
    }

    /// Child count for one parent, sampled from an inclusive range.
    pub fn count_in(&mut self, range: CountRange) -> u32 {
        self.uniform_int(i64::from(range.min), i64::from(range.max)) as u32
    }

    /// Uniformly chosen element of `items`.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn choose_one<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Element chosen with probability proportional to its weight.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty or every weight is zero.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(u32, T)]) -> &'a T {
        let total: u32 = items.iter().map(|(weight, _)| weight).sum();
        let mut ticket = self.rng.random_range(0..total);
        for (weight, item) in items {
            if ticket < *weight {
                return item;
            }
            ticket -= weight;
        }
        unreachable!("ticket is always below the total weight")
    }

    /// `count` distinct elements of `items` in random order.
    ///
    /// Shuffles a copy and takes a prefix, so the result never contains the
    /// same element twice. `count` is clamped to `items.len()`.
    pub fn sample_distinct<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        pool.shuffle(&mut self.rng);
        pool.truncate(count);
        pool
    }

    /// Random version-4 UUID drawn from this distribution.
    pub fn uuid_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);

        // Set version (4) and variant (RFC 4122) bits
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        Uuid::from_bytes(bytes)
    }
}

/// Half-up rounding to `places` decimal places.
pub fn round(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale + 0.5).floor() / scale
}

impl std::fmt::Debug for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Distribution")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
