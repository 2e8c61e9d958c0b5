//! Shared criterion settings and workload generators for the workspace benches.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

/// For workloads whose single iteration is already in the millisecond range,
/// e.g. linear-scan maps at the larger sizes.
pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

/// splitmix64 finalizer.
pub fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn seed_for_iter(base: u64, iter: u64) -> u64 {
    mix_seed(base ^ iter.wrapping_mul(SEED_MIX))
}

/// How the initial keys of a workload are ordered before insertion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyOrder {
    /// `0, 1, 2, ...`; the worst case for an unbalanced tree.
    Ascending,
    /// A seeded permutation of `0..size`.
    Shuffled,
}

impl KeyOrder {
    pub fn label(self) -> &'static str {
        match self {
            KeyOrder::Ascending => "ascending",
            KeyOrder::Shuffled => "shuffled",
        }
    }
}

/// `size` distinct keys spaced two apart, so odd probes always miss.
pub fn workload_keys(size: usize, order: KeyOrder, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..size as u64).map(|i| i * 2).collect();
    if order == KeyOrder::Shuffled {
        keys.shuffle(&mut StdRng::seed_from_u64(seed));
    }
    keys
}

/// A key inside the span of [`workload_keys`]; hits a stored key about half the time.
pub fn probe_key<R: Rng + ?Sized>(rng: &mut R, size: usize) -> u64 {
    rng.random_range(0..(size as u64 * 2).max(1))
}
