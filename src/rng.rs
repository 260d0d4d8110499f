//! Per-task random streams.
//!
//! Parallel work never shares a generator. Each task derives its own
//! `SmallRng` from a base seed and its index, so results are reproducible no
//! matter how rayon schedules the tasks.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Mix a base seed with a task index (SplitMix64 finalizer).
#[must_use]
pub fn task_seed(base: u64, index: u64) -> u64 {
    let mut z = base
        .wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Generator for task `index` of a batch seeded with `base`.
#[must_use]
pub fn task_rng(base: u64, index: u64) -> SmallRng {
    SmallRng::seed_from_u64(task_seed(base, index))
}
