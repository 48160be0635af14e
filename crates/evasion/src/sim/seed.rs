use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Reproducible per-run seed: run `index` of a batch started with `seed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunToken {
    pub seed: u64,
    pub index: u64,
}

impl RunToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Independent stream for one purpose (placement, motion, ...) of this run.
    pub fn rng(self, stream: u64) -> StdRng {
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(mix(k ^ stream.wrapping_mul(0xd6e8feb86659fd93)))
    }
}

// SplitMix64 finalizer.
fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}
