use chrono::{DateTime, Utc};
use common::types::SeedMode;

/// Hash a wallet identifier into a non-negative 32-bit seed.
///
/// Multiply-by-31 accumulation with wrapping 32-bit signed arithmetic, then
/// the absolute value. Pure function of the wallet string: the same wallet
/// always maps to the same seed within and across processes.
pub fn hash_wallet(wallet: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in wallet.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}

/// Derive the seed for one analysis run.
///
/// `Stable` is the hash unchanged. `TimeSalted` wrapping-adds the hour bucket
/// of the anchor time, so results drift between hours; callers opting into
/// that mode give up per-call idempotence.
pub fn wallet_seed(wallet: &str, mode: SeedMode, now: DateTime<Utc>) -> u32 {
    let hash = hash_wallet(wallet);
    match mode {
        SeedMode::Stable => hash,
        SeedMode::TimeSalted => {
            let bucket = now.timestamp().div_euclid(3600);
            hash.wrapping_add(bucket as u32)
        }
    }
}

/// Linear-congruential generator over the 233280 modulus.
///
/// Deliberately tiny: reproducibility matters here, statistical quality does
/// not. Each generation phase gets its own instance (profile uses `seed`,
/// trade synthesis uses `seed + 1`) so the phases draw independent streams.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;

    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Next draw in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }
}
