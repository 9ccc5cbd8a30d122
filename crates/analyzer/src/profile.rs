use crate::seed::SeededRng;

/// Latent parameters behind one synthetic trader. Created once per analysis
/// from the seed, immutable, never persisted.
///
/// Skill correlates positively with consistency, discipline, and risk
/// tolerance: a skilled profile should not read as reckless. Trade frequency
/// and position size are independent of skill.
#[derive(Debug, Clone)]
pub struct TraderProfile {
    pub skill_level: f64,
    pub risk_tolerance: f64,
    pub consistency: f64,
    pub discipline: f64,
    /// Number of trades to synthesize, 20..=99.
    pub trading_frequency: u32,
    /// Mean position size in currency units, 50..<500.
    pub avg_position_size: f64,
}

/// Draw order is fixed and load-bearing for reproducibility: skill, risk
/// jitter, frequency, position size.
pub fn synthesize_profile(seed: u32) -> TraderProfile {
    let mut rng = SeededRng::new(seed);
    let skill_level = rng.next_f64();
    TraderProfile {
        skill_level,
        risk_tolerance: 0.3 + skill_level * 0.3 + rng.next_f64() * 0.2,
        consistency: 0.4 + skill_level * 0.5,
        discipline: 0.3 + skill_level * 0.6,
        trading_frequency: 20 + (rng.next_f64() * 80.0) as u32,
        avg_position_size: 50.0 + rng.next_f64() * 450.0,
    }
}
