use chrono::{DateTime, Duration, Utc};
use common::types::Outcome;

use crate::analysis::Trade;
use crate::profile::TraderProfile;
use crate::seed::SeededRng;
use crate::trade_metrics::{round1, round2};

/// Market labels assigned to synthetic trades, drawn uniformly.
const MARKETS: [&str; 18] = [
    "Presidential Election 2024",
    "Fed Rate Decision",
    "Bitcoin Price Target",
    "Super Bowl Winner",
    "Oscar Best Picture",
    "World Cup Champion",
    "Interest Rate Cut",
    "Unemployment Rate",
    "GDP Growth",
    "Inflation Target",
    "Tech Stock Rally",
    "Oil Price Movement",
    "Gold Price Target",
    "S&P 500 Level",
    "Climate Summit Outcome",
    "UN Resolution",
    "Trade Agreement",
    "Currency Pair",
];

/// Win probability = BASE + skill * SPREAD, so it stays in (0.35, 0.70).
const BASE_WIN_CHANCE: f64 = 0.35;
const WIN_CHANCE_SKILL_SPREAD: f64 = 0.35;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Synthesize the full trade history for a profile.
///
/// Uses a fresh PRNG over `seed + 1` so the trade stream is independent of
/// the profile draws. Trades come back in chronological (oldest-first)
/// synthesis order with timestamps walking backward from `now`; callers
/// reverse for presentation after metrics are computed.
pub fn synthesize_trades(seed: u32, profile: &TraderProfile, now: DateTime<Utc>) -> Vec<Trade> {
    let mut rng = SeededRng::new(seed.wrapping_add(1));
    let n = profile.trading_frequency;
    let win_chance = BASE_WIN_CHANCE + profile.skill_level * WIN_CHANCE_SKILL_SPREAD;

    let mut trades = Vec::with_capacity(n as usize);
    let mut cumulative_pnl = 0.0_f64;

    for i in 0..n {
        let outcome = if rng.next_f64() < win_chance {
            Outcome::Win
        } else {
            Outcome::Loss
        };
        let position_size = profile.avg_position_size * (0.5 + rng.next_f64());
        let multiplier = match outcome {
            Outcome::Win => 0.1 + rng.next_f64() * 0.9,
            Outcome::Loss => -(0.2 + rng.next_f64() * 0.8),
        };
        let pnl = round2(position_size * multiplier);
        cumulative_pnl += pnl;

        let market = MARKETS[(rng.next_f64() * MARKETS.len() as f64) as usize];
        // Earlier iterations sit further in the past; per-trade jitter keeps
        // the cadence irregular.
        let offset_days = f64::from(n - i) * (1.0 + rng.next_f64() * 2.0);
        let timestamp = now - Duration::milliseconds((offset_days * MS_PER_DAY) as i64);

        trades.push(Trade {
            id: format!("trade_{seed}_{i}"),
            market: market.to_string(),
            outcome,
            pnl,
            roi: round1(multiplier * 100.0),
            position_size,
            timestamp,
            cumulative_pnl,
        });
    }

    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::synthesize_profile;
    use crate::seed::hash_wallet;

    fn anchor() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sample(wallet: &str) -> Vec<Trade> {
        let seed = hash_wallet(wallet);
        let profile = synthesize_profile(seed);
        synthesize_trades(seed, &profile, anchor())
    }

    #[test]
    fn test_trade_count_matches_frequency() {
        let seed = hash_wallet("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e");
        let profile = synthesize_profile(seed);
        let trades = synthesize_trades(seed, &profile, anchor());
        assert_eq!(trades.len(), profile.trading_frequency as usize);
    }

    #[test]
    fn test_history_is_deterministic() {
        let a = sample("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e");
        let b = sample("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_wallets_diverge() {
        let a = sample("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e");
        let b = sample("0x0000000000000000000000000000000000000001");
        assert_ne!(a, b);
    }

    #[test]
    fn test_pnl_sign_matches_outcome() {
        for t in sample("0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef") {
            match t.outcome {
                Outcome::Win => {
                    assert!(t.pnl > 0.0, "winning trade with pnl {}", t.pnl);
                    assert!(t.roi > 0.0);
                }
                Outcome::Loss => {
                    assert!(t.pnl < 0.0, "losing trade with pnl {}", t.pnl);
                    assert!(t.roi < 0.0);
                }
            }
            assert!(t.position_size > 0.0);
            assert!(MARKETS.contains(&t.market.as_str()));
        }
    }

    #[test]
    fn test_cumulative_pnl_is_running_sum() {
        let trades = sample("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e");
        let mut sum = 0.0;
        for t in &trades {
            sum += t.pnl;
            assert!((t.cumulative_pnl - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_timestamps_precede_anchor() {
        for t in sample("0x742d35cc6634c0532925a3b844bc9e7595f2bd4e") {
            assert!(t.timestamp < anchor());
        }
    }

    #[test]
    fn test_roi_bounds_follow_multiplier_ranges() {
        for t in sample("0xcafebabecafebabecafebabecafebabecafebabe") {
            match t.outcome {
                Outcome::Win => assert!((10.0..=100.0).contains(&t.roi)),
                Outcome::Loss => assert!((-100.0..=-20.0).contains(&t.roi)),
            }
        }
    }
}
