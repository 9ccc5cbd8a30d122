use common::config;
use common::types::Recommendation;

use crate::analysis::{ComponentScores, TradeMetrics};

/// Weights for folding the five component scores into the Follow Score.
/// Volatility is badness-oriented, so its weight applies to `100 - v`.
#[derive(Debug, Clone, Copy)]
pub struct FollowWeights {
    pub consistency: f64,
    pub risk: f64,
    pub accuracy: f64,
    pub volatility: f64,
    pub discipline: f64,
}

impl Default for FollowWeights {
    fn default() -> Self {
        Self {
            consistency: 0.30,
            risk: 0.25,
            accuracy: 0.25,
            volatility: 0.10,
            discipline: 0.10,
        }
    }
}

impl FollowWeights {
    pub fn from_config(s: &config::Scoring) -> Self {
        Self {
            consistency: s.consistency_weight,
            risk: s.risk_weight,
            accuracy: s.accuracy_weight,
            volatility: s.volatility_weight,
            discipline: s.discipline_weight,
        }
    }
}

/// Guard thresholds for the three-way recommendation.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationThresholds {
    pub follow_min_score: u8,
    pub follow_min_risk: u8,
    pub follow_min_consistency: u8,
    pub caution_min_score: u8,
    pub caution_max_drawdown_pct: f64,
    pub caution_max_top_trade_share: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            follow_min_score: 75,
            follow_min_risk: 50,
            follow_min_consistency: 60,
            caution_min_score: 50,
            caution_max_drawdown_pct: 40.0,
            caution_max_top_trade_share: 0.50,
        }
    }
}

impl RecommendationThresholds {
    pub fn from_config(r: &config::Recommendation) -> Self {
        Self {
            follow_min_score: r.follow_min_score,
            follow_min_risk: r.follow_min_risk,
            follow_min_consistency: r.follow_min_consistency,
            caution_min_score: r.caution_min_score,
            caution_max_drawdown_pct: r.caution_max_drawdown_pct,
            caution_max_top_trade_share: r.caution_max_top_trade_share,
        }
    }
}

/// Weighted composite, rounded half away from zero, clamped to [0, 100].
pub fn compute_follow_score(scores: &ComponentScores, w: &FollowWeights) -> u8 {
    let raw = w.consistency * f64::from(scores.consistency)
        + w.risk * f64::from(scores.risk)
        + w.accuracy * f64::from(scores.accuracy)
        + w.volatility * f64::from(100_u8.saturating_sub(scores.volatility))
        + w.discipline * f64::from(scores.discipline);
    raw.round().clamp(0.0, 100.0) as u8
}

/// Classify the final score with guard conditions. Not a bare score cutoff:
/// FOLLOW additionally demands healthy risk and consistency, and CAUTION
/// refuses books that are one jackpot trade in a trench coat.
pub fn recommend(
    follow_score: u8,
    scores: &ComponentScores,
    metrics: &TradeMetrics,
    t: &RecommendationThresholds,
) -> Recommendation {
    if follow_score >= t.follow_min_score
        && scores.risk >= t.follow_min_risk
        && scores.consistency >= t.follow_min_consistency
    {
        return Recommendation::Follow;
    }

    let top_trade_share = metrics.top_trade_pnl / metrics.total_pnl.max(1.0);
    if follow_score >= t.caution_min_score
        && metrics.max_drawdown <= t.caution_max_drawdown_pct
        && top_trade_share <= t.caution_max_top_trade_share
    {
        return Recommendation::Caution;
    }

    Recommendation::DoNotFollow
}
