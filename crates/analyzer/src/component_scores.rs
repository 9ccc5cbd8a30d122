use crate::analysis::{ComponentScores, Trade, TradeMetrics};

/// Minimum history before a scorer commits to an opinion; below it the score
/// is a neutral 50.
const MIN_TRADES_CONSISTENCY: usize = 5;
const MIN_TRADES_DISCIPLINE: usize = 5;
const MIN_TRADES_RISK: usize = 3;
const MIN_TRADES_ACCURACY: usize = 3;
const MIN_TRADES_VOLATILITY: usize = 3;
const NEUTRAL: u8 = 50;

const SECS_PER_DAY: f64 = 86_400.0;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

fn finish(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}

/// Stability of PnL and trading cadence, penalized for reliance on a single
/// outlier trade. Blend: 0.4 inverse coefficient-of-variation, 0.3 top-trade
/// dependency, 0.3 interval regularity.
pub fn consistency_score(trades: &[Trade], metrics: &TradeMetrics) -> u8 {
    if trades.len() < MIN_TRADES_CONSISTENCY {
        return NEUTRAL;
    }

    let pnls: Vec<f64> = trades.iter().map(|t| t.pnl).collect();
    let pnl_mean = mean(&pnls);
    let cv = if pnl_mean != 0.0 {
        (std_dev(&pnls) / pnl_mean).abs()
    } else {
        1.0
    };

    let top_share = metrics.top_trade_pnl / metrics.total_pnl.max(1.0);
    let dependency_penalty = (top_share * 30.0).min(30.0);

    let gaps: Vec<f64> = trades
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_seconds() as f64)
        .collect();
    let regularity = (100.0 - std_dev(&gaps) / SECS_PER_DAY * 10.0).max(0.0);

    finish(
        (100.0 - cv * 20.0) * 0.4 + (100.0 - dependency_penalty) * 0.3 + regularity * 0.3,
    )
}

/// Position-sizing sanity. Penalizes erratic sizing, the largest position
/// relative to average, the share of >2x-average "all in" trades, and deep
/// drawdowns. Strictly non-increasing in max drawdown.
pub fn risk_score(trades: &[Trade], metrics: &TradeMetrics) -> u8 {
    if trades.len() < MIN_TRADES_RISK {
        return NEUTRAL;
    }

    let sizes: Vec<f64> = trades.iter().map(|t| t.position_size).collect();
    let avg_size = mean(&sizes);
    let size_cv = if avg_size > 0.0 {
        std_dev(&sizes) / avg_size
    } else {
        0.0
    };
    let sizing_score = (100.0 - size_cv * 50.0).max(0.0);

    let max_size = sizes.iter().fold(0.0_f64, |a, &b| a.max(b));
    let overexposure = if avg_size > 0.0 { max_size / avg_size } else { 1.0 };
    let overexposure_score = (100.0 - (overexposure - 1.0) * 30.0).max(0.0);

    let all_in_share =
        sizes.iter().filter(|&&s| s > avg_size * 2.0).count() as f64 / sizes.len() as f64;
    let all_in_score = (100.0 - all_in_share * 200.0).max(0.0);

    let drawdown_penalty = (metrics.max_drawdown * 1.5).min(50.0);

    finish(
        sizing_score * 0.3
            + overexposure_score * 0.25
            + all_in_score * 0.25
            + (100.0 - drawdown_penalty) * 0.2,
    )
}

/// Win rate blended with profit factor (total winning ROI magnitude over
/// total losing ROI magnitude). Profit factor defaults to 2 when there are
/// wins but no losses and 1 when there is neither.
pub fn accuracy_score(trades: &[Trade]) -> u8 {
    if trades.len() < MIN_TRADES_ACCURACY {
        return NEUTRAL;
    }

    let wins = trades.iter().filter(|t| t.outcome.is_win()).count() as f64;
    let win_fraction = wins / trades.len() as f64;

    let winning_roi: f64 = trades
        .iter()
        .filter(|t| t.outcome.is_win())
        .map(|t| t.roi.abs())
        .sum();
    let losing_roi: f64 = trades
        .iter()
        .filter(|t| !t.outcome.is_win())
        .map(|t| t.roi.abs())
        .sum();
    let profit_factor = if losing_roi > 0.0 {
        winning_roi / losing_roi
    } else if winning_roi > 0.0 {
        2.0
    } else {
        1.0
    };

    finish(win_fraction * 60.0 + (profit_factor * 20.0).min(40.0))
}

/// Badness-oriented: higher = more volatile. Folded into the composite as
/// `100 - volatility`.
pub fn volatility_score(trades: &[Trade], metrics: &TradeMetrics) -> u8 {
    if trades.len() < MIN_TRADES_VOLATILITY {
        return NEUTRAL;
    }

    let volatility_normalized = (metrics.return_volatility / 50.0).min(1.0);
    let drawdown_factor = (metrics.max_drawdown / 50.0).min(1.0);

    finish((volatility_normalized * 0.6 + drawdown_factor * 0.4) * 100.0)
}

/// Adherence to steady sizing, avoidance of oversized losers, and not
/// cashing winners out for crumbs.
pub fn discipline_score(trades: &[Trade]) -> u8 {
    if trades.len() < MIN_TRADES_DISCIPLINE {
        return NEUTRAL;
    }

    let sizes: Vec<f64> = trades.iter().map(|t| t.position_size).collect();
    let avg_size = mean(&sizes);
    let size_cv = if avg_size > 0.0 {
        std_dev(&sizes) / avg_size
    } else {
        0.0
    };
    let size_consistency = (1.0 - size_cv).max(0.0);

    let large_loss_share = trades
        .iter()
        .filter(|t| t.pnl < -avg_size * 0.5)
        .count() as f64
        / trades.len() as f64;

    let win_count = trades.iter().filter(|t| t.outcome.is_win()).count();
    let small_wins = trades
        .iter()
        .filter(|t| t.outcome.is_win() && t.pnl < avg_size * 0.2)
        .count();
    let premature_share = if win_count > 0 {
        small_wins as f64 / win_count as f64
    } else {
        0.0
    };

    finish(
        size_consistency * 40.0 + (1.0 - large_loss_share) * 35.0 + (1.0 - premature_share) * 25.0,
    )
}

/// Run all five scorers over one history.
pub fn compute_component_scores(trades: &[Trade], metrics: &TradeMetrics) -> ComponentScores {
    ComponentScores {
        consistency: consistency_score(trades, metrics),
        risk: risk_score(trades, metrics),
        accuracy: accuracy_score(trades),
        volatility: volatility_score(trades, metrics),
        discipline: discipline_score(trades),
    }
}
