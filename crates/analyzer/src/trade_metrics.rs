use std::collections::HashSet;

use crate::analysis::{Trade, TradeMetrics};

/// Round half away from zero to 2 decimals (currency amounts).
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round half away from zero to 1 decimal (percentages).
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Derive aggregate statistics from a trade history.
///
/// `trades` MUST be in chronological (oldest-first) order: the drawdown walk
/// tracks a running peak and silently produces garbage on a reversed
/// sequence. An empty history yields the all-zero metrics.
pub fn compute_metrics(trades: &[Trade]) -> TradeMetrics {
    if trades.is_empty() {
        return TradeMetrics::default();
    }

    let total = trades.len() as f64;
    let wins = trades.iter().filter(|t| t.outcome.is_win()).count() as f64;
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();
    let mean_roi = trades.iter().map(|t| t.roi).sum::<f64>() / total;

    // Peak starts at -inf, not 0: a path that opens negative must not have
    // its first recovery mistaken for "no drawdown yet". Drawdown is only
    // defined while the peak is positive.
    let mut peak = f64::NEG_INFINITY;
    let mut max_drawdown = 0.0_f64;
    let mut cumulative = 0.0_f64;
    for trade in trades {
        cumulative += trade.pnl;
        if cumulative > peak {
            peak = cumulative;
        }
        if peak > 0.0 {
            let drawdown = (peak - cumulative) / peak * 100.0;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    let variance =
        trades.iter().map(|t| (t.roi - mean_roi).powi(2)).sum::<f64>() / total;

    let top_trade_pnl = trades
        .iter()
        .map(|t| t.pnl)
        .fold(f64::NEG_INFINITY, f64::max);

    let active_days = trades
        .iter()
        .map(|t| t.timestamp.date_naive())
        .collect::<HashSet<_>>()
        .len() as u32;

    TradeMetrics {
        total_pnl: round2(total_pnl),
        win_rate: round1(wins / total * 100.0),
        avg_roi: round1(mean_roi),
        max_drawdown: round1(max_drawdown),
        return_volatility: round1(variance.sqrt()),
        top_trade_pnl,
        active_days,
        total_trades: trades.len() as u32,
    }
}
