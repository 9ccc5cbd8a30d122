use chrono::{DateTime, NaiveDate, Utc};
use common::types::{Outcome, Recommendation};
use serde::{Deserialize, Serialize};

/// One settled trade, synthetic or normalized from the live data source.
/// Field names on the wire match what the dashboard SPA expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub market: String,
    pub outcome: Outcome,
    pub pnl: f64,
    pub roi: f64,
    pub position_size: f64,
    pub timestamp: DateTime<Utc>,
    /// Running total at the time this trade settled (chronological order).
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: f64,
}

/// Aggregate statistics over one trade history.
///
/// Invariants: `win_rate` ∈ [0, 100], `max_drawdown` ≥ 0. An empty history
/// yields the all-zero value, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
    #[serde(rename = "avgROI")]
    pub avg_roi: f64,
    pub max_drawdown: f64,
    pub return_volatility: f64,
    #[serde(rename = "topTradePnL")]
    pub top_trade_pnl: f64,
    pub active_days: u32,
    pub total_trades: u32,
}

/// The five component scores, each in [0, 100]. `volatility` is
/// badness-oriented (higher = more volatile) and is inverted when folded
/// into the composite Follow Score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub consistency: u8,
    pub risk: u8,
    pub accuracy: u8,
    pub volatility: u8,
    pub discipline: u8,
}

/// One point of the cumulative PnL curve handed to the chart layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    pub date: NaiveDate,
    #[serde(rename = "cumulativePnL")]
    pub cumulative_pnl: f64,
}

/// Final output of one `analyze` call. Pure value object: constructed once,
/// never mutated, serialized as-is for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub wallet: String,
    pub follow_score: u8,
    pub recommendation: Recommendation,
    pub summary: String,
    pub scores: ComponentScores,
    pub metrics: TradeMetrics,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Newest first, at most 10.
    pub recent_trades: Vec<Trade>,
    /// Oldest first, at most 30.
    pub pnl_history: Vec<PnlPoint>,
}
