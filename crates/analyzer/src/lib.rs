//! The PolyScope scoring engine.
//!
//! One public operation: [`Analyzer::analyze`] turns a wallet address into an
//! [`Analysis`]. The pipeline is wallet → seed → profile → trades → metrics →
//! component scores → Follow Score + recommendation → narrative. Every stage
//! is a pure function of the seed, so the whole run is reproducible; the only
//! non-determinism allowed in is the explicitly opt-in time-salted seed mode.
//!
//! The live data source is an optional collaborator: any failure there falls
//! back to the synthetic generator without surfacing an error.

pub mod analysis;
pub mod component_scores;
pub mod follow_score;
pub mod narrative;
pub mod profile;
pub mod seed;
pub mod synthesis;
pub mod trade_metrics;

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use common::config::Config;
use common::polymarket::TradeApiClient;
use common::types::{ApiTrade, Outcome, SeedMode};

use crate::analysis::{Analysis, PnlPoint, Trade};
use crate::component_scores::compute_component_scores;
use crate::follow_score::{
    compute_follow_score, recommend, FollowWeights, RecommendationThresholds,
};
use crate::narrative::{strengths_weaknesses, summary};
use crate::profile::synthesize_profile;
use crate::seed::wallet_seed;
use crate::synthesis::synthesize_trades;
use crate::trade_metrics::{compute_metrics, round1, round2};

const MAX_RECENT_TRADES: usize = 10;
const MAX_PNL_POINTS: usize = 30;

/// Engine knobs resolved from config (or defaults, for embedding in tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzerSettings {
    pub seed_mode: SeedMode,
    pub weights: FollowWeights,
    pub thresholds: RecommendationThresholds,
}

impl AnalyzerSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            seed_mode: SeedMode::from_config_str(&cfg.synthesis.seed_mode),
            weights: FollowWeights::from_config(&cfg.scoring),
            thresholds: RecommendationThresholds::from_config(&cfg.recommendation),
        }
    }
}

/// The engine. Cheap to clone; holds no mutable state, so concurrent
/// `analyze` calls are fully independent.
#[derive(Clone)]
pub struct Analyzer {
    settings: AnalyzerSettings,
    client: Option<Arc<TradeApiClient>>,
}

impl Analyzer {
    pub fn new(settings: AnalyzerSettings, client: Option<Arc<TradeApiClient>>) -> Self {
        Self { settings, client }
    }

    /// Fully offline engine; never touches the network.
    pub fn synthetic(settings: AnalyzerSettings) -> Self {
        Self::new(settings, None)
    }

    /// Build from config: `general.mode = "hybrid"` wires up the live trade
    /// client, anything else stays synthetic-only.
    pub fn from_config(cfg: &Config) -> Self {
        let client = if cfg.general.mode.eq_ignore_ascii_case("hybrid") {
            Some(Arc::new(TradeApiClient::new(
                &cfg.data_api.base_url,
                std::time::Duration::from_secs(cfg.data_api.timeout_secs),
                cfg.data_api.max_retries,
                std::time::Duration::from_millis(cfg.data_api.backoff_base_ms),
            )))
        } else {
            None
        };
        Self::new(AnalyzerSettings::from_config(cfg), client)
    }

    /// Analyze a wallet. Never fails: malformed addresses simply hash like
    /// any other string, and data-source trouble falls back to synthesis.
    ///
    /// The timestamp anchor is the current UTC midnight, so repeated calls
    /// within a calendar day are byte-identical under the stable seed mode.
    pub async fn analyze(&self, wallet: &str) -> Analysis {
        let anchor = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        self.analyze_at(wallet, anchor).await
    }

    /// Analyze against an explicit anchor time. This is the deterministic
    /// entry point tests and backfills use.
    pub async fn analyze_at(&self, wallet: &str, now: DateTime<Utc>) -> Analysis {
        if let Some(client) = &self.client {
            match client.fetch_trades(wallet).await {
                Ok(raw) => {
                    let trades = normalize_live_trades(raw);
                    if trades.is_empty() {
                        tracing::debug!(wallet, "live payload had no usable trades");
                    } else {
                        metrics::counter!("polyscope_live_data_hits_total").increment(1);
                        return self.analyze_trades(wallet, trades);
                    }
                }
                Err(e) => {
                    tracing::debug!(wallet, error = %e, "live trade fetch failed");
                }
            }
            metrics::counter!("polyscope_synthetic_fallbacks_total").increment(1);
        }

        let seed = wallet_seed(wallet, self.settings.seed_mode, now);
        let profile = synthesize_profile(seed);
        let trades = synthesize_trades(seed, &profile, now);
        self.analyze_trades(wallet, trades)
    }

    /// Score an already-assembled chronological trade history. Exposed so
    /// callers with their own data (and the tests) can drive the scoring
    /// stages directly.
    pub fn analyze_trades(&self, wallet: &str, trades: Vec<Trade>) -> Analysis {
        let span = tracing::info_span!("analyze", wallet, trades = trades.len());
        let _g = span.enter();

        let metrics = compute_metrics(&trades);
        let scores = compute_component_scores(&trades, &metrics);
        let follow_score = compute_follow_score(&scores, &self.settings.weights);
        let recommendation = recommend(follow_score, &scores, &metrics, &self.settings.thresholds);
        let (strengths, weaknesses) = strengths_weaknesses(&scores, &metrics);
        let summary = summary(follow_score, &metrics, &strengths);

        let history_start = trades.len().saturating_sub(MAX_PNL_POINTS);
        let pnl_history: Vec<PnlPoint> = trades[history_start..]
            .iter()
            .map(|t| PnlPoint {
                date: t.timestamp.date_naive(),
                cumulative_pnl: round2(t.cumulative_pnl),
            })
            .collect();

        // Presentation order is newest first; everything above ran on the
        // chronological sequence.
        let mut recent_trades = trades;
        recent_trades.reverse();
        recent_trades.truncate(MAX_RECENT_TRADES);

        Analysis {
            wallet: wallet.to_string(),
            follow_score,
            recommendation,
            summary,
            scores,
            metrics,
            strengths,
            weaknesses,
            recent_trades,
            pnl_history,
        }
    }
}

/// Turn tolerant API records into a chronological trade history. Records
/// missing a timestamp or PnL are skipped; if nothing survives, the caller
/// falls back to synthesis.
fn normalize_live_trades(raw: Vec<ApiTrade>) -> Vec<Trade> {
    let mut trades: Vec<Trade> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, t)| {
            let ts = t.timestamp?;
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            let pnl = round2(t.pnl?);
            let market = t
                .title
                .or(t.market)
                .unwrap_or_else(|| "Unknown Market".to_string());
            let size = t.size.as_deref().and_then(|s| s.parse::<f64>().ok());
            let price = t.price.as_deref().and_then(|s| s.parse::<f64>().ok());
            let position_size = match (size, price) {
                (Some(s), Some(p)) if s * p > 0.0 => s * p,
                _ => pnl.abs().max(1.0),
            };
            let roi = t
                .roi
                .unwrap_or_else(|| round1(pnl / position_size * 100.0));
            let outcome = match t.outcome.as_deref() {
                Some("WIN") => Outcome::Win,
                Some("LOSS") => Outcome::Loss,
                _ if pnl >= 0.0 => Outcome::Win,
                _ => Outcome::Loss,
            };
            Some(Trade {
                id: format!("live_{i}"),
                market,
                outcome,
                pnl,
                roi,
                position_size,
                timestamp,
                cumulative_pnl: 0.0,
            })
        })
        .collect();

    trades.sort_by_key(|t| t.timestamp);
    let mut cumulative = 0.0;
    for trade in &mut trades {
        cumulative += trade.pnl;
        trade.cumulative_pnl = round2(cumulative);
    }
    trades
}
