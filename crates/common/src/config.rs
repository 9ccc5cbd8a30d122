use anyhow::Result;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: General,
    pub data_api: DataApi,
    pub synthesis: Synthesis,
    pub scoring: Scoring,
    pub recommendation: Recommendation,
    pub observability: Observability,
    pub web: Option<Web>,
}

#[derive(Debug, Deserialize)]
pub struct General {
    /// "synthetic" never touches the network; "hybrid" tries the live trade
    /// API first and falls back to the synthetic generator.
    pub mode: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct DataApi {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Synthesis {
    /// "stable" or "time-salted". Stable keeps analyze idempotent per wallet.
    pub seed_mode: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Scoring {
    pub consistency_weight: f64,
    pub risk_weight: f64,
    pub accuracy_weight: f64,
    pub volatility_weight: f64,
    pub discipline_weight: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Recommendation {
    pub follow_min_score: u8,
    pub follow_min_risk: u8,
    pub follow_min_consistency: u8,
    pub caution_min_score: u8,
    pub caution_max_drawdown_pct: f64,
    pub caution_max_top_trade_share: f64,
}

#[derive(Debug, Deserialize)]
pub struct Observability {
    pub prometheus_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Web {
    pub port: u16,
    pub host: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let content = std::fs::read_to_string("config/default.toml")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
