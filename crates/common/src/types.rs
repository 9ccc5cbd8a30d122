use serde::{Deserialize, Serialize};

/// Which side of a settled trade the trader ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Loss => "LOSS",
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Self::Win)
    }
}

/// Terminal verdict of an analysis. Pure classification, no transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Follow,
    Caution,
    DoNotFollow,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "FOLLOW",
            Self::Caution => "CAUTION",
            Self::DoNotFollow => "DO_NOT_FOLLOW",
        }
    }
}

/// Seed derivation policy. Stable is the default; time-salted mixes an hourly
/// bucket into the hash and intentionally gives up per-call idempotence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    #[default]
    Stable,
    TimeSalted,
}

impl SeedMode {
    /// Parse the `synthesis.seed_mode` config string; unknown values fall
    /// back to Stable so a typo cannot silently enable the salted mode.
    pub fn from_config_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("time-salted") {
            Self::TimeSalted
        } else {
            Self::Stable
        }
    }
}

/// Trade-like record from the live Data API /trades endpoint. Every field is
/// optional: the payload shape is not under our control and anything missing
/// just disqualifies the record during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTrade {
    #[serde(rename = "proxyWallet")]
    pub proxy_wallet: Option<String>,
    pub market: Option<String>,
    pub title: Option<String>,
    pub outcome: Option<String>,
    pub pnl: Option<f64>,
    pub roi: Option<f64>,
    pub size: Option<String>,
    pub price: Option<String>,
    pub timestamp: Option<i64>,
}

/// The /trades endpoint has been observed returning both a bare array and a
/// wrapper object; accept either.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiTradeResponse {
    Wrapped { trades: Vec<ApiTrade> },
    Bare(Vec<ApiTrade>),
}

impl ApiTradeResponse {
    pub fn into_trades(self) -> Vec<ApiTrade> {
        match self {
            Self::Wrapped { trades } => trades,
            Self::Bare(trades) => trades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Win.as_str(), "WIN");
        assert_eq!(Outcome::Loss.as_str(), "LOSS");
        assert!(Outcome::Win.is_win());
        assert!(!Outcome::Loss.is_win());
    }

    #[test]
    fn test_recommendation_serializes_screaming_snake() {
        let json = serde_json::to_string(&Recommendation::DoNotFollow).unwrap();
        assert_eq!(json, "\"DO_NOT_FOLLOW\"");
        assert_eq!(Recommendation::Follow.as_str(), "FOLLOW");
    }

    #[test]
    fn test_seed_mode_parse() {
        assert_eq!(SeedMode::from_config_str("stable"), SeedMode::Stable);
        assert_eq!(
            SeedMode::from_config_str("time-salted"),
            SeedMode::TimeSalted
        );
        assert_eq!(SeedMode::from_config_str("Time-Salted"), SeedMode::TimeSalted);
        // Unknown strings must not enable the salted mode.
        assert_eq!(SeedMode::from_config_str("salted??"), SeedMode::Stable);
    }

    #[test]
    fn test_parse_bare_trade_array() {
        let body = r#"[{"proxyWallet":"0xabc","title":"Fed Rate Decision","pnl":12.5,"roi":25.0,"size":"50","price":"0.5","timestamp":1700000000}]"#;
        let resp: ApiTradeResponse = serde_json::from_str(body).unwrap();
        let trades = resp.into_trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].title.as_deref(), Some("Fed Rate Decision"));
        assert_eq!(trades[0].timestamp, Some(1_700_000_000));
    }

    #[test]
    fn test_parse_wrapped_trade_array() {
        let body = r#"{"trades":[{"pnl":-3.0,"timestamp":1700000000}]}"#;
        let resp: ApiTradeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.into_trades().len(), 1);
    }
}
