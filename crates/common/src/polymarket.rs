use crate::types::{ApiTrade, ApiTradeResponse};
use reqwest::Url;
use std::time::Duration;

/// Errors from the live trade-history provider. Callers treat every variant
/// the same way (fall back to the synthetic generator), but the variants keep
/// log lines and tests precise.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("payload did not decode as trades: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("payload contained no trades")]
    Empty,
}

pub struct TradeApiClient {
    base_url: String,
    http: reqwest::Client,
    max_retries: u32,
    backoff_base: Duration,
}

impl TradeApiClient {
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32, backoff_base: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            max_retries,
            backoff_base,
        }
    }

    pub fn trades_url(&self, wallet: &str) -> String {
        match Url::parse(&format!("{}/trades", self.base_url)) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("wallet", wallet);
                url.to_string()
            }
            // A malformed base_url only shows up at request time as a
            // connection error, which callers already absorb.
            Err(_) => format!("{}/trades?wallet={wallet}", self.base_url),
        }
    }

    /// Fetch the wallet's trade history. Retries transient failures with
    /// linear backoff; a non-2xx status or empty/undecodable payload is an
    /// error like any other.
    pub async fn fetch_trades(&self, wallet: &str) -> Result<Vec<ApiTrade>, DataSourceError> {
        let url = self.trades_url(wallet);
        let mut last_err = DataSourceError::Empty;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(self.backoff_base * attempt).await;
            }
            match self.fetch_once(&url).await {
                Ok(trades) => return Ok(trades),
                Err(e) => {
                    tracing::debug!(error = %e, attempt, wallet, "trade fetch attempt failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<ApiTrade>, DataSourceError> {
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(DataSourceError::Status(resp.status()));
        }
        let body = resp.text().await?;
        let trades = serde_json::from_str::<ApiTradeResponse>(&body)?.into_trades();
        if trades.is_empty() {
            return Err(DataSourceError::Empty);
        }
        Ok(trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TradeApiClient {
        TradeApiClient::new(
            "https://polymarket.com/api/",
            Duration::from_secs(5),
            2,
            Duration::from_millis(250),
        )
    }

    #[test]
    fn test_client_constructs_trades_url() {
        let url = client().trades_url("0xabc123");
        assert!(url.contains("/trades"));
        assert!(url.contains("wallet=0xabc123"));
        // Trailing slash on base_url must not double up.
        assert!(!url.contains("api//"));
    }

    #[test]
    fn test_trades_url_escapes_query() {
        let url = client().trades_url("a b&c");
        assert!(!url.contains(' '));
        assert!(!url.contains("b&c"));
    }

    #[tokio::test]
    async fn test_fetch_trades_fails_fast_on_unroutable() {
        // Connection refused should surface as Http, not hang.
        let client = TradeApiClient::new(
            "http://127.0.0.1:1",
            Duration::from_millis(200),
            0,
            Duration::from_millis(1),
        );
        let err = client.fetch_trades("0xabc").await.unwrap_err();
        assert!(matches!(err, DataSourceError::Http(_)));
    }
}
