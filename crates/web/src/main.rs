mod cli;
mod metrics;

use analyzer::analysis::Analysis;
use analyzer::Analyzer;
use anyhow::Result;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub analyzer: Analyzer,
}

async fn healthz() -> &'static str {
    "ok"
}

/// The single product endpoint. Never errors: address-format validation is
/// the SPA's concern, and the engine falls back to synthesis on any
/// data-source trouble.
async fn analyze_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
) -> Json<Analysis> {
    let started = std::time::Instant::now();
    let analysis = state.analyzer.analyze(&wallet).await;
    metrics::record_analysis(started.elapsed().as_secs_f64() * 1000.0);
    tracing::info!(
        wallet,
        follow_score = analysis.follow_score,
        recommendation = analysis.recommendation.as_str(),
        "analysis served"
    );
    Json(analysis)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/analyze/{wallet}", get(analyze_wallet))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = common::config::Config::load()?;

    let dispatch = common::observability::build_dispatch(&config.general.log_level);
    tracing::dispatcher::set_global_default(dispatch).map_err(anyhow::Error::msg)?;

    let cmd = cli::parse_args(std::env::args()).map_err(anyhow::Error::msg)?;
    let engine = Analyzer::from_config(&config);

    // CLI analysis prints the record and exits; no server, no metrics listener.
    if let cli::Command::Analyze { address } = cmd {
        let analysis = engine.analyze(&address).await;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    metrics::install_prometheus(config.observability.prometheus_port)?;
    metrics::describe();

    let web_port = config.web.as_ref().map_or(8080, |w| w.port);
    let web_host = config
        .web
        .as_ref()
        .map_or("0.0.0.0".to_string(), |w| w.host.clone());

    let state = Arc::new(AppState { analyzer: engine });
    let app = create_router(state);

    let addr: SocketAddr = format!("{web_host}:{web_port}").parse()?;
    tracing::info!("polyscope api listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::AnalyzerSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_app() -> Router {
        // Synthetic engine: router tests must never touch the network.
        let state = Arc::new(AppState {
            analyzer: Analyzer::synthetic(AnalyzerSettings::default()),
        });
        create_router(state)
    }

    #[tokio::test]
    async fn test_healthz_returns_ok() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_analysis_json() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze/0x742d35cc6634c0532925a3b844bc9e7595f2bd4e")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["wallet"].as_str().unwrap(),
            "0x742d35cc6634c0532925a3b844bc9e7595f2bd4e"
        );
        let score = json["followScore"].as_u64().unwrap();
        assert!(score <= 100);
        for key in ["consistency", "risk", "accuracy", "volatility", "discipline"] {
            assert!(json["scores"][key].as_u64().unwrap() <= 100);
        }
        assert!(json["metrics"]["totalPnL"].is_number());
        assert!(json["recentTrades"].as_array().unwrap().len() <= 10);
        assert!(json["pnlHistory"].as_array().unwrap().len() <= 30);
        let rec = json["recommendation"].as_str().unwrap();
        assert!(["FOLLOW", "CAUTION", "DO_NOT_FOLLOW"].contains(&rec));
    }

    #[tokio::test]
    async fn test_analyze_accepts_malformed_addresses() {
        // Validation is the SPA's concern; any path segment analyzes cleanly.
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/analyze/not-a-wallet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_is_deterministic_across_requests() {
        let wallet = "/api/analyze/0xcafebabecafebabecafebabecafebabecafebabe";
        let mut bodies = Vec::new();
        for _ in 0..2 {
            let app = create_test_app();
            let response = app
                .oneshot(Request::builder().uri(wallet).body(Body::empty()).unwrap())
                .await
                .unwrap();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn test_cors_header_present_for_spa() {
        let app = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header("Origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
