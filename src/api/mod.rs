//! Wildlife Health Watch REST API
//!
//! HTTP API layer serving dashboard payloads, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Full dashboard payload
//! - `GET /api/v1/summary` - Headline metrics
//! - `GET /api/v1/map` - Map markers
//! - `GET /api/v1/timeline` - Weekly case counts
//! - `GET /api/v1/breakdown` - Species and syndrome counts
//!
//! ## Records
//! - `GET /api/v1/records` - Filtered records (paged)
//! - `GET /api/v1/records/:case_id` - Single record
//! - `GET /api/v1/export` - Download filtered records
//!
//! ## Catalog
//! - `GET /api/v1/catalog` - Filter control options
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! All data endpoints accept the filter query parameters `start`, `end`,
//! `regions`, `species`, `syndromes`, `severities` and `statuses`.
//!
//! # Example
//!
//! ```rust,ignore
//! use wildwatch::api::{serve, ApiConfig, AppState};
//! use wildwatch::surveillance::{Dataset, GeneratorConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(Dataset::generate(500, 42, GeneratorConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use crate::config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/summary", get(routes::dashboard::get_summary))
        .route("/map", get(routes::dashboard::get_map))
        .route("/timeline", get(routes::dashboard::get_timeline))
        .route("/breakdown", get(routes::dashboard::get_breakdown))
        // Record routes
        .route("/records", get(routes::records::list_records))
        .route("/records/:case_id", get(routes::records::get_record))
        .route("/export", get(routes::export::export_records))
        // Catalog routes
        .route("/catalog", get(routes::catalog::get_catalog));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Wildlife Health Watch API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Wildlife Health Watch API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{filter, Aggregates, FilterCriteria};
    use crate::surveillance::{Dataset, GeneratorConfig, Region, Severity};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn test_dataset() -> Arc<Dataset> {
        Arc::new(Dataset::generate(500, 42, GeneratorConfig::default()).unwrap())
    }

    fn create_test_app() -> Router {
        build_router(AppState::new(test_dataset(), ApiConfig::default()))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = fetch(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = fetch(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = fetch(create_test_app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dataset"]["records"], 500);
        assert_eq!(body["dataset"]["seed"], 42);
    }

    #[tokio::test]
    async fn test_catalog() {
        let (status, body) = fetch(create_test_app(), "/api/v1/catalog").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regions"].as_array().unwrap().len(), 8);
        assert_eq!(body["species"].as_array().unwrap().len(), 10);
        assert_eq!(body["syndromes"].as_array().unwrap().len(), 8);
        assert_eq!(body["regions"][7]["name"], "Meru");
        assert_eq!(body["window_end"], "2024-12-31");
    }

    #[tokio::test]
    async fn test_summary_unfiltered() {
        let (status, body) = fetch(create_test_app(), "/api/v1/summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cases"], 500);
        assert_eq!(body["dataset_size"], 500);
    }

    #[tokio::test]
    async fn test_summary_matches_pipeline() {
        let dataset = test_dataset();
        let criteria = FilterCriteria::new()
            .severity(Severity::Critical)
            .region(Region::Amboseli)
            .region(Region::TsavoWest);
        let selection = filter(dataset.records(), &criteria).unwrap();
        let expected = Aggregates::compute(selection.iter().copied());

        let app = build_router(AppState::new(dataset, ApiConfig::default()));
        let (status, body) = fetch(
            app,
            "/api/v1/summary?severities=Critical&regions=Amboseli,tsavo-west",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cases"], expected.total_cases);
        assert_eq!(body["animals_affected"], expected.animals_affected);
        assert_eq!(body["critical_cases"], expected.total_cases);
    }

    #[tokio::test]
    async fn test_dashboard_payload() {
        let (status, body) = fetch(create_test_app(), "/api/v1/dashboard?statuses=Active").await;

        assert_eq!(status, StatusCode::OK);
        let total = body["summary"]["total_cases"].as_u64().unwrap();
        assert_eq!(body["summary"]["active_alerts"].as_u64().unwrap(), total);
        assert_eq!(body["map"].as_array().unwrap().len() as u64, total);

        let species_sum: u64 = body["species"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["count"].as_u64().unwrap())
            .sum();
        assert_eq!(species_sum, total);
        assert!(body["recent_cases"].as_array().unwrap().len() <= 10);
    }

    #[tokio::test]
    async fn test_empty_selection_is_ok() {
        let (status, body) = fetch(
            create_test_app(),
            "/api/v1/dashboard?start=2030-01-01&end=2030-01-31",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["total_cases"], 0);
        assert_eq!(body["summary"]["animals_affected"], 0);
        assert!(body["timeline"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_filters_are_rejected() {
        for uri in [
            "/api/v1/summary?regions=Serengeti",
            "/api/v1/map?start=2024-13-01",
            "/api/v1/timeline?start=2024-06-01&end=2024-01-01",
            "/api/v1/breakdown?severities=Extreme",
        ] {
            let (status, body) = fetch(create_test_app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(body["error"]["code"].is_string());
            assert!(body["request_id"].is_string());
        }
    }

    #[tokio::test]
    async fn test_timeline_and_map() {
        let (status, body) = fetch(create_test_app(), "/api/v1/timeline").await;
        assert_eq!(status, StatusCode::OK);
        let cases: u64 = body["weeks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["cases"].as_u64().unwrap())
            .sum();
        assert_eq!(cases, 500);

        let (status, body) = fetch(create_test_app(), "/api/v1/map?regions=Meru").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["points"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["region"] == "Meru"));
    }

    #[tokio::test]
    async fn test_records_paging() {
        let (status, body) = fetch(create_test_app(), "/api/v1/records?limit=20&offset=490").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 500);
        assert_eq!(body["offset"], 490);
        assert_eq!(body["records"].as_array().unwrap().len(), 10);
        assert_eq!(body["records"][0]["id"], 490);

        let (status, _) = fetch(create_test_app(), "/api/v1/records?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = fetch(create_test_app(), "/api/v1/records?limit=5000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_record_lookup() {
        let (status, body) = fetch(create_test_app(), "/api/v1/records/WHW-2024-0001").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 0);

        let (status, body) = fetch(create_test_app(), "/api/v1/records/WHW-2024-9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_export_csv() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?format=csv&severities=Critical")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("text/csv")
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.lines().skip(1).all(|l| l.contains(",Critical,")));
    }

    #[tokio::test]
    async fn test_export_disabled() {
        let config = ApiConfig {
            enable_export: false,
            ..Default::default()
        };
        let app = build_router(AppState::new(test_dataset(), config));

        let (status, _) = fetch(app, "/api/v1/export").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
