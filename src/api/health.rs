use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderStatus {
    finnhub: bool,
    alpha_vantage: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    source: String,
    providers: ProviderStatus,
    watchlist: usize,
    cached_entries: usize,
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.name().to_string(),
        providers: ProviderStatus {
            finnhub: state.config.finnhub_api_key.is_some(),
            alpha_vantage: state.config.alpha_vantage_api_key.is_some(),
        },
        watchlist: state.config.ranking_symbols.len(),
        cached_entries: state.ranking.cached_entries(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
