//! Feature, prediction and backtest endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{backtest, features, predict, walk_forward};
use crate::types::{BacktestReport, FeatureSnapshot, HistoryRange, Prediction, Strategy, WalkForwardReport};
use crate::AppState;

/// Bars of history loaded for each analysis.
const PREDICT_BARS: usize = 200;
const BACKTEST_BARS: usize = 400;
const WALK_FORWARD_BARS: usize = 800;

/// Extra bars beyond `days` loaded for feature warm-up.
const FEATURE_WARMUP_BARS: usize = 60;

/// Longest feature window served; five years of sessions.
const MAX_FEATURE_DAYS: usize = 1260;

fn default_days() -> usize {
    60
}

fn default_horizon() -> u32 {
    1
}

fn default_folds() -> usize {
    5
}

fn default_fast() -> usize {
    20
}

fn default_slow() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct FeaturesQuery {
    #[serde(default = "default_days")]
    pub days: usize,
}

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub symbol: String,
    pub days: usize,
    pub features: Option<FeatureSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default = "default_horizon")]
    pub horizon: u32,
}

#[derive(Debug, Deserialize)]
pub struct BacktestRequest {
    pub symbol: String,
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Deserialize)]
pub struct WalkForwardRequest {
    #[serde(default = "default_folds")]
    pub folds: usize,
    #[serde(default = "default_fast")]
    pub fast: usize,
    #[serde(default = "default_slow")]
    pub slow: usize,
}

/// Create the analytics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stocks/:symbol/features", get(get_features))
        .route("/api/stocks/:symbol/predict", post(post_predict))
        .route("/api/stocks/:symbol/walkforward", post(post_walk_forward))
        .route("/api/backtest", post(post_backtest))
}

/// Smallest history range covering `bars` sessions.
pub(crate) fn range_for(bars: usize) -> HistoryRange {
    [
        HistoryRange::OneMonth,
        HistoryRange::ThreeMonths,
        HistoryRange::SixMonths,
        HistoryRange::OneYear,
        HistoryRange::TwoYears,
    ]
    .into_iter()
    .find(|r| r.sessions() >= bars)
    .unwrap_or(HistoryRange::FiveYears)
}

/// Last `bars` closes for a symbol.
async fn recent_closes(state: &AppState, symbol: &str, bars: usize) -> Result<Vec<f64>> {
    let history = state.source.price_history(symbol, range_for(bars)).await?;
    let closes = history.closes();
    let skip = closes.len().saturating_sub(bars);
    Ok(closes[skip..].to_vec())
}

/// GET /api/stocks/:symbol/features
async fn get_features(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<FeaturesQuery>,
) -> Result<Json<ApiResponse<FeaturesResponse>>> {
    if query.days == 0 || query.days > MAX_FEATURE_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_FEATURE_DAYS
        )));
    }
    let symbol = symbol.to_uppercase();
    let bars = query.days.saturating_add(FEATURE_WARMUP_BARS);
    let closes = recent_closes(&state, &symbol, bars).await?;

    Ok(Json(ApiResponse::fresh(FeaturesResponse {
        features: features(&closes, query.days),
        symbol,
        days: query.days,
    })))
}

/// POST /api/stocks/:symbol/predict
async fn post_predict(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<ApiResponse<Prediction>>> {
    let symbol = symbol.to_uppercase();
    let closes = recent_closes(&state, &symbol, PREDICT_BARS).await?;
    let prediction = predict(&closes, request.horizon)
        .ok_or_else(|| AppError::NotFound(format!("No price history for {}", symbol)))?;

    Ok(Json(ApiResponse::fresh(prediction)))
}

/// POST /api/backtest
async fn post_backtest(
    State(state): State<AppState>,
    Json(request): Json<BacktestRequest>,
) -> Result<Json<ApiResponse<BacktestReport>>> {
    let symbol = request.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("symbol is required".to_string()));
    }
    let closes = recent_closes(&state, &symbol, BACKTEST_BARS).await?;

    Ok(Json(ApiResponse::fresh(backtest(&closes, request.strategy))))
}

/// POST /api/stocks/:symbol/walkforward
async fn post_walk_forward(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<WalkForwardRequest>,
) -> Result<Json<ApiResponse<WalkForwardReport>>> {
    if request.fast == 0 || request.slow == 0 {
        return Err(AppError::BadRequest("fast and slow must be positive".to_string()));
    }
    if request.slow > WALK_FORWARD_BARS {
        return Err(AppError::BadRequest(format!(
            "slow must not exceed {} bars",
            WALK_FORWARD_BARS
        )));
    }
    let symbol = symbol.to_uppercase();
    let closes = recent_closes(&state, &symbol, WALK_FORWARD_BARS).await?;

    Ok(Json(ApiResponse::fresh(walk_forward(
        &closes,
        request.folds,
        request.fast,
        request.slow,
    ))))
}
