//! Indicator panel and technical summary endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::{compute_panel, DataKind};
use crate::types::{BiasDecision, CompositeSummary, HistoryRange, IndicatorPanel};
use crate::AppState;

/// Query parameters for the indicator panel.
#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    /// History range: 1mo, 3mo, 6mo, 1y, 2y, 5y
    pub range: Option<String>,
}

/// Technical view of one symbol.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalResponse {
    pub symbol: String,
    pub score: f64,
    pub decision: BiasDecision,
    pub summary: CompositeSummary,
}

/// Create the stock indicators router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:symbol/indicators", get(get_indicators))
        .route("/:symbol/technical", get(get_technical))
}

pub(crate) fn parse_range(range: Option<&str>) -> Result<HistoryRange> {
    match range {
        None => Ok(HistoryRange::default()),
        Some(r) => HistoryRange::from_str(r)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported range: {}", r))),
    }
}

/// GET /api/stocks/:symbol/indicators
async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> Result<Json<ApiResponse<IndicatorPanel>>> {
    let range = parse_range(query.range.as_deref())?;
    let symbol = symbol.to_uppercase();

    let history = state.source.price_history(&symbol, range).await?;
    if history.is_empty() {
        return Err(AppError::NotFound(format!("No price history for {}", symbol)));
    }

    Ok(Json(ApiResponse::fresh(compute_panel(&history))))
}

/// GET /api/stocks/:symbol/technical
async fn get_technical(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<TechnicalResponse>>> {
    let symbol = symbol.to_uppercase();
    let cached = state.ranking.is_fresh(&symbol, DataKind::Technical);
    let snapshot = state.ranking.technical_snapshot(&symbol).await?;

    Ok(Json(ApiResponse::cached(
        TechnicalResponse {
            symbol,
            score: snapshot.score,
            decision: snapshot.decision,
            summary: snapshot.summary,
        },
        cached,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range(None).unwrap(), HistoryRange::SixMonths);
        assert_eq!(parse_range(Some("1y")).unwrap(), HistoryRange::OneYear);
        assert!(matches!(parse_range(Some("10y")), Err(AppError::BadRequest(_))));
    }
}
