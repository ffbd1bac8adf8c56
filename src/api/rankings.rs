//! Leaderboard endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::ApiResponse;
use crate::config::parse_symbols;
use crate::error::{AppError, Result};
use crate::types::RankedSecurity;
use crate::AppState;

/// Most symbols accepted in one ranking request.
const MAX_SYMBOLS: usize = 50;

/// Query parameters for the rankings endpoint.
#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    /// Comma-separated symbols; defaults to the configured watch list.
    pub symbols: Option<String>,
    /// Keep only the top N rows.
    pub limit: Option<usize>,
}

/// Create the rankings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_rankings))
}

pub(crate) fn requested_symbols(query: &RankingsQuery, defaults: &[String]) -> Result<Vec<String>> {
    let symbols = match query.symbols.as_deref() {
        Some(s) => parse_symbols(s),
        None => defaults.to_vec(),
    };

    if symbols.is_empty() {
        return Err(AppError::BadRequest("No symbols to rank".to_string()));
    }
    if symbols.len() > MAX_SYMBOLS {
        return Err(AppError::BadRequest(format!(
            "At most {} symbols per request",
            MAX_SYMBOLS
        )));
    }
    Ok(symbols)
}

/// GET /api/rankings
async fn get_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<ApiResponse<Vec<RankedSecurity>>>> {
    let symbols = requested_symbols(&query, &state.config.ranking_symbols)?;
    let limit = query.limit.or(state.ranking.config().top_n);

    let ranked = state.ranking.rank_top(&symbols, limit).await;
    Ok(Json(ApiResponse::fresh(ranked)))
}
