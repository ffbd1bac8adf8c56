//! Signal API endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::services::signals::{classify, tally};
use crate::types::{CompositeSummary, ProviderIndicator, ProviderRecord, Signal, SignalTally, TechnicalReport};
use crate::AppState;

/// Request body for record classification.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub records: Vec<ProviderRecord>,
}

/// One normalized provider row.
#[derive(Debug, Serialize)]
pub struct ClassifiedIndicator {
    pub name: String,
    pub value: Option<f64>,
    pub signal: Signal,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub indicators: Vec<ClassifiedIndicator>,
    pub tally: SignalTally,
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", post(summarize))
        .route("/classify", post(classify_records))
}

/// POST /api/signals/summary
async fn summarize(
    State(state): State<AppState>,
    Json(report): Json<TechnicalReport>,
) -> Json<ApiResponse<CompositeSummary>> {
    Json(ApiResponse::fresh(state.ranking.scorer().summarize(&report)))
}

/// POST /api/signals/classify
async fn classify_records(Json(request): Json<ClassifyRequest>) -> Json<ApiResponse<ClassifyResponse>> {
    let indicators = request
        .records
        .iter()
        .map(|record| {
            let indicator = ProviderIndicator::from(record);
            let signal = classify(&indicator);
            ClassifiedIndicator {
                name: indicator.name,
                value: indicator.value,
                signal,
            }
        })
        .collect();

    Json(ApiResponse::fresh(ClassifyResponse {
        indicators,
        tally: tally(&request.records),
    }))
}
