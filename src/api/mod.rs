pub mod analytics;
pub mod health;
pub mod indicators;
pub mod rankings;
pub mod signals;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// API response wrapper matching frontend expectations
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta { cached: false },
        }
    }

    pub fn cached(data: T, cached: bool) -> Self {
        Self {
            data,
            meta: ApiMeta { cached },
        }
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analytics::router())
        .nest("/api/stocks", indicators::router())
        .nest("/api/signals", signals::router())
        .nest("/api/rankings", rankings::router())
}
