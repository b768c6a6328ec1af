use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::GapConfiguration;
use super::provider::GapKeywordProvider;
use super::service::{GapRunOptions, KeywordGapService};

#[derive(Debug, Deserialize)]
pub struct GapAnalysisRequest {
    pub configuration: GapConfiguration,
    #[serde(default)]
    pub options: GapRunOptions,
}

/// Router builder exposing the gap analysis and cache endpoints.
pub fn gap_router<P>(service: Arc<KeywordGapService<P>>) -> Router
where
    P: GapKeywordProvider + 'static,
{
    Router::new()
        .route("/api/v1/gap/analyses", post(analyze_handler::<P>))
        .route("/api/v1/gap/cache", delete(clear_cache_handler::<P>))
        .with_state(service)
}

pub(crate) async fn clear_cache_handler<P>(
    State(service): State<Arc<KeywordGapService<P>>>,
) -> StatusCode
where
    P: GapKeywordProvider + 'static,
{
    service.clear_cache();
    StatusCode::NO_CONTENT
}

pub(crate) async fn analyze_handler<P>(
    State(service): State<Arc<KeywordGapService<P>>>,
    Json(request): Json<GapAnalysisRequest>,
) -> Response
where
    P: GapKeywordProvider + 'static,
{
    if !service.supports(request.options.provider) {
        let payload = json!({
            "error": format!(
                "provider {} is not configured",
                request.options.provider.label()
            ),
        });
        return (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response();
    }

    let result = service
        .compute(&request.configuration, &request.options)
        .await;
    (StatusCode::OK, Json(result)).into_response()
}
