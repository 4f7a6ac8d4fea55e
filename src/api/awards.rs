//! PH Awards endpoints: campaign search, details, aggregates and the
//! award prediction. Thin wrappers over the report service.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiResponse;
use crate::state::AppState;
use gagambi_backend::awards::service::{
    CampaignDetails, CampaignPage, CampaignStats, CulturalTrends, DashboardSummary,
};
use gagambi_backend::awards::{CampaignFilter, ScoreResult};
use gagambi_backend::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CampaignSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: Option<CampaignFilter>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct AwardPredictionRequest {
    pub campaign_text: String,
}

/// GET /api/ph-awards/health - service health incl. database reachability
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.reports.ping().await?;
    Ok(Json(json!({
        "status": "healthy",
        "service": "ph-awards-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": "connected",
    })))
}

/// GET /api/ph-awards/stats - campaign statistics
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CampaignStats>>, ApiError> {
    let stats = state.reports.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// POST /api/ph-awards/campaigns/search - filtered campaign search
pub async fn search_campaigns(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CampaignSearchRequest>,
) -> Result<Json<ApiResponse<CampaignPage>>, ApiError> {
    let mut filter = req.filters.unwrap_or_default();
    filter.query = req.query;
    filter.limit = req.limit;
    filter.offset = req.offset;

    let page = state.reports.search(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/ph-awards/campaigns/:id - campaign details with related campaigns
pub async fn campaign_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CampaignDetails>>, ApiError> {
    let details = state.reports.campaign_details(id).await?;
    Ok(Json(ApiResponse::success(details)))
}

/// GET /api/ph-awards/cultural/trends - cultural intelligence trends
pub async fn cultural_trends(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CulturalTrends>>, ApiError> {
    let trends = state.reports.cultural_trends().await?;
    Ok(Json(ApiResponse::success(trends)))
}

/// POST /api/ph-awards/predict/award - keyword-based award prediction
pub async fn predict_award(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AwardPredictionRequest>,
) -> Json<ApiResponse<ScoreResult>> {
    let prediction = state.reports.predict(&req.campaign_text);
    Json(ApiResponse::success(prediction))
}

/// GET /api/ph-awards/dashboard/summary - dashboard rollup
pub async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let summary = state.reports.dashboard_summary().await?;
    Ok(Json(ApiResponse::success(summary)))
}
