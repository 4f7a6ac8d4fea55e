//! Scout retail analytics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiResponse;
use crate::state::AppState;
use gagambi_backend::analytics::types::{
    CategorySales, DashboardMetrics, GeographyAnalytics, SalesTrendPoint, TopProduct,
    TransactionPage,
};
use gagambi_backend::error::ApiError;
use gagambi_backend::models::CreateTransactionRequest;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/analytics/metrics - dashboard KPIs
pub async fn metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DashboardMetrics>>, ApiError> {
    let metrics = state.analytics.dashboard_metrics().await?;
    Ok(Json(ApiResponse::success(metrics)))
}

/// GET /api/analytics/sales-trend - monthly sales trend
pub async fn sales_trend(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SalesTrendPoint>>>, ApiError> {
    let trend = state.analytics.sales_trend().await?;
    Ok(Json(ApiResponse::success(trend)))
}

/// GET /api/analytics/category-sales - sales by product category
pub async fn category_sales(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategorySales>>>, ApiError> {
    let categories = state.analytics.category_sales().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /api/analytics/top-products - top products by total sales
pub async fn top_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TopProduct>>>, ApiError> {
    let products = state.analytics.top_products().await?;
    Ok(Json(ApiResponse::success(products)))
}

/// GET /api/analytics/geography - sales rollup per region/city
pub async fn geography(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GeographyAnalytics>>>, ApiError> {
    let rollup = state.analytics.geography().await?;
    Ok(Json(ApiResponse::success(rollup)))
}

/// GET /api/analytics/transactions - recent transactions page
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<ApiResponse<TransactionPage>>, ApiError> {
    let page = state.analytics.transactions(params.limit, params.offset).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// POST /api/analytics/transactions - ingest one transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let id = state.analytics.create_transaction(&req).await?;
    tracing::debug!("Transaction ingested: {} (id {})", req.order_id, id);
    Ok(Json(ApiResponse::success(json!({ "id": id }))))
}
