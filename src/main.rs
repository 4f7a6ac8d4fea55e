use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod state;

use gagambi_backend::analytics::AnalyticsService;
use gagambi_backend::awards::{KeywordScorer, ReportService, ScoringConfig};
use gagambi_backend::{config, db};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gagambi_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let app_config = config::load_config().expect("Failed to load configuration");
    tracing::info!(
        "Server will listen on {}:{}",
        app_config.server.host,
        app_config.server.port
    );

    // Create data directory if not exists
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let pool = SqlitePool::connect(&database_url).await?;

    db::run_migrations(&pool).await?;
    db::initialize_default_data(&pool, app_config.database.seed_transactions).await?;

    let state = Arc::new(AppState {
        db: pool.clone(),
        reports: ReportService::new(pool.clone(), KeywordScorer::new(ScoringConfig::default())),
        analytics: AnalyticsService::new(pool),
    });

    let app = Router::new()
        .route("/api/health", get(api::server::health_check))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/me", get(api::auth::me))
        .route("/api/users", get(api::users::list_users))
        .route("/api/users/:id", get(api::users::get_user))
        .route("/api/analytics/metrics", get(api::analytics::metrics))
        .route("/api/analytics/sales-trend", get(api::analytics::sales_trend))
        .route("/api/analytics/category-sales", get(api::analytics::category_sales))
        .route("/api/analytics/top-products", get(api::analytics::top_products))
        .route("/api/analytics/geography", get(api::analytics::geography))
        .route("/api/analytics/transactions", get(api::analytics::list_transactions))
        .route("/api/analytics/transactions", post(api::analytics::create_transaction))
        .route("/api/prd", get(api::prd::get_document))
        .route("/api/prd/summary", get(api::prd::get_summary))
        .route("/api/prd/sections/:section", get(api::prd::get_section))
        .route("/api/prd/implementation-status", get(api::prd::get_implementation_status))
        .route("/api/ph-awards/health", get(api::awards::health))
        .route("/api/ph-awards/stats", get(api::awards::stats))
        .route("/api/ph-awards/campaigns/search", post(api::awards::search_campaigns))
        .route("/api/ph-awards/campaigns/:id", get(api::awards::campaign_details))
        .route("/api/ph-awards/cultural/trends", get(api::awards::cultural_trends))
        .route("/api/ph-awards/predict/award", post(api::awards::predict_award))
        .route("/api/ph-awards/dashboard/summary", get(api::awards::dashboard_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
