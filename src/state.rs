use sqlx::SqlitePool;

use gagambi_backend::analytics::AnalyticsService;
use gagambi_backend::awards::ReportService;

/// Shared application state: the pool plus the two domain services
/// constructed once at startup.
pub struct AppState {
    pub db: SqlitePool,
    pub reports: ReportService,
    pub analytics: AnalyticsService,
}
