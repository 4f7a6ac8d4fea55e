//! Product requirements document endpoints
//!
//! The PRD is served from compiled-in constants; there is no authoring
//! workflow behind it.

use axum::extract::Path;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use gagambi_backend::error::ApiError;

const PRD_VERSION: &str = "4.1";
const PRD_DATE: &str = "2025-06-02";
const PRD_OWNER: &str = "TBWA\\SMAP";

const PRD_CONTENT: &str = r#"# Scout Analytics Dashboard
## Comprehensive Product Requirements Document v4.1
### Owner: TBWA\SMAP

---

## Executive Summary

Scout Analytics Dashboard is a real-time analytics solution providing
insights into sales, product mix, consumer behavior and award-campaign
intelligence for the Philippine market. The backend is a single compact
service with an embedded SQLite datastore, exposing a JSON REST API
consumed by the React dashboard.

### Key Capabilities
- Retail sales analytics (metrics, trends, categories, geography)
- PH Awards campaign intelligence with CES scoring
- Keyword-based award potential prediction
- Session-based user authentication
- Self-seeding sample dataset for fresh installs

### Technical Architecture
- **Frontend**: React 18 + TypeScript + Vite
- **Backend**: Rust (axum + tokio + sqlx)
- **Database**: SQLite (embedded, WAL-friendly)
- **Authentication**: session cookies backed by the database

---

## API Endpoints

### Analytics
- `GET /api/analytics/metrics` - Dashboard KPIs
- `GET /api/analytics/sales-trend` - Monthly sales trend
- `GET /api/analytics/category-sales` - Sales by category
- `GET /api/analytics/top-products` - Top selling products
- `GET /api/analytics/geography` - Geographic analytics
- `GET /api/analytics/transactions` - Transaction data
- `POST /api/analytics/transactions` - Transaction ingest

### PH Awards
- `GET /api/ph-awards/stats` - Campaign statistics
- `POST /api/ph-awards/campaigns/search` - Campaign search
- `GET /api/ph-awards/campaigns/{id}` - Campaign details
- `GET /api/ph-awards/cultural/trends` - Cultural intelligence
- `POST /api/ph-awards/predict/award` - Award prediction
- `GET /api/ph-awards/dashboard/summary` - Dashboard summary

### Authentication
- `POST /api/auth/login` - User login
- `POST /api/auth/logout` - User logout
- `GET /api/auth/me` - Current user info

### Documentation
- `GET /api/prd` - This PRD document
- `GET /api/prd/summary` - PRD summary
- `GET /api/prd/sections/{section}` - Specific sections
- `GET /api/prd/implementation-status` - Current status

---

## Database Schema

### Transactions Table
Order, customer, product, financial and geography columns; indexed on
order_id, order_date, category and region.

### Campaigns Table
Campaign identity, award metadata, classification flags and CES scores
(0-10 scale); indexed on brand, year and overall_ces_score.

---

## Deployment

Single static binary plus a `config.json`; the database file and seeds
are created on first run. `DATABASE_URL` overrides the configured
SQLite location.
"#;

#[derive(Debug, Serialize)]
pub struct PRDDocument {
    pub title: String,
    pub version: String,
    pub date: String,
    pub owner: String,
    pub content: String,
    pub format: String,
    pub sections: Vec<String>,
    pub metadata: Value,
}

#[derive(Debug, Serialize)]
pub struct PRDSection {
    pub section: String,
    pub title: String,
    pub content: String,
    pub format: String,
}

/// GET /api/prd - the complete PRD document
pub async fn get_document() -> Json<PRDDocument> {
    Json(PRDDocument {
        title: format!("Scout Analytics Dashboard PRD v{}", PRD_VERSION),
        version: PRD_VERSION.to_string(),
        date: PRD_DATE.to_string(),
        owner: PRD_OWNER.to_string(),
        content: PRD_CONTENT.to_string(),
        format: "markdown".to_string(),
        sections: vec![
            "Executive Summary".to_string(),
            "API Endpoints".to_string(),
            "Database Schema".to_string(),
            "Deployment".to_string(),
        ],
        metadata: json!({
            "implementation_status": "production",
            "technology_stack": {
                "frontend": "React 18 + TypeScript + Vite",
                "backend": "Rust (axum + tokio + sqlx)",
                "database": "SQLite (embedded)",
                "authentication": "session cookies"
            }
        }),
    })
}

/// GET /api/prd/summary
pub async fn get_summary() -> Json<Value> {
    Json(json!({
        "document": {
            "title": "Scout Analytics Dashboard",
            "version": PRD_VERSION,
            "status": "Production",
            "last_updated": PRD_DATE,
            "owner": PRD_OWNER
        },
        "key_features": [
            "Retail sales analytics with monthly trends",
            "PH Awards campaign intelligence and CES scoring",
            "Keyword-based award potential prediction",
            "Session-based authentication",
            "Self-seeding sample dataset"
        ],
        "architecture": {
            "frontend": {
                "framework": "React 18 + TypeScript",
                "bundler": "Vite"
            },
            "backend": {
                "api": "Rust (axum)",
                "database": "SQLite",
                "authentication": "session cookies"
            }
        },
        "endpoints": {
            "health": "/api/health",
            "analytics": "/api/analytics",
            "awards": "/api/ph-awards"
        }
    }))
}

/// GET /api/prd/sections/:section
pub async fn get_section(Path(section_name): Path<String>) -> Result<Json<PRDSection>, ApiError> {
    let (title, content) = match section_name.as_str() {
        "executive-summary" => (
            "Executive Summary",
            "Scout Analytics Dashboard provides retail sales insights and PH Awards \
             campaign intelligence for the Philippine market through a compact Rust \
             backend with an embedded SQLite datastore.",
        ),
        "api-endpoints" => (
            "API Endpoints",
            "Analytics: metrics, sales-trend, category-sales, top-products, geography, \
             transactions.\nPH Awards: stats, campaigns/search, campaigns/{id}, \
             cultural/trends, predict/award, dashboard/summary.\nAuthentication: login, \
             logout, me.",
        ),
        "database" => (
            "Database Schema",
            "Transactions: order, customer, product, financial and geography columns.\n\
             Campaigns: identity, award metadata, classification flags and CES scores \
             on a 0-10 scale.",
        ),
        "deployment" => (
            "Deployment",
            "Single static binary plus config.json; database file and sample data are \
             created on first run. DATABASE_URL overrides the configured SQLite \
             location.",
        ),
        _ => return Err(ApiError::not_found("Section not found")),
    };

    Ok(Json(PRDSection {
        section: section_name,
        title: title.to_string(),
        content: content.to_string(),
        format: "markdown".to_string(),
    }))
}

/// GET /api/prd/implementation-status
pub async fn get_implementation_status() -> Json<Value> {
    Json(json!({
        "overall_status": "production",
        "services": {
            "backend_api": { "status": "running", "health": "/api/health" },
            "database": { "status": "running", "type": "SQLite", "connected": true },
            "authentication": { "status": "enabled", "type": "session", "endpoints": ["login", "logout", "me"] }
        },
        "features_implemented": {
            "user_authentication": true,
            "analytics_endpoints": true,
            "dashboard_metrics": true,
            "sales_analytics": true,
            "transaction_tracking": true,
            "campaign_search": true,
            "award_prediction": true,
            "prd_documentation": true
        },
        "next_steps": [
            "Add data visualization endpoints",
            "Expand campaign ingestion pipeline",
            "Set up monitoring dashboards"
        ]
    }))
}
