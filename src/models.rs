use serde::{Deserialize, Serialize};

/// Page envelope shared by every listing operation
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

/// One row of the awards-campaign dataset. Read-only from the API's
/// perspective; inserted by the ingestion pipeline or the first-run seed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campaign {
    pub id: i64,
    pub file_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub brand: Option<String>,
    pub year: Option<i64>,
    pub category: Option<String>,

    // Award information
    pub won_award: bool,
    pub award_show: Option<String>,
    pub award_level: Option<String>,
    pub award_category: Option<String>,

    // Campaign classification indicators
    pub is_csr_campaign: bool,
    pub is_purpose_driven: bool,
    pub is_social_impact: bool,
    pub has_environmental_angle: bool,
    pub targets_youth: bool,
    pub uses_local_culture: bool,

    // CES scores (0-10 scale)
    pub overall_ces_score: Option<f64>,
    pub message_clarity_score: Option<f64>,
    pub emotional_impact_score: Option<f64>,
    pub cultural_relevance_score: Option<f64>,
    pub innovation_score: Option<f64>,
    pub execution_score: Option<f64>,
    pub award_likelihood: Option<f64>,

    // Extraction metadata
    pub confidence_level: Option<f64>,
    pub feature_count: i64,
    pub metric_count: i64,
    pub cultural_insight_count: i64,

    pub created_at: String,
}

/// One retail transaction row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub order_id: String,
    pub order_date: String,
    pub ship_date: Option<String>,
    pub ship_mode: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub segment: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sales: Option<f64>,
    pub profit: Option<f64>,
    pub quantity: Option<i64>,
    pub discount: Option<f64>,
    pub country_region: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub is_admin: bool,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Transaction ingest request (POST /api/analytics/transactions)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub order_id: String,
    pub order_date: String,
    #[serde(default)]
    pub ship_date: Option<String>,
    #[serde(default)]
    pub ship_mode: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub country_region: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}
