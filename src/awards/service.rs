//! Campaign reporting facade
//!
//! Thin layer over the query builder, the keyword scorer and the
//! campaigns table. Page/search queries are built dynamically; the
//! aggregate and trend queries have a static shape and stay as fixed
//! named statements.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{Campaign, Pagination};

use super::query::{BindValue, CampaignFilter, QueryBuilder};
use super::scoring::{KeywordScorer, ScoreResult};

#[derive(Debug, Clone, Serialize)]
pub struct CampaignPage {
    pub campaigns: Vec<Campaign>,
    pub pagination: Pagination,
    pub filters_applied: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RelatedCampaign {
    pub id: i64,
    pub campaign_name: Option<String>,
    pub brand: Option<String>,
    pub overall_ces_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetails {
    pub campaign: Campaign,
    pub related_campaigns: Vec<RelatedCampaign>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignStats {
    pub total_campaigns: i64,
    pub processed_campaigns: i64,
    pub award_winners: i64,
    pub csr_campaigns: i64,
    pub cultural_campaigns: i64,
    pub youth_targeting: i64,
    pub environmental_campaigns: i64,
}

/// Trend entry carrying the cultural relevance score
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CulturalCampaign {
    pub campaign_name: Option<String>,
    pub brand: Option<String>,
    pub overall_ces_score: Option<f64>,
    pub cultural_relevance_score: Option<f64>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CampaignHighlight {
    pub campaign_name: Option<String>,
    pub brand: Option<String>,
    pub overall_ces_score: Option<f64>,
    pub year: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    pub total_cultural: i64,
    pub total_csr: i64,
    pub total_youth: i64,
    pub cultural_award_winners: i64,
    pub avg_cultural_score: f64,
    pub avg_overall_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CulturalTrends {
    pub cultural_elements: Vec<CulturalCampaign>,
    pub csr_insights: Vec<CampaignHighlight>,
    pub youth_campaigns: Vec<CampaignHighlight>,
    pub summary: TrendSummary,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SummaryMetrics {
    pub total_campaigns: i64,
    pub award_winners: i64,
    pub csr_campaigns: i64,
    pub cultural_campaigns: i64,
    pub avg_score: Option<f64>,
    pub highest_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct YearlyTrend {
    pub year: i64,
    pub campaigns: i64,
    pub avg_score: Option<f64>,
    pub awards_won: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub summary: SummaryMetrics,
    pub top_campaigns: Vec<CampaignHighlight>,
    pub yearly_trends: Vec<YearlyTrend>,
}

/// Apply a built parameter list to a query in order
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for param in $params {
            q = match param {
                BindValue::Int(v) => q.bind(*v),
                BindValue::Real(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.clone()),
            };
        }
        q
    }};
}

#[derive(Clone)]
pub struct ReportService {
    db: SqlitePool,
    scorer: std::sync::Arc<KeywordScorer>,
}

impl ReportService {
    pub fn new(db: SqlitePool, scorer: KeywordScorer) -> Self {
        Self {
            db,
            scorer: std::sync::Arc::new(scorer),
        }
    }

    /// Search campaigns with dynamic filters and pagination
    pub async fn search(&self, filter: &CampaignFilter) -> Result<CampaignPage, ApiError> {
        let query = QueryBuilder::build(filter)?;

        let campaigns: Vec<Campaign> = bind_params!(
            sqlx::query_as::<_, Campaign>(&query.select_sql),
            &query.select_params
        )
        .fetch_all(&self.db)
        .await?;

        let total: i64 = bind_params!(
            sqlx::query_scalar::<_, i64>(&query.count_sql),
            &query.count_params
        )
        .fetch_one(&self.db)
        .await?;

        Ok(CampaignPage {
            campaigns,
            pagination: Pagination::new(total, filter.limit, filter.offset),
            filters_applied: filter.applied(),
        })
    }

    /// Single campaign with up to 5 related ones (same brand or same
    /// cultural classification, best score first)
    pub async fn campaign_details(&self, id: i64) -> Result<CampaignDetails, ApiError> {
        let campaign: Campaign = sqlx::query_as("SELECT * FROM campaigns WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Campaign {} not found", id)))?;

        let related_campaigns: Vec<RelatedCampaign> = sqlx::query_as(
            "SELECT id, campaign_name, brand, overall_ces_score FROM campaigns \
             WHERE (brand = ? OR uses_local_culture = ?) AND id != ? \
             ORDER BY overall_ces_score DESC LIMIT 5",
        )
        .bind(&campaign.brand)
        .bind(campaign.uses_local_culture)
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(CampaignDetails {
            campaign,
            related_campaigns,
        })
    }

    pub async fn stats(&self) -> Result<CampaignStats, ApiError> {
        let queries = [
            ("total_campaigns", "SELECT COUNT(*) FROM campaigns"),
            ("processed_campaigns", "SELECT COUNT(*) FROM campaigns WHERE campaign_name IS NOT NULL"),
            ("award_winners", "SELECT COUNT(*) FROM campaigns WHERE won_award = 1"),
            ("csr_campaigns", "SELECT COUNT(*) FROM campaigns WHERE is_csr_campaign = 1"),
            ("cultural_campaigns", "SELECT COUNT(*) FROM campaigns WHERE uses_local_culture = 1"),
            ("youth_targeting", "SELECT COUNT(*) FROM campaigns WHERE targets_youth = 1"),
            ("environmental_campaigns", "SELECT COUNT(*) FROM campaigns WHERE has_environmental_angle = 1"),
        ];

        let mut stats = CampaignStats::default();
        for (key, sql) in queries {
            let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.db).await?;
            match key {
                "total_campaigns" => stats.total_campaigns = count,
                "processed_campaigns" => stats.processed_campaigns = count,
                "award_winners" => stats.award_winners = count,
                "csr_campaigns" => stats.csr_campaigns = count,
                "cultural_campaigns" => stats.cultural_campaigns = count,
                "youth_targeting" => stats.youth_targeting = count,
                _ => stats.environmental_campaigns = count,
            }
        }

        Ok(stats)
    }

    pub async fn cultural_trends(&self) -> Result<CulturalTrends, ApiError> {
        let cultural_elements: Vec<CulturalCampaign> = sqlx::query_as(
            "SELECT campaign_name, brand, overall_ces_score, cultural_relevance_score, year \
             FROM campaigns \
             WHERE uses_local_culture = 1 AND campaign_name IS NOT NULL \
             ORDER BY cultural_relevance_score DESC, overall_ces_score DESC LIMIT 10",
        )
        .fetch_all(&self.db)
        .await?;

        let csr_insights: Vec<CampaignHighlight> = sqlx::query_as(
            "SELECT campaign_name, brand, overall_ces_score, year FROM campaigns \
             WHERE is_csr_campaign = 1 AND uses_local_culture = 1 \
             ORDER BY overall_ces_score DESC LIMIT 10",
        )
        .fetch_all(&self.db)
        .await?;

        let youth_campaigns: Vec<CampaignHighlight> = sqlx::query_as(
            "SELECT campaign_name, brand, overall_ces_score, year FROM campaigns \
             WHERE targets_youth = 1 \
             ORDER BY overall_ces_score DESC LIMIT 10",
        )
        .fetch_all(&self.db)
        .await?;

        let total_cultural: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE uses_local_culture = 1")
                .fetch_one(&self.db)
                .await?;
        let total_csr: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE is_csr_campaign = 1")
                .fetch_one(&self.db)
                .await?;
        let total_youth: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE targets_youth = 1")
                .fetch_one(&self.db)
                .await?;
        let cultural_award_winners: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM campaigns WHERE uses_local_culture = 1 AND won_award = 1",
        )
        .fetch_one(&self.db)
        .await?;
        let avg_cultural_score: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(cultural_relevance_score) FROM campaigns WHERE uses_local_culture = 1",
        )
        .fetch_one(&self.db)
        .await?;
        let avg_overall_score: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(overall_ces_score) FROM campaigns WHERE campaign_name IS NOT NULL",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(CulturalTrends {
            cultural_elements,
            csr_insights,
            youth_campaigns,
            summary: TrendSummary {
                total_cultural,
                total_csr,
                total_youth,
                cultural_award_winners,
                avg_cultural_score: crate::utils::round2(avg_cultural_score.unwrap_or(0.0)),
                avg_overall_score: crate::utils::round2(avg_overall_score.unwrap_or(0.0)),
            },
        })
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let summary: SummaryMetrics = sqlx::query_as(
            "SELECT \
                COUNT(*) as total_campaigns, \
                COUNT(CASE WHEN won_award = 1 THEN 1 END) as award_winners, \
                COUNT(CASE WHEN is_csr_campaign = 1 THEN 1 END) as csr_campaigns, \
                COUNT(CASE WHEN uses_local_culture = 1 THEN 1 END) as cultural_campaigns, \
                AVG(overall_ces_score) as avg_score, \
                MAX(overall_ces_score) as highest_score \
             FROM campaigns WHERE campaign_name IS NOT NULL",
        )
        .fetch_one(&self.db)
        .await?;

        let top_campaigns: Vec<CampaignHighlight> = sqlx::query_as(
            "SELECT campaign_name, brand, overall_ces_score, year FROM campaigns \
             WHERE campaign_name IS NOT NULL \
             ORDER BY overall_ces_score DESC LIMIT 5",
        )
        .fetch_all(&self.db)
        .await?;

        let yearly_trends: Vec<YearlyTrend> = sqlx::query_as(
            "SELECT \
                year, \
                COUNT(*) as campaigns, \
                AVG(overall_ces_score) as avg_score, \
                COUNT(CASE WHEN won_award = 1 THEN 1 END) as awards_won \
             FROM campaigns \
             WHERE year IS NOT NULL AND campaign_name IS NOT NULL \
             GROUP BY year ORDER BY year DESC LIMIT 5",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardSummary {
            summary,
            top_campaigns,
            yearly_trends,
        })
    }

    /// Award prediction over free campaign text. Pure computation, no storage.
    pub fn predict(&self, campaign_text: &str) -> ScoreResult {
        self.scorer.score(campaign_text)
    }

    /// Liveness probe used by the awards health endpoint
    pub async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::scoring::ScoringConfig;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> ReportService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::run_migrations(&pool).await.unwrap();
        crate::sample_data::seed_campaigns(&pool).await.unwrap();
        ReportService::new(pool, KeywordScorer::new(ScoringConfig::default()))
    }

    #[tokio::test]
    async fn test_search_returns_all_seeded_campaigns() {
        let service = test_service().await;
        let page = service.search(&CampaignFilter::default()).await.unwrap();
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.campaigns.len(), 5);
        assert!(!page.pagination.has_more);
        // default sort: best overall score first
        assert_eq!(page.campaigns[0].brand.as_deref(), Some("Jollibee"));
    }

    #[tokio::test]
    async fn test_search_pagination_has_more() {
        let service = test_service().await;
        let filter = CampaignFilter {
            limit: 2,
            offset: 0,
            ..Default::default()
        };
        let page = service.search(&filter).await.unwrap();
        assert_eq!(page.campaigns.len(), 2);
        assert!(page.pagination.has_more); // 0 + 2 < 5

        let filter = CampaignFilter {
            limit: 2,
            offset: 3,
            ..Default::default()
        };
        let page = service.search(&filter).await.unwrap();
        assert_eq!(page.campaigns.len(), 2);
        assert!(!page.pagination.has_more); // 3 + 2 == 5
    }

    #[tokio::test]
    async fn test_search_boolean_and_text_filters() {
        let service = test_service().await;

        let filter = CampaignFilter {
            is_csr_campaign: Some(true),
            ..Default::default()
        };
        let page = service.search(&filter).await.unwrap();
        assert_eq!(page.pagination.total, 2);
        assert!(page.campaigns.iter().all(|c| c.is_csr_campaign));

        let filter = CampaignFilter {
            query: "globe".to_string(),
            ..Default::default()
        };
        let page = service.search(&filter).await.unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.campaigns[0].brand.as_deref(), Some("Globe Telecom"));
    }

    #[tokio::test]
    async fn test_search_min_score_filter() {
        let service = test_service().await;
        let filter = CampaignFilter {
            min_score: Some(8.5),
            ..Default::default()
        };
        let page = service.search(&filter).await.unwrap();
        assert_eq!(page.pagination.total, 3);
        assert!(page
            .campaigns
            .iter()
            .all(|c| c.overall_ces_score.unwrap_or(0.0) >= 8.5));
    }

    #[tokio::test]
    async fn test_campaign_details_and_not_found() {
        let service = test_service().await;

        let page = service.search(&CampaignFilter::default()).await.unwrap();
        let id = page.campaigns[0].id;
        let details = service.campaign_details(id).await.unwrap();
        assert_eq!(details.campaign.id, id);
        assert!(details.related_campaigns.iter().all(|r| r.id != id));

        let missing = service.campaign_details(99999).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let service = test_service().await;
        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_campaigns, 5);
        assert_eq!(stats.processed_campaigns, 5);
        assert_eq!(stats.award_winners, 3);
        assert_eq!(stats.csr_campaigns, 2);
        assert_eq!(stats.cultural_campaigns, 3);
        assert_eq!(stats.youth_targeting, 1);
    }

    #[tokio::test]
    async fn test_cultural_trends_shape() {
        let service = test_service().await;
        let trends = service.cultural_trends().await.unwrap();
        assert_eq!(trends.summary.total_cultural, 3);
        assert_eq!(trends.cultural_elements.len(), 3);
        assert!(trends.summary.avg_overall_score > 0.0);
        // best cultural relevance first
        assert_eq!(
            trends.cultural_elements[0].brand.as_deref(),
            Some("Jollibee")
        );
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let service = test_service().await;
        let dashboard = service.dashboard_summary().await.unwrap();
        assert_eq!(dashboard.summary.total_campaigns, 5);
        assert_eq!(dashboard.summary.award_winners, 3);
        assert_eq!(dashboard.top_campaigns.len(), 5);
        assert_eq!(dashboard.yearly_trends.len(), 1); // all seeds are 2023
        assert_eq!(dashboard.yearly_trends[0].year, 2023);
        assert_eq!(dashboard.yearly_trends[0].campaigns, 5);
    }
}
