//! Retail analytics queries
//!
//! All aggregates here have a static shape, so they are fixed named
//! statements rather than built dynamically. Monetary aggregates are
//! rounded to 2 decimal places at the edge.

use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::{CreateTransactionRequest, Pagination, Transaction};
use crate::utils::{percentage, round2};

use super::types::*;

#[derive(Clone)]
pub struct AnalyticsService {
    db: SqlitePool,
}

impl AnalyticsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Dashboard KPIs: totals, profit margin, average order value
    pub async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        let (total_sales, total_profit, total_orders): (Option<f64>, Option<f64>, i64) =
            sqlx::query_as("SELECT SUM(sales), SUM(profit), COUNT(*) FROM transactions")
                .fetch_one(&self.db)
                .await?;

        let total_sales = total_sales.unwrap_or(0.0);
        let total_profit = total_profit.unwrap_or(0.0);

        Ok(DashboardMetrics {
            total_sales: round2(total_sales),
            total_profit: round2(total_profit),
            total_orders,
            profit_margin: percentage(total_profit, total_sales),
            avg_order_value: if total_orders > 0 {
                round2(total_sales / total_orders as f64)
            } else {
                0.0
            },
        })
    }

    /// Monthly sales trend, oldest month first, last 12 months with data
    pub async fn sales_trend(&self) -> Result<Vec<SalesTrendPoint>, ApiError> {
        let rows: Vec<(Option<String>, Option<f64>, Option<f64>, i64)> = sqlx::query_as(
            "SELECT strftime('%Y-%m', order_date) as period, SUM(sales), SUM(profit), COUNT(*) \
             FROM transactions GROUP BY period ORDER BY period DESC LIMIT 12",
        )
        .fetch_all(&self.db)
        .await?;

        let mut trend: Vec<SalesTrendPoint> = rows
            .into_iter()
            .filter_map(|(period, sales, profit, orders)| {
                let period = period?;
                let sales = sales.unwrap_or(0.0);
                Some(SalesTrendPoint {
                    period,
                    sales: round2(sales),
                    profit: round2(profit.unwrap_or(0.0)),
                    orders,
                    avg_order_value: if orders > 0 {
                        round2(sales / orders as f64)
                    } else {
                        0.0
                    },
                })
            })
            .collect();
        trend.reverse();
        Ok(trend)
    }

    /// Sales aggregated per product category, biggest first
    pub async fn category_sales(&self) -> Result<Vec<CategorySales>, ApiError> {
        let rows: Vec<(String, Option<f64>, Option<f64>, i64)> = sqlx::query_as(
            "SELECT category, SUM(sales), SUM(profit), COUNT(*) FROM transactions \
             WHERE category IS NOT NULL GROUP BY category ORDER BY SUM(sales) DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, sales, profit, orders)| {
                let sales = sales.unwrap_or(0.0);
                CategorySales {
                    category,
                    sales: round2(sales),
                    profit: round2(profit.unwrap_or(0.0)),
                    orders,
                    avg_order_value: if orders > 0 {
                        round2(sales / orders as f64)
                    } else {
                        0.0
                    },
                }
            })
            .collect())
    }

    /// Top 10 products by total sales
    pub async fn top_products(&self) -> Result<Vec<TopProduct>, ApiError> {
        let rows: Vec<(String, Option<String>, Option<String>, Option<f64>, Option<f64>, Option<i64>)> =
            sqlx::query_as(
                "SELECT product_id, product_name, category, SUM(sales), SUM(profit), SUM(quantity) \
                 FROM transactions WHERE product_id IS NOT NULL \
                 GROUP BY product_id, product_name, category \
                 ORDER BY SUM(sales) DESC LIMIT 10",
            )
            .fetch_all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(product_id, product_name, category, sales, profit, quantity)| {
                let total_sales = sales.unwrap_or(0.0);
                let total_profit = profit.unwrap_or(0.0);
                TopProduct {
                    product_id,
                    product_name,
                    category,
                    total_sales: round2(total_sales),
                    total_profit: round2(total_profit),
                    quantity_sold: quantity.unwrap_or(0),
                    profit_margin: percentage(total_profit, total_sales),
                }
            })
            .collect())
    }

    /// Sales rollup per region/city, biggest first
    pub async fn geography(&self) -> Result<Vec<GeographyAnalytics>, ApiError> {
        let rows: Vec<(String, String, Option<f64>, Option<f64>, i64)> = sqlx::query_as(
            "SELECT region, city, SUM(sales), SUM(profit), COUNT(*) FROM transactions \
             WHERE region IS NOT NULL AND city IS NOT NULL \
             GROUP BY region, city ORDER BY SUM(sales) DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(region, city, sales, profit, orders)| {
                let total_sales = sales.unwrap_or(0.0);
                GeographyAnalytics {
                    region,
                    city,
                    total_sales: round2(total_sales),
                    total_profit: round2(profit.unwrap_or(0.0)),
                    orders,
                    avg_order_value: if orders > 0 {
                        round2(total_sales / orders as f64)
                    } else {
                        0.0
                    },
                }
            })
            .collect())
    }

    /// Recent transactions page, newest order date first
    pub async fn transactions(&self, limit: i64, offset: i64) -> Result<TransactionPage, ApiError> {
        if limit < 0 || offset < 0 {
            return Err(ApiError::validation("limit and offset must be non-negative"));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.db)
            .await?;

        let transactions: Vec<Transaction> = sqlx::query_as(
            "SELECT * FROM transactions ORDER BY order_date DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(TransactionPage {
            transactions,
            pagination: Pagination::new(total, limit, offset),
        })
    }

    /// Insert one transaction, returning its row id
    pub async fn create_transaction(
        &self,
        req: &CreateTransactionRequest,
    ) -> Result<i64, ApiError> {
        if req.order_id.trim().is_empty() {
            return Err(ApiError::validation("order_id must not be empty"));
        }
        if req.order_date.trim().is_empty() {
            return Err(ApiError::validation("order_date must not be empty"));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO transactions (order_id, order_date, ship_date, ship_mode, \
             customer_id, customer_name, segment, product_id, product_name, category, \
             sub_category, sales, profit, quantity, discount, country_region, state, city, \
             postal_code, region, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.order_id)
        .bind(&req.order_date)
        .bind(&req.ship_date)
        .bind(&req.ship_mode)
        .bind(&req.customer_id)
        .bind(&req.customer_name)
        .bind(&req.segment)
        .bind(&req.product_id)
        .bind(&req.product_name)
        .bind(&req.category)
        .bind(&req.sub_category)
        .bind(req.sales)
        .bind(req.profit)
        .bind(req.quantity)
        .bind(req.discount)
        .bind(&req.country_region)
        .bind(&req.state)
        .bind(&req.city)
        .bind(&req.postal_code)
        .bind(&req.region)
        .bind(&now)
        .execute(&self.db)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> AnalyticsService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        crate::sample_data::seed_transactions(&pool, 40).await.unwrap();
        AnalyticsService::new(pool)
    }

    fn request(order_id: &str, order_date: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            order_id: order_id.to_string(),
            order_date: order_date.to_string(),
            ship_date: None,
            ship_mode: None,
            customer_id: None,
            customer_name: Some("Maria Santos".to_string()),
            segment: None,
            product_id: Some("PROD-TEST-001".to_string()),
            product_name: Some("Test Product".to_string()),
            category: Some("Electronics".to_string()),
            sub_category: None,
            sales: Some(1500.0),
            profit: Some(300.0),
            quantity: Some(2),
            discount: None,
            country_region: Some("Philippines".to_string()),
            state: None,
            city: Some("Manila".to_string()),
            postal_code: None,
            region: Some("NCR".to_string()),
        }
    }

    #[tokio::test]
    async fn test_dashboard_metrics_totals() {
        let service = test_service().await;
        let metrics = service.dashboard_metrics().await.unwrap();
        assert_eq!(metrics.total_orders, 40);
        assert!(metrics.total_sales > 0.0);
        assert!(metrics.total_profit < metrics.total_sales);
        assert!(metrics.profit_margin > 0.0 && metrics.profit_margin < 100.0);
        assert!(metrics.avg_order_value > 0.0);
    }

    #[tokio::test]
    async fn test_sales_trend_is_chronological() {
        let service = test_service().await;
        let trend = service.sales_trend().await.unwrap();
        assert!(!trend.is_empty());
        assert!(trend.len() <= 12);
        for window in trend.windows(2) {
            assert!(window[0].period < window[1].period);
        }
    }

    #[tokio::test]
    async fn test_category_sales_sorted_desc() {
        let service = test_service().await;
        let categories = service.category_sales().await.unwrap();
        assert!(!categories.is_empty());
        for window in categories.windows(2) {
            assert!(window[0].sales >= window[1].sales);
        }
        let total_orders: i64 = categories.iter().map(|c| c.orders).sum();
        assert_eq!(total_orders, 40);
    }

    #[tokio::test]
    async fn test_top_products_limited() {
        let service = test_service().await;
        let products = service.top_products().await.unwrap();
        assert!(products.len() <= 10);
        for window in products.windows(2) {
            assert!(window[0].total_sales >= window[1].total_sales);
        }
    }

    #[tokio::test]
    async fn test_transaction_pagination() {
        let service = test_service().await;

        let page = service.transactions(15, 0).await.unwrap();
        assert_eq!(page.transactions.len(), 15);
        assert_eq!(page.pagination.total, 40);
        assert!(page.pagination.has_more);

        let page = service.transactions(15, 30).await.unwrap();
        assert_eq!(page.transactions.len(), 10);
        assert!(!page.pagination.has_more);

        assert!(matches!(
            service.transactions(-1, 0).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_transaction() {
        let service = test_service().await;

        let id = service
            .create_transaction(&request("ORD-TEST-1", "2025-06-15"))
            .await
            .unwrap();
        assert!(id > 0);

        let metrics = service.dashboard_metrics().await.unwrap();
        assert_eq!(metrics.total_orders, 41);

        assert!(matches!(
            service.create_transaction(&request("", "2025-06-15")).await,
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            service.create_transaction(&request("ORD-X", "  ")).await,
            Err(ApiError::Validation(_))
        ));
    }
}
