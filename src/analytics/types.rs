use serde::Serialize;

use crate::models::{Pagination, Transaction};

/// Dashboard KPI row
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: i64,
    pub profit_margin: f64,
    pub avg_order_value: f64,
}

/// One month of aggregated sales
#[derive(Debug, Clone, Serialize)]
pub struct SalesTrendPoint {
    pub period: String,
    pub sales: f64,
    pub profit: f64,
    pub orders: i64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
    pub orders: i64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub total_sales: f64,
    pub total_profit: f64,
    pub quantity_sold: i64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeographyAnalytics {
    pub region: String,
    pub city: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub orders: i64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}
