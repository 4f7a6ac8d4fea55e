//! Scout retail analytics: fixed-shape aggregates over the transactions
//! table plus transaction listing and ingest.

pub mod service;
pub mod types;

pub use service::AnalyticsService;
