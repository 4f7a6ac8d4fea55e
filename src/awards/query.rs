//! Campaign search query construction
//!
//! Builds the filtered/sorted/paginated SELECT and its matching COUNT
//! statement from a structured filter. User-controlled values are never
//! written into SQL text: identifiers (sort column, sort direction) pass
//! an allow-list check, everything else becomes a bound parameter.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiError;

/// Sort columns permitted to appear literally in ORDER BY
const SORT_COLUMNS: &[&str] = &[
    "overall_ces_score",
    "cultural_relevance_score",
    "emotional_impact_score",
    "innovation_score",
    "execution_score",
    "award_likelihood",
    "year",
    "brand",
    "campaign_name",
];

const DEFAULT_SORT_COLUMN: &str = "overall_ces_score";

/// Text columns the free-text query is OR-matched against
const TEXT_COLUMNS: &[&str] = &["campaign_name", "brand", "award_show"];

/// Boolean filter keys and their 1:1 column mapping
const BOOLEAN_FILTERS: &[&str] = &[
    "won_award",
    "is_csr_campaign",
    "uses_local_culture",
    "targets_youth",
    "has_environmental_angle",
    "is_purpose_driven",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Allow-list parse; anything unrecognized falls back to the default
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
            Some("asc") => Self::Asc,
            Some("desc") => Self::Desc,
            _ => Self::default(),
        }
    }

    fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A value destined for a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Real(f64),
    Text(String),
}

/// Structured campaign search filter. All constraints optional; absent
/// keys add no predicate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CampaignFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub won_award: Option<bool>,
    #[serde(default)]
    pub is_csr_campaign: Option<bool>,
    #[serde(default)]
    pub uses_local_culture: Option<bool>,
    #[serde(default)]
    pub targets_youth: Option<bool>,
    #[serde(default)]
    pub has_environmental_angle: Option<bool>,
    #[serde(default)]
    pub is_purpose_driven: Option<bool>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

impl Default for CampaignFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            won_award: None,
            is_csr_campaign: None,
            uses_local_culture: None,
            targets_youth: None,
            has_environmental_angle: None,
            is_purpose_driven: None,
            min_score: None,
            year: None,
            sort_by: None,
            sort_order: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl CampaignFilter {
    fn flag(&self, key: &str) -> Option<bool> {
        match key {
            "won_award" => self.won_award,
            "is_csr_campaign" => self.is_csr_campaign,
            "uses_local_culture" => self.uses_local_culture,
            "targets_youth" => self.targets_youth,
            "has_environmental_angle" => self.has_environmental_angle,
            "is_purpose_driven" => self.is_purpose_driven,
            _ => None,
        }
    }

    /// Echo of the constraints that actually took effect, for client display
    pub fn applied(&self) -> serde_json::Value {
        let mut applied = serde_json::Map::new();
        for key in BOOLEAN_FILTERS {
            if let Some(value) = self.flag(key) {
                applied.insert(key.to_string(), json!(value));
            }
        }
        if let Some(min_score) = self.min_score.filter(|v| *v != 0.0) {
            applied.insert("min_score".to_string(), json!(min_score));
        }
        if let Some(year) = self.year.filter(|v| *v != 0) {
            applied.insert("year".to_string(), json!(year));
        }
        applied.insert("sort_by".to_string(), json!(resolve_sort_column(self.sort_by.as_deref())));
        applied.insert(
            "sort_order".to_string(),
            json!(SortDirection::parse(self.sort_order.as_deref()).as_sql()),
        );
        serde_json::Value::Object(applied)
    }
}

/// A built statement pair: page SELECT plus its derived COUNT
#[derive(Debug, Clone)]
pub struct CampaignQuery {
    pub select_sql: String,
    pub select_params: Vec<BindValue>,
    pub count_sql: String,
    pub count_params: Vec<BindValue>,
}

/// Unknown sort columns silently fall back to the default; only
/// allow-listed names ever reach the SQL text.
fn resolve_sort_column(raw: Option<&str>) -> &'static str {
    match raw {
        Some(requested) => SORT_COLUMNS
            .iter()
            .find(|col| **col == requested)
            .copied()
            .unwrap_or(DEFAULT_SORT_COLUMN),
        None => DEFAULT_SORT_COLUMN,
    }
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Build the campaign page query and its count companion.
    ///
    /// The count statement shares the WHERE clause (and therefore the
    /// filter parameter list) with the select statement; only the
    /// trailing limit/offset binds are select-only.
    pub fn build(filter: &CampaignFilter) -> Result<CampaignQuery, ApiError> {
        if filter.limit < 0 || filter.offset < 0 {
            return Err(ApiError::validation("limit and offset must be non-negative"));
        }

        let mut where_clause = String::from(" WHERE 1=1");
        let mut params: Vec<BindValue> = Vec::new();

        let text = filter.query.trim();
        if !text.is_empty() {
            let like = TEXT_COLUMNS
                .iter()
                .map(|col| format!("{} LIKE ?", col))
                .collect::<Vec<_>>()
                .join(" OR ");
            where_clause.push_str(&format!(" AND ({})", like));
            for _ in TEXT_COLUMNS {
                params.push(BindValue::Text(format!("%{}%", text)));
            }
        }

        for key in BOOLEAN_FILTERS {
            if let Some(value) = filter.flag(key) {
                where_clause.push_str(&format!(" AND {} = ?", key));
                params.push(BindValue::Int(if value { 1 } else { 0 }));
            }
        }

        // Zero is treated as absent, matching the ingest side's "unset" convention
        if let Some(min_score) = filter.min_score.filter(|v| *v != 0.0) {
            where_clause.push_str(" AND overall_ces_score >= ?");
            params.push(BindValue::Real(min_score));
        }
        if let Some(year) = filter.year.filter(|v| *v != 0) {
            where_clause.push_str(" AND year = ?");
            params.push(BindValue::Int(year));
        }

        let count_sql = format!("SELECT COUNT(*) FROM campaigns{}", where_clause);
        let count_params = params.clone();

        let sort_column = resolve_sort_column(filter.sort_by.as_deref());
        let direction = SortDirection::parse(filter.sort_order.as_deref());

        let select_sql = format!(
            "SELECT * FROM campaigns{} ORDER BY {} {} LIMIT ? OFFSET ?",
            where_clause,
            sort_column,
            direction.as_sql(),
        );
        params.push(BindValue::Int(filter.limit));
        params.push(BindValue::Int(filter.offset));

        Ok(CampaignQuery {
            select_sql,
            select_params: params,
            count_sql,
            count_params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_params_are_select_params_minus_pagination() {
        let filter = CampaignFilter {
            won_award: Some(true),
            year: Some(2023),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();

        assert_eq!(
            query.count_params.as_slice(),
            &query.select_params[..query.select_params.len() - 2]
        );
        assert_eq!(
            query.select_params[query.select_params.len() - 2..],
            [BindValue::Int(10), BindValue::Int(0)]
        );
    }

    #[test]
    fn test_boolean_coercion() {
        let filter = CampaignFilter {
            won_award: Some(true),
            is_csr_campaign: Some(false),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();

        assert!(query.select_sql.contains("won_award = ?"));
        assert!(query.select_sql.contains("is_csr_campaign = ?"));
        assert_eq!(query.count_params, vec![BindValue::Int(1), BindValue::Int(0)]);
    }

    #[test]
    fn test_free_text_becomes_like_binds() {
        let filter = CampaignFilter {
            query: "  jollibee  ".to_string(),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();

        assert!(query
            .select_sql
            .contains("(campaign_name LIKE ? OR brand LIKE ? OR award_show LIKE ?)"));
        assert_eq!(query.count_params.len(), 3);
        for param in &query.count_params {
            assert_eq!(param, &BindValue::Text("%jollibee%".to_string()));
        }
        // the search term itself never lands in SQL text
        assert!(!query.select_sql.contains("jollibee"));
    }

    #[test]
    fn test_blank_query_adds_no_predicate() {
        let filter = CampaignFilter {
            query: "   ".to_string(),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();
        assert!(!query.select_sql.contains("LIKE"));
        assert!(query.count_params.is_empty());
    }

    #[test]
    fn test_zero_numeric_filters_treated_as_absent() {
        let filter = CampaignFilter {
            min_score: Some(0.0),
            year: Some(0),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();
        assert!(!query.select_sql.contains("overall_ces_score >="));
        assert!(!query.select_sql.contains("year = ?"));

        let filter = CampaignFilter {
            min_score: Some(8.0),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();
        assert!(query.select_sql.contains("overall_ces_score >= ?"));
        assert_eq!(query.count_params, vec![BindValue::Real(8.0)]);
    }

    #[test]
    fn test_unknown_sort_field_never_reaches_sql() {
        let filter = CampaignFilter {
            sort_by: Some("1; DROP TABLE campaigns--".to_string()),
            sort_order: Some("SIDEWAYS".to_string()),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();

        assert!(!query.select_sql.contains("DROP TABLE"));
        assert!(!query.select_sql.contains("SIDEWAYS"));
        assert!(query.select_sql.ends_with("ORDER BY overall_ces_score DESC LIMIT ? OFFSET ?"));
    }

    #[test]
    fn test_allow_listed_sort_field_is_used() {
        let filter = CampaignFilter {
            sort_by: Some("cultural_relevance_score".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();
        assert!(query.select_sql.contains("ORDER BY cultural_relevance_score ASC"));
    }

    #[test]
    fn test_negative_pagination_rejected() {
        let filter = CampaignFilter {
            limit: -1,
            ..Default::default()
        };
        assert!(matches!(QueryBuilder::build(&filter), Err(ApiError::Validation(_))));

        let filter = CampaignFilter {
            offset: -5,
            ..Default::default()
        };
        assert!(matches!(QueryBuilder::build(&filter), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_count_sql_has_no_order_or_pagination() {
        let filter = CampaignFilter {
            won_award: Some(true),
            sort_by: Some("year".to_string()),
            ..Default::default()
        };
        let query = QueryBuilder::build(&filter).unwrap();
        assert!(query.count_sql.starts_with("SELECT COUNT(*) FROM campaigns"));
        assert!(!query.count_sql.contains("ORDER BY"));
        assert!(!query.count_sql.contains("LIMIT"));
    }

    #[test]
    fn test_applied_filters_echo() {
        let filter = CampaignFilter {
            won_award: Some(true),
            min_score: Some(7.5),
            sort_by: Some("bogus".to_string()),
            ..Default::default()
        };
        let applied = filter.applied();
        assert_eq!(applied["won_award"], json!(true));
        assert_eq!(applied["min_score"], json!(7.5));
        // fallback sort is what actually took effect
        assert_eq!(applied["sort_by"], json!("overall_ces_score"));
        assert_eq!(applied["sort_order"], json!("DESC"));
        assert!(applied.get("year").is_none());
    }
}
