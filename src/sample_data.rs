//! Sample data generation
//!
//! Seeds an empty database with realistic retail transactions and the
//! fixed reference set of award campaigns so every endpoint returns
//! meaningful data on a fresh install.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Electronics", &["Smartphones", "Laptops", "Tablets", "Accessories"]),
    ("Clothing", &["Mens Wear", "Womens Wear", "Kids Wear", "Footwear"]),
    ("Home & Garden", &["Furniture", "Kitchen", "Garden", "Decor"]),
    ("Sports", &["Equipment", "Apparel", "Outdoor", "Fitness"]),
    ("Food & Beverage", &["Beverages", "Snacks", "Groceries", "Frozen"]),
    ("Books", &["Fiction", "Non-Fiction", "Educational", "Magazines"]),
    ("Automotive", &["Parts", "Accessories", "Tools", "Care"]),
    ("Health & Beauty", &["Skincare", "Makeup", "Supplements", "Personal Care"]),
];

const REGIONS: &[(&str, &[&str])] = &[
    ("NCR", &["Manila", "Quezon City", "Makati", "Taguig", "Pasig"]),
    ("Central Luzon", &["Angeles", "San Fernando", "Cabanatuan", "Malolos"]),
    ("Southern Luzon", &["Batangas", "Lipa", "Calamba", "Lucena"]),
    ("Visayas", &["Cebu City", "Iloilo", "Bacolod", "Tacloban"]),
    ("Mindanao", &["Davao", "Cagayan de Oro", "Zamboanga", "Butuan"]),
];

const SEGMENTS: &[&str] = &["Consumer", "Corporate", "Home Office"];

const SHIP_MODES: &[&str] = &["Standard Class", "Second Class", "First Class", "Same Day"];

const FIRST_NAMES: &[&str] = &[
    "Maria", "Jose", "Juan", "Ana", "Antonio", "Carmen", "Manuel", "Josefa", "Francisco",
    "Dolores", "David", "Teresa", "Jorge", "Luz", "Pedro", "Esperanza", "Jesus", "Concepcion",
    "Rafael",
];

const LAST_NAMES: &[&str] = &[
    "Santos", "Reyes", "Cruz", "Bautista", "Ocampo", "Garcia", "Mendoza", "Torres", "Tomas",
    "Andres", "Marquez", "Romualdez", "Mercado", "Aguilar", "Flores", "Ramos", "Valdez",
    "Castillo", "Aquino",
];

/// One generated retail transaction, pre-insert
#[derive(Debug, Clone)]
pub struct SampleTransaction {
    pub order_id: String,
    pub order_date: String,
    pub ship_date: String,
    pub ship_mode: String,
    pub customer_id: String,
    pub customer_name: String,
    pub segment: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
    pub quantity: i64,
    pub discount: f64,
    pub region: String,
    pub city: String,
    pub postal_code: String,
}

/// Generate `count` randomized transactions dated within the last year
pub fn generate_transactions(count: u32) -> Vec<SampleTransaction> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    (0..count)
        .map(|i| {
            let order_date = today - Duration::days(rng.gen_range(0..365));
            let ship_date = order_date + Duration::days(rng.gen_range(1..=10));

            let (category, sub_categories) = *CATEGORIES.choose(&mut rng).unwrap();
            let sub_category = *sub_categories.choose(&mut rng).unwrap();
            let (region, cities) = *REGIONS.choose(&mut rng).unwrap();
            let city = *cities.choose(&mut rng).unwrap();

            let quantity = rng.gen_range(1..=10);
            let base_price: f64 = rng.gen_range(500.0..50000.0); // PHP
            let discount: f64 = rng.gen_range(0.0..0.3);
            let sales = crate::utils::round2(base_price * quantity as f64 * (1.0 - discount));
            let profit_margin: f64 = rng.gen_range(0.1..0.4);
            let profit = crate::utils::round2(sales * profit_margin);

            SampleTransaction {
                order_id: format!("ORD-{:06}", i + 1),
                order_date: order_date.format("%Y-%m-%d").to_string(),
                ship_date: ship_date.format("%Y-%m-%d").to_string(),
                ship_mode: SHIP_MODES.choose(&mut rng).unwrap().to_string(),
                customer_id: format!("CU-{}", rng.gen_range(1000..10000)),
                customer_name: format!(
                    "{} {}",
                    FIRST_NAMES.choose(&mut rng).unwrap(),
                    LAST_NAMES.choose(&mut rng).unwrap()
                ),
                segment: SEGMENTS.choose(&mut rng).unwrap().to_string(),
                product_id: format!(
                    "PROD-{}-{}",
                    category[..4].to_uppercase().replace(' ', ""),
                    rng.gen_range(100..1000)
                ),
                product_name: format!("{} Item {}", sub_category, rng.gen_range(1..=100)),
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                sales,
                profit,
                quantity,
                discount: (discount * 1000.0).round() / 1000.0,
                region: region.to_string(),
                city: city.to_string(),
                postal_code: format!("{}", rng.gen_range(1000..10000)),
            }
        })
        .collect()
}

/// Insert `count` generated transactions
pub async fn seed_transactions(pool: &SqlitePool, count: u32) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let mut tx = pool.begin().await?;

    for t in generate_transactions(count) {
        sqlx::query(
            "INSERT INTO transactions (order_id, order_date, ship_date, ship_mode, \
             customer_id, customer_name, segment, product_id, product_name, category, \
             sub_category, sales, profit, quantity, discount, country_region, state, city, \
             postal_code, region, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&t.order_id)
        .bind(&t.order_date)
        .bind(&t.ship_date)
        .bind(&t.ship_mode)
        .bind(&t.customer_id)
        .bind(&t.customer_name)
        .bind(&t.segment)
        .bind(&t.product_id)
        .bind(&t.product_name)
        .bind(&t.category)
        .bind(&t.sub_category)
        .bind(t.sales)
        .bind(t.profit)
        .bind(t.quantity)
        .bind(t.discount)
        .bind("Philippines")
        .bind(&t.region)
        .bind(&t.city)
        .bind(&t.postal_code)
        .bind(&t.region)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// The fixed reference campaigns used to bootstrap the awards dataset
pub async fn seed_campaigns(pool: &SqlitePool) -> Result<()> {
    // (name, brand, year, category, won, show, level,
    //  csr, purpose, youth, cultural, overall, clarity, emotional, cultural_rel)
    let campaigns: &[(
        &str, &str, i64, &str, bool, Option<&str>, Option<&str>,
        bool, bool, bool, bool,
        f64, Option<f64>, Option<f64>, Option<f64>,
    )] = &[
        (
            "Jollibee Kwentong Jollibee: Pasko", "Jollibee", 2023, "QSR/Food",
            true, Some("Adobo Design Awards"), Some("Gold"),
            false, false, false, true,
            9.2, None, Some(9.5), Some(9.8),
        ),
        (
            "Globe #CreateCourage Anti-Cyberbullying", "Globe Telecom", 2023, "Telco",
            true, Some("PANAta Awards"), Some("Silver"),
            true, false, true, false,
            8.8, Some(8.9), None, None,
        ),
        (
            "San Miguel Walang Iwanan", "San Miguel Corporation", 2023, "Beverage",
            false, None, None,
            true, false, false, true,
            8.5, None, Some(8.7), Some(9.0),
        ),
        (
            "BDO We Find Ways", "BDO", 2023, "Banking",
            false, None, None,
            false, true, false, false,
            7.9, Some(8.5), None, None,
        ),
        (
            "Safeguard Laban Moms", "Safeguard", 2023, "FMCG",
            true, Some("Kidlat Awards"), Some("Bronze"),
            false, false, false, true,
            8.3, None, Some(8.5), Some(8.8),
        ),
    ];

    let now = Utc::now().to_rfc3339();
    let mut tx = pool.begin().await?;

    for c in campaigns {
        sqlx::query(
            "INSERT INTO campaigns (campaign_name, brand, year, category, won_award, \
             award_show, award_level, is_csr_campaign, is_purpose_driven, targets_youth, \
             uses_local_culture, overall_ces_score, message_clarity_score, \
             emotional_impact_score, cultural_relevance_score, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(c.0)
        .bind(c.1)
        .bind(c.2)
        .bind(c.3)
        .bind(c.4)
        .bind(c.5)
        .bind(c.6)
        .bind(c.7)
        .bind(c.8)
        .bind(c.9)
        .bind(c.10)
        .bind(c.11)
        .bind(c.12)
        .bind(c.13)
        .bind(c.14)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!("Seeded {} reference campaigns", campaigns.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_transactions_are_well_formed() {
        let transactions = generate_transactions(50);
        assert_eq!(transactions.len(), 50);

        for t in &transactions {
            assert!(t.order_id.starts_with("ORD-"));
            assert!(t.sales > 0.0);
            assert!(t.profit > 0.0);
            assert!(t.profit < t.sales);
            assert!((1..=10).contains(&t.quantity));
            assert!((0.0..=0.3).contains(&t.discount));
            assert!(t.ship_date >= t.order_date);
        }
    }

    #[test]
    fn test_order_ids_are_sequential() {
        let transactions = generate_transactions(3);
        assert_eq!(transactions[0].order_id, "ORD-000001");
        assert_eq!(transactions[2].order_id, "ORD-000003");
    }
}
