//! Database schema and first-run data
//!
//! Migrations are idempotent CREATE TABLE IF NOT EXISTS blocks run at
//! startup; default data (admin account, reference campaigns, sample
//! transactions) is inserted only when the corresponding table is empty.

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Generate random password
fn generate_random_password(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789!@#$%^&*";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            email TEXT,
            is_admin INTEGER NOT NULL DEFAULT 0,
            enabled INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_sessions (
            token TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            expires_at INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            filepath TEXT NOT NULL,
            file_extension TEXT,
            file_size INTEGER,
            created_at TEXT NOT NULL,
            processed_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_id INTEGER REFERENCES files(id),
            campaign_name TEXT,
            brand TEXT,
            year INTEGER,
            category TEXT,
            won_award INTEGER NOT NULL DEFAULT 0,
            award_show TEXT,
            award_level TEXT,
            award_category TEXT,
            is_csr_campaign INTEGER NOT NULL DEFAULT 0,
            is_purpose_driven INTEGER NOT NULL DEFAULT 0,
            is_social_impact INTEGER NOT NULL DEFAULT 0,
            has_environmental_angle INTEGER NOT NULL DEFAULT 0,
            targets_youth INTEGER NOT NULL DEFAULT 0,
            uses_local_culture INTEGER NOT NULL DEFAULT 0,
            overall_ces_score REAL,
            message_clarity_score REAL,
            emotional_impact_score REAL,
            cultural_relevance_score REAL,
            innovation_score REAL,
            execution_score REAL,
            award_likelihood REAL,
            confidence_level REAL,
            feature_count INTEGER NOT NULL DEFAULT 0,
            metric_count INTEGER NOT NULL DEFAULT 0,
            cultural_insight_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_brand ON campaigns(brand)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_year ON campaigns(year)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_ces_score ON campaigns(overall_ces_score)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id TEXT NOT NULL,
            order_date TEXT NOT NULL,
            ship_date TEXT,
            ship_mode TEXT,
            customer_id TEXT,
            customer_name TEXT,
            segment TEXT,
            product_id TEXT,
            product_name TEXT,
            category TEXT,
            sub_category TEXT,
            sales REAL,
            profit REAL,
            quantity INTEGER,
            discount REAL,
            country_region TEXT,
            state TEXT,
            city TEXT,
            postal_code TEXT,
            region TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_order_id ON transactions(order_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_order_date ON transactions(order_date)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_region ON transactions(region)")
        .execute(pool)
        .await?;

    tracing::info!("Database migration completed");

    Ok(())
}

/// Initialize default data on first startup
pub async fn initialize_default_data(pool: &SqlitePool, seed_transactions: u32) -> Result<()> {
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count == 0 {
        let admin_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let admin_password = generate_random_password(16);
        let password_hash = bcrypt::hash(&admin_password, bcrypt::DEFAULT_COST)?;

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, email, is_admin, enabled, created_at, updated_at) \
             VALUES (?, ?, ?, ?, 1, 1, ?, ?)",
        )
        .bind(&admin_id)
        .bind("admin")
        .bind(&password_hash)
        .bind("admin@gagambi.org")
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        tracing::info!("============================================================");
        tracing::info!("Default admin account created:");
        tracing::info!("  Username: admin");
        tracing::info!("  Password: {}", admin_password);
        tracing::info!("WARNING: Please save the password and change it after login!");
        tracing::info!("============================================================");
    }

    let campaign_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
        .fetch_one(pool)
        .await?;

    if campaign_count == 0 {
        crate::sample_data::seed_campaigns(pool).await?;
    }

    let transaction_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await?;

    if transaction_count == 0 && seed_transactions > 0 {
        crate::sample_data::seed_transactions(pool, seed_transactions).await?;
        tracing::info!("Seeded {} sample transactions", seed_transactions);
    }

    Ok(())
}
