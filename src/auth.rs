//! Session-token authentication
//!
//! Random session tokens stored in the user_sessions table, carried by
//! the `session_token` cookie. One active session per user.

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_cookies::Cookies;

use gagambi_backend::models::User;

pub const SESSION_COOKIE_NAME: &str = "session_token";

/// Session lifetime: 7 days
const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

pub type AuthError = (StatusCode, Json<Value>);

fn unauthorized(message: &str) -> AuthError {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

fn server_error() -> AuthError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "server error" })),
    )
}

/// Create a session for the user, replacing any previous one
pub async fn create_session(pool: &SqlitePool, user_id: &str) -> Result<String, AuthError> {
    use rand::Rng;
    let token: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();

    let now = chrono::Utc::now();
    let expires_at = now.timestamp() + SESSION_TTL_SECS;

    sqlx::query("DELETE FROM user_sessions WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|_| server_error())?;

    sqlx::query(
        "INSERT INTO user_sessions (token, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&token)
    .bind(user_id)
    .bind(expires_at)
    .bind(now.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|_| server_error())?;

    Ok(token)
}

/// Delete a session (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) {
    if let Err(e) = sqlx::query("DELETE FROM user_sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
    {
        tracing::warn!("Failed to delete session: {}", e);
    }
}

/// Resolve the current user from the session cookie, if any
pub async fn current_user(cookies: &Cookies, pool: &SqlitePool) -> Option<User> {
    let token = cookies.get(SESSION_COOKIE_NAME)?.value().to_string();

    let user_id: Option<String> = sqlx::query_scalar(
        "SELECT user_id FROM user_sessions WHERE token = ? AND expires_at > ?",
    )
    .bind(&token)
    .bind(chrono::Utc::now().timestamp())
    .fetch_optional(pool)
    .await
    .ok()
    .flatten()?;

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? AND enabled = 1")
        .bind(&user_id)
        .fetch_optional(pool)
        .await
        .ok()
        .flatten()
}

/// Require a logged-in user
pub async fn require_user(cookies: &Cookies, pool: &SqlitePool) -> Result<User, AuthError> {
    current_user(cookies, pool)
        .await
        .ok_or_else(|| unauthorized("not logged in"))
}

/// Require a logged-in administrator
pub async fn require_admin(cookies: &Cookies, pool: &SqlitePool) -> Result<User, AuthError> {
    let user = require_user(cookies, pool).await?;
    if !user.is_admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "administrator access required" })),
        ));
    }
    Ok(user)
}
