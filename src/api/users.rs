use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tower_cookies::Cookies;

use crate::auth::{self, AuthError};
use crate::state::AppState;
use gagambi_backend::models::{User, UserInfo};

/// GET /api/users - list users (admin only)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Json<Vec<UserInfo>>, AuthError> {
    auth::require_admin(&cookies, &state.db).await?;

    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
        .fetch_all(&state.db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "server error" })),
            )
        })?;

    Ok(Json(users.iter().map(UserInfo::from).collect()))
}

/// GET /api/users/:id - user details (admin only)
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Path(id): Path<String>,
) -> Result<Json<UserInfo>, AuthError> {
    auth::require_admin(&cookies, &state.db).await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "server error" })),
            )
        })?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "user not found" })),
        ))?;

    Ok(Json(UserInfo::from(&user)))
}
