use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};

use crate::auth::{self, AuthError, SESSION_COOKIE_NAME};
use crate::state::AppState;
use gagambi_backend::models::{LoginRequest, User, UserInfo};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, AuthError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE (username = ? OR email = ?) AND enabled = 1",
    )
    .bind(&req.username)
    .bind(&req.username)
    .fetch_optional(&state.db)
    .await
    .map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "server error" })),
        )
    })?
    .ok_or((
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid username or password" })),
    ))?;

    let valid = bcrypt::verify(&req.password, &user.password_hash).map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "server error" })),
        )
    })?;

    if !valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid username or password" })),
        ));
    }

    let token = auth::create_session(&state.db, &user.id).await?;

    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    tracing::info!("User logged in: {}", user.username);

    Ok(Json(json!({
        "success": true,
        "user": UserInfo::from(&user),
    })))
}

pub async fn logout(State(state): State<Arc<AppState>>, cookies: Cookies) -> Json<Value> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE_NAME) {
        auth::delete_session(&state.db, cookie.value()).await;
    }

    let mut removal = Cookie::new(SESSION_COOKIE_NAME, "");
    removal.set_path("/");
    cookies.remove(removal);

    Json(json!({ "success": true }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<Json<UserInfo>, AuthError> {
    let user = auth::require_user(&cookies, &state.db).await?;
    Ok(Json(UserInfo::from(&user)))
}
