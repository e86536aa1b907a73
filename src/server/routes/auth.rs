//! Minimal identity endpoints
//!
//! Registration hands out an opaque bearer token tied to an in-memory user
//! record. There are no passwords or sessions; identity management proper
//! lives outside this service.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::server::auth::AuthUser;
use crate::server::state::AppState;
use crate::types::{TokenResponse, User};

/// Body for POST /api/auth/register
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// POST /api/auth/register - Create a user and issue a bearer token
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(Error::validation("Username must not be empty"));
    }

    let user = User::new(username.clone());
    let user_id = user.id;
    state.users().insert(user_id, user);
    let token = state.issue_token(user_id);

    tracing::info!(%user_id, username, "registered user");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            user_id,
            username,
            token,
        }),
    ))
}

/// GET /api/auth/me - Return the authenticated user
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>> {
    state
        .users()
        .get(&user_id)
        .map(Json)
        .ok_or_else(|| Error::NotFound("user".into()))
}
