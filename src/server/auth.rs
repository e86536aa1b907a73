//! Bearer token extractor
//!
//! Identity management proper is an external concern; this extractor only
//! resolves an `Authorization: Bearer <token>` header to a user ID via the
//! state's token map and rejects everything else with 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::Error;

use super::state::AppState;

/// The authenticated caller's user ID
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::Unauthorized("missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| Error::Unauthorized("expected a Bearer token".into()))?;

        let user_id = state
            .resolve_token(token)
            .ok_or_else(|| Error::Unauthorized("unknown token".into()))?;

        Ok(AuthUser(user_id))
    }
}
