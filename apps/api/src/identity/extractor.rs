use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use crate::errors::AppError;
use crate::identity::IdentityUser;
use crate::state::AppState;

/// The caller behind `Authorization: Bearer <token>`, resolved through the identity API.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: IdentityUser,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let access_token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let user = state.identity.get_user(access_token).await.map_err(|e| {
            warn!("Bearer token rejected: {e}");
            AppError::from(e)
        })?;

        Ok(AuthUser { user })
    }
}

/// Extracts the token from a `Bearer` authorization header. Scheme match is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
