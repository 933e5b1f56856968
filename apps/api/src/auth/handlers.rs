//! Axum route handlers for sign-up, sign-in and password recovery.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::recovery::{extract_recovery_token, validate_new_password};
use crate::errors::AppError;
use crate::identity::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RecoverRequest {
    pub email: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub access_token: Option<String>,
    /// The full reset link, when the client forwards it instead of the tokens.
    pub recovery_url: Option<String>,
}

impl CredentialsRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.email.trim().is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// POST /api/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    request.validate()?;

    let user = state
        .identity
        .sign_up(request.email.trim(), &request.password)
        .await?;
    info!("Registered identity {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: user.id,
            message: "Check your email to confirm!".to_string(),
        }),
    ))
}

/// POST /api/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<Session>, AppError> {
    request.validate()?;

    let session = state
        .identity
        .sign_in(request.email.trim(), &request.password)
        .await?;
    Ok(Json(session))
}

/// POST /api/auth/recover
pub async fn handle_recover(
    State(state): State<AppState>,
    Json(request): Json<RecoverRequest>,
) -> Result<StatusCode, AppError> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email cannot be empty".to_string()));
    }

    state
        .identity
        .send_recovery(email, request.redirect_to.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/reset
///
/// Completes a password reset with the recovery token from the emailed link.
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    validate_new_password(&request.password)?;

    let access_token = request
        .access_token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            request
                .recovery_url
                .as_deref()
                .and_then(extract_recovery_token)
        })
        .ok_or_else(|| {
            AppError::Validation(
                "No recovery token found. Follow the password reset link from your email."
                    .to_string(),
            )
        })?;

    let user = state
        .identity
        .update_password(&access_token, &request.password)
        .await?;
    info!("Password updated for identity {}", user.id);

    Ok(StatusCode::NO_CONTENT)
}
