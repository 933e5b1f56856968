//! Identity client: the single point of entry for calls to the hosted identity API
//! (GoTrue-compatible REST: `/signup`, `/token`, `/user`, `/recover`).
//!
//! No retries. Every failure is returned to the caller as-is.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

pub mod extractor;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Api { status, message } if status == 401 || status == 403 => {
                debug!("Identity API rejected credentials: {message}");
                AppError::Unauthorized
            }
            IdentityError::Api { status, message } if (400..500).contains(&status) => {
                AppError::Validation(message)
            }
            other => AppError::Identity(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: IdentityUser,
}

/// `/signup` answers with a bare user when email confirmation is on, else a session.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(Session),
    User(IdentityUser),
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Error bodies vary between endpoints; take the first message-like field present.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, IdentityError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Registers a new identity.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError> {
        let request = self
            .client
            .post(self.url("signup"))
            .json(&Credentials { email, password });
        let user = match self.send_json::<SignUpResponse>(request).await? {
            SignUpResponse::Session(session) => session.user,
            SignUpResponse::User(user) => user,
        };
        debug!("Identity sign-up succeeded for user {}", user.id);
        Ok(user)
    }

    /// Password grant.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        let request = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        self.send_json(request).await
    }

    /// Resolves an access token to its user.
    pub async fn get_user(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
        let request = self.client.get(self.url("user")).bearer_auth(access_token);
        self.send_json(request).await
    }

    /// Sends the password-recovery email.
    pub async fn send_recovery(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), IdentityError> {
        let mut request = self
            .client
            .post(self.url("recover"))
            .json(&serde_json::json!({ "email": email }));
        if let Some(redirect_to) = redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }
        self.send(request).await.map(|_| ())
    }

    /// Sets a new password for the user owning `access_token` (a recovery token works).
    pub async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError> {
        let request = self
            .client
            .put(self.url("user"))
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": password }));
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, IdentityError> {
        Ok(self.send(request).await?.json().await?)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, IdentityError> {
        let response = request.header("apikey", &self.api_key).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Identity API returned {status}: {body}");
        }
        Err(IdentityError::Api {
            status: status.as_u16(),
            message: parse_error_message(&body),
        })
    }
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as HttpStatus;

    #[test]
    fn test_parse_error_message_prefers_msg() {
        let body = r#"{"code":400,"msg":"User already registered"}"#;
        assert_eq!(parse_error_message(body), "User already registered");
    }

    #[test]
    fn test_parse_error_message_oauth_shape() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(parse_error_message(body), "Invalid login credentials");
    }

    #[test]
    fn test_parse_error_message_falls_back_to_body() {
        assert_eq!(parse_error_message("upstream exploded"), "upstream exploded");
    }

    #[test]
    fn test_url_joins_cleanly() {
        let client = IdentityClient::new("https://id.example.com/auth/v1/", "key".into()).unwrap();
        assert_eq!(client.url("/token"), "https://id.example.com/auth/v1/token");
        assert_eq!(client.url("user"), "https://id.example.com/auth/v1/user");
    }

    #[test]
    fn test_sign_up_response_accepts_bare_user() {
        let body = r#"{"id":"u-1","email":"a@b.c","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#;
        match serde_json::from_str::<SignUpResponse>(body).unwrap() {
            SignUpResponse::User(user) => assert_eq!(user.id, "u-1"),
            SignUpResponse::Session(_) => panic!("expected bare user"),
        }
    }

    #[test]
    fn test_sign_up_response_accepts_session() {
        let body = r#"{"access_token":"t","token_type":"bearer","expires_in":3600,
                       "refresh_token":"r","user":{"id":"u-2","email":null}}"#;
        match serde_json::from_str::<SignUpResponse>(body).unwrap() {
            SignUpResponse::Session(session) => assert_eq!(session.user.id, "u-2"),
            SignUpResponse::User(_) => panic!("expected session"),
        }
    }

    #[test]
    fn test_api_errors_map_to_client_statuses() {
        let unauthorized: AppError = IdentityError::Api {
            status: 401,
            message: "bad jwt".into(),
        }
        .into();
        assert_eq!(unauthorized.status(), HttpStatus::UNAUTHORIZED);

        let invalid: AppError = IdentityError::Api {
            status: 422,
            message: "Password should be at least 6 characters".into(),
        }
        .into();
        assert_eq!(invalid.status(), HttpStatus::BAD_REQUEST);

        let upstream: AppError = IdentityError::Api {
            status: 503,
            message: "down".into(),
        }
        .into();
        assert_eq!(upstream.status(), HttpStatus::INTERNAL_SERVER_ERROR);
    }
}
