//! Hosted auth client (GoTrue-compatible REST API).
//!
//! Every call carries the project's public `apikey` header. Service error
//! text is passed through verbatim so forms can show it as-is.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sagebot_config::AppConfig;
use sagebot_core::auth::{AuthEvent, AuthService, AuthSession, AuthUser, SignUpOutcome};
use sagebot_core::error::AuthError;
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

pub struct HostedAuthClient {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
    events: broadcast::Sender<AuthEvent>,
}

impl HostedAuthClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: reqwest::Client::new(),
            events,
        }
    }

    /// Build from the `[auth]` section. Both the URL and the public key
    /// must be set.
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let url = config
            .auth
            .url
            .as_deref()
            .ok_or_else(|| AuthError::NotConfigured("auth.url is not set".into()))?;
        let key = config
            .auth
            .anon_key
            .as_deref()
            .ok_or_else(|| AuthError::NotConfigured("auth.anon_key is not set".into()))?;
        Ok(Self::new(url, key))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<String, AuthError> {
        debug!(endpoint = path, "Auth request");
        let response = self
            .client
            .post(self.endpoint(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text);
            warn!(status = status.as_u16(), error = %message, "Auth service error");
            return Err(AuthError::Service(message));
        }
        Ok(text)
    }

    fn notify(&self, event: AuthEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Pull a human-readable message out of an auth error body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error_description: Option<String>,
        msg: Option<String>,
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.message).or(e.error))
        .unwrap_or_else(|| body.trim().to_string())
}

// --- Wire types ---

#[derive(Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<WireMetadata>,
}

#[derive(Deserialize)]
struct WireMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

impl From<WireUser> for AuthUser {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            display_name: user.user_metadata.and_then(|m| m.full_name),
        }
    }
}

#[derive(Deserialize)]
struct WireSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: WireUser,
}

impl From<WireSession> for AuthSession {
    fn from(session: WireSession) -> Self {
        let expires_at = session
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| {
                session
                    .expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
            });
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at,
            user: session.user.into(),
        }
    }
}

fn parse_session(body: &str) -> Result<AuthSession, AuthError> {
    serde_json::from_str::<WireSession>(body)
        .map(Into::into)
        .map_err(|e| AuthError::Malformed(e.to_string()))
}

#[async_trait]
impl AuthService for HostedAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let body = self
            .post(
                "token?grant_type=password",
                serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await?;
        let session = parse_session(&body)?;
        info!(email = %session.user.email, "Signed in");
        self.notify(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let body = self
            .post(
                "signup",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "data": { "full_name": display_name },
                }),
                None,
            )
            .await?;

        // With email confirmation on, the service returns the bare user.
        if let Ok(session) = serde_json::from_str::<WireSession>(&body) {
            let session: AuthSession = session.into();
            info!(email = %session.user.email, "Signed up and signed in");
            self.notify(AuthEvent::SignedIn(session.user.clone()));
            return Ok(SignUpOutcome::SignedIn(session));
        }
        let user: AuthUser = serde_json::from_str::<WireUser>(&body)
            .map_err(|e| AuthError::Malformed(e.to_string()))?
            .into();
        info!(email = %user.email, "Signed up, confirmation pending");
        Ok(SignUpOutcome::ConfirmationSent(user))
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError> {
        self.post("logout", serde_json::json!({}), Some(session.access_token.as_str()))
            .await?;
        info!(email = %session.user.email, "Signed out");
        self.notify(AuthEvent::SignedOut);
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.post("recover", serde_json::json!({ "email": email }), None)
            .await?;
        info!(email = %email, "Password recovery requested");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::{Json, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use std::collections::HashMap;

    fn session_json(email: &str) -> serde_json::Value {
        serde_json::json!({
            "access_token": "access-1",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 4102444800i64,
            "refresh_token": "refresh-1",
            "user": {
                "id": "user-1",
                "email": email,
                "user_metadata": { "full_name": "Asha Rao" }
            }
        })
    }

    async fn token(
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some("anon") {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": "No API key found in request" })),
            );
        }
        if query.get("grant_type").map(String::as_str) != Some("password") {
            return (StatusCode::BAD_REQUEST, Json(serde_json::json!({})));
        }
        if body["password"] != "hunter22" {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials"
                })),
            );
        }
        let email = body["email"].as_str().unwrap_or("").to_string();
        (StatusCode::OK, Json(session_json(&email)))
    }

    async fn signup(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
        let email = body["email"].as_str().unwrap_or("");
        if email == "taken@example.com" {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "code": 422, "msg": "User already registered" })),
            );
        }
        // Confirmation flow: bare user echoing the submitted profile name.
        (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": "user-2",
                "email": email,
                "user_metadata": { "full_name": body["data"]["full_name"] }
            })),
        )
    }

    async fn logout(headers: HeaderMap) -> StatusCode {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some("Bearer access-1") => StatusCode::NO_CONTENT,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    async fn recover() -> Json<serde_json::Value> {
        Json(serde_json::json!({}))
    }

    async fn client() -> HostedAuthClient {
        let app = Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/logout", post(logout))
            .route("/auth/v1/recover", post(recover));
        HostedAuthClient::new(serve(app).await, "anon")
    }

    #[tokio::test]
    async fn sign_in_returns_session_and_notifies() {
        let client = client().await;
        let mut events = client.subscribe();

        let session = client.sign_in("asha@example.com", "hunter22").await.unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.user.email, "asha@example.com");
        assert_eq!(session.user.display_name.as_deref(), Some("Asha Rao"));
        assert!(!session.is_expired());

        match events.recv().await.unwrap() {
            AuthEvent::SignedIn(user) => assert_eq!(user.id, "user-1"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_surfaces_service_text() {
        let client = client().await;
        let err = client.sign_in("asha@example.com", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn sign_up_pending_confirmation_carries_profile_name() {
        let client = client().await;
        match client.sign_up("new@example.com", "pw123456", "Ravi").await.unwrap() {
            SignUpOutcome::ConfirmationSent(user) => {
                assert_eq!(user.email, "new@example.com");
                assert_eq!(user.display_name.as_deref(), Some("Ravi"));
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_sign_up_surfaces_service_text() {
        let client = client().await;
        let err = client
            .sign_up("taken@example.com", "pw123456", "Ravi")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }

    #[tokio::test]
    async fn sign_out_uses_session_token() {
        let client = client().await;
        let mut events = client.subscribe();
        let session = client.sign_in("asha@example.com", "hunter22").await.unwrap();
        let _ = events.recv().await;

        client.sign_out(&session).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
    }

    #[tokio::test]
    async fn reset_password_succeeds() {
        let client = client().await;
        client.reset_password("asha@example.com").await.unwrap();
    }

    #[test]
    fn error_message_fallbacks() {
        assert_eq!(error_message(r#"{"msg":"m"}"#), "m");
        assert_eq!(error_message(r#"{"message":"x"}"#), "x");
        assert_eq!(error_message(r#"{"error":"e"}"#), "e");
        assert_eq!(error_message("plain failure\n"), "plain failure");
    }

    #[test]
    fn from_config_requires_url_and_key() {
        let mut config = AppConfig::default();
        assert!(matches!(
            HostedAuthClient::from_config(&config),
            Err(AuthError::NotConfigured(_))
        ));
        config.auth.url = Some("https://project.example.co".into());
        config.auth.anon_key = Some("anon".into());
        let client = HostedAuthClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint("signup"),
            "https://project.example.co/auth/v1/signup"
        );
    }
}
