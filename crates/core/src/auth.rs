//! AuthService trait — the hosted authentication service, treated as opaque.
//!
//! Three operations (password sign-in, sign-up with a profile name,
//! sign-out) plus password recovery, and one subscription for auth-state
//! changes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::AuthError;

/// A signed-up user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// An authenticated session.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|t| t <= Utc::now())
    }
}

/// Result of a sign-up: either an immediate session, or a pending email
/// confirmation.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    ConfirmationSent(AuthUser),
}

/// Auth-state change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(AuthUser),
    SignedOut,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthError>;

    /// Ask the service to email a password-recovery link.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    /// Receive auth-state changes emitted after successful calls.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Reject blank form fields before any network call.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), AuthError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AuthError::Service(format!("{name} is required"))),
        None => Ok(()),
    }
}
