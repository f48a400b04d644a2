//! Error types for the SageBot domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

// --- Bounded context errors ---

const INVALID_REQUEST: &str = "Invalid request. Please check your message and try again.";
const KEY_REJECTED: &str =
    "API key authentication failed. Please check your API key configuration.";
const RELAY_AUTH_FAILED: &str = "API authentication failed. Please try again later.";
const RATE_LIMITED: &str = "Rate limit exceeded. Please wait a moment and try again.";
const SERVER_ERROR: &str = "Server error. Please try again later.";
const GENERIC_FAILURE: &str = "I'm sorry, there was an error processing your request.";

/// Text shown when the service answered but produced no usable reply.
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't process your request. Please try again.";

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {body} (status: {status})")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion service returned no text")]
    EmptyReply,

    #[error("Completion service not configured: {0}")]
    NotConfigured(String),

    #[error("Malformed completion response: {0}")]
    Malformed(String),

    /// A relay already turned the failure into user-facing text.
    #[error("Relay error: {0}")]
    Relayed(String),
}

impl CompletionError {
    /// The assistant-style text appended to a transcript when a call fails.
    pub fn user_message(&self) -> String {
        self.map_message(KEY_REJECTED)
    }

    /// Same mapping as [`user_message`](Self::user_message), worded for a
    /// relay whose credential the caller does not control.
    pub fn relay_message(&self) -> String {
        self.map_message(RELAY_AUTH_FAILED)
    }

    fn map_message(&self, auth_failed: &str) -> String {
        match self {
            Self::Status { status, .. } => match status {
                400 => INVALID_REQUEST,
                401 | 403 => auth_failed,
                429 => RATE_LIMITED,
                500..=599 => SERVER_ERROR,
                _ => GENERIC_FAILURE,
            }
            .to_string(),
            Self::EmptyReply => EMPTY_REPLY_FALLBACK.to_string(),
            Self::NotConfigured(what) => format!("The assistant is not configured yet: {what}."),
            Self::Relayed(message) => message.clone(),
            Self::Network(_) | Self::Malformed(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Message from the hosted service, passed through verbatim.
    #[error("{0}")]
    Service(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Auth service not configured: {0}")]
    NotConfigured(String),

    #[error("Malformed auth response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> CompletionError {
        CompletionError::Status {
            status: code,
            body: "{\"error\":{}}".into(),
        }
    }

    #[test]
    fn completion_error_displays_correctly() {
        let err = status(429);
        assert!(err.to_string().contains("429"));
        let boxed: Box<dyn std::error::Error> = err.into();
        assert!(boxed.to_string().contains("status: 429"));
    }

    #[test]
    fn status_codes_map_to_user_messages() {
        assert_eq!(status(400).user_message(), INVALID_REQUEST);
        assert_eq!(status(401).user_message(), KEY_REJECTED);
        assert_eq!(status(403).user_message(), KEY_REJECTED);
        assert_eq!(status(429).user_message(), RATE_LIMITED);
        assert_eq!(status(500).user_message(), SERVER_ERROR);
        assert_eq!(status(503).user_message(), SERVER_ERROR);
        assert_eq!(status(418).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn relay_wording_differs_only_for_auth_failures() {
        assert_eq!(status(401).relay_message(), RELAY_AUTH_FAILED);
        assert_eq!(status(429).relay_message(), RATE_LIMITED);
    }

    #[test]
    fn transport_failures_use_generic_message() {
        let err = CompletionError::Network("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(CompletionError::EmptyReply.user_message(), EMPTY_REPLY_FALLBACK);
    }

    #[test]
    fn relayed_message_passes_through() {
        let err = CompletionError::Relayed("Server error. Please try again later.".into());
        assert_eq!(err.user_message(), SERVER_ERROR);
    }

    #[test]
    fn auth_service_message_is_verbatim() {
        let err = AuthError::Service("Invalid login credentials".into());
        assert_eq!(err.to_string(), "Invalid login credentials");
    }
}
