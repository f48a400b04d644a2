//! Client for a SageBot relay (`sagebot relay` or a compatible function).
//!
//! The relay owns the completion credential and builds the prompt itself,
//! so only the raw user text and the persona id cross the wire.

use async_trait::async_trait;
use sagebot_core::error::CompletionError;
use sagebot_core::provider::{CompletionRequest, CompletionService};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct RelayProvider {
    url: String,
    bearer: Option<String>,
    client: reqwest::Client,
}

impl RelayProvider {
    /// `url` is the full endpoint, e.g. `http://127.0.0.1:8787/chat`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send `Authorization: Bearer <token>` and `apikey` with every call.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
    persona: &'a str,
}

#[derive(Deserialize)]
struct RelayReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl CompletionService for RelayProvider {
    fn name(&self) -> &str {
        "relay"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        debug!(url = %self.url, persona = %request.persona, "Forwarding to relay");

        let mut builder = self.client.post(&self.url).json(&RelayRequest {
            message: request.text,
            persona: request.persona.as_str(),
        });
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token).header("apikey", token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        match serde_json::from_str::<RelayReply>(&body) {
            Ok(RelayReply {
                error: Some(message),
                ..
            }) => {
                warn!(status = status.as_u16(), error = %message, "Relay reported an error");
                Err(CompletionError::Relayed(message))
            }
            Ok(RelayReply {
                response: Some(text),
                ..
            }) if status.is_success() => Ok(text),
            Ok(_) if status.is_success() => Err(CompletionError::EmptyReply),
            Ok(_) => Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(e) if status.is_success() => Err(CompletionError::Malformed(e.to_string())),
            Err(_) => Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
