//! CompletionService trait — the abstraction over the text-completion API.
//!
//! A completion service turns one assembled prompt into free text. It is
//! a single request/response exchange: no streaming, retries or timeouts
//! are layered on top.
//!
//! Implementations: Gemini `generateContent`, the SageBot relay.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::persona::PersonaId;

/// What a completion service is asked to answer.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// The fully assembled prompt
    pub prompt: &'a str,
    /// The raw user text the prompt was built from
    pub text: &'a str,
    /// Persona the prompt was built for
    pub persona: PersonaId,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// A human-readable name for this service (e.g., "gemini", "relay").
    fn name(&self) -> &str;

    /// Send a request and get the generated text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError>;
}
