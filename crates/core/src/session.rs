//! Chat session: the single mutable state container of a conversation.
//!
//! All business rules (gate, prompt, error wording) are pure functions;
//! the session only owns the transcript and the outstanding-request count.
//! Sending is split into [`ChatSession::submit`] and
//! [`ChatSession::resolve`] so that a front-end can keep accepting input
//! while a completion call is in flight. Replies are appended in whatever
//! order they resolve.

use tracing::{debug, warn};

use crate::error::{CompletionError, SessionError};
use crate::gate::is_relevant;
use crate::message::{Message, Transcript};
use crate::persona::{Persona, PersonaId};
use crate::prompt::{LanguageHint, build_prompt};
use crate::provider::{CompletionRequest, CompletionService};

/// An accepted user message awaiting its completion.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub persona: PersonaId,
    /// The raw user text
    pub text: String,
    /// The assembled completion prompt
    pub prompt: String,
}

impl PendingReply {
    pub fn request(&self) -> CompletionRequest<'_> {
        CompletionRequest {
            prompt: &self.prompt,
            text: &self.text,
            persona: self.persona,
        }
    }
}

/// Outcome of submitting user text to a session.
#[derive(Debug, Clone)]
pub enum Submission {
    /// The gate rejected the text; the rejection is already in the transcript.
    Rejected(Message),
    /// The text was accepted and needs a completion call.
    Pending(PendingReply),
}

/// One conversation with one persona.
#[derive(Debug)]
pub struct ChatSession {
    persona: &'static Persona,
    transcript: Transcript,
    outstanding: usize,
}

impl ChatSession {
    /// Start a session; the transcript opens with the persona's greeting.
    pub fn new(persona: &'static Persona) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant(persona.greeting));
        Self {
            persona,
            transcript,
            outstanding: 0,
        }
    }

    pub fn persona(&self) -> &'static Persona {
        self.persona
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while at least one completion call is outstanding. Only
    /// drives a busy indicator; it never blocks [`submit`](Self::submit).
    pub fn is_busy(&self) -> bool {
        self.outstanding > 0
    }

    /// Record the user's text and decide whether it needs a completion.
    pub fn submit(&mut self, text: &str) -> Result<Submission, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.transcript.push(Message::user(text));

        if !is_relevant(text, self.persona) {
            debug!(persona = %self.persona.id, "Message rejected by topic gate");
            let rejection = self.transcript.push(Message::assistant(self.persona.rejection));
            return Ok(Submission::Rejected(rejection.clone()));
        }

        let prompt = build_prompt(text, self.persona, LanguageHint::detect(text));
        self.outstanding += 1;

        Ok(Submission::Pending(PendingReply {
            persona: self.persona.id,
            text: text.to_string(),
            prompt,
        }))
    }

    /// Append the reply (or a user-facing error notice) for `pending`.
    pub fn resolve(
        &mut self,
        pending: PendingReply,
        result: Result<String, CompletionError>,
    ) -> Message {
        self.outstanding = self.outstanding.saturating_sub(1);

        let content = match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => CompletionError::EmptyReply.user_message(),
            Err(e) => {
                warn!(persona = %pending.persona, error = %e, "Completion call failed");
                e.user_message()
            }
        };

        self.transcript.push(Message::assistant(content)).clone()
    }

    /// Submit `text` and, if accepted, complete it with `service`.
    pub async fn send(
        &mut self,
        text: &str,
        service: &dyn CompletionService,
    ) -> Result<Message, SessionError> {
        match self.submit(text)? {
            Submission::Rejected(rejection) => Ok(rejection),
            Submission::Pending(pending) => {
                let result = service.complete(pending.request()).await;
                Ok(self.resolve(pending, result))
            }
        }
    }
}
