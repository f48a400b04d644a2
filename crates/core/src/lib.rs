//! # SageBot Core
//!
//! Domain types and pure logic for the SageBot chat assistant.
//! This crate has **no HTTP or UI dependencies**: it decides whether a
//! message is on-topic, assembles the completion prompt, and splits the
//! numbered reply into named sections.
//!
//! ## Flow
//!
//! ```text
//! user text → gate::is_relevant → prompt::build_prompt → CompletionService
//!           → sections::parse_sections → render_section
//! ```
//!
//! External services (the completion API and the hosted auth service) are
//! defined as traits here and implemented in `sagebot-providers`.

pub mod auth;
pub mod error;
pub mod gate;
mod keywords;
pub mod message;
pub mod persona;
pub mod prompt;
pub mod provider;
pub mod sections;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use auth::{AuthEvent, AuthService, AuthSession, AuthUser, SignUpOutcome};
pub use error::{AuthError, CompletionError, SessionError};
pub use gate::is_relevant;
pub use message::{Message, Origin, Transcript};
pub use persona::{Persona, PersonaId, SectionLayout};
pub use prompt::{LanguageHint, build_prompt};
pub use provider::{CompletionRequest, CompletionService};
pub use sections::{Block, SectionedReply, parse_sections, render_section};
pub use session::{ChatSession, PendingReply, Submission};
