//! Topic gate: keyword containment check deciding whether a message is
//! answered or rejected.
//!
//! This is a heuristic filter, not a classifier. On-topic phrasing that
//! uses no listed keyword is rejected, and a keyword inside an off-topic
//! sentence is accepted.

use crate::persona::Persona;

/// A persona's topical vocabulary: lowercase substrings.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet(&'static [&'static str]);

impl KeywordSet {
    pub const EMPTY: KeywordSet = KeywordSet(&[]);

    pub const fn new(keywords: &'static [&'static str]) -> Self {
        Self(keywords)
    }

    /// True if any keyword occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.0.iter().any(|kw| lowered.contains(kw))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

/// Whether `text` falls within `persona`'s subject area.
///
/// Callers reject blank input before reaching the gate.
pub fn is_relevant(text: &str, persona: &Persona) -> bool {
    persona.keywords.matches(text)
}
