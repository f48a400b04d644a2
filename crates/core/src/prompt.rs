//! Prompt assembly: persona preamble + user text + four-part directive.
//!
//! The completion service is asked to answer in exactly four numbered
//! parts so that [`crate::sections::parse_sections`] can split the reply.

use crate::persona::Persona;

/// Reply language requested from the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageHint {
    #[default]
    English,
    Telugu,
}

impl LanguageHint {
    /// Telugu if `text` contains any code point of the Telugu block
    /// (U+0C00..=U+0C7F), English otherwise.
    pub fn detect(text: &str) -> Self {
        if contains_telugu(text) {
            Self::Telugu
        } else {
            Self::English
        }
    }
}

pub fn contains_telugu(text: &str) -> bool {
    text.chars().any(|c| ('\u{0C00}'..='\u{0C7F}').contains(&c))
}

/// Build the full completion prompt for `text` under `persona`.
///
/// Only the health persona honours `hint`; the others always answer in
/// English.
pub fn build_prompt(text: &str, persona: &Persona, hint: LanguageHint) -> String {
    (persona.template)(text, hint)
}

fn language_directive(hint: LanguageHint) -> &'static str {
    match hint {
        LanguageHint::English => "Respond in English.",
        LanguageHint::Telugu => {
            "The user wrote in Telugu. Respond entirely in Telugu (తెలుగు), keeping the numbered structure below."
        }
    }
}

pub(crate) fn health_prompt(text: &str, hint: LanguageHint) -> String {
    format!(
        "You are a helpful medical AI assistant. Please analyze these symptoms and provide general health information including potential conditions, general care recommendations, and when to seek medical attention. Always emphasize that this is not a medical diagnosis and professional consultation is recommended. {language}

Symptoms/Question: {text}

Please structure your response with:
1. Possible conditions (general information)
2. General care recommendations
3. When to seek immediate medical attention
4. Disclaimer about consulting healthcare professionals",
        language = language_directive(hint),
    )
}

pub(crate) fn study_prompt(text: &str, _hint: LanguageHint) -> String {
    format!(
        "You are a patient and encouraging study assistant for students. Explain clearly, use simple language and concrete examples, and check understanding.

Question: {text}

Please structure your response with:
1. Clear explanation of the topic
2. Key points to remember
3. Practice questions to test understanding
4. Study tips for mastering this topic"
    )
}

pub(crate) fn business_prompt(text: &str, _hint: LanguageHint) -> String {
    format!(
        "You are an experienced business consultant helping entrepreneurs and small companies. Give practical, specific advice and state your assumptions.

Business question: {text}

Please structure your response with:
1. Analysis of the situation
2. Recommended strategy
3. Risks and challenges to watch
4. Concrete next steps"
    )
}

pub(crate) fn scripts_prompt(text: &str, _hint: LanguageHint) -> String {
    format!(
        "You are a creative script writer for videos, reels, podcasts and ads. Write in a natural spoken voice that fits the platform and audience.

Script request: {text}

Please structure your response with:
1. An attention-grabbing hook
2. The full script
3. Delivery and visual notes
4. A call to action"
    )
}
