//! Persona registry: the fixed set of assistant configurations.
//!
//! Each persona owns its topic vocabulary, prompt template, greeting,
//! rejection text and section labels. The registry is a static table
//! indexed by [`PersonaId`]; nothing mutates it at runtime.

use serde::{Deserialize, Serialize};

use crate::gate::KeywordSet;
use crate::keywords::{BUSINESS_KW, HEALTH_KW, SCRIPTS_KW, STUDY_KW};
use crate::prompt::{self, LanguageHint};

/// Identifier of one of the built-in personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Health,
    Study,
    Business,
    Scripts,
}

impl PersonaId {
    pub const ALL: [PersonaId; 4] = [Self::Health, Self::Study, Self::Business, Self::Scripts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Study => "study",
            Self::Business => "business",
            Self::Scripts => "scripts",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "study" => Ok(Self::Study),
            "business" => Ok(Self::Business),
            "scripts" => Ok(Self::Scripts),
            other => Err(format!("unknown persona '{other}'")),
        }
    }
}

/// One labelled slot of a sectioned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionField {
    /// Machine key, e.g. `conditions`
    pub key: &'static str,
    /// Display heading, e.g. `Possible conditions`
    pub title: &'static str,
}

/// The four section labels a persona's replies are split into.
/// The last field receives the whole reply when numbering is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub fields: [SectionField; 4],
}

impl SectionLayout {
    pub fn keys(&self) -> [&'static str; 4] {
        self.fields.map(|f| f.key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    pub fn fallback(&self) -> SectionField {
        self.fields[3]
    }
}

const fn field(key: &'static str, title: &'static str) -> SectionField {
    SectionField { key, title }
}

/// A named assistant configuration.
#[derive(Debug)]
pub struct Persona {
    pub id: PersonaId,
    pub name: &'static str,
    pub greeting: &'static str,
    pub rejection: &'static str,
    pub keywords: KeywordSet,
    pub layout: SectionLayout,
    /// Example questions offered at the start of a session.
    pub suggestions: &'static [&'static str],
    pub(crate) template: fn(&str, LanguageHint) -> String,
}

static PERSONAS: [Persona; 4] = [
    Persona {
        id: PersonaId::Health,
        name: "HealthBot",
        greeting: "Hello! I'm your AI health assistant. Please describe your symptoms and I'll help provide general health information. Remember, this is not a substitute for professional medical advice.",
        rejection: "I'm a health assistant, so I can only help with health-related questions such as symptoms, conditions, medicines or general wellness. Please describe a health concern and I'll do my best to help.",
        keywords: KeywordSet::new(HEALTH_KW),
        layout: SectionLayout {
            fields: [
                field("conditions", "Possible conditions"),
                field("care", "General care recommendations"),
                field("attention", "When to seek medical attention"),
                field("disclaimer", "Disclaimer"),
            ],
        },
        suggestions: &[
            "Common cold symptoms",
            "Healthy diet tips",
            "Exercise routines",
            "Sleep improvement",
            "Stress management",
            "Preventive care",
        ],
        template: prompt::health_prompt,
    },
    Persona {
        id: PersonaId::Study,
        name: "StudyBot",
        greeting: "Hi! I'm your study assistant. Ask me to explain a concept, plan your revision or quiz you on a topic.",
        rejection: "I'm a study assistant, so I can only help with learning, exams, homework and study planning. Try asking about a subject or topic you're working on.",
        keywords: KeywordSet::new(STUDY_KW),
        layout: SectionLayout {
            fields: [
                field("explanation", "Explanation"),
                field("key_points", "Key points"),
                field("practice", "Practice questions"),
                field("tips", "Study tips"),
            ],
        },
        suggestions: &[
            "Explain photosynthesis simply",
            "Make a one-week exam revision plan",
            "Quiz me on the periodic table",
            "How do I stop procrastinating?",
        ],
        template: prompt::study_prompt,
    },
    Persona {
        id: PersonaId::Business,
        name: "BizBot",
        greeting: "Hello! I'm your business assistant. Tell me about your idea, product or company and I'll help you think through strategy, pricing and growth.",
        rejection: "I'm a business assistant, so I can only help with topics like strategy, marketing, pricing, finance and running a company. Please ask a business question.",
        keywords: KeywordSet::new(BUSINESS_KW),
        layout: SectionLayout {
            fields: [
                field("analysis", "Analysis"),
                field("strategy", "Recommended strategy"),
                field("risks", "Risks to watch"),
                field("next_steps", "Next steps"),
            ],
        },
        suggestions: &[
            "How should I price a new SaaS product?",
            "Marketing ideas for a small bakery",
            "How do I pitch to investors?",
            "Ways to improve customer retention",
        ],
        template: prompt::business_prompt,
    },
    Persona {
        id: PersonaId::Scripts,
        name: "ScriptBot",
        greeting: "Hey! I'm your script-writing assistant. Tell me what your video, reel or podcast is about and I'll draft a script for it.",
        rejection: "I'm a script-writing assistant, so I can only help with scripts for videos, reels, podcasts, ads and other content. Tell me what you'd like to create.",
        keywords: KeywordSet::new(SCRIPTS_KW),
        layout: SectionLayout {
            fields: [
                field("hook", "Hook"),
                field("script", "Script"),
                field("delivery", "Delivery notes"),
                field("call_to_action", "Call to action"),
            ],
        },
        suggestions: &[
            "A 30-second Instagram reel about morning routines",
            "YouTube intro for a cooking channel",
            "Podcast episode opening on personal finance",
            "Product launch video script",
        ],
        template: prompt::scripts_prompt,
    },
];

/// The persona registered under `id`.
pub fn get(id: PersonaId) -> &'static Persona {
    &PERSONAS[id.index()]
}

/// Resolve a persona by identifier; unknown identifiers fall back to health.
pub fn lookup(id: &str) -> &'static Persona {
    match id.parse::<PersonaId>() {
        Ok(id) => get(id),
        Err(_) => {
            tracing::debug!(requested = %id, "Unknown persona, falling back to health");
            get(PersonaId::Health)
        }
    }
}

/// All personas in registry order.
pub fn all() -> &'static [Persona] {
    &PERSONAS
}
