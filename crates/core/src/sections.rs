//! Response sectionizer.
//!
//! Splits a four-part numbered reply (`1. … 2. … 3. … 4. …`) into the
//! persona's named sections. The completion service is not obliged to
//! follow the numbering, so parsing never fails: an unnumbered reply lands
//! whole in the persona's last (fallback) section.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::persona::{Persona, SectionField, SectionLayout};

/// A marker is a digit and a dot with no digit on either side, so neither
/// "103." nor "3.5" reads as marker 3.
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\b1\.((?:\D.*?)?)\b2\.((?:\D.*?)?)\b3\.((?:\D.*?)?)\b4\.((?:\D.*)?)")
        .expect("valid regex")
});

/// A reply split into the four sections of a persona's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionedReply {
    layout: SectionLayout,
    bodies: [String; 4],
    structured: bool,
}

impl SectionedReply {
    fn fallback(layout: SectionLayout, reply: &str) -> Self {
        let mut bodies: [String; 4] = Default::default();
        bodies[3] = reply.trim().to_string();
        Self {
            layout,
            bodies,
            structured: false,
        }
    }

    /// Body of the section named `key`, if the layout has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layout.position(key).map(|i| self.bodies[i].as_str())
    }

    /// Sections in order, paired with their labels.
    pub fn fields(&self) -> impl Iterator<Item = (SectionField, &str)> + '_ {
        self.layout
            .fields
            .iter()
            .copied()
            .zip(self.bodies.iter().map(String::as_str))
    }

    /// Whether the reply followed the numbered structure.
    pub fn is_structured(&self) -> bool {
        self.structured
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }
}

impl Serialize for SectionedReply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (field, body) in self.fields() {
            map.serialize_entry(field.key, body)?;
        }
        map.end()
    }
}

/// Split `reply` into `persona`'s four sections.
pub fn parse_sections(reply: &str, persona: &Persona) -> SectionedReply {
    let layout = persona.layout;

    let Some(caps) = NUMBERED.captures(reply) else {
        return SectionedReply::fallback(layout, reply);
    };

    let mut bodies: [String; 4] = Default::default();
    for (i, body) in bodies.iter_mut().enumerate() {
        if let Some(m) = caps.get(i + 1) {
            *body = m.as_str().trim().to_string();
        }
    }

    if bodies.iter().all(String::is_empty) {
        return SectionedReply::fallback(layout, reply);
    }

    SectionedReply {
        layout,
        bodies,
        structured: true,
    }
}

/// How a section body should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    List(Vec<String>),
}

fn is_list_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('*') || line.starts_with('-')
}

/// Render a section body as a bulleted list when any line starts with `*`
/// or `-`, otherwise as one paragraph.
pub fn render_section(body: &str) -> Block {
    let lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

    if body.lines().any(is_list_line) {
        let items = lines
            .map(|l| {
                l.strip_prefix(['*', '-'])
                    .map(str::trim_start)
                    .unwrap_or(l)
                    .to_string()
            })
            .collect();
        Block::List(items)
    } else {
        Block::Paragraph(lines.collect::<Vec<_>>().join(" "))
    }
}
