// src/persona/mod.rs
// Plant personas and the system prompts that give each one its voice

mod templates;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Personality tag controlling the tone of generated messages.
///
/// Serialized as the display name ("Drama Queen"), which is what the
/// message proxy and older clients expect on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "Drama Queen")]
    DramaQueen,
    #[serde(rename = "Chill Roomie")]
    ChillRoomie,
    #[serde(rename = "Grumpy Senior")]
    GrumpySenior,
    #[serde(rename = "Sunshine Buddy")]
    SunshineBuddy,
    #[serde(rename = "Zen Master")]
    ZenMaster,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::DramaQueen,
        Persona::ChillRoomie,
        Persona::GrumpySenior,
        Persona::SunshineBuddy,
        Persona::ZenMaster,
    ];

    /// Stable short identifier (CLI flags, config files)
    pub fn id(&self) -> &'static str {
        match self {
            Persona::DramaQueen => "dramatic",
            Persona::ChillRoomie => "laid-back",
            Persona::GrumpySenior => "gruff-elder",
            Persona::SunshineBuddy => "energetic",
            Persona::ZenMaster => "calm-sage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::DramaQueen => "Drama Queen",
            Persona::ChillRoomie => "Chill Roomie",
            Persona::GrumpySenior => "Grumpy Senior",
            Persona::SunshineBuddy => "Sunshine Buddy",
            Persona::ZenMaster => "Zen Master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Persona::DramaQueen => "Gen-Z slang, melodramatic, attention-seeking",
            Persona::ChillRoomie => "Laid back, supportive, easy-going",
            Persona::GrumpySenior => "Dry wit, disciplined, old-school",
            Persona::SunshineBuddy => "Energetic, optimistic, always on the bright side",
            Persona::ZenMaster => "Calm, wise, speaks with profound simplicity",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Persona::DramaQueen => "💅",
            Persona::ChillRoomie => "🌿",
            Persona::GrumpySenior => "🌳",
            Persona::SunshineBuddy => "☀️",
            Persona::ZenMaster => "🧘",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Persona {
    type Err = String;

    /// Accepts the short id ("gruff-elder"), the display name
    /// ("Grumpy Senior") or a slug of it ("grumpy_senior").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Persona::ALL
            .into_iter()
            .find(|p| normalize(p.id()) == wanted || normalize(p.display_name()) == wanted)
            .ok_or_else(|| format!("unknown persona '{}'", s.trim()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// System prompt for a species/persona pair.
///
/// Species-specific overrides win; otherwise the persona's generic template
/// is filled in with the species. Pure: same inputs, same bytes.
pub fn prompt_for(species: &str, persona: Persona) -> String {
    templates::OVERRIDES
        .iter()
        .find(|o| o.persona == persona && (o.applies_to)(species))
        .map(|o| o.template.to_string())
        .unwrap_or_else(|| templates::generic(persona, species))
}
