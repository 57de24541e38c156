// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route form input and the closed label tables it is resolved against.

use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

/// Maximum length of the route name.
pub const MAX_NAME_LEN: u64 = 200;
/// Maximum length of the comma-separated tag list.
pub const MAX_TAGS_LEN: u64 = 2_000;
/// Maximum length of the remaining free-text fields.
pub const MAX_TEXT_LEN: u64 = 10_000;

/// Raw route form as filled in by the user.
///
/// Every field is an unparsed string and may be empty. Only lengths are
/// checked here; numeric content is interpreted leniently during synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RouteForm {
    #[validate(length(max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub category: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub difficulty: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub elevation: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub distance: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub location: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub duration: String,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub description: String,
    /// Comma-separated free text
    #[validate(length(max = MAX_TAGS_LEN))]
    pub tags: String,
}

impl RouteForm {
    /// Set a field by its form name. Returns `false` for unknown names.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "category" => &mut self.category,
            "difficulty" => &mut self.difficulty,
            "elevation" => &mut self.elevation,
            "distance" => &mut self.distance,
            "location" => &mut self.location,
            "duration" => &mut self.duration,
            "description" => &mut self.description,
            "tags" => &mut self.tags,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Route difficulty. Unlisted values are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Extreme,
    Other(String),
}

impl Difficulty {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "easy" => Self::Easy,
            "moderate" => Self::Moderate,
            "hard" => Self::Hard,
            "extreme" => Self::Extreme,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
            Self::Other(raw) => raw,
        }
    }

    /// Slovak label used in the experience sentence (genitive adjective).
    pub fn label(&self) -> &str {
        match self {
            Self::Easy => "ľahká",
            Self::Moderate => "stredná",
            Self::Hard => "ťažká",
            Self::Extreme => "extrémna",
            Self::Other(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Easy => "🟢",
            Self::Moderate => "🟡",
            Self::Hard => "🔴",
            Self::Extreme => "⚫",
            Self::Other(_) => "🟡",
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Sport category. Unlisted values are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sport {
    Cycling,
    Hiking,
    Running,
    Skiing,
    Other(String),
}

impl Sport {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "cycling" => Self::Cycling,
            "hiking" => Self::Hiking,
            "running" => Self::Running,
            "skiing" => Self::Skiing,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cycling => "cycling",
            Self::Hiking => "hiking",
            Self::Running => "running",
            Self::Skiing => "skiing",
            Self::Other(raw) => raw,
        }
    }

    /// Slovak activity noun used in the experience sentence.
    pub fn label(&self) -> &str {
        match self {
            Self::Cycling => "cyklistika",
            Self::Hiking => "turistika",
            Self::Running => "beh",
            Self::Skiing => "lyžovanie",
            Self::Other(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Cycling => "🚴",
            Self::Hiking => "🥾",
            Self::Running => "🏃",
            Self::Skiing => "⛷️",
            Self::Other(_) => "🚴",
        }
    }
}

impl Serialize for Sport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
