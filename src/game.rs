//! Supported games.

use serde::Serialize;
use thiserror::Error;

/// Trading card game whose set catalog is being matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Pokemon,
    Mtg,
}

impl Game {
    /// Stable lowercase identifier, matching index file naming.
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Pokemon => "pokemon",
            Game::Mtg => "mtg",
        }
    }

    /// All supported games.
    pub fn all() -> [Game; 2] {
        [Game::Pokemon, Game::Mtg]
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown game identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported game: '{value}' (expected 'pokemon' or 'mtg')")]
pub struct GameParseError {
    /// The rejected identifier.
    pub value: String,
}

impl std::str::FromStr for Game {
    type Err = GameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pokemon" => Ok(Game::Pokemon),
            "mtg" | "magic" => Ok(Game::Mtg),
            _ => Err(GameParseError {
                value: s.to_string(),
            }),
        }
    }
}
