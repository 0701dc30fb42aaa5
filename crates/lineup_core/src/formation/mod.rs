//! Formation catalog
//!
//! Named formations fix the slot count of each field line for one game mode.
//! The goalkeeper line always has a single slot.

pub mod catalog;

pub use catalog::{default_formation, find_formation, formations_by_game_mode, resolve_formation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LineupError;
use crate::lineup::Line;

/// Match format played by the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Football 11
    #[default]
    #[serde(rename = "11")]
    Eleven,
    /// Football 7
    #[serde(rename = "7")]
    Seven,
}

impl GameMode {
    pub fn code(&self) -> &'static str {
        match self {
            GameMode::Eleven => "11",
            GameMode::Seven => "7",
        }
    }

    /// Field players besides the goalkeeper.
    pub fn outfield_players(&self) -> usize {
        match self {
            GameMode::Eleven => 10,
            GameMode::Seven => 6,
        }
    }
}

impl FromStr for GameMode {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "11" | "f11" => Ok(GameMode::Eleven),
            "7" | "f7" => Ok(GameMode::Seven),
            other => Err(LineupError::InvalidGameMode(other.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F{}", self.code())
    }
}

/// Formation template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub game_mode: GameMode,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

impl Formation {
    /// Build a formation from explicit line counts.
    ///
    /// Counts are used as given; nothing checks that they add up to the game
    /// mode's player count.
    pub fn custom(
        id: impl Into<String>,
        game_mode: GameMode,
        defenders: u8,
        midfielders: u8,
        forwards: u8,
    ) -> Self {
        let id = id.into();
        Self { name: id.clone(), id, game_mode, defenders, midfielders, forwards }
    }

    pub fn line_size(&self, line: Line) -> usize {
        match line {
            Line::Goalkeeper => 1,
            Line::Defense => self.defenders as usize,
            Line::Midfield => self.midfielders as usize,
            Line::Forward => self.forwards as usize,
        }
    }

    pub fn outfield_slots(&self) -> usize {
        self.defenders as usize + self.midfielders as usize + self.forwards as usize
    }

    pub fn total_slots(&self) -> usize {
        1 + self.outfield_slots()
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_mode_serde_uses_plain_numbers() {
        assert_eq!(serde_json::to_string(&GameMode::Seven).unwrap(), "\"7\"");
        let mode: GameMode = serde_json::from_str("\"11\"").unwrap();
        assert_eq!(mode, GameMode::Eleven);
    }

    #[test]
    fn game_mode_parse() {
        assert_eq!("F7".parse::<GameMode>().unwrap(), GameMode::Seven);
        assert_eq!(" 11 ".parse::<GameMode>().unwrap(), GameMode::Eleven);
        assert!(matches!("5".parse::<GameMode>(), Err(LineupError::InvalidGameMode(_))));
    }

    #[test]
    fn custom_formation_counts() {
        let formation = Formation::custom("2-2-1", GameMode::Seven, 2, 2, 1);
        assert_eq!(formation.total_slots(), 6);
        assert_eq!(formation.line_size(Line::Midfield), 2);
    }
}
