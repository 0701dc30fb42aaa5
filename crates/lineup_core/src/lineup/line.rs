use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LineupError;
use crate::models::NaturalPosition;

/// Field line of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Line {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defense,
    #[serde(rename = "MID")]
    Midfield,
    #[serde(rename = "FWD")]
    Forward,
}

impl Line {
    /// Lines from the goal outwards. Scans and auto-assignment follow this order.
    pub const ALL: [Line; 4] = [Line::Goalkeeper, Line::Defense, Line::Midfield, Line::Forward];

    pub fn code(&self) -> &'static str {
        match self {
            Line::Goalkeeper => "GK",
            Line::Defense => "DEF",
            Line::Midfield => "MID",
            Line::Forward => "FWD",
        }
    }

    /// The line a natural position belongs to; `None` for unknown positions.
    pub fn for_position(position: NaturalPosition) -> Option<Line> {
        match position {
            NaturalPosition::Goalkeeper => Some(Line::Goalkeeper),
            NaturalPosition::Defender => Some(Line::Defense),
            NaturalPosition::Midfielder => Some(Line::Midfield),
            NaturalPosition::Forward => Some(Line::Forward),
            NaturalPosition::Unknown => None,
        }
    }

    /// Strict compatibility: only players whose natural position maps to this line.
    pub fn accepts(&self, position: NaturalPosition) -> bool {
        Line::for_position(position) == Some(*self)
    }
}

impl FromStr for Line {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GK" | "POR" | "GOALKEEPER" => Ok(Line::Goalkeeper),
            "DEF" | "DEFENSE" => Ok(Line::Defense),
            "MID" | "MED" | "MIDFIELD" => Ok(Line::Midfield),
            "FWD" | "DEL" | "FORWARD" => Ok(Line::Forward),
            other => Err(LineupError::InvalidLine(other.to_string())),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Address of a slot: line plus 0-based index within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPosition {
    pub line: Line,
    pub index: usize,
}

impl SlotPosition {
    pub fn new(line: Line, index: usize) -> Self {
        Self { line, index }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.line, self.index)
    }
}

/// Where a player currently sits in a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerLocation {
    Slot(SlotPosition),
    Bench { index: usize },
}

impl PlayerLocation {
    pub fn is_on_field(&self) -> bool {
        matches!(self, PlayerLocation::Slot(_))
    }

    pub fn slot(&self) -> Option<SlotPosition> {
        match self {
            PlayerLocation::Slot(pos) => Some(*pos),
            PlayerLocation::Bench { .. } => None,
        }
    }
}
