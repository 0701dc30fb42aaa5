use thiserror::Error;

use crate::lineup::SlotPosition;
use crate::models::PlayerId;

/// Errors raised at the boundary of the engine: bad input data, corrupt
/// snapshots and configuration problems.
///
/// Refused lineup operations are not errors of this kind; they are reported
/// through [`Rejection`].
#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Invalid game mode: {0}")]
    InvalidGameMode(String),

    #[error("Unknown formation '{formation}' for game mode {mode}")]
    UnknownFormation { formation: String, mode: String },

    #[error("Invalid line code: {0}")]
    InvalidLine(String),

    #[error("Invalid attendance status: {0}")]
    InvalidAttendanceStatus(String),

    #[error("Player {player} appears more than once in the lineup")]
    DuplicatePlayer { player: PlayerId },

    #[error("Line {line} has {found} slots, formation {formation} expects {expected}")]
    SlotCountMismatch { line: String, formation: String, expected: usize, found: usize },

    #[error("Slot {found} is stored at index {expected} of line {line}")]
    SlotIndexMismatch { line: String, expected: usize, found: usize },

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A lineup operation that was refused without touching the lineup.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Slot {position} does not exist in formation {formation}")]
    SlotOutOfRange { position: SlotPosition, formation: String },

    #[error("{player} plays as {natural} and cannot be placed in the {line} line")]
    PositionMismatch { player: String, natural: String, line: String },

    #[error("Player {0} is not on the bench")]
    BenchPlayerNotFound(PlayerId),

    #[error("Player {0} is not on the field")]
    FieldPlayerNotFound(PlayerId),
}

pub type Result<T> = std::result::Result<T, LineupError>;
