use serde::{Deserialize, Serialize};

use super::command::LineupCommand;
use crate::error::LineupError;
use crate::formation::{find_formation, formations_by_game_mode, Formation, GameMode};
use crate::lineup::{AssignmentPolicy, Line, Lineup, Occupancy, PlayerLocation};
use crate::models::{PlayerId, PlayerRef};

pub const LINEUP_SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
    pub const INVALID_GAME_MODE: &str = "INVALID_GAME_MODE";
    pub const UNKNOWN_FORMATION: &str = "UNKNOWN_FORMATION";
    pub const INVALID_LINEUP: &str = "INVALID_LINEUP";
    pub const SERIALIZATION: &str = "SERIALIZATION";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != LINEUP_SCHEMA_VERSION {
        let err = LineupError::SchemaVersion { found: version, expected: LINEUP_SCHEMA_VERSION };
        return Err(err_code(error_codes::UNSUPPORTED_SCHEMA, err));
    }
    Ok(())
}

fn parse_mode(mode: &str) -> Result<GameMode, String> {
    mode.parse::<GameMode>().map_err(|e| err_code(error_codes::INVALID_GAME_MODE, e))
}

/// Reject snapshots that break slot counts or uniqueness.
fn checked_lineup(lineup: Lineup) -> Result<Lineup, String> {
    lineup.validate().map_err(|e| {
        log::warn!("Rejected lineup snapshot: {}", e);
        err_code(error_codes::INVALID_LINEUP, e)
    })?;
    Ok(lineup)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::SERIALIZATION, e))
}

// ========================
// Formations
// ========================

#[derive(Debug, Serialize, Deserialize)]
pub struct FormationsResponse {
    pub schema_version: u8,
    pub game_mode: GameMode,
    pub default_formation: String,
    pub formations: Vec<Formation>,
}

/// Formation catalog for a game mode ("11", "7", "F11", "F7").
pub fn formations_json(mode: &str) -> Result<String, String> {
    let mode = parse_mode(mode)?;
    let formations = formations_by_game_mode(mode);
    to_json(&FormationsResponse {
        schema_version: LINEUP_SCHEMA_VERSION,
        game_mode: mode,
        default_formation: formations[0].id.clone(),
        formations: formations.to_vec(),
    })
}

/// Empty lineup snapshot for a game mode, optionally in a given formation.
pub fn new_lineup_json(mode: &str, formation: Option<&str>) -> Result<String, String> {
    let mode = parse_mode(mode)?;
    let lineup = match formation {
        Some(id) => {
            let formation = find_formation(mode, id).ok_or_else(|| {
                err_code(error_codes::UNKNOWN_FORMATION, format!("'{id}' is not a {mode} formation"))
            })?;
            Lineup::new(formation.clone())
        }
        None => Lineup::for_game_mode(mode),
    };
    to_json(&lineup)
}

// ========================
// Commands
// ========================

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupCommandRequest {
    pub schema_version: u8,
    pub lineup: Lineup,
    #[serde(default)]
    pub strict_positions: bool,
    pub command: LineupCommand,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupCommandResponse {
    pub schema_version: u8,
    /// False when the operation was refused; `lineup` is then the input unchanged.
    pub ok: bool,
    pub changed: bool,
    /// User-facing rejection message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub lineup: Lineup,
    pub occupancy: Occupancy,
}

/// Apply one operation to a lineup snapshot and return the new snapshot.
///
/// A refused operation is a normal response with `ok: false`. `Err` means the
/// request itself is unusable: bad JSON, wrong schema version, a snapshot
/// that fails validation or an unknown formation id.
pub fn apply_lineup_command_json(request_json: &str) -> Result<String, String> {
    let request: LineupCommandRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema(request.schema_version)?;

    let mut lineup = checked_lineup(request.lineup)?;
    let policy = AssignmentPolicy::new(request.strict_positions);
    let command = request.command.name();

    let result = request
        .command
        .apply(&mut lineup.ops(policy))
        .map_err(|e| err_code(error_codes::UNKNOWN_FORMATION, e))?;

    let response = match result {
        Ok(outcome) => LineupCommandResponse {
            schema_version: LINEUP_SCHEMA_VERSION,
            ok: true,
            changed: outcome.changed(),
            reason: None,
            occupancy: lineup.occupancy(),
            lineup,
        },
        Err(rejection) => {
            log::debug!("{} rejected: {}", command, rejection);
            LineupCommandResponse {
                schema_version: LINEUP_SCHEMA_VERSION,
                ok: false,
                changed: false,
                reason: Some(rejection.to_string()),
                occupancy: lineup.occupancy(),
                lineup,
            }
        }
    };
    to_json(&response)
}

// ========================
// Queries
// ========================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum LineupQuery {
    /// Bench players that may be brought on, optionally for one line.
    AvailableBench {
        #[serde(default)]
        line: Option<Line>,
    },
    Occupancy,
    FindPlayer {
        player_id: PlayerId,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineupQueryRequest {
    pub schema_version: u8,
    pub lineup: Lineup,
    #[serde(default)]
    pub strict_positions: bool,
    #[serde(flatten)]
    pub query: LineupQuery,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum LineupQueryResponse {
    AvailableBench { players: Vec<PlayerRef> },
    Occupancy { occupancy: Occupancy },
    FindPlayer { location: Option<PlayerLocation> },
}

/// Read-only questions the presentation layer asks while rendering.
pub fn lineup_query_json(request_json: &str) -> Result<String, String> {
    let request: LineupQueryRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    check_schema(request.schema_version)?;
    let lineup = checked_lineup(request.lineup)?;
    let policy = AssignmentPolicy::new(request.strict_positions);

    let response = match request.query {
        LineupQuery::AvailableBench { line } => LineupQueryResponse::AvailableBench {
            players: lineup.available_bench_players(policy, line).into_iter().cloned().collect(),
        },
        LineupQuery::Occupancy => LineupQueryResponse::Occupancy { occupancy: lineup.occupancy() },
        LineupQuery::FindPlayer { player_id } => LineupQueryResponse::FindPlayer {
            location: lineup.find_player_position(&player_id),
        },
    };
    to_json(&response)
}
