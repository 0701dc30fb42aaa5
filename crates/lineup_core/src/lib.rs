//! # lineup_core - Formation & Lineup Assignment Engine
//!
//! In-memory lineup editor for amateur club matches: a formation catalog for
//! football 11 and football 7, a lineup aggregate (slots per line plus a
//! bench) and the operations that move players between them.
//!
//! ## Features
//! - Every operation applies completely or is rejected with a user-facing reason
//! - A player appears at most once across slots and bench
//! - Optional strict mode: natural position must match the slot's line
//! - Reacts to attendance snapshots owned by the host
//! - JSON API for UI bridges and scripting

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod formation;
pub mod lineup;
pub mod models;

pub use api::{apply_lineup_command_json, formations_json, lineup_query_json, new_lineup_json};
pub use api::{LineupCommand, LINEUP_SCHEMA_VERSION};
pub use config::LineupConfig;
pub use context::{MatchContext, MatchSnapshot};
pub use error::{LineupError, Rejection, Result};
pub use formation::{
    default_formation, find_formation, formations_by_game_mode, Formation, GameMode,
};
pub use lineup::{
    AssignmentPolicy, Line, Lineup, LineupOps, OpOutcome, OpResult, PlayerLocation, SlotPosition,
    SyncReport,
};
pub use models::{AttendanceMap, AttendanceStatus, NaturalPosition, PlayerId, PlayerRef, Roster};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_flow_over_json() {
        let lineup: serde_json::Value =
            serde_json::from_str(&new_lineup_json("7", None).unwrap()).unwrap();

        // Roster-style record: numeric id, Spanish position label
        let request = json!({
            "schema_version": LINEUP_SCHEMA_VERSION,
            "lineup": lineup,
            "strict_positions": true,
            "command": {
                "op": "auto_assign",
                "player": {"id": 10, "name": "Lucas Romero", "position": "Portero"}
            }
        });
        let response: serde_json::Value =
            serde_json::from_str(&apply_lineup_command_json(&request.to_string()).unwrap()).unwrap();
        assert_eq!(response["ok"], true);
        assert_eq!(response["changed"], true);
        assert_eq!(response["occupancy"]["filled"], 1);
        assert_eq!(response["lineup"]["goalkeeper"][0]["occupant"]["id"], "10");
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let roster = Roster::new(vec![
                PlayerRef::new("1", "Hugo Sosa", Some(1), NaturalPosition::Goalkeeper),
                PlayerRef::new("2", "Bruno Díaz", Some(4), NaturalPosition::Defender),
                PlayerRef::new("3", "Diego Paz", Some(9), NaturalPosition::Forward),
            ]);
            let attendance = AttendanceMap::new()
                .with("1", AttendanceStatus::Confirmed)
                .with("3", AttendanceStatus::Confirmed);
            let ctx = MatchContext::open("m", GameMode::Eleven, &roster, &attendance, &LineupConfig::default());
            serde_json::to_string(&ctx.snapshot()).unwrap()
        };
        assert_eq!(run(), run(), "Same inputs should produce the same lineup");
    }
}
