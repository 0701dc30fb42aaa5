//! JSON boundary
//!
//! Stateless `*_json(&str) -> Result<String, String>` entry points for hosts
//! that hold the lineup snapshot themselves (UI bridges, scripts). Each call
//! takes a snapshot plus a command or query and returns the new snapshot.

pub mod command;
pub mod json_api;

pub use command::LineupCommand;
pub use json_api::{
    apply_lineup_command_json, formations_json, lineup_query_json, new_lineup_json,
    FormationsResponse, LineupCommandRequest, LineupCommandResponse, LineupQuery,
    LineupQueryRequest, LineupQueryResponse, LINEUP_SCHEMA_VERSION,
};
