//! Wire form of the lineup operations.

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};
use crate::formation::{find_formation, GameMode};
use crate::lineup::{Line, LineupOps, OpOutcome, OpResult};
use crate::models::{PlayerId, PlayerRef};

/// One lineup operation, tagged by `op`.
///
/// ```json
/// {"op": "assign", "player": {"id": "7", "name": "Ana", "position": "Forward"}, "line": "FWD", "index": 0}
/// {"op": "swap", "field_player_id": "7", "bench_player_id": "12"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LineupCommand {
    Assign {
        player: PlayerRef,
        line: Line,
        index: usize,
        #[serde(default)]
        game_mode: Option<GameMode>,
    },
    MoveToBench {
        player_id: PlayerId,
    },
    AddToBench {
        player: PlayerRef,
    },
    Swap {
        field_player_id: PlayerId,
        bench_player_id: PlayerId,
    },
    AutoAssign {
        player: PlayerRef,
    },
    SetFormation {
        formation: String,
        /// Defaults to the lineup's current game mode.
        #[serde(default)]
        game_mode: Option<GameMode>,
    },
    Reset,
    Remove {
        player_id: PlayerId,
    },
    FillFromBench,
}

impl LineupCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LineupCommand::Assign { .. } => "assign",
            LineupCommand::MoveToBench { .. } => "move_to_bench",
            LineupCommand::AddToBench { .. } => "add_to_bench",
            LineupCommand::Swap { .. } => "swap",
            LineupCommand::AutoAssign { .. } => "auto_assign",
            LineupCommand::SetFormation { .. } => "set_formation",
            LineupCommand::Reset => "reset",
            LineupCommand::Remove { .. } => "remove",
            LineupCommand::FillFromBench => "fill_from_bench",
        }
    }

    /// Run the command.
    ///
    /// The outer error is bad input (a formation id that is not in the
    /// catalog); the inner result is the operation's own outcome.
    pub fn apply(self, ops: &mut LineupOps<'_>) -> Result<OpResult> {
        let result = match self {
            LineupCommand::Assign { player, line, index, game_mode } => {
                ops.assign_player_to_slot(player, line, index, game_mode)
            }
            LineupCommand::MoveToBench { player_id } => ops.move_to_bench(&player_id),
            LineupCommand::AddToBench { player } => ops.add_to_bench(player),
            LineupCommand::Swap { field_player_id, bench_player_id } => {
                ops.swap_player_with_bench(&field_player_id, &bench_player_id)
            }
            LineupCommand::AutoAssign { player } => ops.auto_assign_player(player),
            LineupCommand::SetFormation { formation, game_mode } => {
                let mode = game_mode.unwrap_or_else(|| ops.lineup().game_mode());
                let target = find_formation(mode, &formation).ok_or_else(|| {
                    LineupError::UnknownFormation { formation: formation.clone(), mode: mode.to_string() }
                })?;
                ops.set_formation(target.clone())
            }
            LineupCommand::Reset => ops.reset_lineup(),
            LineupCommand::Remove { player_id } => ops.remove_player(&player_id),
            LineupCommand::FillFromBench => {
                if ops.fill_from_bench() > 0 {
                    Ok(OpOutcome::Applied)
                } else {
                    Ok(OpOutcome::Unchanged)
                }
            }
        };
        Ok(result)
    }
}
