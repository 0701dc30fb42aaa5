//! Assignment operations
//!
//! The only code path that writes slots or the bench. Every operation either
//! applies completely or returns a [`Rejection`] without touching the lineup.
//! Displacing an occupant to the bench is part of a successful assign/swap.
//!
//! ## Operations
//! - `assign_player_to_slot`: place a player, bumping the occupant to the bench
//! - `move_to_bench`: take a field player off
//! - `swap_player_with_bench`: substitution, bench player takes the slot
//! - `auto_assign_player`: first empty slot of the player's natural line
//! - `set_formation` / `reset_lineup`: structural changes
//! - `add_to_bench`, `remove_player`, `fill_from_bench`: bench upkeep

use serde::{Deserialize, Serialize};

use super::{AssignmentPolicy, Line, Lineup, PlayerLocation, SlotPosition};
use crate::error::Rejection;
use crate::formation::{default_formation, Formation, GameMode};
use crate::models::{PlayerId, PlayerRef};

/// Result of an operation that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpOutcome {
    /// The lineup changed.
    Applied,
    /// Nothing to do; the lineup is as it was.
    Unchanged,
}

impl OpOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, OpOutcome::Applied)
    }
}

pub type OpResult = Result<OpOutcome, Rejection>;

/// Mutable view of a lineup bound to a placement policy.
pub struct LineupOps<'a> {
    lineup: &'a mut Lineup,
    policy: AssignmentPolicy,
}

impl Lineup {
    pub fn ops(&mut self, policy: AssignmentPolicy) -> LineupOps<'_> {
        LineupOps { lineup: self, policy }
    }
}

impl<'a> LineupOps<'a> {
    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    pub fn lineup(&self) -> &Lineup {
        &*self.lineup
    }

    fn check_position(&self, player: &PlayerRef, line: Line) -> Result<(), Rejection> {
        if self.policy.allows(line, player.position) {
            Ok(())
        } else {
            Err(Rejection::PositionMismatch {
                player: player.name.clone(),
                natural: player.position.to_string(),
                line: line.code().to_string(),
            })
        }
    }

    /// Place `player` at `line[index]`.
    ///
    /// Any earlier location of the player is cleared first; a different
    /// occupant of the target slot goes to the end of the bench. When
    /// `game_mode` differs from the lineup's mode, the lineup first switches
    /// to that mode's default formation.
    pub fn assign_player_to_slot(
        &mut self,
        player: PlayerRef,
        line: Line,
        index: usize,
        game_mode: Option<GameMode>,
    ) -> OpResult {
        let position = SlotPosition::new(line, index);
        let mode_switch = game_mode
            .filter(|mode| *mode != self.lineup.game_mode())
            .map(|mode| default_formation(mode).clone());

        let target = mode_switch.as_ref().unwrap_or(self.lineup.formation());
        if index >= target.line_size(line) {
            return Err(Rejection::SlotOutOfRange { position, formation: target.id.clone() });
        }
        self.check_position(&player, line)?;

        let mut outcome = OpOutcome::Unchanged;
        if let Some(formation) = mode_switch {
            self.apply_formation(formation);
            outcome = OpOutcome::Applied;
        }

        if self.lineup.occupant(position).is_some_and(|p| p.id == player.id) {
            return Ok(outcome);
        }

        self.lineup.take_player(&player.id);
        log::debug!("Assigning {} ({}) to {}", player.name, player.id, position);
        if let Some(previous) = self.lineup.put_in_slot(position, player) {
            log::debug!("{} displaced to bench", previous.id);
            self.lineup.push_bench(previous);
        }
        Ok(OpOutcome::Applied)
    }

    /// Take a field player off and append them to the bench.
    pub fn move_to_bench(&mut self, player_id: &PlayerId) -> OpResult {
        match self.lineup.find_player_position(player_id) {
            Some(PlayerLocation::Slot(_)) => {
                if let Some((_, player)) = self.lineup.take_player(player_id) {
                    log::debug!("Moved {} to bench", player.id);
                    self.lineup.push_bench(player);
                }
                Ok(OpOutcome::Applied)
            }
            _ => Ok(OpOutcome::Unchanged),
        }
    }

    /// Put a player who is not yet in the lineup at the end of the bench.
    pub fn add_to_bench(&mut self, player: PlayerRef) -> OpResult {
        if self.lineup.contains(&player.id) {
            return Ok(OpOutcome::Unchanged);
        }
        self.lineup.push_bench(player);
        Ok(OpOutcome::Applied)
    }

    /// Substitution: `bench_id` takes the slot of `field_id`, who takes the
    /// bench player's place on the bench.
    pub fn swap_player_with_bench(&mut self, field_id: &PlayerId, bench_id: &PlayerId) -> OpResult {
        let bench_index = self
            .lineup
            .bench()
            .iter()
            .position(|p| &p.id == bench_id)
            .ok_or_else(|| Rejection::BenchPlayerNotFound(bench_id.clone()))?;
        let slot = self
            .lineup
            .find_player_position(field_id)
            .and_then(|location| location.slot())
            .ok_or_else(|| Rejection::FieldPlayerNotFound(field_id.clone()))?;
        self.check_position(&self.lineup.bench()[bench_index], slot.line)?;

        let Some(incoming) = self.lineup.take_bench(bench_index) else {
            return Err(Rejection::BenchPlayerNotFound(bench_id.clone()));
        };
        if let Some(outgoing) = self.lineup.put_in_slot(slot, incoming) {
            self.lineup.insert_bench(bench_index, outgoing);
        }
        log::debug!("Substitution at {}: {} on, {} off", slot, bench_id, field_id);
        Ok(OpOutcome::Applied)
    }

    /// Place a newly confirmed player in the first empty slot of their line.
    ///
    /// Players already on the field are left alone. Without a free slot (or
    /// with an unknown position) the player ends up on the bench. Never
    /// displaces anyone.
    pub fn auto_assign_player(&mut self, player: PlayerRef) -> OpResult {
        if self.lineup.is_on_field(&player.id) {
            return Ok(OpOutcome::Unchanged);
        }

        let free_slot = Line::for_position(player.position)
            .and_then(|line| self.lineup.first_empty_slot(line));
        match free_slot {
            Some(position) => {
                self.lineup.take_player(&player.id);
                log::debug!("Auto-assigned {} to {}", player.id, position);
                self.lineup.put_in_slot(position, player);
                Ok(OpOutcome::Applied)
            }
            None if self.lineup.is_on_bench(&player.id) => Ok(OpOutcome::Unchanged),
            None => {
                log::debug!("No free {} slot for {}, benched", player.position, player.id);
                self.lineup.push_bench(player);
                Ok(OpOutcome::Applied)
            }
        }
    }

    /// Resize every line to `formation`.
    ///
    /// Shrinking a line drops its highest-index slots; their occupants go to
    /// the bench in slot order. New slots start empty.
    pub fn set_formation(&mut self, formation: Formation) -> OpResult {
        if *self.lineup.formation() == formation {
            return Ok(OpOutcome::Unchanged);
        }
        self.apply_formation(formation);
        Ok(OpOutcome::Applied)
    }

    fn apply_formation(&mut self, formation: Formation) {
        log::info!("Formation {} -> {}", self.lineup.formation().id, formation.id);
        let displaced = self.lineup.reshape(formation);
        for player in displaced {
            log::debug!("{} moved to bench by formation change", player.id);
            self.lineup.push_bench(player);
        }
    }

    /// Empty every slot and the bench and restore the default formation of the
    /// current game mode.
    pub fn reset_lineup(&mut self) -> OpResult {
        let formation = default_formation(self.lineup.game_mode()).clone();
        if *self.lineup == Lineup::new(formation.clone()) {
            return Ok(OpOutcome::Unchanged);
        }
        log::info!("Lineup reset to {}", formation.id);
        self.lineup.clear(formation);
        Ok(OpOutcome::Applied)
    }

    /// Drop a player from the lineup entirely (field or bench).
    pub fn remove_player(&mut self, player_id: &PlayerId) -> OpResult {
        match self.lineup.take_player(player_id) {
            Some((location, player)) => {
                log::debug!("Removed {} from {:?}", player.id, location);
                Ok(OpOutcome::Applied)
            }
            None => Ok(OpOutcome::Unchanged),
        }
    }

    /// Auto-assign every bench player in bench order. Returns how many were placed.
    pub fn fill_from_bench(&mut self) -> usize {
        let candidates: Vec<PlayerRef> = self.lineup.bench().to_vec();
        let mut placed = 0;
        for player in candidates {
            let id = player.id.clone();
            if self.auto_assign_player(player).is_ok() && self.lineup.is_on_field(&id) {
                placed += 1;
            }
        }
        placed
    }
}
