//! Match context
//!
//! Owner of the lineup for one match. The host creates a [`MatchContext`]
//! when a match is opened and passes `&mut` to whatever needs to edit the
//! lineup; there is no shared store. Switching to another match resets and
//! re-seeds the lineup from that match's roster and attendance.

use serde::{Deserialize, Serialize};

use crate::config::LineupConfig;
use crate::formation::GameMode;
use crate::lineup::{
    flagged_occupants, seed_lineup, sync_attendance, AssignmentPolicy, FlaggedOccupant, Lineup,
    LineupOps, Occupancy, SyncReport,
};
use crate::models::{AttendanceMap, Roster};

/// Serializable view of a context, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: String,
    pub policy: AssignmentPolicy,
    pub occupancy: Occupancy,
    pub lineup: Lineup,
}

#[derive(Debug, Clone)]
pub struct MatchContext {
    match_id: String,
    lineup: Lineup,
    policy: AssignmentPolicy,
    attendance: AttendanceMap,
    config: LineupConfig,
}

impl MatchContext {
    /// Open a match: fresh lineup in the configured starting formation,
    /// seeded from the roster and attendance snapshot.
    pub fn open(
        match_id: impl Into<String>,
        game_mode: GameMode,
        roster: &Roster,
        attendance: &AttendanceMap,
        config: &LineupConfig,
    ) -> Self {
        let mut ctx = Self {
            match_id: match_id.into(),
            lineup: Lineup::new(config.starting_formation(game_mode).clone()),
            policy: config.policy(),
            attendance: AttendanceMap::new(),
            config: config.clone(),
        };
        ctx.seed(roster, attendance);
        log::info!("Opened match {} ({})", ctx.match_id, game_mode);
        ctx
    }

    fn seed(&mut self, roster: &Roster, attendance: &AttendanceMap) {
        seed_lineup(&mut self.lineup, self.policy, roster, attendance, self.config.auto_assign_on_seed);
        self.attendance = attendance.clone();
    }

    /// Move to another match.
    ///
    /// Returns `false` (and keeps the current lineup) when `match_id` is the
    /// match already open.
    pub fn switch_match(
        &mut self,
        match_id: impl Into<String>,
        game_mode: GameMode,
        roster: &Roster,
        attendance: &AttendanceMap,
    ) -> bool {
        let match_id = match_id.into();
        if match_id == self.match_id {
            log::debug!("Match {} already open", match_id);
            return false;
        }
        log::info!("Switching match {} -> {}", self.match_id, match_id);
        self.match_id = match_id;
        self.lineup = Lineup::new(self.config.starting_formation(game_mode).clone());
        self.seed(roster, attendance);
        true
    }

    /// React to a new attendance snapshot, given the previous one explicitly.
    pub fn on_attendance_changed(
        &mut self,
        roster: &Roster,
        previous: &AttendanceMap,
        next: &AttendanceMap,
    ) -> SyncReport {
        let report = sync_attendance(&mut self.lineup, self.policy, roster, previous, next);
        self.attendance = next.clone();
        report
    }

    /// React to a new attendance snapshot, diffing against the last one seen.
    pub fn update_attendance(&mut self, roster: &Roster, next: &AttendanceMap) -> SyncReport {
        let previous = std::mem::take(&mut self.attendance);
        self.on_attendance_changed(roster, &previous, next)
    }

    /// Field players whose attendance is not confirmed in the last snapshot.
    pub fn flagged_occupants(&self) -> Vec<FlaggedOccupant> {
        flagged_occupants(&self.lineup, &self.attendance)
    }

    pub fn set_policy(&mut self, policy: AssignmentPolicy) {
        if policy != self.policy {
            log::debug!("Strict positions: {}", policy.strict_positions);
        }
        self.policy = policy;
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn attendance(&self) -> &AttendanceMap {
        &self.attendance
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    /// Operations bound to the context's current policy.
    pub fn ops(&mut self) -> LineupOps<'_> {
        self.lineup.ops(self.policy)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            match_id: self.match_id.clone(),
            policy: self.policy,
            occupancy: self.lineup.occupancy(),
            lineup: self.lineup.clone(),
        }
    }
}
