//! Attendance integration
//!
//! Attendance belongs to the host. These helpers read a snapshot and react
//! to it through the regular assignment operations.

use serde::{Deserialize, Serialize};

use super::{AssignmentPolicy, Lineup, SlotPosition};
use crate::models::{AttendanceMap, AttendanceStatus, PlayerId, Roster};

/// What an attendance update did to the lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Newly confirmed players now in a slot.
    pub placed: Vec<PlayerId>,
    /// Newly confirmed players left on the bench (no free slot for their line).
    pub benched: Vec<PlayerId>,
    /// Confirmed ids not present in the roster snapshot.
    pub unknown: Vec<PlayerId>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.benched.is_empty() && self.unknown.is_empty()
    }
}

/// React to an attendance change: auto-assign players that just confirmed.
pub fn sync_attendance(
    lineup: &mut Lineup,
    policy: AssignmentPolicy,
    roster: &Roster,
    previous: &AttendanceMap,
    next: &AttendanceMap,
) -> SyncReport {
    let mut report = SyncReport::default();
    let mut ops = lineup.ops(policy);

    for id in AttendanceMap::newly_confirmed(previous, next) {
        let Some(player) = roster.get(&id) else {
            log::warn!("Attendance confirmed for {} who is not on the roster", id);
            report.unknown.push(id);
            continue;
        };
        if ops.lineup().is_on_field(&id) {
            continue;
        }
        match ops.auto_assign_player(player.clone()) {
            Ok(_) if ops.lineup().is_on_field(&id) => report.placed.push(id),
            Ok(_) => report.benched.push(id),
            Err(rejection) => log::debug!("Auto-assign of {} refused: {}", id, rejection),
        }
    }

    if !report.is_empty() {
        log::info!(
            "Attendance sync: {} placed, {} benched, {} unknown",
            report.placed.len(),
            report.benched.len(),
            report.unknown.len()
        );
    }
    report
}

/// Slot occupant whose attendance is not (or no longer) confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedOccupant {
    pub position: SlotPosition,
    pub player_id: PlayerId,
    pub status: AttendanceStatus,
}

/// Field players the presentation layer should highlight.
pub fn flagged_occupants(lineup: &Lineup, attendance: &AttendanceMap) -> Vec<FlaggedOccupant> {
    lineup
        .field_players()
        .into_iter()
        .filter_map(|(position, player)| {
            let status = attendance.status_of(&player.id);
            (status != AttendanceStatus::Confirmed).then(|| FlaggedOccupant {
                position,
                player_id: player.id.clone(),
                status,
            })
        })
        .collect()
}

/// Fill a fresh lineup from a roster snapshot.
///
/// Every roster player not marked absent and not already in the lineup goes
/// to the bench in roster order. With `auto_assign`, confirmed players are
/// then placed in their natural lines.
pub fn seed_lineup(
    lineup: &mut Lineup,
    policy: AssignmentPolicy,
    roster: &Roster,
    attendance: &AttendanceMap,
    auto_assign: bool,
) {
    let mut ops = lineup.ops(policy);
    for player in roster.iter().filter(|p| !attendance.is_absent(&p.id)) {
        if let Err(rejection) = ops.add_to_bench(player.clone()) {
            log::debug!("Seeding: {} not benched: {}", player.id, rejection);
        }
    }

    if auto_assign {
        for player in roster.iter().filter(|p| attendance.is_confirmed(&p.id)) {
            if let Err(rejection) = ops.auto_assign_player(player.clone()) {
                log::debug!("Seeding: {} not placed: {}", player.id, rejection);
            }
        }
    }

    let occupancy = ops.lineup().occupancy();
    log::info!(
        "Seeded lineup from {} roster players: {}/{} slots filled, {} on bench",
        roster.len(),
        occupancy.filled,
        occupancy.total,
        ops.lineup().bench().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::GameMode;
    use crate::lineup::Line;
    use crate::models::{NaturalPosition, PlayerRef};

    fn roster() -> Roster {
        Roster::new(vec![
            PlayerRef::new("1", "Hugo Sosa", Some(1), NaturalPosition::Goalkeeper),
            PlayerRef::new("2", "Bruno Díaz", Some(4), NaturalPosition::Defender),
            PlayerRef::new("3", "Iván Ruiz", Some(8), NaturalPosition::Midfielder),
            PlayerRef::new("4", "Diego Paz", Some(9), NaturalPosition::Forward),
            PlayerRef::new("5", "Tomás Gil", Some(12), NaturalPosition::Goalkeeper),
        ])
    }

    #[test]
    fn seeding_benches_everyone_not_absent() {
        let attendance = AttendanceMap::new().with("3", AttendanceStatus::Absent);
        let mut lineup = Lineup::for_game_mode(GameMode::Eleven);

        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster(), &attendance, false);

        let bench: Vec<&str> = lineup.bench().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(bench, vec!["1", "2", "4", "5"]);
        assert_eq!(lineup.occupancy().filled, 0);
    }

    #[test]
    fn seeding_with_auto_assign_places_confirmed() {
        let attendance = AttendanceMap::new()
            .with("1", AttendanceStatus::Confirmed)
            .with("4", AttendanceStatus::Confirmed)
            .with("5", AttendanceStatus::Confirmed);
        let mut lineup = Lineup::for_game_mode(GameMode::Seven);

        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster(), &attendance, true);

        assert_eq!(lineup.slots(Line::Goalkeeper)[0].occupant.as_ref().unwrap().id.as_str(), "1");
        assert_eq!(lineup.slots(Line::Forward)[0].occupant.as_ref().unwrap().id.as_str(), "4");
        // Second keeper stays on the bench
        assert!(lineup.is_on_bench(&"5".into()));
        assert!(lineup.validate().is_ok());
    }

    #[test]
    fn reseeding_keeps_existing_placements() {
        let attendance = AttendanceMap::new()
            .with("1", AttendanceStatus::Confirmed)
            .with("2", AttendanceStatus::Confirmed);
        let mut lineup = Lineup::for_game_mode(GameMode::Eleven);
        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster(), &attendance, true);
        let seeded = lineup.clone();

        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster(), &attendance, true);

        assert_eq!(lineup, seeded);
        assert_eq!(lineup.all_player_ids().len(), 5);
    }

    #[test]
    fn sync_places_newly_confirmed_players_only() {
        let roster = roster();
        let mut lineup = Lineup::for_game_mode(GameMode::Eleven);
        let previous = AttendanceMap::new().with("2", AttendanceStatus::Confirmed);
        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster, &previous, true);

        let next = previous
            .clone()
            .with("1", AttendanceStatus::Confirmed)
            .with("5", AttendanceStatus::Confirmed)
            .with("77", AttendanceStatus::Confirmed);
        let report = sync_attendance(&mut lineup, AssignmentPolicy::STRICT, &roster, &previous, &next);

        assert_eq!(report.placed, vec![PlayerId::from("1")]);
        assert_eq!(report.benched, vec![PlayerId::from("5")]);
        assert_eq!(report.unknown, vec![PlayerId::from("77")]);
    }

    #[test]
    fn flags_unconfirmed_occupants() {
        let mut lineup = Lineup::for_game_mode(GameMode::Eleven);
        let roster = roster();
        let confirmed = AttendanceMap::new()
            .with("1", AttendanceStatus::Confirmed)
            .with("2", AttendanceStatus::Confirmed);
        seed_lineup(&mut lineup, AssignmentPolicy::STRICT, &roster, &confirmed, true);

        let changed = confirmed.clone().with("2", AttendanceStatus::Absent);
        let flagged = flagged_occupants(&lineup, &changed);

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].player_id.as_str(), "2");
        assert_eq!(flagged[0].status, AttendanceStatus::Absent);
        assert_eq!(flagged[0].position.line, Line::Defense);
    }
}
