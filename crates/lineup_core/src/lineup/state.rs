//! Lineup aggregate
//!
//! One slot array per field line plus the bench. Read access is public; every
//! write goes through [`super::ops::LineupOps`].
//!
//! Invariant: a player id appears at most once across all slots and the
//! bench. [`Lineup::validate`] checks it together with the slot counts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AssignmentPolicy, Line, PlayerLocation, SlotPosition};
use crate::error::{LineupError, Result};
use crate::formation::{default_formation, Formation, GameMode};
use crate::models::{PlayerId, PlayerRef};

/// Single placement point of a formation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub line: Line,
    pub index: usize,
    #[serde(default)]
    pub occupant: Option<PlayerRef>,
}

impl Slot {
    fn empty(line: Line, index: usize) -> Self {
        Self { line, index, occupant: None }
    }

    pub fn position(&self) -> SlotPosition {
        SlotPosition::new(self.line, self.index)
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    fn holds(&self, id: &PlayerId) -> bool {
        self.occupant.as_ref().is_some_and(|p| &p.id == id)
    }
}

/// Filled vs total slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub filled: usize,
    pub total: usize,
}

impl Occupancy {
    pub fn is_complete(&self) -> bool {
        self.filled == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    formation: Formation,
    goalkeeper: Vec<Slot>,
    defense: Vec<Slot>,
    midfield: Vec<Slot>,
    forward: Vec<Slot>,
    #[serde(default)]
    bench: Vec<PlayerRef>,
}

impl Default for Lineup {
    fn default() -> Self {
        Self::for_game_mode(GameMode::default())
    }
}

impl Lineup {
    /// Empty lineup shaped by `formation`.
    pub fn new(formation: Formation) -> Self {
        let make = |line: Line| -> Vec<Slot> {
            (0..formation.line_size(line)).map(|i| Slot::empty(line, i)).collect()
        };
        Self {
            goalkeeper: make(Line::Goalkeeper),
            defense: make(Line::Defense),
            midfield: make(Line::Midfield),
            forward: make(Line::Forward),
            bench: Vec::new(),
            formation,
        }
    }

    /// Empty lineup with the default formation of `mode`.
    pub fn for_game_mode(mode: GameMode) -> Self {
        Self::new(default_formation(mode).clone())
    }

    // ========================
    // Read access
    // ========================

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn game_mode(&self) -> GameMode {
        self.formation.game_mode
    }

    pub fn slots(&self, line: Line) -> &[Slot] {
        match line {
            Line::Goalkeeper => &self.goalkeeper,
            Line::Defense => &self.defense,
            Line::Midfield => &self.midfield,
            Line::Forward => &self.forward,
        }
    }

    pub fn slot(&self, position: SlotPosition) -> Option<&Slot> {
        self.slots(position.line).get(position.index)
    }

    pub fn occupant(&self, position: SlotPosition) -> Option<&PlayerRef> {
        self.slot(position).and_then(|s| s.occupant.as_ref())
    }

    pub fn bench(&self) -> &[PlayerRef] {
        &self.bench
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = &Slot> {
        Line::ALL.into_iter().flat_map(move |line| self.slots(line).iter())
    }

    pub fn occupancy(&self) -> Occupancy {
        let mut filled = 0;
        let mut total = 0;
        for slot in self.iter_slots() {
            total += 1;
            if !slot.is_empty() {
                filled += 1;
            }
        }
        Occupancy { filled, total }
    }

    /// Locate a player: slots first (goal outwards), then the bench.
    pub fn find_player_position(&self, id: &PlayerId) -> Option<PlayerLocation> {
        if let Some(slot) = self.iter_slots().find(|s| s.holds(id)) {
            return Some(PlayerLocation::Slot(slot.position()));
        }
        self.bench
            .iter()
            .position(|p| &p.id == id)
            .map(|index| PlayerLocation::Bench { index })
    }

    pub fn is_on_field(&self, id: &PlayerId) -> bool {
        self.iter_slots().any(|s| s.holds(id))
    }

    pub fn is_on_bench(&self, id: &PlayerId) -> bool {
        self.bench.iter().any(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.find_player_position(id).is_some()
    }

    /// Bench players that may be brought on.
    ///
    /// With a strict policy and a target line, only players whose natural
    /// position belongs to that line are returned.
    pub fn available_bench_players(
        &self,
        policy: AssignmentPolicy,
        for_line: Option<Line>,
    ) -> Vec<&PlayerRef> {
        self.bench
            .iter()
            .filter(|p| match for_line {
                Some(line) => policy.allows(line, p.position),
                None => true,
            })
            .collect()
    }

    pub fn field_players(&self) -> Vec<(SlotPosition, &PlayerRef)> {
        self.iter_slots()
            .filter_map(|s| s.occupant.as_ref().map(|p| (s.position(), p)))
            .collect()
    }

    /// Ids of everyone in the lineup, field players first.
    pub fn all_player_ids(&self) -> Vec<PlayerId> {
        self.iter_slots()
            .filter_map(|s| s.occupant.as_ref())
            .chain(self.bench.iter())
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn first_empty_slot(&self, line: Line) -> Option<SlotPosition> {
        self.slots(line).iter().find(|s| s.is_empty()).map(Slot::position)
    }

    /// Check slot counts, slot addressing and player uniqueness.
    pub fn validate(&self) -> Result<()> {
        for line in Line::ALL {
            let slots = self.slots(line);
            let expected = self.formation.line_size(line);
            if slots.len() != expected {
                return Err(LineupError::SlotCountMismatch {
                    line: line.code().to_string(),
                    formation: self.formation.id.clone(),
                    expected,
                    found: slots.len(),
                });
            }
            for (i, slot) in slots.iter().enumerate() {
                if slot.line != line || slot.index != i {
                    return Err(LineupError::SlotIndexMismatch {
                        line: line.code().to_string(),
                        expected: i,
                        found: slot.index,
                    });
                }
            }
        }

        let mut seen: HashSet<&PlayerId> = HashSet::new();
        let everyone = self.iter_slots().filter_map(|s| s.occupant.as_ref()).chain(self.bench.iter());
        for player in everyone {
            if !seen.insert(&player.id) {
                return Err(LineupError::DuplicatePlayer { player: player.id.clone() });
            }
        }
        Ok(())
    }

    // ========================
    // Mutation primitives (operations layer only)
    // ========================

    fn slots_mut(&mut self, line: Line) -> &mut Vec<Slot> {
        match line {
            Line::Goalkeeper => &mut self.goalkeeper,
            Line::Defense => &mut self.defense,
            Line::Midfield => &mut self.midfield,
            Line::Forward => &mut self.forward,
        }
    }

    /// Remove a player from wherever they are.
    pub(crate) fn take_player(&mut self, id: &PlayerId) -> Option<(PlayerLocation, PlayerRef)> {
        match self.find_player_position(id)? {
            PlayerLocation::Slot(pos) => {
                let player = self.slots_mut(pos.line)[pos.index].occupant.take()?;
                Some((PlayerLocation::Slot(pos), player))
            }
            PlayerLocation::Bench { index } => {
                let player = self.bench.remove(index);
                Some((PlayerLocation::Bench { index }, player))
            }
        }
    }

    /// Write `player` into a slot, returning the previous occupant.
    ///
    /// The caller has already removed `player` from any other location and
    /// checked that the slot exists.
    pub(crate) fn put_in_slot(
        &mut self,
        position: SlotPosition,
        player: PlayerRef,
    ) -> Option<PlayerRef> {
        self.slots_mut(position.line)[position.index].occupant.replace(player)
    }

    pub(crate) fn take_bench(&mut self, index: usize) -> Option<PlayerRef> {
        (index < self.bench.len()).then(|| self.bench.remove(index))
    }

    pub(crate) fn push_bench(&mut self, player: PlayerRef) {
        self.bench.push(player);
    }

    pub(crate) fn insert_bench(&mut self, index: usize, player: PlayerRef) {
        let index = index.min(self.bench.len());
        self.bench.insert(index, player);
    }

    /// Replace the formation, truncating or extending each line.
    ///
    /// Returns occupants of removed slots, line by line, lowest removed index first.
    pub(crate) fn reshape(&mut self, formation: Formation) -> Vec<PlayerRef> {
        let mut displaced = Vec::new();
        for line in Line::ALL {
            let size = formation.line_size(line);
            let slots = self.slots_mut(line);
            if slots.len() > size {
                displaced.extend(slots.drain(size..).filter_map(|s| s.occupant));
            } else {
                let start = slots.len();
                slots.extend((start..size).map(|i| Slot::empty(line, i)));
            }
        }
        self.formation = formation;
        displaced
    }

    pub(crate) fn clear(&mut self, formation: Formation) {
        *self = Lineup::new(formation);
    }
}
