//! Lineup engine
//!
//! In-memory assignment of players to formation slots plus a bench. The
//! aggregate lives in [`state`], all writes in [`ops`], and the reaction to
//! attendance snapshots in [`attendance_sync`].

pub mod attendance_sync;
pub mod line;
pub mod ops;
pub mod policy;
pub mod state;

#[cfg(test)]
mod proptests;

pub use attendance_sync::{flagged_occupants, seed_lineup, sync_attendance, FlaggedOccupant, SyncReport};
pub use line::{Line, PlayerLocation, SlotPosition};
pub use ops::{LineupOps, OpOutcome, OpResult};
pub use policy::AssignmentPolicy;
pub use state::{Lineup, Occupancy, Slot};
