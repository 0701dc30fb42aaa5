pub mod attendance;
pub mod player;

pub use attendance::{AttendanceMap, AttendanceStatus};
pub use player::{NaturalPosition, PlayerId, PlayerRef, RecordId, Roster, RosterRecord};
