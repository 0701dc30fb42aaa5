//! Attendance snapshots.
//!
//! Attendance is owned by the host application (players confirm through their
//! own screens and the host polls the backend). The lineup only reads a
//! snapshot per operation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::PlayerId;
use crate::error::LineupError;

/// Deserializes through [`FromStr`], so Spanish labels are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AttendanceStatus {
    #[default]
    Pending,
    Confirmed,
    Absent,
}

impl FromStr for AttendanceStatus {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "confirmed" | "confirmado" | "confirmada" => Ok(Self::Confirmed),
            "absent" | "ausente" => Ok(Self::Absent),
            other => Err(LineupError::InvalidAttendanceStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for AttendanceStatus {
    type Error = LineupError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Absent => "absent",
        };
        f.write_str(label)
    }
}

/// Attendance snapshot keyed by player.
///
/// Players missing from the map are treated as pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceMap {
    statuses: BTreeMap<PlayerId, AttendanceStatus>,
}

impl AttendanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<PlayerId>, status: AttendanceStatus) {
        self.statuses.insert(id.into(), status);
    }

    pub fn with(mut self, id: impl Into<PlayerId>, status: AttendanceStatus) -> Self {
        self.set(id, status);
        self
    }

    pub fn status_of(&self, id: &PlayerId) -> AttendanceStatus {
        self.statuses.get(id).copied().unwrap_or_default()
    }

    pub fn is_confirmed(&self, id: &PlayerId) -> bool {
        self.status_of(id) == AttendanceStatus::Confirmed
    }

    pub fn is_absent(&self, id: &PlayerId) -> bool {
        self.status_of(id) == AttendanceStatus::Absent
    }

    pub fn confirmed_ids(&self) -> Vec<PlayerId> {
        self.statuses
            .iter()
            .filter(|(_, status)| **status == AttendanceStatus::Confirmed)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Ids whose status moved into `Confirmed` between two snapshots.
    pub fn newly_confirmed(previous: &AttendanceMap, next: &AttendanceMap) -> Vec<PlayerId> {
        next.statuses
            .iter()
            .filter(|(id, status)| {
                **status == AttendanceStatus::Confirmed && !previous.is_confirmed(id)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &AttendanceStatus)> {
        self.statuses.iter()
    }

    /// Copy of `self` with every entry of `updates` written over it.
    pub fn merged(&self, updates: &AttendanceMap) -> AttendanceMap {
        let mut next = self.clone();
        next.statuses.extend(updates.iter().map(|(id, status)| (id.clone(), *status)));
        next
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl FromIterator<(PlayerId, AttendanceStatus)> for AttendanceMap {
    fn from_iter<I: IntoIterator<Item = (PlayerId, AttendanceStatus)>>(iter: I) -> Self {
        Self { statuses: iter.into_iter().collect() }
    }
}
