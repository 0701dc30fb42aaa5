use serde::{Deserialize, Serialize};

use super::Line;
use crate::models::NaturalPosition;

/// Placement policy handed to the operations layer.
///
/// Kept out of [`super::Lineup`] so one lineup can be evaluated under either
/// policy without being modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// Natural position must match the slot's line.
    #[serde(default)]
    pub strict_positions: bool,
}

impl AssignmentPolicy {
    pub const LENIENT: AssignmentPolicy = AssignmentPolicy { strict_positions: false };
    pub const STRICT: AssignmentPolicy = AssignmentPolicy { strict_positions: true };

    pub fn new(strict_positions: bool) -> Self {
        Self { strict_positions }
    }

    pub fn allows(&self, line: Line, position: NaturalPosition) -> bool {
        !self.strict_positions || line.accepts(position)
    }
}
