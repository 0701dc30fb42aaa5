//! Static formation tables for 11-a-side and 7-a-side football.

use once_cell::sync::Lazy;

use super::{Formation, GameMode};

/// (code, defenders, midfielders, forwards)
const ELEVEN_A_SIDE: &[(&str, u8, u8, u8)] = &[
    ("4-4-2", 4, 4, 2),
    ("4-3-3", 4, 3, 3),
    ("3-5-2", 3, 5, 2),
    ("4-5-1", 4, 5, 1),
    ("5-3-2", 5, 3, 2),
    ("3-4-3", 3, 4, 3),
    ("4-2-3-1", 4, 5, 1), // 2 pivots + 3 attacking mids counted as midfield
    ("5-4-1", 5, 4, 1),
];

const SEVEN_A_SIDE: &[(&str, u8, u8, u8)] = &[
    ("2-3-1", 2, 3, 1),
    ("3-2-1", 3, 2, 1),
    ("2-2-2", 2, 2, 2),
    ("3-1-2", 3, 1, 2),
    ("1-3-2", 1, 3, 2),
];

static ELEVEN_CATALOG: Lazy<Vec<Formation>> = Lazy::new(|| build(GameMode::Eleven, ELEVEN_A_SIDE));
static SEVEN_CATALOG: Lazy<Vec<Formation>> = Lazy::new(|| build(GameMode::Seven, SEVEN_A_SIDE));

fn build(mode: GameMode, table: &[(&str, u8, u8, u8)]) -> Vec<Formation> {
    table
        .iter()
        .map(|&(code, d, m, f)| Formation::custom(code, mode, d, m, f))
        .collect()
}

/// All formations available for a game mode, in display order.
///
/// Never empty; the first entry is the default.
pub fn formations_by_game_mode(mode: GameMode) -> &'static [Formation] {
    match mode {
        GameMode::Eleven => ELEVEN_CATALOG.as_slice(),
        GameMode::Seven => SEVEN_CATALOG.as_slice(),
    }
}

pub fn default_formation(mode: GameMode) -> &'static Formation {
    &formations_by_game_mode(mode)[0]
}

pub fn find_formation(mode: GameMode, id: &str) -> Option<&'static Formation> {
    let id = id.trim();
    formations_by_game_mode(mode).iter().find(|f| f.id == id)
}

/// Resolve a formation selection for a game mode.
///
/// A missing selection, or one that belongs to another game mode, falls back
/// to the mode's default.
pub fn resolve_formation(mode: GameMode, selected: Option<&str>) -> &'static Formation {
    match selected.and_then(|id| find_formation(mode, id)) {
        Some(formation) => formation,
        None => {
            if let Some(id) = selected {
                log::debug!("Formation '{}' not available for {}, using default", id, mode);
            }
            default_formation(mode)
        }
    }
}
