use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Roster identifier of a player.
///
/// The club backend hands out numeric primary keys while older exports use
/// strings, so every id is normalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RecordId::deserialize(deserializer).map(|id| PlayerId::from(&id))
    }
}

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Natural (preferred) position of a player, reduced to the four field lines.
///
/// Deserializes from any roster label through [`NaturalPosition::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum NaturalPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    /// Position string that did not match any known label.
    #[default]
    Unknown,
}

/// Position labels accepted from roster sources, lowercase.
///
/// Club rosters are entered in Spanish; imports from other tools use English
/// names or the usual detailed position codes.
const POSITION_LABELS: &[(&str, NaturalPosition)] = &[
    // Goalkeeper
    ("portero", NaturalPosition::Goalkeeper),
    ("arquero", NaturalPosition::Goalkeeper),
    ("guardameta", NaturalPosition::Goalkeeper),
    ("goalkeeper", NaturalPosition::Goalkeeper),
    ("keeper", NaturalPosition::Goalkeeper),
    ("gk", NaturalPosition::Goalkeeper),
    ("por", NaturalPosition::Goalkeeper),
    // Defender
    ("defensa", NaturalPosition::Defender),
    ("defensor", NaturalPosition::Defender),
    ("defensa central", NaturalPosition::Defender),
    ("central", NaturalPosition::Defender),
    ("lateral", NaturalPosition::Defender),
    ("lateral izquierdo", NaturalPosition::Defender),
    ("lateral derecho", NaturalPosition::Defender),
    ("carrilero", NaturalPosition::Defender),
    ("defender", NaturalPosition::Defender),
    ("def", NaturalPosition::Defender),
    ("df", NaturalPosition::Defender),
    ("lb", NaturalPosition::Defender),
    ("cb", NaturalPosition::Defender),
    ("rb", NaturalPosition::Defender),
    ("lwb", NaturalPosition::Defender),
    ("rwb", NaturalPosition::Defender),
    // Midfielder
    ("mediocampista", NaturalPosition::Midfielder),
    ("centrocampista", NaturalPosition::Midfielder),
    ("medio", NaturalPosition::Midfielder),
    ("mediocentro", NaturalPosition::Midfielder),
    ("volante", NaturalPosition::Midfielder),
    ("pivote", NaturalPosition::Midfielder),
    ("interior", NaturalPosition::Midfielder),
    ("midfielder", NaturalPosition::Midfielder),
    ("med", NaturalPosition::Midfielder),
    ("mid", NaturalPosition::Midfielder),
    ("mf", NaturalPosition::Midfielder),
    ("cdm", NaturalPosition::Midfielder),
    ("cm", NaturalPosition::Midfielder),
    ("cam", NaturalPosition::Midfielder),
    ("lm", NaturalPosition::Midfielder),
    ("rm", NaturalPosition::Midfielder),
    // Forward
    ("delantero", NaturalPosition::Forward),
    ("delantero centro", NaturalPosition::Forward),
    ("atacante", NaturalPosition::Forward),
    ("extremo", NaturalPosition::Forward),
    ("punta", NaturalPosition::Forward),
    ("forward", NaturalPosition::Forward),
    ("striker", NaturalPosition::Forward),
    ("winger", NaturalPosition::Forward),
    ("del", NaturalPosition::Forward),
    ("fwd", NaturalPosition::Forward),
    ("fw", NaturalPosition::Forward),
    ("lw", NaturalPosition::Forward),
    ("rw", NaturalPosition::Forward),
    ("cf", NaturalPosition::Forward),
    ("st", NaturalPosition::Forward),
];

impl NaturalPosition {
    /// Map a roster position string to a natural position.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything not in the label table becomes [`NaturalPosition::Unknown`].
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        POSITION_LABELS
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(_, position)| *position)
            .unwrap_or(NaturalPosition::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NaturalPosition::Unknown)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defender => "Defender",
            Self::Midfielder => "Midfielder",
            Self::Forward => "Forward",
            Self::Unknown => "Unknown",
        }
    }

    pub fn display_name_es(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "Portero",
            Self::Defender => "Defensa",
            Self::Midfielder => "Mediocampista",
            Self::Forward => "Delantero",
            Self::Unknown => "Sin posición",
        }
    }
}

impl From<String> for NaturalPosition {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl fmt::Display for NaturalPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Player reference used inside a lineup.
///
/// Built once from a roster record; the lineup moves it between slots and the
/// bench but never edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<u8>,
    pub position: NaturalPosition,
}

impl PlayerRef {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        shirt_number: Option<u8>,
        position: NaturalPosition,
    ) -> Self {
        Self { id: id.into(), name: name.into(), shirt_number, position }
    }
}

/// Identifier as sent by a roster source: either a database key or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl From<&RecordId> for PlayerId {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Number(n) => PlayerId(n.to_string()),
            RecordId::Text(s) => PlayerId(s.trim().to_string()),
        }
    }
}

/// Raw player record supplied by the roster source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub id: RecordId,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "numero", alias = "number")]
    pub shirt_number: Option<u8>,
    #[serde(default, alias = "posicion")]
    pub position: String,
}

impl From<&RosterRecord> for PlayerRef {
    fn from(record: &RosterRecord) -> Self {
        Self {
            id: PlayerId::from(&record.id),
            name: record.name.trim().to_string(),
            shirt_number: record.shirt_number,
            position: NaturalPosition::parse(&record.position),
        }
    }
}

/// Ordered roster snapshot for one match context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<PlayerRef>,
}

impl Roster {
    pub fn new(players: Vec<PlayerRef>) -> Self {
        Self { players }
    }

    /// Normalize roster-source records. Later duplicates of an id are dropped.
    pub fn from_records(records: &[RosterRecord]) -> Self {
        let mut players: Vec<PlayerRef> = Vec::with_capacity(records.len());
        for record in records {
            let player = PlayerRef::from(record);
            if players.iter().any(|p| p.id == player.id) {
                log::warn!("Duplicate roster record for player {}, keeping the first", player.id);
                continue;
            }
            players.push(player);
        }
        Self { players }
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerRef> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRef> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
