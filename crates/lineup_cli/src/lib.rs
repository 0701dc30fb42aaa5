//! Lineup CLI library
//!
//! File loading and script replay for the `lineup` binary. A replay opens a
//! match from a roster and attendance file, then runs a JSON script of lineup
//! commands and attendance updates against it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use lineup_core::api::LineupCommand;
use lineup_core::lineup::{Line, Lineup, SyncReport};
use lineup_core::{
    formations_by_game_mode, AttendanceMap, GameMode, LineupConfig,
    MatchContext, MatchSnapshot, PlayerId, Roster,
};
use lineup_core::models::RosterRecord;

/// Roster file: JSON array of records (`id`, `name`/`nombre`, `position`/`posicion`, ...).
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let records: Vec<RosterRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;
    Ok(Roster::from_records(&records))
}

/// Attendance file: JSON object of player id to status label
/// (`confirmed`/`confirmado`, `absent`/`ausente`, `pending`/`pendiente`).
pub fn load_attendance(path: &Path) -> Result<AttendanceMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read attendance file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse attendance file: {}", path.display()))
}

// ========================
// Script
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Command(LineupCommand),
    /// Status changes layered over the current attendance snapshot.
    Attendance(AttendanceMap),
}

impl ScriptStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptStep::Command(cmd) => cmd.name(),
            ScriptStep::Attendance(_) => "attendance",
        }
    }
}

#[derive(Deserialize)]
struct AttendanceStep {
    statuses: AttendanceMap,
}

/// Parse one script step.
///
/// Commands use the JSON API form. A `player` given as a bare id (string or
/// number) is looked up in the roster.
pub fn parse_step(mut value: serde_json::Value, roster: &Roster) -> Result<ScriptStep> {
    if value.get("op").and_then(|op| op.as_str()) == Some("attendance") {
        let step: AttendanceStep = serde_json::from_value(value).context("Bad attendance step")?;
        return Ok(ScriptStep::Attendance(step.statuses));
    }

    let bare_id = match value.get("player") {
        Some(serde_json::Value::String(id)) => Some(id.clone()),
        Some(serde_json::Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };
    if let Some(id) = bare_id {
        let Some(player) = roster.get(&PlayerId::from(id.as_str())) else {
            bail!("Player {id} is not on the roster");
        };
        value["player"] = serde_json::to_value(player)?;
    }
    let command: LineupCommand = serde_json::from_value(value).context("Bad lineup command")?;
    Ok(ScriptStep::Command(command))
}

pub fn load_script(path: &Path, roster: &Roster) -> Result<Vec<ScriptStep>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script file: {}", path.display()))?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_step(value, roster).with_context(|| format!("Script step {}", i + 1)))
        .collect()
}

// ========================
// Replay
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    Unchanged,
    Rejected { reason: String },
    Synced { report: SyncReport },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: usize,
    pub op: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplayOutput {
    pub steps: Vec<StepReport>,
    pub snapshot: MatchSnapshot,
}

/// Run `steps` against an open match.
pub fn run_script(ctx: &mut MatchContext, roster: &Roster, steps: Vec<ScriptStep>) -> Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(steps.len());
    for (i, step) in steps.into_iter().enumerate() {
        let op = step.name().to_string();
        let outcome = match step {
            ScriptStep::Command(command) => {
                let result = command
                    .apply(&mut ctx.ops())
                    .with_context(|| format!("Script step {} ({op})", i + 1))?;
                match result {
                    Ok(outcome) if outcome.changed() => StepOutcome::Applied,
                    Ok(_) => StepOutcome::Unchanged,
                    Err(rejection) => StepOutcome::Rejected { reason: rejection.to_string() },
                }
            }
            ScriptStep::Attendance(updates) => {
                let next = ctx.attendance().merged(&updates);
                StepOutcome::Synced { report: ctx.update_attendance(roster, &next) }
            }
        };
        log::debug!("Step {}: {} -> {:?}", i + 1, op, outcome);
        reports.push(StepReport { step: i + 1, op, outcome });
    }
    Ok(reports)
}

pub struct ReplayInput<'a> {
    pub roster: &'a Path,
    pub attendance: &'a Path,
    pub script: &'a Path,
    pub config: Option<&'a Path>,
    pub strict: bool,
    pub game_mode: Option<GameMode>,
}

pub fn replay(input: &ReplayInput<'_>) -> Result<ReplayOutput> {
    let mut config = match input.config {
        Some(path) => LineupConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => LineupConfig::from_env().context("Failed to load config from environment")?,
    };
    if input.strict {
        config.strict_positions = true;
    }
    let game_mode = input.game_mode.unwrap_or(config.default_game_mode);

    let roster = load_roster(input.roster)?;
    let attendance = load_attendance(input.attendance)?;
    let steps = load_script(input.script, &roster)?;

    let mut ctx = MatchContext::open("replay", game_mode, &roster, &attendance, &config);
    let steps = run_script(&mut ctx, &roster, steps)?;
    Ok(ReplayOutput { steps, snapshot: ctx.snapshot() })
}

// ========================
// Text rendering
// ========================

pub fn render_formations(mode: GameMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} formations:", mode);
    for (i, formation) in formations_by_game_mode(mode).iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<8} DEF {}  MID {}  FWD {}{}",
            formation.id, formation.defenders, formation.midfielders, formation.forwards, marker
        );
    }
    out
}

pub fn render_lineup(lineup: &Lineup) -> String {
    let mut out = String::new();
    let occupancy = lineup.occupancy();
    let _ = writeln!(
        out,
        "{} {}  ({}/{} filled)",
        lineup.game_mode(),
        lineup.formation().id,
        occupancy.filled,
        occupancy.total
    );
    for line in Line::ALL {
        let names: Vec<String> = lineup
            .slots(line)
            .iter()
            .map(|slot| match &slot.occupant {
                Some(player) => match player.shirt_number {
                    Some(n) => format!("{} #{}", player.name, n),
                    None => player.name.clone(),
                },
                None => "-".to_string(),
            })
            .collect();
        let _ = writeln!(out, "  {:<4} {}", line.code(), names.join(" | "));
    }
    let bench: Vec<&str> = lineup.bench().iter().map(|p| p.name.as_str()).collect();
    let _ = writeln!(out, "  {:<4} {}", "SUB", if bench.is_empty() { "-".to_string() } else { bench.join(", ") });
    out
}

pub fn render_step(report: &StepReport) -> String {
    match &report.outcome {
        StepOutcome::Applied => format!("{:>3}. {:<16} applied", report.step, report.op),
        StepOutcome::Unchanged => format!("{:>3}. {:<16} unchanged", report.step, report.op),
        StepOutcome::Rejected { reason } => {
            format!("{:>3}. {:<16} rejected: {}", report.step, report.op, reason)
        }
        StepOutcome::Synced { report: sync } => format!(
            "{:>3}. {:<16} placed {}, benched {}, unknown {}",
            report.step,
            report.op,
            sync.placed.len(),
            sync.benched.len(),
            sync.unknown.len()
        ),
    }
}
