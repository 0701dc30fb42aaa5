//! Lineup CLI
//!
//! Formation catalog listing and script replay against a roster snapshot.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use lineup_core::GameMode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Formation catalog and lineup script runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List the formations of a game mode
    Formations {
        /// Game mode: 11 or 7
        #[arg(long, default_value = "11")]
        mode: GameMode,

        /// Print the JSON API response instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Open a match and run a command script against it
    Replay {
        /// Roster JSON file (array of player records)
        #[arg(long)]
        roster: PathBuf,

        /// Attendance JSON file (player id -> status)
        #[arg(long)]
        attendance: PathBuf,

        /// Script JSON file (array of commands)
        #[arg(long)]
        script: PathBuf,

        /// Game mode; defaults to the config's
        #[arg(long)]
        mode: Option<GameMode>,

        /// Require natural positions to match the slot's line
        #[arg(long, default_value = "false")]
        strict: bool,

        /// Lineup config JSON file (falls back to LINEUP_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print step results and the final snapshot as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Formations { mode, json } => {
            if json {
                let response = lineup_core::formations_json(mode.code()).map_err(anyhow::Error::msg)?;
                println!("{}", response);
            } else {
                print!("{}", lineup_cli::render_formations(mode));
            }
        }

        Commands::Replay { roster, attendance, script, mode, strict, config, json } => {
            let output = lineup_cli::replay(&lineup_cli::ReplayInput {
                roster: &roster,
                attendance: &attendance,
                script: &script,
                config: config.as_deref(),
                strict,
                game_mode: mode,
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for step in &output.steps {
                    println!("{}", lineup_cli::render_step(step));
                }
                println!();
                print!("{}", lineup_cli::render_lineup(&output.snapshot.lineup));
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("lineup CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
