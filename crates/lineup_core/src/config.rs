//! Lineup configuration
//!
//! Host-level defaults for new lineups. Loaded from JSON; every field is
//! optional and falls back to [`LineupConfig::default`].
//!
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::default();
//! let strict = LineupConfig::strict();
//! assert!(strict.policy().strict_positions);
//! assert!(!config.policy().strict_positions);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::{LineupError, Result};
use crate::formation::{find_formation, resolve_formation, Formation, GameMode};
use crate::lineup::AssignmentPolicy;

/// Env var naming a JSON config file.
pub const LINEUP_CONFIG_PATH_ENV: &str = "LINEUP_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    /// Game mode of a freshly opened match.
    pub default_game_mode: GameMode,
    /// Formation id to start from; `None` uses the first formation of the mode.
    pub default_formation: Option<String>,
    /// Enforce natural position vs. line on assign and swap.
    pub strict_positions: bool,
    /// Place confirmed players automatically when a lineup is seeded.
    pub auto_assign_on_seed: bool,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            default_game_mode: GameMode::Eleven,
            default_formation: None,
            strict_positions: false,
            auto_assign_on_seed: true,
        }
    }
}

impl LineupConfig {
    /// Strict positions, nothing placed automatically.
    pub fn strict() -> Self {
        Self { strict_positions: true, auto_assign_on_seed: false, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LineupError::Config(format!("failed to read config file '{}': {e}", path.display()))
        })?;
        let config = Self::from_json(&content).map_err(|e| {
            LineupError::Config(format!("failed to parse config file '{}': {e}", path.display()))
        })?;
        config.validate()?;
        log::debug!("Loaded lineup config from {}", path.display());
        Ok(config)
    }

    /// Config named by `LINEUP_CONFIG_PATH`, or the default when it is unset
    /// or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_path_var(env::var(LINEUP_CONFIG_PATH_ENV).ok().as_deref())
    }

    fn from_path_var(value: Option<&str>) -> Result<Self> {
        let Some(path) = value.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(Self::default());
        };
        Self::from_file(path).map_err(|e| {
            log::warn!("Cannot use {LINEUP_CONFIG_PATH_ENV}='{path}': {e}");
            LineupError::Config(format!("{LINEUP_CONFIG_PATH_ENV}='{path}': {e}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.default_formation {
            if find_formation(self.default_game_mode, id).is_none() {
                return Err(LineupError::UnknownFormation {
                    formation: id.clone(),
                    mode: self.default_game_mode.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn policy(&self) -> AssignmentPolicy {
        AssignmentPolicy::new(self.strict_positions)
    }

    /// Starting formation for `mode`.
    ///
    /// The configured formation only applies to the configured game mode;
    /// any other mode starts from its catalog default.
    pub fn starting_formation(&self, mode: GameMode) -> &'static Formation {
        let selected = (mode == self.default_game_mode)
            .then_some(self.default_formation.as_deref())
            .flatten();
        resolve_formation(mode, selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = LineupConfig::from_json(r#"{"strict_positions": true}"#).unwrap();
        assert!(config.strict_positions);
        assert!(config.auto_assign_on_seed);
        assert_eq!(config.default_game_mode, GameMode::Eleven);
        assert_eq!(config.default_formation, None);
    }

    #[test]
    fn game_mode_uses_wire_codes() {
        let config =
            LineupConfig::from_json(r#"{"default_game_mode": "7", "default_formation": "3-2-1"}"#)
                .unwrap();
        assert_eq!(config.default_game_mode, GameMode::Seven);
        assert!(config.validate().is_ok());
        assert_eq!(config.starting_formation(GameMode::Seven).id, "3-2-1");
        assert_eq!(config.starting_formation(GameMode::Eleven).id, "4-4-2");
    }

    #[test]
    fn unknown_default_formation_is_invalid() {
        let config = LineupConfig {
            default_formation: Some("3-2-1".to_string()),
            ..LineupConfig::default()
        };
        assert!(matches!(config.validate(), Err(LineupError::UnknownFormation { .. })));
    }

    #[test]
    fn strict_preset() {
        let config = LineupConfig::strict();
        assert_eq!(config.policy(), AssignmentPolicy::STRICT);
        assert!(!config.auto_assign_on_seed);
    }

    #[test]
    fn loads_from_file() {
        let file = write_config(r#"{"default_formation": "4-3-3", "auto_assign_on_seed": false}"#);
        let config = LineupConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_formation.as_deref(), Some("4-3-3"));
        assert!(!config.auto_assign_on_seed);
    }

    #[test]
    fn file_with_bad_formation_is_rejected() {
        let file = write_config(r#"{"default_formation": "9-9-9"}"#);
        assert!(LineupConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LineupConfig::from_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(LineupError::Config(_))));
    }

    #[test]
    fn blank_path_var_uses_defaults() {
        assert_eq!(LineupConfig::from_path_var(None).unwrap(), LineupConfig::default());
        assert_eq!(LineupConfig::from_path_var(Some("  ")).unwrap(), LineupConfig::default());
    }

    #[test]
    fn path_var_points_at_file() {
        let file = write_config(r#"{"strict_positions": true}"#);
        let path = file.path().to_string_lossy().to_string();
        let config = LineupConfig::from_path_var(Some(&path)).unwrap();
        assert!(config.strict_positions);

        let bad = write_config("not json");
        let bad_path = bad.path().to_string_lossy().to_string();
        assert!(LineupConfig::from_path_var(Some(&bad_path)).is_err());
    }
}
