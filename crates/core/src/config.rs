//! Application configuration loaded from disk and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{background::DEFAULT_PARTICLES, game::DEFAULT_REVEAL_DELAY, models::ThemeKind};

/// Directory under the user's config dir holding `config.json`.
pub const CONFIG_DIR: &str = "memomatch";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "MEMOMATCH";

/// Values rejected by [`AppConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Cards would flip back instantly.
    #[error("reveal_delay_ms must be greater than zero")]
    ZeroRevealDelay,
    /// The UI loop would spin.
    #[error("tick_rate_ms must be greater than zero")]
    ZeroTickRate,
    /// The background would be empty.
    #[error("particle_count must be greater than zero")]
    NoParticles,
}

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Colour scheme at startup.
    pub theme: ThemeKind,
    /// Ring the terminal bell on cues.
    pub sound: bool,
    /// Fixed shuffle seed; random when absent.
    pub seed: Option<u64>,
    /// How long two flipped cards stay visible, in milliseconds.
    pub reveal_delay_ms: u64,
    /// UI tick and animation frame interval, in milliseconds.
    pub tick_rate_ms: u64,
    /// Size of the background particle field.
    pub particle_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            sound: true,
            seed: None,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY.as_millis() as u64,
            tick_rate_ms: 50,
            particle_count: DEFAULT_PARTICLES,
        }
    }
}

impl AppConfig {
    /// Load from the default location, layered with `MEMOMATCH_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional on disk), layered with `MEMOMATCH_*` variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment.try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_delay_ms == 0 {
            return Err(ConfigError::ZeroRevealDelay);
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Default location of the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default config to the default location if no file exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write the default config to `path` if no file exists yet.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default config")?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_round_trips_through_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);

        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded, AppConfig::default());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "theme": "light", "seed": 42, "sound": false }"#)?;

        ensure_default_config_at(&path)?;
        let loaded = AppConfig::load_from(&path)?;
        assert_eq!(loaded.theme, ThemeKind::Light);
        assert_eq!(loaded.seed, Some(42));
        assert!(!loaded.sound);
        assert_eq!(loaded.reveal_delay(), DEFAULT_REVEAL_DELAY);
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let loaded = AppConfig::load_from(dir.path().join(CONFIG_FILE))?;
        assert_eq!(loaded.particle_count, DEFAULT_PARTICLES);
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "reveal_delay_ms": 800, "theme": "light" }"#)?;

        let vars = ::config::Map::from([
            ("MEMOMATCH_REVEAL_DELAY_MS".to_string(), "250".to_string()),
            ("MEMOMATCH_SOUND".to_string(), "false".to_string()),
            ("OTHER_TICK_RATE_MS".to_string(), "5".to_string()),
        ]);
        let environment = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let loaded = AppConfig::load_layered(&path, environment)?;
        assert_eq!(loaded.reveal_delay(), Duration::from_millis(250));
        assert!(!loaded.sound);
        assert_eq!(loaded.theme, ThemeKind::Light);
        assert_eq!(loaded.tick_rate_ms, AppConfig::default().tick_rate_ms);
        Ok(())
    }

    #[test]
    fn zero_values_are_rejected() {
        let config = AppConfig {
            tick_rate_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));

        let config = AppConfig {
            reveal_delay_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate().map_err(|err| err.to_string()),
            Err("reveal_delay_ms must be greater than zero".to_string())
        );
    }

    #[test]
    fn invalid_file_reports_validation_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "particle_count": 0 }"#)?;

        let err = AppConfig::load_from(&path).expect_err("zero particles must fail");
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NoParticles)
        );
        Ok(())
    }
}
