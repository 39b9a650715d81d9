//! Configuration loader plus strongly typed settings structures.
//!
//! The default `config.toml` is embedded at compile time and extracted into
//! the data directory on first run. Every section and field is optional;
//! anything missing falls back to its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MINI_APPS_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pomodoro: PomodoroConfig,
    pub store: StoreConfig,
    pub ui: UiConfig,
    pub sound: SoundConfig,
    pub music: MusicConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub work_minutes: u64,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self { work_minutes: 25 }
    }
}

/// Longest accepted Pomodoro (one day)
pub const MAX_WORK_MINUTES: u64 = 24 * 60;

impl PomodoroConfig {
    /// Pomodoro length in milliseconds, between one minute and one day
    pub fn duration_ms(&self) -> u64 {
        self.work_minutes.clamp(1, MAX_WORK_MINUTES) * 60_000
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key namespace; empty keeps the bare keys
    pub namespace: String,
    /// Persist timer values as well as the game, todos and scratchpad
    pub persist_timers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frame interval in milliseconds
    pub frame_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { frame_ms: 16 } // ~60 FPS
    }
}

impl UiConfig {
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_ms.clamp(1, 1000))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub volume: f32,
    pub expiry_sound: Option<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.7,
            expiry_sound: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub volume: u8,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self { volume: 50 }
    }
}

impl Config {
    /// Load `config.toml` from the data directory, extracting the default first
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Write the embedded default config if none exists yet (idempotent)
    fn extract_defaults() -> Result<()> {
        let base = Self::base_dir()?;
        fs::create_dir_all(&base)
            .context(format!("Failed to create data directory: {:?}", base))?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write default config")?;
            tracing::info!("Created default config at {:?}", config_path);
        }
        Ok(())
    }

    /// Data directory (~/.mini-apps), overridable with MINI_APPS_DIR
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".mini-apps"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Key-value store file
    pub fn store_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("store.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("mini-apps.log"))
    }

    /// Resolve the configured expiry sound against the data directory
    pub fn expiry_sound_path(&self) -> Result<Option<PathBuf>> {
        let Some(sound) = self.sound.expiry_sound.as_deref() else {
            return Ok(None);
        };
        let path = PathBuf::from(sound);
        if path.is_absolute() {
            Ok(Some(path))
        } else {
            Ok(Some(Self::base_dir()?.join(path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_defaults() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_toml(
            r#"
            [pomodoro]
            work_minutes = 50

            [store]
            persist_timers = true
            "#,
        )
        .unwrap();

        assert_eq!(config.pomodoro.duration_ms(), 3_000_000);
        assert!(config.store.persist_timers);
        assert_eq!(config.store.namespace, "");
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.music.volume, 50);
    }

    #[test]
    fn test_empty_file_is_valid() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_zero_minute_pomodoro_is_clamped() {
        let config = Config::from_toml("[pomodoro]\nwork_minutes = 0\n").unwrap();
        assert_eq!(config.pomodoro.duration_ms(), 60_000);
    }

    #[test]
    fn test_huge_pomodoro_is_capped() {
        let config = Config::from_toml("[pomodoro]\nwork_minutes = 9000000000000000000\n").unwrap();
        assert_eq!(config.pomodoro.duration_ms(), MAX_WORK_MINUTES * 60_000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("[pomodoro\nwork_minutes = ").is_err());
        assert!(Config::from_toml("[pomodoro]\nwork_minutes = \"long\"\n").is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nframe_ms = 33\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.ui.frame_ms, 33);
        assert!(Config::load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
