// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! Persisted values are clamped on access rather than on load, so a config
//! edited by hand cannot push the grid or the story timer outside their
//! supported ranges.

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedGallery";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub library_path: Option<PathBuf>,
    /// Grid columns shown on startup (2-4).
    #[serde(default)]
    pub columns: Option<u8>,
    /// Story tick interval in milliseconds (one tick = one percent).
    #[serde(default)]
    pub story_tick_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            library_path: None,
            columns: Some(DEFAULT_COLUMNS),
            story_tick_ms: Some(DEFAULT_STORY_TICK_MS),
        }
    }
}

impl Config {
    /// Returns the configured column count clamped to the supported range.
    #[must_use]
    pub fn columns_clamped(&self) -> u8 {
        self.columns
            .unwrap_or(DEFAULT_COLUMNS)
            .clamp(MIN_COLUMNS, MAX_COLUMNS)
    }

    /// Returns the configured story tick interval clamped to the supported range.
    #[must_use]
    pub fn story_tick_ms_clamped(&self) -> u64 {
        self.story_tick_ms
            .unwrap_or(DEFAULT_STORY_TICK_MS)
            .clamp(MIN_STORY_TICK_MS, MAX_STORY_TICK_MS)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("fr".to_string()),
            library_path: Some(PathBuf::from("/photos")),
            columns: Some(3),
            story_tick_ms: Some(40),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.library_path, config.library_path);
        assert_eq!(loaded.columns, config.columns);
        assert_eq!(loaded.story_tick_ms, config.story_tick_ms);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not [valid toml").expect("failed to write file");

        let loaded = load_from_path(&config_path).expect("load should not fail");
        assert_eq!(loaded.columns, Config::default().columns);
    }

    #[test]
    fn columns_clamped_rejects_out_of_range_values() {
        let config = Config {
            columns: Some(9),
            ..Config::default()
        };
        assert_eq!(config.columns_clamped(), MAX_COLUMNS);

        let config = Config {
            columns: Some(1),
            ..Config::default()
        };
        assert_eq!(config.columns_clamped(), MIN_COLUMNS);
    }

    #[test]
    fn story_tick_clamped_rejects_out_of_range_values() {
        let config = Config {
            story_tick_ms: Some(0),
            ..Config::default()
        };
        assert_eq!(config.story_tick_ms_clamped(), MIN_STORY_TICK_MS);

        let config = Config {
            story_tick_ms: Some(10_000),
            ..Config::default()
        };
        assert_eq!(config.story_tick_ms_clamped(), MAX_STORY_TICK_MS);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = Config {
            columns: None,
            story_tick_ms: None,
            ..Config::default()
        };
        assert_eq!(config.columns_clamped(), DEFAULT_COLUMNS);
        assert_eq!(config.story_tick_ms_clamped(), DEFAULT_STORY_TICK_MS);
    }
}
