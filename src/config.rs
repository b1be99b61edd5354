use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::i18n::Lang;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub save: SaveConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    // "auto" follows $LANG, otherwise "en", "zh"/"zh-Hans" or "zh-Hant"
    pub language: String,
    // List every touched key under the summary
    pub show_details: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SaveConfig {
    // Ask before overwriting the input file
    pub confirm: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            show_details: true,
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self { confirm: true }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::load_or_create(&Self::get_config_path())
    }

    /// Reads `path`, or writes the defaults there on first run. A config dir
    /// that cannot be written (read-only home, sandbox) is not fatal: the
    /// defaults are used for this run.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            warn!(path = %path.display(), error = %e, "cannot write default config, using defaults");
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".songfill")
            .join("config.toml")
    }

    /// `display.language` of "auto" defers to `$LANG`.
    pub fn get_effective_language(&self) -> Lang {
        if self.display.language == "auto" {
            let locale = std::env::var("LANG").unwrap_or_default();
            Lang::from_locale(&locale)
        } else {
            Lang::from_locale(&self.display.language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nlanguage = \"zh\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.display.language, "zh");
        assert!(config.display.show_details);
        assert!(config.save.confirm);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.save.confirm = false;
        config.display.show_details = false;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.save.confirm);
        assert!(!loaded.display.show_details);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn explicit_language_wins_over_env() {
        let mut config = Config::default();
        config.display.language = "en".to_string();
        assert_eq!(config.get_effective_language(), Lang::En);
        config.display.language = "zh-Hant".to_string();
        assert_eq!(config.get_effective_language(), Lang::ZhHant);
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".songfill").join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert!(config.save.confirm);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_config_dir_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the config directory should be
        let blocker = dir.path().join(".songfill");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.display.language, "auto");
        assert!(config.display.show_details);
        assert!(!path.exists());
    }
}
