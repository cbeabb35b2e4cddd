use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::TimeGridSettings;

const SETTINGS_FILE: &str = "timegrid.toml";

/// Loads and stores [`TimeGridSettings`] as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the per-user config file, falling back to the working directory.
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("org", "calendar-timegrid", "calendar-timegrid") {
            proj_dirs.config_dir().join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the stored settings
    pub fn get(&self) -> Result<TimeGridSettings> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: TimeGridSettings = toml::from_str(&text)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    /// Stored settings, or defaults if the file is missing or unusable.
    pub fn load_or_default(&self) -> TimeGridSettings {
        if !self.path.exists() {
            log::info!("No settings at {}; using defaults", self.path.display());
            return TimeGridSettings::default();
        }
        match self.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                TimeGridSettings::default()
            }
        }
    }

    /// Update settings
    pub fn update(&self, settings: &TimeGridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&TimeGridSettings::default())
    }
}
