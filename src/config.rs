//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteGanttError};
use crate::gantt::{ViewMode, Zoom};

/// Overrides the stored role, e.g. `SITEGANTT_ROLE=foreman`.
pub const ROLE_ENV_VAR: &str = "SITEGANTT_ROLE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Role name as handed over by the session. Kept as a string so an
    /// unknown value stays unknown and fails closed.
    pub role: String,
    pub zoom: f32,
    pub view_mode: ViewMode,
    pub last_project: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            role: "project_manager".into(),
            zoom: 1.0,
            view_mode: ViewMode::Week,
            last_project: None,
        }
    }
}

impl AppSettings {
    pub fn zoom(&self) -> Zoom {
        Zoom::new(self.zoom)
    }

    /// Path of `settings.json` in the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("", "", "SiteGantt")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or(SiteGanttError::ConfigDir)
    }

    /// Read settings from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| SiteGanttError::json(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SiteGanttError::io(path, e)),
        }
    }

    /// Load from the default location, falling back to defaults on any
    /// error, then apply the environment override.
    pub fn load() -> Self {
        let mut settings = Self::default_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "could not load settings, using defaults");
                Self::default()
            });
        settings.apply_env_override(std::env::var(ROLE_ENV_VAR).ok());
        settings
    }

    pub fn apply_env_override(&mut self, role: Option<String>) {
        if let Some(role) = role.filter(|r| !r.trim().is_empty()) {
            tracing::debug!(%role, "role taken from {}", ROLE_ENV_VAR);
            self.role = role;
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SiteGanttError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| SiteGanttError::io(path, e))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "role": "foreman", "view_mode": "day" }"#).unwrap();

        let settings = AppSettings::load_from(&path).unwrap();
        assert_eq!(settings.role, "foreman");
        assert_eq!(settings.view_mode, ViewMode::Day);
        assert_eq!(settings.zoom, 1.0);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            role: "client".into(),
            zoom: 2.0,
            view_mode: ViewMode::Day,
            last_project: Some(PathBuf::from("/tmp/site.gantt.json")),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_stored_zoom_is_clamped() {
        let settings = AppSettings {
            zoom: 40.0,
            ..Default::default()
        };
        assert_eq!(settings.zoom().factor(), crate::gantt::timeline::MAX_ZOOM);
    }

    #[test]
    fn test_env_override() {
        let mut settings = AppSettings::default();
        settings.apply_env_override(Some("   ".into()));
        assert_eq!(settings.role, "project_manager");
        settings.apply_env_override(Some("worker".into()));
        assert_eq!(settings.role, "worker");
    }
}
