//! Persisted settings, read once at start-up from the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;

const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "timeline.log";

/// User settings (lives in the OS config directory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Geometry constants for the timeline strip.
    pub layout: LayoutConfig,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    /// How many steps back the demo data reaches.
    pub sample_history_days: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            log_filter: "info".into(),
            sample_history_days: 6,
        }
    }
}

/// Where settings and logs live on this machine.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "RustTimelineApp") {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let log_path = proj_dirs.data_local_dir().join(LOG_FILE);
            Self {
                settings_path: config_dir.join(SETTINGS_FILE),
                config_dir,
                log_path,
            }
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            Self {
                settings_path: dir.join(SETTINGS_FILE),
                log_path: dir.join(LOG_FILE),
                config_dir: dir,
            }
        }
    }
}

impl AppSettings {
    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "ignoring malformed settings file");
                Self::default()
            }
        }
    }

    /// Write the defaults on first run so users have a file to edit.
    pub fn write_default_if_missing(path: &Path) {
        if path.exists() {
            return;
        }
        let Ok(json) = serde_json::to_string_pretty(&Self::default()) else {
            return;
        };
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!(dir = ?dir, error = %e, "could not create settings directory");
                return;
            }
        }
        if let Err(e) = std::fs::write(path, json) {
            tracing::warn!(path = ?path, error = %e, "could not write default settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = std::env::temp_dir().join("timeline_app_settings_partial");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "layout": { "day_cell_width": 4.0 }, "log_filter": "debug" }"#)
            .unwrap();

        let settings = AppSettings::load(&path);
        assert_eq!(settings.layout.day_cell_width, 4.0);
        assert_eq!(settings.layout.month_height, 19.0);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.sample_history_days, 6);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_or_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("timeline_app_settings_bad");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(SETTINGS_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
        assert_eq!(AppSettings::load(&dir.join("missing.json")), AppSettings::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_file_is_written_once() {
        let dir = std::env::temp_dir().join("timeline_app_settings_first_run");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join(SETTINGS_FILE);
        AppSettings::write_default_if_missing(&path);
        assert_eq!(AppSettings::load(&path), AppSettings::default());

        std::fs::write(&path, r#"{ "sample_history_days": 3 }"#).unwrap();
        AppSettings::write_default_if_missing(&path);
        assert_eq!(AppSettings::load(&path).sample_history_days, 3);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unusable_settings_directory_writes_nothing() {
        // A regular file where the settings directory should be.
        let blocker = std::env::temp_dir().join("timeline_app_settings_blocker");
        let _ = std::fs::remove_dir_all(&blocker);
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("nested").join(SETTINGS_FILE);

        AppSettings::write_default_if_missing(&path);
        assert!(!path.exists());
        assert!(blocker.is_file());
        assert_eq!(AppSettings::load(&path), AppSettings::default());
        let _ = std::fs::remove_file(&blocker);
    }
}
