//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_SERVER_URL, SERVER_URL_ENV};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Server
    pub server_url: String,
    /// Set from the environment for this run only, never written back
    #[serde(skip)]
    pub server_url_override: Option<String>,

    // Optional result regions
    pub show_chart: bool,
    pub show_success_banner: bool,

    // Login form
    pub last_email: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            server_url_override: None,
            show_chart: true,
            show_success_banner: true,
            last_email: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Apply the server URL override from the environment, if set
    pub fn apply_env_override(&mut self) {
        self.apply_server_override(std::env::var(SERVER_URL_ENV).ok());
    }

    fn apply_server_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            info!(server_url = %url, "Server URL overridden from environment");
            self.server_url_override = Some(url);
        }
    }

    /// URL this run talks to: the override when present, else the saved one
    pub fn effective_server_url(&self) -> &str {
        self.server_url_override.as_deref().unwrap_or(&self.server_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn saved_settings_are_reloaded_and_partial_files_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            server_url: "http://reviews.internal:9000".into(),
            show_chart: false,
            last_email: Some("ana@example.com".into()),
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);

        std::fs::write(dir.path().join("settings.json"), r#"{"show_success_banner": false}"#)
            .unwrap();
        let partial = Settings::load(dir.path());
        assert!(!partial.show_success_banner);
        assert!(partial.show_chart);
        assert_eq!(partial.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let mut settings = Settings::default();
        settings.apply_server_override(Some("   ".into()));
        assert_eq!(settings.effective_server_url(), DEFAULT_SERVER_URL);
        settings.apply_server_override(Some(" http://10.0.0.2:8000 ".into()));
        assert_eq!(settings.effective_server_url(), "http://10.0.0.2:8000");
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn env_override_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings {
            server_url: "http://reviews.internal:9000".into(),
            ..Settings::default()
        };
        settings.apply_server_override(Some("http://10.0.0.2:8000".into()));
        settings.save(dir.path());

        let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(!raw.contains("10.0.0.2"));

        let reloaded = Settings::load(dir.path());
        assert_eq!(reloaded.server_url_override, None);
        assert_eq!(reloaded.effective_server_url(), "http://reviews.internal:9000");
    }
}
