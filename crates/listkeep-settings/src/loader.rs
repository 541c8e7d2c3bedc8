//! Settings loading with environment variable overrides.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::Result;
use crate::types::Settings;

/// Resolve the path to the settings file (`~/.listkeep/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".listkeep").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error. Fields missing from the file keep their
/// compiled defaults.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let mut settings = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    } else {
        debug!(?path, "settings file not found, using defaults");
        Settings::default()
    };
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

/// Apply environment variable overrides to loaded settings.
///
/// - `LISTKEEP_API_URL`: base URL of the remote API (non-empty string)
/// - `LISTKEEP_TIMEOUT_MS`: per-request timeout, 1..=600000
///
/// Invalid values are silently ignored (fall back to file/default).
fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("LISTKEEP_API_URL") {
        let url = url.trim().trim_end_matches('/').to_string();
        if !url.is_empty() {
            settings.api_url = url;
        }
    }
    if let Some(raw) = lookup("LISTKEEP_TIMEOUT_MS") {
        if let Ok(ms) = raw.trim().parse::<u64>() {
            if (1..=600_000).contains(&ms) {
                settings.timeout_ms = ms;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"api_url": "http://staging.example:9090"}"#).unwrap();
        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.api_url, "http://staging.example:9090");
        assert_eq!(settings.timeout_ms, 30_000);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_settings_from_path(&path).is_err());
    }

    #[test]
    fn env_url_override_wins_over_file() {
        let mut settings = Settings {
            api_url: "http://from-file".to_string(),
            ..Settings::default()
        };
        apply_env_overrides(&mut settings, |name| {
            (name == "LISTKEEP_API_URL").then(|| "http://from-env/".to_string())
        });
        // Trailing slash is stripped so paths can be appended verbatim.
        assert_eq!(settings.api_url, "http://from-env");
    }

    #[test]
    fn env_timeout_out_of_range_ignored() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| {
            (name == "LISTKEEP_TIMEOUT_MS").then(|| "0".to_string())
        });
        assert_eq!(settings.timeout_ms, 30_000);

        apply_env_overrides(&mut settings, |name| {
            (name == "LISTKEEP_TIMEOUT_MS").then(|| "not-a-number".to_string())
        });
        assert_eq!(settings.timeout_ms, 30_000);
    }

    #[test]
    fn env_timeout_in_range_applies() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| {
            (name == "LISTKEEP_TIMEOUT_MS").then(|| "5000".to_string())
        });
        assert_eq!(settings.timeout_ms, 5_000);
    }

    #[test]
    fn blank_env_url_ignored() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |name| {
            (name == "LISTKEEP_API_URL").then(|| "   ".to_string())
        });
        assert_eq!(settings.api_url, "http://localhost:8080");
    }

    #[test]
    fn no_env_leaves_settings_alone() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, no_env);
        assert_eq!(settings, Settings::default());
    }
}
