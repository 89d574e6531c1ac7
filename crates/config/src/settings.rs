// Application settings
// Loaded from ~/.config/grantime/settings.json (or $GRANTIME_SETTINGS)

use grantime_core::MatcherMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that points at an alternate settings file.
pub const SETTINGS_ENV: &str = "GRANTIME_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Matcher
    #[serde(rename = "matcher.mode")]
    pub matcher_mode: MatcherMode,

    #[serde(rename = "matcher.seed")]
    pub matcher_seed: Option<u64>,  // None = fresh entropy per run

    // Chat
    #[serde(rename = "chat.minDelayMs")]
    pub min_delay_ms: u64,

    #[serde(rename = "chat.maxDelayMs")]
    pub max_delay_ms: u64,

    // Grants
    #[serde(rename = "grants.file")]
    pub grants_file: Option<PathBuf>,  // None = built-in agreements
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matcher_mode: MatcherMode::Scripted,
            matcher_seed: None,
            min_delay_ms: 10_000,
            max_delay_ms: 12_000,
            grants_file: None,
        }
    }
}

const DEFAULT_FILE: &str = r#"{
    // Matcher: "scripted" answers only the demo scenarios,
    // "keyword" applies the grant keyword rules
    "matcher.mode": "scripted",
    "matcher.seed": null,

    // Simulated response latency (milliseconds)
    "chat.minDelayMs": 10000,
    "chat.maxDelayMs": 12000,

    // TOML file with [[grants]] tables; null = built-in agreements
    "grants.file": null
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grantime")
            .join("settings.json")
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Save current settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Write the commented default file to `path`. Refuses to overwrite.
    pub fn write_default_file(path: &Path) -> Result<(), String> {
        if path.exists() {
            return Err(format!("{} already exists", path.display()));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }

    /// Simulated latency bounds, low to high.
    pub fn delay_range(&self) -> (Duration, Duration) {
        let lo = self.min_delay_ms.min(self.max_delay_ms);
        let hi = self.min_delay_ms.max(self.max_delay_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_FILE).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let s = Settings::parse(r#"{ "matcher.mode": "keyword", "matcher.seed": 9 }"#).unwrap();
        assert_eq!(s.matcher_mode, MatcherMode::Keyword);
        assert_eq!(s.matcher_seed, Some(9));
        assert_eq!(s.min_delay_ms, 10_000);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("absent.json")), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let s = Settings {
            matcher_mode: MatcherMode::Keyword,
            grants_file: Some(PathBuf::from("/tmp/grants.toml")),
            ..Settings::default()
        };
        s.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), s);
    }

    #[test]
    fn default_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::write_default_file(&path).unwrap();
        assert!(Settings::write_default_file(&path).is_err());
    }

    #[test]
    fn delay_range_is_ordered() {
        let s = Settings { min_delay_ms: 500, max_delay_ms: 100, ..Settings::default() };
        assert_eq!(s.delay_range(), (Duration::from_millis(100), Duration::from_millis(500)));
    }
}
