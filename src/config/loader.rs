//! Settings loading and discovery for `pxm.toml`
//!
//! Provides functions to find, load, and merge settings.

use super::schema::Settings;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const SETTINGS_FILE: &str = "pxm.toml";

/// Settings loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// File I/O error
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pxm.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Settings validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override settings values
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    /// Override cell pixel size
    pub pixel_size: Option<u32>,
    /// Override label visibility
    pub labels: Option<bool>,
    /// Override history store directory
    pub store_dir: Option<PathBuf>,
}

/// Find pxm.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pxm.toml
/// 2. Check XDG_CONFIG_HOME/pixel-matrix/pxm.toml (or ~/.config/pixel-matrix/pxm.toml)
pub fn find_settings() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_settings_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_settings()
}

/// Find pxm.toml in the XDG config directory.
pub fn find_xdg_settings() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let path = xdg_config.join("pixel-matrix").join(SETTINGS_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find pxm.toml by walking up from a specific directory.
pub fn find_settings_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let path = current.join(SETTINGS_FILE);
        if path.exists() {
            return Some(path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load settings.
///
/// If a path is provided, loads from that file. Otherwise uses
/// [`find_settings`]; when nothing is found the defaults are returned.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let settings_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_settings(),
    };

    match settings_path {
        Some(p) => {
            log::debug!("loading settings from {}", p.display());
            load_settings_file(&p)
        }
        None => Ok(Settings::default()),
    }
}

fn load_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;

    let errors = settings.validate();
    if !errors.is_empty() {
        return Err(SettingsError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(settings)
}

/// Merge CLI overrides into settings. CLI arguments take precedence.
pub fn merge_overrides(settings: &mut Settings, overrides: &SettingsOverrides) {
    if let Some(pixel_size) = overrides.pixel_size {
        settings.display.pixel_size = pixel_size;
    }

    if let Some(labels) = overrides.labels {
        settings.display.labels = labels;
    }

    if let Some(ref dir) = overrides.store_dir {
        settings.history.dir = Some(dir.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_settings_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join(SETTINGS_FILE);
        File::create(&path)
            .expect("should create settings file")
            .write_all(b"[display]\npixel_size = 4")
            .expect("should write settings content");

        let subdir = temp.path().join("art").join("hearts");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        assert_eq!(find_settings_from(subdir), Some(path));
    }

    #[test]
    fn test_find_settings_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_settings_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_settings_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            r##"
[display]
pixel_size = 12
inactive_color = "#000000"

[history]
dir = "history"
key = "myHistory"
"##,
        )
        .expect("should write settings");

        let settings = load_settings(Some(&path)).expect("should load settings");
        assert_eq!(settings.display.pixel_size, 12);
        assert_eq!(settings.display.inactive_color, "#000000");
        assert_eq!(settings.history.dir, Some(PathBuf::from("history")));
        assert_eq!(settings.history.key, "myHistory");
    }

    #[test]
    fn test_load_settings_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "[display]\npixel_size = 0\n").expect("should write settings");

        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("display.pixel_size"));
    }

    #[test]
    fn test_load_settings_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join(SETTINGS_FILE);
        fs::write(&path, "[display\n").expect("should write settings");
        assert!(matches!(load_settings(Some(&path)), Err(SettingsError::Parse(_))));
    }

    #[test]
    #[serial]
    fn test_xdg_settings_fallback() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("pixel-matrix");
        fs::create_dir_all(&dir).expect("should create config dir");
        fs::write(dir.join(SETTINGS_FILE), "").expect("should write settings");

        let original = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_settings();
        match original {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(dir.join(SETTINGS_FILE)));
    }

    #[test]
    fn test_merge_overrides() {
        let mut settings = Settings::default();
        merge_overrides(
            &mut settings,
            &SettingsOverrides {
                pixel_size: Some(5),
                labels: Some(true),
                store_dir: Some(PathBuf::from("/tmp/store")),
            },
        );
        assert_eq!(settings.display.pixel_size, 5);
        assert!(settings.display.labels);
        assert_eq!(settings.history.dir, Some(PathBuf::from("/tmp/store")));

        let mut untouched = Settings::default();
        merge_overrides(&mut untouched, &SettingsOverrides::default());
        assert_eq!(untouched.display.pixel_size, 20);
    }
}
