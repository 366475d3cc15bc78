//! Settings schema for `pxm.toml`
//!
//! Defines display constants and history storage options, with defaults for
//! every field so an empty file (or no file) is valid.

use crate::color::parse_color;
use crate::view::DisplayColors;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Rendering constants
    #[serde(default)]
    pub display: DisplaySettings,
    /// History persistence
    #[serde(default)]
    pub history: HistorySettings,
}

/// How the matrix is drawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Side length of a cell at 100% zoom, in pixels
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,
    /// Fallback color for keys missing from the palette
    #[serde(default = "default_active_color")]
    pub active_color: String,
    /// Color of cells holding the number zero
    #[serde(default = "default_inactive_color")]
    pub inactive_color: String,
    /// Color of unpainted numeric cells in edit mode
    #[serde(default = "default_neutral_color")]
    pub neutral_color: String,
    /// Color showing through the gaps between cells
    #[serde(default = "default_gap_color")]
    pub gap_color: String,
    /// Color of value labels
    #[serde(default = "default_label_color")]
    pub label_color: String,
    /// Draw value labels by default
    #[serde(default)]
    pub labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            pixel_size: default_pixel_size(),
            active_color: default_active_color(),
            inactive_color: default_inactive_color(),
            neutral_color: default_neutral_color(),
            gap_color: default_gap_color(),
            label_color: default_label_color(),
            labels: false,
        }
    }
}

impl DisplaySettings {
    /// The colors the resolution rule falls back on.
    pub fn display_colors(&self) -> DisplayColors {
        DisplayColors {
            active: self.active_color.clone(),
            inactive: self.inactive_color.clone(),
            neutral: self.neutral_color.clone(),
        }
    }
}

/// Largest accepted `display.pixel_size`, shared with `--pixel-size`.
pub const MAX_PIXEL_SIZE: u32 = 512;

fn default_pixel_size() -> u32 {
    20
}

fn default_active_color() -> String {
    "#4CAF50".to_string()
}

fn default_inactive_color() -> String {
    "#f5f5f5".to_string()
}

fn default_neutral_color() -> String {
    "#ffffff".to_string()
}

fn default_gap_color() -> String {
    "#d0d0d0".to_string()
}

fn default_label_color() -> String {
    "#333333".to_string()
}

/// Where loaded configurations are remembered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Store directory (defaults to the user data directory)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dir: Option<PathBuf>,
    /// Key the history list is stored under
    #[serde(default = "default_history_key")]
    pub key: String,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { dir: None, key: default_history_key() }
    }
}

fn default_history_key() -> String {
    crate::history::HISTORY_KEY.to_string()
}

/// Settings validation error
#[derive(Debug, Clone)]
pub struct SettingsValidationError {
    /// Path to the invalid field (e.g., "display.pixel_size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxm.toml: '{}' {}", self.field, self.message)
    }
}

impl Settings {
    /// Validate the settings and return every problem found
    pub fn validate(&self) -> Vec<SettingsValidationError> {
        let mut errors = Vec::new();

        if !(1..=MAX_PIXEL_SIZE).contains(&self.display.pixel_size) {
            errors.push(SettingsValidationError {
                field: "display.pixel_size".to_string(),
                message: format!("must be between 1 and {}", MAX_PIXEL_SIZE),
            });
        }

        let colors = [
            ("display.active_color", &self.display.active_color),
            ("display.inactive_color", &self.display.inactive_color),
            ("display.neutral_color", &self.display.neutral_color),
            ("display.gap_color", &self.display.gap_color),
            ("display.label_color", &self.display.label_color),
        ];
        for (field, color) in colors {
            if let Err(e) = parse_color(color) {
                errors.push(SettingsValidationError {
                    field: field.to_string(),
                    message: format!("is not a valid color ({})", e),
                });
            }
        }

        if self.history.key.is_empty() {
            errors.push(SettingsValidationError {
                field: "history.key".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        errors
    }
}
