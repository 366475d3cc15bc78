//! Active palette: numeric fill colors plus letter border colors.
//!
//! A [`Palette`] is built once per configuration load and answers lookups in
//! both directions. Painting needs `color -> key` (which palette entry did the
//! user pick?), rendering needs `key -> color`.

use crate::models::{ColorMap, MatrixConfig};
use std::collections::HashMap;

/// Built-in numeric fill colors, used until a configuration supplies its own.
const DEFAULT_NUMBER_COLORS: &[(&str, &str)] = &[
    ("1", "#e53935"),
    ("2", "#fb8c00"),
    ("3", "#fdd835"),
    ("4", "#43a047"),
    ("5", "#1e88e5"),
    ("6", "#3949ab"),
    ("7", "#8e24aa"),
    ("8", "#6d4c41"),
    ("9", "#212121"),
];

/// Built-in letter (border/background) colors.
const DEFAULT_LETTER_COLORS: &[(&str, &str)] = &[
    ("A", "#ffcdd2"),
    ("B", "#ffe0b2"),
    ("C", "#fff9c4"),
    ("D", "#c8e6c9"),
    ("E", "#bbdefb"),
    ("F", "#d1c4e9"),
    ("G", "#eeeeee"),
];

/// A bidirectional palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    numbers: ColorMap,
    letters: ColorMap,
    /// color -> first numeric key carrying it, in document order
    keys_by_color: HashMap<String, String>,
    /// Distinct numeric colors in document order
    swatches: Vec<String>,
}

impl Palette {
    /// Build a palette from its two sub-palettes.
    pub fn new(numbers: ColorMap, letters: ColorMap) -> Self {
        let mut keys_by_color: HashMap<String, String> = HashMap::new();
        let mut swatches = Vec::new();
        for (key, color) in numbers.iter() {
            if !keys_by_color.contains_key(color) {
                keys_by_color.insert(color.to_string(), key.to_string());
                swatches.push(color.to_string());
            }
        }

        Self { numbers, letters, keys_by_color, swatches }
    }

    /// The palette taken from a loaded configuration.
    pub fn from_config(config: &MatrixConfig) -> Self {
        Self::new(config.num_color_map.clone(), config.border_color_map.clone())
    }

    /// Color for a numeric key (`"1"`, `"2.5"`).
    pub fn number_color(&self, key: &str) -> Option<&str> {
        self.numbers.get(key)
    }

    /// Color for a letter key.
    pub fn letter_color(&self, key: &str) -> Option<&str> {
        self.letters.get(key)
    }

    /// Resolve a selected color back to the numeric key it stands for.
    ///
    /// When several keys share the color the first one listed wins.
    pub fn key_for_color(&self, color: &str) -> Option<&str> {
        self.keys_by_color.get(color).map(String::as_str)
    }

    /// Selectable colors, one per distinct numeric color, in document order.
    pub fn swatches(&self) -> &[String] {
        &self.swatches
    }

    /// Colors that more than one numeric key maps to.
    ///
    /// Selecting one of these is ambiguous: only the first key can ever be
    /// flood-filled through it.
    pub fn ambiguous_colors(&self) -> Vec<(String, Vec<String>)> {
        let mut ambiguous = Vec::new();
        for swatch in &self.swatches {
            let keys: Vec<String> = self
                .numbers
                .iter()
                .filter(|(_, c)| *c == swatch.as_str())
                .map(|(k, _)| k.to_string())
                .collect();
            if keys.len() > 1 {
                ambiguous.push((swatch.clone(), keys));
            }
        }
        ambiguous
    }

    pub fn numbers(&self) -> &ColorMap {
        &self.numbers
    }

    pub fn letters(&self) -> &ColorMap {
        &self.letters
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            DEFAULT_NUMBER_COLORS.iter().copied().collect(),
            DEFAULT_LETTER_COLORS.iter().copied().collect(),
        )
    }
}
