//! Matrix configuration documents (the JSON files users load).
//!
//! A document is accepted only as a whole: it must parse, carry all three
//! fields, have the right shapes, and describe a rectangular matrix. Callers
//! receive either a complete [`MatrixConfig`] or a [`ConfigError`], never a
//! partial result.

use crate::grid::{check_rectangular, GridError};
use crate::models::{CellValue, MatrixConfig};
use crate::palette::Palette;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// The three fields every document must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["numColorMap", "borderColorMap", "matrix"];

/// Error loading a matrix configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Not valid JSON
    #[error("failed to parse configuration: {0}")]
    Json(#[source] serde_json::Error),
    /// One or more required fields are absent or null
    #[error("configuration must contain numColorMap, borderColorMap and matrix fields")]
    MissingFields(Vec<&'static str>),
    /// Fields present but of the wrong shape
    #[error("malformed configuration: {0}")]
    Malformed(String),
    /// Matrix rows of unequal length
    #[error("malformed configuration: {0}")]
    Grid(#[from] GridError),
}

/// Parse and validate a configuration document.
pub fn parse_document(text: &str) -> Result<MatrixConfig, ConfigError> {
    let value: Value = serde_json::from_str(text).map_err(ConfigError::Json)?;

    let Value::Object(fields) = &value else {
        return Err(ConfigError::Malformed("top level must be a JSON object".to_string()));
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| fields.get(*name).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingFields(missing));
    }

    let config: MatrixConfig =
        serde_json::from_value(value).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    check_rectangular(&config.matrix)?;

    Ok(config)
}

/// Read and validate a configuration document from disk.
pub fn load_document(path: &Path) -> Result<MatrixConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_document(&text)
}

/// The configuration shown before anything is loaded: a heart in a frame,
/// colored with the built-in palette.
pub fn sample_config() -> MatrixConfig {
    const ROWS: [&str; 8] = [
        "AAAAAAAAA",
        "A0110110A",
        "A1211111A",
        "A1111111A",
        "A0111110A",
        "A0011100A",
        "A0001000A",
        "AAAAAAAAA",
    ];

    let matrix = ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => CellValue::int(d as i64),
                    None => CellValue::text(c.to_string()),
                })
                .collect()
        })
        .collect();

    let palette = Palette::default();
    MatrixConfig {
        num_color_map: palette.numbers().clone(),
        border_color_map: palette.letters().clone(),
        matrix,
    }
}
