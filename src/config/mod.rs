//! Configuration: matrix documents and `pxm.toml` settings
//!
//! `document` handles the JSON files that define a matrix and its palette;
//! `schema` and `loader` handle the tool's own settings.

pub mod document;
pub mod loader;
pub mod schema;

pub use document::{load_document, parse_document, sample_config, ConfigError};
pub use loader::{load_settings, merge_overrides, SettingsError, SettingsOverrides};
pub use schema::*;
