//! Pixel Matrix - library for color-by-number pixel grids
//!
//! This library provides functionality to:
//! - Load matrix configurations (a value grid plus number and letter palettes)
//! - Recolor cells by single-cell paint or 4-connected flood fill
//! - Switch between the edit view and the palette preview
//! - Render the grid to PNG, ANSI terminal output or raw RGBA for the browser
//! - Keep a persisted history of loaded configurations
//! - Play a sliding-tile puzzle

pub mod cli;
pub mod color;
pub mod config;
pub mod engine;
pub mod glyphs;
pub mod grid;
pub mod history;
pub mod models;
pub mod output;
pub mod palette;
pub mod puzzle;
pub mod renderer;
pub mod store;
pub mod terminal;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;
