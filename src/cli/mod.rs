//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod history;
mod puzzle;
mod render;
mod show;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_settings, merge_overrides, Settings, SettingsOverrides, MAX_PIXEL_SIZE};
use crate::engine::MatrixEditor;
use crate::puzzle::Difficulty;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

pub use history::HistoryAction;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixel Matrix - color-by-number grids rendered to PNG
#[derive(Parser)]
#[command(name = "pxm")]
#[command(about = "Pixel Matrix - load color-by-number grids, paint them and export PNG")]
#[command(version)]
pub struct Cli {
    /// Settings file (default: pxm.toml found upward from the current directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted history
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Display flags shared by the commands that draw a grid
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Show palette colors instead of the edit view
    #[arg(long)]
    pub preview: bool,

    /// Draw cell values on top of the cells (edit view only)
    #[arg(long)]
    pub labels: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a configuration to PNG
    Render {
        /// Configuration file (JSON with numColorMap, borderColorMap, matrix)
        input: PathBuf,

        /// Output file or directory (default: pixel-matrix.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        /// Cell size in pixels before zoom
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PIXEL_SIZE as i64))]
        pixel_size: Option<u32>,

        /// Zoom scale (clamped to 0.5-3.0)
        #[arg(long, default_value = "1.0")]
        zoom: f32,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Apply paint actions to a configuration and export the result
    Paint {
        /// Configuration file
        input: PathBuf,

        /// Color to paint with: a palette color or a numeric palette key
        #[arg(long)]
        color: String,

        /// Cell to paint as ROW,COL (repeatable, applied in order)
        #[arg(long = "at", value_name = "ROW,COL", required = true, value_parser = parse_coord)]
        at: Vec<(usize, usize)>,

        /// Output file or directory (default: pixel-matrix.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Display a configuration in the terminal
    Show {
        /// Configuration file
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Load a configuration into the persisted history
    Load {
        /// Configuration file
        input: PathBuf,
    },

    /// List, rename or export history entries
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Play the sliding-tile puzzle
    Puzzle {
        /// Board size preset: easy (3x3), medium (4x4) or hard (5x5)
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Parse a `ROW,COL` coordinate.
fn parse_coord(s: &str) -> Result<(usize, usize), String> {
    let (row, col) =
        s.split_once(',').ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let parse = |part: &str| {
        part.trim().parse::<usize>().map_err(|_| format!("invalid coordinate '{}' in '{}'", part, s))
    };
    Ok((parse(row)?, parse(col)?))
}

/// Settings with CLI overrides applied, or an exit code on failure.
pub(crate) fn resolve_settings(
    config: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, ExitCode> {
    match load_settings(config) {
        Ok(mut settings) => {
            merge_overrides(&mut settings, overrides);
            Ok(settings)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Build an editor backed by the persisted history.
pub(crate) fn persistent_editor(settings: &Settings) -> Result<MatrixEditor, ExitCode> {
    let dir = settings.history.dir.clone().unwrap_or_else(FileStore::default_dir);
    log::debug!("history store at {}", dir.display());
    open_editor(Box::new(FileStore::new(dir)), settings)
}

/// Build an editor whose history lives only for this process.
pub(crate) fn scratch_editor(settings: &Settings) -> Result<MatrixEditor, ExitCode> {
    open_editor(Box::new(MemoryStore::new()), settings)
}

fn open_editor(store: Box<dyn KeyValueStore>, settings: &Settings) -> Result<MatrixEditor, ExitCode> {
    MatrixEditor::new(store, settings).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Read and load a configuration file into `editor`.
pub(crate) fn load_input(editor: &mut MatrixEditor, input: &Path) -> Result<(), ExitCode> {
    let text = match std::fs::read_to_string(input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    match editor.load_config(&text) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let store = cli.store.clone();

    match cli.command {
        Commands::Render { input, output, view, pixel_size, zoom, strict } => {
            let overrides = SettingsOverrides {
                pixel_size,
                labels: view.labels.then_some(true),
                store_dir: store,
            };
            render::run_render(&input, output.as_deref(), config, &overrides, view.preview, zoom, strict)
        }
        Commands::Paint { input, color, at, output, view } => {
            let overrides = SettingsOverrides {
                labels: view.labels.then_some(true),
                store_dir: store,
                ..Default::default()
            };
            render::run_paint(&input, &color, &at, output.as_deref(), config, &overrides, view.preview)
        }
        Commands::Show { input, view } => {
            let overrides = SettingsOverrides {
                labels: view.labels.then_some(true),
                store_dir: store,
                ..Default::default()
            };
            show::run_show(&input, config, &overrides, view.preview)
        }
        Commands::Load { input } => {
            let overrides = SettingsOverrides { store_dir: store, ..Default::default() };
            history::run_load(&input, config, &overrides)
        }
        Commands::History { action } => {
            let overrides = SettingsOverrides { store_dir: store, ..Default::default() };
            history::run_history(action, config, &overrides)
        }
        Commands::Puzzle { difficulty, seed } => puzzle::run_puzzle(difficulty, seed),
    }
}
