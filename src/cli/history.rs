//! Load and history command implementations

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Subcommand;

use crate::config::SettingsOverrides;
use crate::output::{export_path, save_png};

use super::{load_input, persistent_editor, resolve_settings, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// List saved configurations, oldest first
    List,

    /// Give a saved configuration a new name
    Rename {
        /// Entry id as shown by `history list`
        id: String,
        /// New display name
        name: String,
    },

    /// Render a saved configuration to PNG
    Export {
        /// Entry id as shown by `history list`
        id: String,

        /// Output file or directory (default: pixel-matrix.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute the load command: validate the file and append it to the history
pub fn run_load(input: &Path, config: Option<&Path>, overrides: &SettingsOverrides) -> ExitCode {
    let settings = match resolve_settings(config, overrides) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut editor = match persistent_editor(&settings) {
        Ok(e) => e,
        Err(code) => return code,
    };
    if let Err(code) = load_input(&mut editor, input) {
        return code;
    }

    if let Some(entry) = editor.active_entry().and_then(|id| editor.history().get(id)) {
        let (rows, cols) = entry.config.dimensions();
        println!("Loaded '{}' as {} ({} x {})", input.display(), entry.id, rows, cols);
        println!("Name: {}", entry.name);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute a history subcommand
pub fn run_history(
    action: HistoryAction,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
) -> ExitCode {
    let settings = match resolve_settings(config, overrides) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut editor = match persistent_editor(&settings) {
        Ok(e) => e,
        Err(code) => return code,
    };

    match action {
        HistoryAction::List => {
            let history = editor.history();
            if history.is_empty() {
                println!("No saved configurations.");
            }
            for entry in history.entries() {
                let (rows, cols) = entry.config.dimensions();
                println!("{:<16} {:<24} {} x {}", entry.id, entry.name, rows, cols);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        HistoryAction::Rename { id, name } => match editor.rename_history(&id, &name) {
            Ok(()) => {
                println!("Renamed {} to '{}'", id, name);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        },
        HistoryAction::Export { id, output } => {
            if let Err(e) = editor.select_history(&id) {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }

            let (image, warnings) = editor.render();
            for warning in &warnings {
                eprintln!("Warning: {}", warning.message);
            }
            let path = export_path(output.as_deref());
            match save_png(&image, &path) {
                Ok(()) => {
                    println!("Saved: {}", path.display());
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: Failed to save '{}': {}", path.display(), e);
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}
