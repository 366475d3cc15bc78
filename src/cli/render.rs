//! Render and paint command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::config::SettingsOverrides;
use crate::engine::{MatrixEditor, PaintOutcome};
use crate::output::{export_path, save_png};
use crate::view::ViewMode;

use super::{load_input, resolve_settings, scratch_editor, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    preview: bool,
    zoom: f32,
    strict: bool,
) -> ExitCode {
    let mut editor = match prepare(input, config, overrides, preview) {
        Ok(e) => e,
        Err(code) => return code,
    };
    editor.set_scale(zoom);

    export(&editor, output, strict)
}

/// Execute the paint command: apply each paint action in order, then export
pub fn run_paint(
    input: &Path,
    color: &str,
    at: &[(usize, usize)],
    output: Option<&Path>,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    preview: bool,
) -> ExitCode {
    let mut editor = match prepare(input, config, overrides, preview) {
        Ok(e) => e,
        Err(code) => return code,
    };

    // A literal palette color wins over a key with the same spelling
    if editor.palette().key_for_color(color).is_some() || !editor.select_key(color) {
        editor.select_color(Some(color));
    }

    for &(row, col) in at {
        match editor.paint(row, col) {
            PaintOutcome::Ignored(reason) => {
                eprintln!("Warning: paint at {},{} ignored: {:?}", row, col, reason)
            }
            PaintOutcome::Recolored => eprintln!("Painted {},{}", row, col),
            PaintOutcome::Filled { cells } => {
                eprintln!("Filled {} cell(s) from {},{}", cells, row, col)
            }
        }
    }

    export(&editor, output, false)
}

fn prepare(
    input: &Path,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    preview: bool,
) -> Result<MatrixEditor, ExitCode> {
    let settings = resolve_settings(config, overrides)?;
    let mut editor = scratch_editor(&settings)?;
    load_input(&mut editor, input)?;
    if preview {
        editor.set_mode(ViewMode::Preview);
    }
    Ok(editor)
}

fn export(editor: &MatrixEditor, output: Option<&Path>, strict: bool) -> ExitCode {
    let (image, warnings) = editor.render();
    for warning in &warnings {
        eprintln!("Warning: {}", warning.message);
    }
    if strict && !warnings.is_empty() {
        eprintln!("Error: {} warning(s) in strict mode", warnings.len());
        return ExitCode::from(EXIT_ERROR);
    }

    let path = export_path(output);
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
