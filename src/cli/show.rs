//! Show command implementation (terminal display)

use std::path::Path;
use std::process::ExitCode;

use crate::config::SettingsOverrides;
use crate::terminal::{render_ansi_grid, render_coordinate_grid, render_legend};
use crate::view::ViewMode;

use super::{load_input, resolve_settings, scratch_editor, EXIT_SUCCESS};

/// Execute the show command - display the grid with colored terminal output,
/// or as plain values with coordinates when stdout is not a terminal
pub fn run_show(
    input: &Path,
    config: Option<&Path>,
    overrides: &SettingsOverrides,
    preview: bool,
) -> ExitCode {
    let settings = match resolve_settings(config, overrides) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut editor = match scratch_editor(&settings) {
        Ok(e) => e,
        Err(code) => return code,
    };
    if let Err(code) = load_input(&mut editor, input) {
        return code;
    }
    if preview {
        editor.set_mode(ViewMode::Preview);
    }

    let grid = editor.grid();
    let (rows, cols) = (grid.height(), grid.width());
    let color = atty::is(atty::Stream::Stdout);

    if color {
        let view = editor.view();
        print!("{}", render_ansi_grid(grid, view.mode, view.labels));
    } else {
        print!("{}", render_coordinate_grid(grid));
    }
    print!("{}", render_legend(editor.palette(), color));
    println!("\n{} x {} cells", rows, cols);

    ExitCode::from(EXIT_SUCCESS)
}
