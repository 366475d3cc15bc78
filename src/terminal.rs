//! Terminal rendering utilities for colored grid display
//!
//! Provides ANSI escape sequence generation for displaying the matrix with
//! true-color backgrounds in terminal emulators that support 24-bit color,
//! plus a plain coordinate view for pipes and dumb terminals.

use crate::color::{contrasting_text, parse_color, to_hex};
use crate::grid::Grid;
use crate::palette::Palette;
use crate::view::{show_label, ViewMode};
use image::Rgba;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Shown for cells whose color does not parse
const UNPARSEABLE: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background
/// to visually distinguish them from opaque colors.
///
/// # Examples
///
/// ```
/// use pixel_matrix::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// let red = color_to_ansi_bg(Rgba([255, 0, 0, 255]));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
///
/// let transparent = color_to_ansi_bg(Rgba([0, 0, 0, 0]));
/// assert_eq!(transparent, "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[48;5;236m".to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Convert RGBA color to ANSI 24-bit foreground escape sequence.
pub fn color_to_ansi_fg(rgba: Rgba<u8>) -> String {
    format!("\x1b[38;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
}

/// Render the grid with ANSI color backgrounds.
///
/// Each cell is a 3-character block. When labels are shown (edit mode,
/// non-zero value) the value's first character sits in the middle in a color
/// that contrasts with the cell.
pub fn render_ansi_grid(grid: &Grid, mode: ViewMode, labels: bool) -> String {
    let mut output = String::new();

    for row in grid.rows() {
        for cell in row {
            let bg = parse_color(&cell.color).unwrap_or(UNPARSEABLE);
            let mark = if show_label(&cell.value, mode, labels) {
                cell.value.label().chars().next().unwrap_or(' ')
            } else {
                ' '
            };

            output.push_str(&color_to_ansi_bg(bg));
            output.push_str(&color_to_ansi_fg(contrasting_text(bg)));
            output.push(' ');
            output.push(mark);
            output.push(' ');
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }

    output
}

/// Render the palette as a legend: one swatch line per key, numbers first.
pub fn render_legend(palette: &Palette, color: bool) -> String {
    let mut legend = String::from("\nLegend:\n");

    let entries = palette
        .numbers()
        .iter()
        .map(|(k, c)| (k, c, ""))
        .chain(palette.letters().iter().map(|(k, c)| (k, c, " (border)")));

    for (key, css, suffix) in entries {
        let parsed = parse_color(css);
        // Spell out named and functional colors as hex
        let shown = match parsed {
            Ok(rgba) if !css.trim_start().starts_with('#') => format!("{} ({})", css, to_hex(rgba)),
            _ => css.to_string(),
        };
        if color {
            legend.push_str(&format!(
                "  {}   {} {} = {}{}\n",
                color_to_ansi_bg(parsed.unwrap_or(UNPARSEABLE)),
                ANSI_RESET,
                key,
                shown,
                suffix
            ));
        } else {
            legend.push_str(&format!("  {} = {}{}\n", key, shown, suffix));
        }
    }

    legend
}

/// Render the grid's values with row/column coordinate headers.
///
/// ```text
///      0  1  2
///    ┌─────────
///  0 │  1  1  2
///  1 │  1  0  2
/// ```
pub fn render_coordinate_grid(grid: &Grid) -> String {
    if grid.is_empty() {
        return String::new();
    }

    let cell_width = grid
        .rows()
        .flat_map(|row| row.iter())
        .map(|cell| cell.value.label().chars().count())
        .max()
        .unwrap_or(1)
        .max(2);
    let row_num_width = grid.height().saturating_sub(1).to_string().len().max(2);

    let mut output = String::new();

    output.push_str(&" ".repeat(row_num_width + 1));
    for col in 0..grid.width() {
        output.push_str(&format!(" {:>width$}", col, width = cell_width));
    }
    output.push('\n');

    output.push_str(&" ".repeat(row_num_width));
    output.push_str(" \u{250C}");
    output.push_str(&"\u{2500}".repeat(grid.width() * (cell_width + 1)));
    output.push('\n');

    for (row_idx, row) in grid.rows().enumerate() {
        output.push_str(&format!("{:>width$} \u{2502}", row_idx, width = row_num_width));
        for cell in row {
            output.push_str(&format!(" {:>width$}", cell.value.label(), width = cell_width));
        }
        output.push('\n');
    }

    output
}
