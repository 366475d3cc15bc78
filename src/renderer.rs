//! Grid rendering to image buffers

use crate::color::{parse_color, parse_color_lenient, MAGENTA};
use crate::glyphs;
use crate::grid::Grid;
use crate::view::{show_label, ViewMode};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

/// A warning generated during rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Transparent color used for empty grids
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Layout and overlay parameters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Pixels between adjacent cells
    pub gap: u32,
    pub mode: ViewMode,
    /// Overlay cell values (edit mode only)
    pub labels: bool,
    pub gap_color: String,
    pub label_color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 20,
            gap: 1,
            mode: ViewMode::Edit,
            labels: false,
            gap_color: "#d0d0d0".to_string(),
            label_color: "#333333".to_string(),
        }
    }
}

impl RenderOptions {
    /// Top-left pixel of cell `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        let pitch = self.cell_size.saturating_add(self.gap);
        (col as u32 * pitch, row as u32 * pitch)
    }

    /// Image size for a `rows` x `cols` grid. Gaps sit only between cells.
    ///
    /// Returns `None` when either side does not fit in a `u32`.
    pub fn image_size(&self, rows: usize, cols: usize) -> Option<(u32, u32)> {
        let span = |n: usize| -> Option<u32> {
            let n = u32::try_from(n).ok()?;
            let cells = n.checked_mul(self.cell_size)?;
            let gaps = n.saturating_sub(1).checked_mul(self.gap)?;
            cells.checked_add(gaps)
        };
        Some((span(cols)?, span(rows)?))
    }

    /// Cell under pixel `(x, y)`, or `None` for gaps and points past the grid.
    pub fn cell_at(&self, x: u32, y: u32, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let pitch = self.cell_size.saturating_add(self.gap);
        if pitch == 0 || x % pitch >= self.cell_size || y % pitch >= self.cell_size {
            return None;
        }
        let (row, col) = ((y / pitch) as usize, (x / pitch) as usize);
        (row < rows && col < cols).then_some((row, col))
    }
}

/// Render a grid to an RGBA image buffer.
///
/// Each cell is a filled square of `cell_size` pixels at
/// [`RenderOptions::cell_origin`], separated by `gap` pixels of `gap_color`.
/// When labels are on, edit mode draws each non-zero cell's value on top.
///
/// # Error Handling (Lenient Mode)
///
/// - Invalid cell color: magenta with one warning per distinct color
/// - Invalid gap or label color: magenta with warning
/// - Empty grid: 1x1 transparent image with warning
/// - Image larger than `u32` pixels per side: 1x1 transparent image with warning
///
/// # Examples
///
/// ```
/// use pixel_matrix::config::sample_config;
/// use pixel_matrix::grid::Grid;
/// use pixel_matrix::palette::Palette;
/// use pixel_matrix::renderer::{render_grid, RenderOptions};
/// use pixel_matrix::view::{DisplayColors, ViewMode};
///
/// let config = sample_config();
/// let palette = Palette::from_config(&config);
/// let grid = Grid::from_matrix(&config.matrix, &palette, ViewMode::Preview, &DisplayColors::default()).unwrap();
///
/// let (image, warnings) = render_grid(&grid, &RenderOptions::default());
/// assert_eq!(image.width(), 9 * 20 + 8);
/// assert_eq!(image.height(), 8 * 20 + 7);
/// assert!(warnings.is_empty());
/// ```
pub fn render_grid(grid: &Grid, options: &RenderOptions) -> (RgbaImage, Vec<Warning>) {
    let mut warnings = Vec::new();

    if grid.is_empty() || options.cell_size == 0 {
        warnings.push(Warning::new("Empty grid, nothing to render"));
        return (RgbaImage::from_pixel(1, 1, TRANSPARENT), warnings);
    }

    let Some((width, height)) = options.image_size(grid.height(), grid.width()) else {
        warnings.push(Warning::new(format!(
            "Grid of {}x{} cells at {}px is too large to render",
            grid.height(),
            grid.width(),
            options.cell_size
        )));
        return (RgbaImage::from_pixel(1, 1, TRANSPARENT), warnings);
    };

    let gap_color = parse_or_magenta(&options.gap_color, "gap", &mut warnings);
    let label_color = parse_or_magenta(&options.label_color, "label", &mut warnings);

    let mut image = RgbaImage::from_pixel(width, height, gap_color);

    let mut color_cache: HashMap<&str, Rgba<u8>> = HashMap::new();

    for (r, row) in grid.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let fill = *color_cache.entry(cell.color.as_str()).or_insert_with(|| {
                match parse_color(&cell.color) {
                    Ok(rgba) => rgba,
                    Err(e) => {
                        warnings.push(Warning::new(format!(
                            "Invalid color '{}' at row {}, column {}: {}, using magenta",
                            cell.color, r, c, e
                        )));
                        MAGENTA
                    }
                }
            });

            let (x, y) = options.cell_origin(r, c);
            fill_rect(&mut image, x, y, options.cell_size, fill);

            if show_label(&cell.value, options.mode, options.labels) {
                glyphs::draw_text_centered(
                    &mut image,
                    &cell.value.label(),
                    x,
                    y,
                    options.cell_size,
                    options.cell_size,
                    label_color,
                );
            }
        }
    }

    (image, warnings)
}

fn parse_or_magenta(color: &str, what: &str, warnings: &mut Vec<Warning>) -> Rgba<u8> {
    let (rgba, err) = parse_color_lenient(color);
    if let Some(e) = err {
        warnings.push(Warning::new(format!("Invalid {} color '{}': {}, using magenta", what, color, e)));
    }
    rgba
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, size: u32, color: Rgba<u8>) {
    for py in y..(y + size).min(image.height()) {
        for px in x..(x + size).min(image.width()) {
            image.put_pixel(px, py, color);
        }
    }
}
