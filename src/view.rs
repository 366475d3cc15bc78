//! View state and the pure display rules derived from it.
//!
//! Nothing here touches grid data. [`resolve_color`] decides what a cell
//! shows for a given mode and palette, [`show_label`] decides whether its
//! value is written on top, and [`ViewState`] tracks zoom.

use crate::models::CellValue;
use crate::palette::Palette;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.2;

/// Whether numeric cells show their palette color or read as unpainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Numeric cells are neutral so the user can paint them
    #[default]
    Edit,
    /// Numeric cells show their mapped palette color
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Edit => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        }
    }
}

/// The fixed colors the resolution rule falls back on.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayColors {
    /// Unmapped keys
    pub active: String,
    /// Cells holding the number zero
    pub inactive: String,
    /// Unpainted numeric cells in edit mode
    pub neutral: String,
}

impl Default for DisplayColors {
    fn default() -> Self {
        Self {
            active: "#4CAF50".to_string(),
            inactive: "#f5f5f5".to_string(),
            neutral: "#ffffff".to_string(),
        }
    }
}

/// Resolve the color a cell displays from its stored value.
///
/// Zero is always inactive. Numbers and numeric strings are neutral while
/// editing and palette-mapped in preview. Letters use the letter sub-palette
/// in either mode.
pub fn resolve_color(
    value: &CellValue,
    palette: &Palette,
    mode: ViewMode,
    colors: &DisplayColors,
) -> String {
    if value.is_zero() {
        return colors.inactive.clone();
    }

    if value.is_numeric() {
        return match mode {
            ViewMode::Edit => colors.neutral.clone(),
            ViewMode::Preview => palette
                .number_color(&value.key())
                .unwrap_or(colors.active.as_str())
                .to_string(),
        };
    }

    palette.letter_color(&value.key()).unwrap_or(colors.active.as_str()).to_string()
}

/// Whether a cell's value is written on top of its fill.
pub fn show_label(value: &CellValue, mode: ViewMode, labels: bool) -> bool {
    labels && mode == ViewMode::Edit && !value.is_zero()
}

/// Zoom and mode flags for the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub labels: bool,
    scale: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { mode: ViewMode::Edit, labels: false, scale: 1.0 }
    }
}

impl ViewState {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the zoom, clamped to the supported range.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_scale(scale);
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - ZOOM_STEP);
    }

    /// Zoom level as a whole percentage, e.g. `120`.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Side length of one rendered cell, never below one pixel.
    pub fn cell_size(&self, pixel_size: u32) -> u32 {
        ((pixel_size as f32 * self.scale).round() as u32).max(1)
    }

    /// Spacing between rendered cells.
    pub fn gap(&self) -> u32 {
        self.scale.round() as u32
    }
}

fn clamp_scale(scale: f32) -> f32 {
    // Round away float drift from repeated steps (1.0 + 0.2 + 0.2 ...)
    let scale = (scale * 100.0).round() / 100.0;
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// The largest zoom at which a `rows x cols` grid fits the given area.
///
/// Returns `None` for an empty grid.
pub fn fit_scale(
    container_width: f32,
    container_height: f32,
    rows: usize,
    cols: usize,
    pixel_size: u32,
) -> Option<f32> {
    let grid_width = cols as f32 * pixel_size as f32;
    let grid_height = rows as f32 * pixel_size as f32;
    if grid_width <= 0.0 || grid_height <= 0.0 {
        return None;
    }

    let scale = (container_width / grid_width).min(container_height / grid_height);
    Some(scale.clamp(MIN_SCALE, MAX_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorMap;

    fn palette() -> Palette {
        Palette::new(
            [("1", "red"), ("2", "blue")].into_iter().collect(),
            [("A", "black")].into_iter().collect::<ColorMap>(),
        )
    }

    #[test]
    fn test_zero_is_inactive_in_both_modes() {
        let colors = DisplayColors::default();
        for mode in [ViewMode::Edit, ViewMode::Preview] {
            assert_eq!(resolve_color(&CellValue::int(0), &palette(), mode, &colors), "#f5f5f5");
        }
    }

    #[test]
    fn test_zero_ignores_palette_entry() {
        let colors = DisplayColors::default();
        let p = Palette::new(
            [("0", "red"), ("1", "blue")].into_iter().collect(),
            ColorMap::new(),
        );
        for mode in [ViewMode::Edit, ViewMode::Preview] {
            assert_eq!(resolve_color(&CellValue::int(0), &p, mode, &colors), "#f5f5f5");
        }
    }

    #[test]
    fn test_inf_is_a_letter_key() {
        let colors = DisplayColors::default();
        let p = Palette::new(
            [("1", "red")].into_iter().collect(),
            [("inf", "purple")].into_iter().collect::<ColorMap>(),
        );
        let inf = CellValue::text("inf");
        assert_eq!(resolve_color(&inf, &p, ViewMode::Edit, &colors), "purple");
        assert_eq!(resolve_color(&inf, &p, ViewMode::Preview, &colors), "purple");
    }

    #[test]
    fn test_numbers_neutral_in_edit_mapped_in_preview() {
        let colors = DisplayColors::default();
        let p = palette();
        assert_eq!(resolve_color(&CellValue::int(1), &p, ViewMode::Edit, &colors), "#ffffff");
        assert_eq!(resolve_color(&CellValue::int(1), &p, ViewMode::Preview, &colors), "red");
        assert_eq!(resolve_color(&CellValue::text("2"), &p, ViewMode::Preview, &colors), "blue");
        assert_eq!(resolve_color(&CellValue::int(7), &p, ViewMode::Preview, &colors), "#4CAF50");
    }

    #[test]
    fn test_string_zero_is_not_inactive() {
        let colors = DisplayColors::default();
        let v = CellValue::text("0");
        assert_eq!(resolve_color(&v, &palette(), ViewMode::Edit, &colors), "#ffffff");
        assert_eq!(resolve_color(&v, &palette(), ViewMode::Preview, &colors), "#4CAF50");
    }

    #[test]
    fn test_letters_ignore_mode() {
        let colors = DisplayColors::default();
        let p = palette();
        for mode in [ViewMode::Edit, ViewMode::Preview] {
            assert_eq!(resolve_color(&CellValue::text("A"), &p, mode, &colors), "black");
            assert_eq!(resolve_color(&CellValue::text("Z"), &p, mode, &colors), "#4CAF50");
        }
    }

    #[test]
    fn test_show_label() {
        assert!(show_label(&CellValue::int(3), ViewMode::Edit, true));
        assert!(show_label(&CellValue::text("A"), ViewMode::Edit, true));
        assert!(!show_label(&CellValue::int(3), ViewMode::Edit, false));
        assert!(!show_label(&CellValue::int(3), ViewMode::Preview, true));
        assert!(!show_label(&CellValue::int(0), ViewMode::Edit, true));
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut view = ViewState::default();
        view.zoom_in();
        assert_eq!(view.zoom_percent(), 120);
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.scale(), MAX_SCALE);
        for _ in 0..20 {
            view.zoom_out();
        }
        assert_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.zoom_percent(), 50);
    }

    #[test]
    fn test_cell_size_and_gap() {
        let mut view = ViewState::default();
        assert_eq!(view.cell_size(20), 20);
        assert_eq!(view.gap(), 1);
        view.set_scale(2.0);
        assert_eq!(view.cell_size(20), 40);
        assert_eq!(view.gap(), 2);
        view.set_scale(0.5);
        assert_eq!(view.cell_size(1), 1);
    }

    #[test]
    fn test_fit_scale() {
        assert_eq!(fit_scale(400.0, 200.0, 10, 10, 10), Some(2.0));
        assert_eq!(fit_scale(10_000.0, 10_000.0, 2, 2, 10), Some(MAX_SCALE));
        assert_eq!(fit_scale(10.0, 10.0, 100, 100, 10), Some(MIN_SCALE));
        assert_eq!(fit_scale(100.0, 100.0, 0, 0, 10), None);
    }
}
