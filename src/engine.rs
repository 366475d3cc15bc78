//! The matrix editor: one object owning grid, palette, selection, view and
//! history.
//!
//! Every mutation runs to completion before returning and raises the redraw
//! flag when something visible changed. Hosts poll [`MatrixEditor::take_redraw`]
//! and repaint the whole grid.

use crate::config::{parse_document, sample_config, ConfigError, DisplaySettings, Settings};
use crate::grid::Grid;
use crate::history::{now_millis, History, HistoryEntry};
use crate::models::MatrixConfig;
use crate::output::{encode_png, OutputError};
use crate::palette::Palette;
use crate::renderer::{render_grid, RenderOptions, Warning};
use crate::store::{KeyValueStore, StoreError};
use crate::view::{fit_scale, DisplayColors, ViewMode, ViewState};
use image::RgbaImage;
use thiserror::Error;

/// Error from an editor operation.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A configuration document was rejected; the editor is unchanged
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The history could not be read at startup
    #[error("history store: {0}")]
    Store(#[from] StoreError),
    /// No history entry has this id
    #[error("no history entry with id '{0}'")]
    UnknownHistoryEntry(String),
}

/// Why a paint action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No palette color is selected
    NoSelection,
    /// The coordinate is outside the grid
    OutOfBounds,
    /// The selected color belongs to no numeric palette entry
    UnknownColor,
}

/// What a paint action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    Ignored(IgnoreReason),
    /// The clicked cell's key differs from the selection: only it was recolored
    Recolored,
    /// The clicked cell matched the selection: its region was flood filled
    Filled { cells: usize },
}

/// The grid recolor engine.
pub struct MatrixEditor {
    config: MatrixConfig,
    palette: Palette,
    grid: Grid,
    selected: Option<String>,
    view: ViewState,
    display: DisplaySettings,
    colors: DisplayColors,
    history: History,
    active_entry: Option<String>,
    store: Box<dyn KeyValueStore>,
    history_key: String,
    needs_redraw: bool,
}

impl MatrixEditor {
    /// Create an editor showing the built-in sample, with history read from `store`.
    pub fn new(store: Box<dyn KeyValueStore>, settings: &Settings) -> Result<Self, EditorError> {
        let history = History::load(store.as_ref(), &settings.history.key)?;
        let colors = settings.display.display_colors();
        let mut view = ViewState::default();
        view.labels = settings.display.labels;

        let config = sample_config();
        let palette = Palette::from_config(&config);
        let grid = Grid::from_matrix(&config.matrix, &palette, view.mode, &colors)
            .map_err(ConfigError::from)?;

        Ok(Self {
            config,
            palette,
            grid,
            selected: None,
            view,
            display: settings.display.clone(),
            colors,
            history,
            active_entry: None,
            store,
            history_key: settings.history.key.clone(),
            needs_redraw: true,
        })
    }

    /// Load a configuration document, replacing grid and palette together and
    /// appending a history entry.
    ///
    /// Nothing changes unless the whole document is valid.
    pub fn load_config(&mut self, text: &str) -> Result<&HistoryEntry, EditorError> {
        let config = parse_document(text)?;
        self.load_parsed(config)
    }

    /// Like [`load_config`](Self::load_config) for an already-validated document.
    pub fn load_parsed(&mut self, config: MatrixConfig) -> Result<&HistoryEntry, EditorError> {
        self.install(config.clone())?;

        let id = self.history.append(config, now_millis()).id.clone();
        log::info!("loaded configuration as history entry {}", id);
        self.persist_history();
        self.active_entry = Some(id.clone());

        self.history.get(&id).ok_or(EditorError::UnknownHistoryEntry(id))
    }

    /// Reset grid and palette to a history entry's configuration.
    pub fn select_history(&mut self, id: &str) -> Result<(), EditorError> {
        let config = self
            .history
            .get(id)
            .map(|entry| entry.config.clone())
            .ok_or_else(|| EditorError::UnknownHistoryEntry(id.to_string()))?;
        self.install(config)?;
        self.active_entry = Some(id.to_string());
        Ok(())
    }

    /// Rename a history entry and persist the list.
    pub fn rename_history(&mut self, id: &str, name: &str) -> Result<(), EditorError> {
        if !self.history.rename(id, name) {
            return Err(EditorError::UnknownHistoryEntry(id.to_string()));
        }
        self.persist_history();
        Ok(())
    }

    /// Swap in a new grid and palette. Both are built before either is
    /// assigned, so a failure leaves the editor as it was.
    fn install(&mut self, config: MatrixConfig) -> Result<(), EditorError> {
        let palette = Palette::from_config(&config);
        let grid = Grid::from_matrix(&config.matrix, &palette, self.view.mode, &self.colors)
            .map_err(ConfigError::from)?;

        for (color, keys) in palette.ambiguous_colors() {
            log::warn!("color {} is shared by keys {:?}; selecting it paints key {}", color, keys, keys[0]);
        }

        self.config = config;
        self.palette = palette;
        self.grid = grid;
        // A selection only means something against the palette it came from
        self.selected = None;
        self.needs_redraw = true;
        Ok(())
    }

    fn persist_history(&mut self) {
        if let Err(e) = self.history.save(self.store.as_mut(), &self.history_key) {
            log::warn!("failed to persist history: {}", e);
        }
    }

    /// Select a palette color (or clear the selection with `None`).
    pub fn select_color(&mut self, color: Option<&str>) {
        self.selected = color.map(str::to_string);
        self.needs_redraw = true;
    }

    /// Select the color of a numeric palette key. Returns `false` if the key
    /// is not in the palette.
    pub fn select_key(&mut self, key: &str) -> bool {
        match self.palette.number_color(key).map(str::to_string) {
            Some(color) => {
                self.select_color(Some(&color));
                true
            }
            None => false,
        }
    }

    /// Apply a paint action at `(row, col)` with the selected color.
    ///
    /// If the clicked cell's key is the selected color's key, the cell's
    /// 4-connected region of that key is flood filled; otherwise only the
    /// clicked cell is recolored.
    pub fn paint(&mut self, row: usize, col: usize) -> PaintOutcome {
        let outcome = self.paint_inner(row, col);
        match outcome {
            PaintOutcome::Ignored(reason) => log::debug!("paint at ({}, {}) ignored: {:?}", row, col, reason),
            _ => {
                log::debug!("paint at ({}, {}): {:?}", row, col, outcome);
                self.needs_redraw = true;
            }
        }
        outcome
    }

    fn paint_inner(&mut self, row: usize, col: usize) -> PaintOutcome {
        let Some(color) = self.selected.clone() else {
            return PaintOutcome::Ignored(IgnoreReason::NoSelection);
        };
        let Some(cell) = self.grid.get(row, col) else {
            return PaintOutcome::Ignored(IgnoreReason::OutOfBounds);
        };
        let Some(target_key) = self.palette.key_for_color(&color) else {
            return PaintOutcome::Ignored(IgnoreReason::UnknownColor);
        };

        if cell.value.key() != target_key {
            self.grid.set_color(row, col, &color);
            return PaintOutcome::Recolored;
        }

        let target_key = target_key.to_string();
        let cells = self.grid.flood_fill(row, col, &target_key, &color);
        PaintOutcome::Filled { cells }
    }

    /// Switch between edit and preview, re-resolving every cell's color.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view.mode = mode;
        self.grid.recolor_all(&self.palette, mode, &self.colors);
        self.needs_redraw = true;
    }

    pub fn toggle_preview(&mut self) {
        self.set_mode(self.view.mode.toggled());
    }

    pub fn set_labels(&mut self, labels: bool) {
        self.view.labels = labels;
        self.needs_redraw = true;
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
        self.needs_redraw = true;
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
        self.needs_redraw = true;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.view.set_scale(scale);
        self.needs_redraw = true;
    }

    /// Zoom so the whole grid fits a `width` x `height` area.
    ///
    /// Returns false and leaves the zoom alone when the grid is empty.
    pub fn fit_to(&mut self, width: f32, height: f32) -> bool {
        match fit_scale(width, height, self.grid.height(), self.grid.width(), self.display.pixel_size) {
            Some(scale) => {
                self.set_scale(scale);
                true
            }
            None => false,
        }
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Rendering parameters for the current view.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            cell_size: self.view.cell_size(self.display.pixel_size),
            gap: self.view.gap(),
            mode: self.view.mode,
            labels: self.view.labels,
            gap_color: self.display.gap_color.clone(),
            label_color: self.display.label_color.clone(),
        }
    }

    /// Rasterize the grid as currently displayed.
    pub fn render(&self) -> (RgbaImage, Vec<Warning>) {
        render_grid(&self.grid, &self.render_options())
    }

    /// PNG bytes of the current raster.
    pub fn export_png(&self) -> Result<Vec<u8>, OutputError> {
        let (image, warnings) = self.render();
        for w in &warnings {
            log::warn!("render: {}", w.message);
        }
        encode_png(&image)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The configuration the grid was built from.
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Id of the history entry the grid came from, if any.
    pub fn active_entry(&self) -> Option<&str> {
        self.active_entry.as_deref()
    }
}
