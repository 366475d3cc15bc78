//! WASM API module for browser/JS interop
//!
//! Exposes the matrix editor and the sliding puzzle to JavaScript. The host
//! owns persistence: it passes the stored history JSON into the constructor
//! and writes [`MatrixApp::history_json`] back (e.g. to `localStorage` under
//! `pixelMatrixHistory`) after loads and renames.

use wasm_bindgen::prelude::*;

use crate::config::Settings;
use crate::engine::{MatrixEditor, PaintOutcome};
use crate::history::HISTORY_KEY;
use crate::output::png_data_url;
use crate::puzzle::{format_time, Difficulty, GameState, MoveEvent, Puzzle};
use crate::store::{KeyValueStore, MemoryStore};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Result of rendering the grid to RGBA pixels.
#[wasm_bindgen]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl RenderResult {
    /// Width of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Any warnings generated during rendering
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}

/// The matrix editor as seen from JavaScript.
#[wasm_bindgen]
pub struct MatrixApp {
    editor: MatrixEditor,
}

#[wasm_bindgen]
impl MatrixApp {
    /// Create an editor showing the sample grid. `stored_history` is the
    /// previously saved history JSON, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(stored_history: Option<String>) -> Result<MatrixApp, JsValue> {
        let mut store = MemoryStore::new();
        if let Some(json) = stored_history {
            store.set(HISTORY_KEY, &json).map_err(js_error)?;
        }
        let editor = MatrixEditor::new(Box::new(store), &Settings::default()).map_err(js_error)?;
        Ok(MatrixApp { editor })
    }

    /// Load a configuration document. Returns the new history entry id.
    #[wasm_bindgen(js_name = loadConfig)]
    pub fn load_config(&mut self, text: &str) -> Result<String, JsValue> {
        self.editor.load_config(text).map(|entry| entry.id.clone()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = selectHistory)]
    pub fn select_history(&mut self, id: &str) -> Result<(), JsValue> {
        self.editor.select_history(id).map_err(js_error)
    }

    #[wasm_bindgen(js_name = renameHistory)]
    pub fn rename_history(&mut self, id: &str, name: &str) -> Result<(), JsValue> {
        self.editor.rename_history(id, name).map_err(js_error)
    }

    /// The full history list as JSON, for the host to persist.
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.editor.history().entries()).map_err(js_error)
    }

    /// Palette colors for the swatch bar, numbers in document order.
    pub fn swatches(&self) -> Vec<String> {
        self.editor.palette().swatches().to_vec()
    }

    /// Select a palette color; an empty string clears the selection.
    #[wasm_bindgen(js_name = selectColor)]
    pub fn select_color(&mut self, color: &str) {
        self.editor.select_color((!color.is_empty()).then_some(color));
    }

    #[wasm_bindgen(js_name = selectedColor)]
    pub fn selected_color(&self) -> Option<String> {
        self.editor.selected_color().map(str::to_string)
    }

    /// Paint the cell at `(row, col)`. Returns the number of recolored cells.
    pub fn paint(&mut self, row: usize, col: usize) -> usize {
        match self.editor.paint(row, col) {
            PaintOutcome::Ignored(_) => 0,
            PaintOutcome::Recolored => 1,
            PaintOutcome::Filled { cells } => cells,
        }
    }

    /// Paint the cell under canvas pixel `(x, y)` of the last render.
    #[wasm_bindgen(js_name = paintAtPixel)]
    pub fn paint_at_pixel(&mut self, x: u32, y: u32) -> usize {
        let grid = self.editor.grid();
        match self.editor.render_options().cell_at(x, y, grid.height(), grid.width()) {
            Some((row, col)) => self.paint(row, col),
            None => 0,
        }
    }

    #[wasm_bindgen(js_name = togglePreview)]
    pub fn toggle_preview(&mut self) -> bool {
        self.editor.toggle_preview();
        self.editor.view().mode == crate::view::ViewMode::Preview
    }

    #[wasm_bindgen(js_name = setLabels)]
    pub fn set_labels(&mut self, labels: bool) {
        self.editor.set_labels(labels);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> u32 {
        self.editor.zoom_in();
        self.editor.view().zoom_percent()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> u32 {
        self.editor.zoom_out();
        self.editor.view().zoom_percent()
    }

    /// Zoom to fit the container; returns the new zoom percentage.
    #[wasm_bindgen(js_name = fitTo)]
    pub fn fit_to(&mut self, width: f32, height: f32) -> u32 {
        self.editor.fit_to(width, height);
        self.editor.view().zoom_percent()
    }

    /// Whether anything changed since the last call.
    #[wasm_bindgen(js_name = takeRedraw)]
    pub fn take_redraw(&mut self) -> bool {
        self.editor.take_redraw()
    }

    pub fn render(&self) -> RenderResult {
        let (image, warnings) = self.editor.render();
        RenderResult {
            width: image.width(),
            height: image.height(),
            warnings: warnings.into_iter().map(|w| w.message).collect(),
            pixels: image.into_raw(),
        }
    }

    /// PNG bytes of the current view.
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.editor.export_png().map_err(js_error)
    }

    /// `data:` URL of the current view, for a download link.
    #[wasm_bindgen(js_name = exportDataUrl)]
    pub fn export_data_url(&self) -> Result<String, JsValue> {
        let (image, _) = self.editor.render();
        png_data_url(&image).map_err(js_error)
    }
}

/// The sliding-tile puzzle as seen from JavaScript.
#[wasm_bindgen]
pub struct PuzzleGame {
    puzzle: Puzzle,
}

#[wasm_bindgen]
impl PuzzleGame {
    /// `difficulty` is `easy`, `medium` or `hard`.
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str) -> Result<PuzzleGame, JsValue> {
        let difficulty: Difficulty = difficulty.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(PuzzleGame { puzzle: Puzzle::with_difficulty(difficulty) })
    }

    pub fn start(&mut self) {
        self.puzzle.start();
    }

    /// Click a tile. Returns `moved`, `completed` or `rejected`.
    #[wasm_bindgen(js_name = clickTile)]
    pub fn click_tile(&mut self, id: usize) -> String {
        match self.puzzle.click_tile(id) {
            MoveEvent::Moved { .. } => "moved",
            MoveEvent::Completed { .. } => "completed",
            MoveEvent::Rejected(_) => "rejected",
        }
        .to_string()
    }

    /// Call once per second.
    pub fn tick(&mut self) {
        self.puzzle.tick();
    }

    /// Tile ids in board order.
    pub fn layout(&self) -> Vec<usize> {
        self.puzzle.layout()
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.puzzle.size()
    }

    #[wasm_bindgen(getter)]
    pub fn moves(&self) -> u32 {
        self.puzzle.moves()
    }

    #[wasm_bindgen(getter)]
    pub fn time(&self) -> String {
        format_time(self.puzzle.seconds())
    }

    #[wasm_bindgen(getter)]
    pub fn complete(&self) -> bool {
        self.puzzle.state() == GameState::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r##"{
        "numColorMap": {"1": "#ff0000", "2": "#0000ff"},
        "borderColorMap": {},
        "matrix": [[1, 1, 2], [1, 0, 2]]
    }"##;

    #[test]
    fn test_app_paint_and_render() {
        let mut app = MatrixApp::new(None).unwrap();
        app.load_config(SCENARIO).unwrap();
        assert_eq!(app.swatches(), vec!["#ff0000", "#0000ff"]);

        app.select_color("#ff0000");
        assert_eq!(app.paint(0, 0), 3);
        assert_eq!(app.paint(9, 9), 0);

        let result = app.render();
        assert_eq!(result.pixels().len() as u32, result.width() * result.height() * 4);
        // First cell is painted red
        assert_eq!(&result.pixels()[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_app_history_round_trip() {
        let mut app = MatrixApp::new(None).unwrap();
        let id = app.load_config(SCENARIO).unwrap();
        app.rename_history(&id, "Scenario").unwrap();
        let json = app.history_json().unwrap();

        let restored = MatrixApp::new(Some(json)).unwrap();
        assert!(restored.history_json().unwrap().contains("Scenario"));
    }

    #[test]
    fn test_app_export() {
        let app = MatrixApp::new(None).unwrap();
        assert_eq!(&app.export_png().unwrap()[0..4], &[0x89, 0x50, 0x4E, 0x47]);
        assert!(app.export_data_url().unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_puzzle_game() {
        let mut game = PuzzleGame::new("medium").unwrap();
        assert_eq!(game.size(), 4);
        assert_eq!(game.click_tile(0), "rejected");
        game.start();
        assert_eq!(game.layout().len(), 16);
        assert!(!game.complete());
    }
}
