//! The cell grid: construction from a value matrix, recoloring, flood fill.
//!
//! Coordinates are `(row, col)` with `(0, 0)` at the top-left. Cell values
//! are fixed once the grid is built; every operation here changes colors only.

use crate::models::{Cell, CellValue};
use crate::palette::Palette;
use crate::view::{resolve_color, DisplayColors, ViewMode};
use std::collections::VecDeque;
use thiserror::Error;

/// Error building a grid from a raw matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Rows must all have the same length
    #[error("row {row} has {len} cells, expected {expected} (rows must have equal length)")]
    Ragged { row: usize, len: usize, expected: usize },
}

/// A rectangular grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Indexed as `cells[row][col]`
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from raw values, resolving each cell's initial color.
    pub fn from_matrix(
        matrix: &[Vec<CellValue>],
        palette: &Palette,
        mode: ViewMode,
        colors: &DisplayColors,
    ) -> Result<Self, GridError> {
        check_rectangular(matrix)?;

        let cells: Vec<Vec<Cell>> = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| Cell {
                        value: value.clone(),
                        color: resolve_color(value, palette, mode, colors),
                    })
                    .collect()
            })
            .collect();

        let width = cells.first().map_or(0, |r| r.len());
        let height = cells.len();
        Ok(Grid { cells, width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Get the cell at `(row, col)`. Returns `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Recolor one cell. Returns `false` (and does nothing) if out of bounds.
    pub fn set_color(&mut self, row: usize, col: usize, color: &str) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                cell.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Re-resolve every cell's color from its stored value.
    pub fn recolor_all(&mut self, palette: &Palette, mode: ViewMode, colors: &DisplayColors) {
        for cell in self.cells.iter_mut().flatten() {
            cell.color = resolve_color(&cell.value, palette, mode, colors);
        }
    }

    /// The 4-connected region around `(row, col)` whose cells have `key`.
    ///
    /// Iterative BFS with a visited set, so each cell is examined at most once.
    /// Empty if the seed is out of bounds or does not itself carry `key`.
    pub fn region(&self, row: usize, col: usize, key: &str) -> Vec<(usize, usize)> {
        let matches = |r: usize, c: usize| self.cells[r][c].value.key() == key;
        if !self.in_bounds(row, col) || !matches(row, col) {
            return Vec::new();
        }

        let mut visited = vec![false; self.width * self.height];
        let mut region = Vec::new();
        let mut queue = VecDeque::new();
        visited[row * self.width + col] = true;
        queue.push_back((row, col));

        while let Some((r, c)) = queue.pop_front() {
            region.push((r, c));

            let neighbors: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
            for (dr, dc) in &neighbors {
                let nr = r as isize + dr;
                let nc = c as isize + dc;
                if nr < 0 || nc < 0 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if !self.in_bounds(nr, nc) || visited[nr * self.width + nc] {
                    continue;
                }
                visited[nr * self.width + nc] = true;
                if matches(nr, nc) {
                    queue.push_back((nr, nc));
                }
            }
        }

        region
    }

    /// Flood fill the `key` region around `(row, col)` with `color`.
    ///
    /// Returns the number of cells recolored.
    pub fn flood_fill(&mut self, row: usize, col: usize, key: &str, color: &str) -> usize {
        let region = self.region(row, col, key);
        for &(r, c) in &region {
            self.cells[r][c].color = color.to_string();
        }
        region.len()
    }

    /// Current colors, row by row.
    pub fn colors(&self) -> Vec<Vec<String>> {
        self.cells.iter().map(|r| r.iter().map(|c| c.color.clone()).collect()).collect()
    }
}

/// Check that every row has the length of the first.
pub fn check_rectangular(matrix: &[Vec<CellValue>]) -> Result<(), GridError> {
    let Some(expected) = matrix.first().map(|r| r.len()) else {
        return Ok(());
    };
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != expected {
            return Err(GridError::Ragged { row, len: cells.len(), expected });
        }
    }
    Ok(())
}
