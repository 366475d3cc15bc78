//! Sliding-tile puzzle.
//!
//! A `size` x `size` board of numbered tiles with one empty slot. The empty
//! slot is the tile whose id is `size * size - 1`. Clicking a tile next to
//! the empty slot swaps them; the game ends when every tile is back at its
//! own position.
//!
//! The puzzle has no clock of its own: callers drive the timer with
//! [`Puzzle::tick`] once per second.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Smallest board that can be shuffled into an unsolved state
pub const MIN_SIZE: usize = 2;

/// Board size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Board side length for this preset.
    pub fn size(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (expected easy, medium or hard)", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: usize,
    pub correct_pos: usize,
    pub current_pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Idle,
    Playing,
    Complete,
}

/// Why a click did not move anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotPlaying,
    UnknownTile,
    /// The empty slot itself was clicked
    EmptyTile,
    NotAdjacent,
}

/// Result of a click, for front-end feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    Moved { moves: u32 },
    Completed { moves: u32, seconds: u32 },
    Rejected(RejectReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    size: usize,
    tiles: Vec<Tile>,
    state: GameState,
    moves: u32,
    seconds: u32,
}

impl Puzzle {
    /// A solved, idle board. Sizes below [`MIN_SIZE`] are raised to it.
    pub fn new(size: usize) -> Self {
        let size = size.max(MIN_SIZE);
        let tiles = (0..size * size)
            .map(|id| Tile { id, correct_pos: id, current_pos: id })
            .collect();
        Self { size, tiles, state: GameState::Idle, moves: 0, seconds: 0 }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(difficulty.size())
    }

    /// Shuffle and start playing, using the thread RNG.
    pub fn start(&mut self) {
        self.start_with_rng(&mut rand::thread_rng());
    }

    /// Shuffle and start playing. Counters reset; a board the shuffle left
    /// solved is shuffled again.
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut positions: Vec<usize> = (0..self.tiles.len()).collect();
        loop {
            for i in (1..positions.len()).rev() {
                let j = rng.gen_range(0..=i);
                positions.swap(i, j);
            }
            if positions.iter().enumerate().any(|(i, &p)| i != p) {
                break;
            }
        }

        for (tile, pos) in self.tiles.iter_mut().zip(positions) {
            tile.current_pos = pos;
        }
        self.moves = 0;
        self.seconds = 0;
        self.state = GameState::Playing;
        log::debug!("puzzle started: {}x{}", self.size, self.size);
    }

    /// Id of the tile that acts as the empty slot.
    pub fn empty_id(&self) -> usize {
        self.size * self.size - 1
    }

    /// Try to slide tile `id` into the empty slot.
    pub fn click_tile(&mut self, id: usize) -> MoveEvent {
        if self.state != GameState::Playing {
            return MoveEvent::Rejected(RejectReason::NotPlaying);
        }
        if id >= self.tiles.len() {
            return MoveEvent::Rejected(RejectReason::UnknownTile);
        }
        let empty = self.empty_id();
        if id == empty {
            return MoveEvent::Rejected(RejectReason::EmptyTile);
        }

        let tile_pos = self.tiles[id].current_pos;
        let empty_pos = self.tiles[empty].current_pos;
        if !is_adjacent(tile_pos, empty_pos, self.size) {
            return MoveEvent::Rejected(RejectReason::NotAdjacent);
        }

        self.tiles[id].current_pos = empty_pos;
        self.tiles[empty].current_pos = tile_pos;
        self.moves += 1;

        if self.is_solved() {
            self.state = GameState::Complete;
            log::info!("puzzle solved in {} moves, {}", self.moves, format_time(self.seconds));
            MoveEvent::Completed { moves: self.moves, seconds: self.seconds }
        } else {
            MoveEvent::Moved { moves: self.moves }
        }
    }

    /// Advance the timer by one second while playing. Returns whether it ran.
    pub fn tick(&mut self) -> bool {
        if self.state == GameState::Playing {
            self.seconds += 1;
            true
        } else {
            false
        }
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(|t| t.current_pos == t.correct_pos)
    }

    /// Id of the tile at board position `pos`.
    pub fn tile_at(&self, pos: usize) -> Option<usize> {
        self.tiles.iter().find(|t| t.current_pos == pos).map(|t| t.id)
    }

    /// Tile ids in board order, row-major.
    pub fn layout(&self) -> Vec<usize> {
        let mut layout = vec![0; self.tiles.len()];
        for tile in &self.tiles {
            layout[tile.current_pos] = tile.id;
        }
        layout
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Put tile `id` at `pos` and the tile that was there at `id`'s old spot.
    #[cfg(test)]
    fn place(&mut self, id: usize, pos: usize) {
        if let Some(other) = self.tile_at(pos) {
            let old = self.tiles[id].current_pos;
            self.tiles[other].current_pos = old;
        }
        self.tiles[id].current_pos = pos;
    }
}

/// Whether board positions `a` and `b` share an edge on a `size`-wide board.
pub fn is_adjacent(a: usize, b: usize, size: usize) -> bool {
    let distance = a.abs_diff(b);
    distance == size || (distance == 1 && a / size == b / size)
}

/// Format elapsed seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
