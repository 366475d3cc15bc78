//! Interactive sliding-tile puzzle on stdin/stdout

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::puzzle::{format_time, Difficulty, GameState, MoveEvent, Puzzle, RejectReason};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the puzzle command
///
/// Tiles are shown numbered from 1; typing a number slides that tile into the
/// gap. `r` reshuffles, `q` quits.
pub fn run_puzzle(difficulty: Difficulty, seed: Option<u64>) -> ExitCode {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut puzzle = Puzzle::with_difficulty(difficulty);
    puzzle.start_with_rng(&mut rng);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match play(difficulty, &mut puzzle, &mut rng, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Read commands line by line until `q` or end of input.
fn play<R: BufRead, W: Write>(
    difficulty: Difficulty,
    puzzle: &mut Puzzle,
    rng: &mut StdRng,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut clock = Clock::new();

    writeln!(out, "Sliding puzzle ({}, {}x{})", difficulty, puzzle.size(), puzzle.size())?;
    write!(out, "{}", render_board(puzzle))?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        clock.advance(puzzle);

        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" => {
                puzzle.start_with_rng(rng);
                clock = Clock::new();
                write!(out, "{}", render_board(puzzle))?;
            }
            command => match command.parse::<usize>() {
                Ok(n) if n >= 1 => report(out, puzzle.click_tile(n - 1), puzzle)?,
                _ => writeln!(out, "Enter a tile number, 'r' to restart or 'q' to quit")?,
            },
        }
        out.flush()?;
    }

    Ok(())
}

fn report<W: Write>(out: &mut W, event: MoveEvent, puzzle: &Puzzle) -> io::Result<()> {
    match event {
        MoveEvent::Moved { moves } => {
            write!(out, "{}", render_board(puzzle))?;
            writeln!(out, "Moves: {}  Time: {}", moves, format_time(puzzle.seconds()))
        }
        MoveEvent::Completed { moves, seconds } => {
            write!(out, "{}", render_board(puzzle))?;
            writeln!(out, "Solved in {} moves, {}! 'r' to play again.", moves, format_time(seconds))
        }
        MoveEvent::Rejected(RejectReason::NotAdjacent) => writeln!(out, "That tile is not next to the gap"),
        MoveEvent::Rejected(RejectReason::NotPlaying) => writeln!(out, "Game over. 'r' to play again."),
        MoveEvent::Rejected(_) => writeln!(out, "No such tile"),
    }
}

/// The board as text, one row per line, the gap shown blank.
fn render_board(puzzle: &Puzzle) -> String {
    let size = puzzle.size();
    let empty = puzzle.empty_id();
    let width = (size * size).to_string().len();

    let mut out = String::new();
    for row in puzzle.layout().chunks(size) {
        let cells: Vec<String> = row
            .iter()
            .map(|&id| {
                if id == empty {
                    " ".repeat(width)
                } else {
                    format!("{:>width$}", id + 1, width = width)
                }
            })
            .collect();
        out.push_str(&format!("[{}]\n", cells.join("|")));
    }
    out
}

/// Turns wall-clock time into whole-second ticks.
struct Clock {
    started: Instant,
    ticked: u64,
}

impl Clock {
    fn new() -> Self {
        Self { started: Instant::now(), ticked: 0 }
    }

    fn advance(&mut self, puzzle: &mut Puzzle) {
        let elapsed = self.started.elapsed().as_secs();
        while self.ticked < elapsed && puzzle.state() == GameState::Playing {
            puzzle.tick();
            self.ticked += 1;
        }
    }
}
