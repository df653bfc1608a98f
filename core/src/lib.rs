// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sixline Core - Game Rules and Board Logic
//!
//! This crate provides the core game functionality including:
//! - Six-in-a-row board representation and manipulation
//! - Placement rules, win/draw detection, and undo
//! - Heuristic AI move selection at three difficulty tiers
//! - NDJSON persistence for match history and the resume slot

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod archiver;
pub mod board;
pub mod engine;
pub mod record;
pub mod rules;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::board::Board;

/// Default board size (the grid is `BOARD_SIZE` × `BOARD_SIZE`)
pub const BOARD_SIZE: u8 = 19;

/// Number of contiguous same-color stones that wins the match
pub const WIN_LENGTH: usize = 6;

/// Player color in a match (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black player (moves first)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Wire encoding used by the persisted records (1 = Black, 2 = White)
    pub fn wire_code(&self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    /// Decode the wire encoding; 0 (and anything else unknown) is "no color"
    pub fn from_wire(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Black),
            2 => Some(Color::White),
            _ => None,
        }
    }
}

/// Board coordinate representing a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 at the top)
    pub row: u8,
    /// Column index (0 at the left)
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if the coordinate is on a board of the given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.row < board_size && self.col < board_size
    }
}

/// One placed stone, recorded when the placement succeeds and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Row where the stone was placed
    pub row: u8,
    /// Column where the stone was placed
    pub col: u8,
    /// Who placed it
    pub player: Color,
}

/// Represents the current state of a match
#[derive(Debug, Clone)]
pub struct GameState {
    /// The grid of placed stones
    pub board: Board,
    /// The player whose turn it is
    pub current_player: Color,
    /// Whether the match has reached a terminal state
    pub finished: bool,
    /// The winner; `None` means undecided, or a draw once `finished` is set
    pub winner: Option<Color>,
    /// How many undo actions were taken this match (monotonic)
    pub undo_count: u32,
    /// History of placed stones, append-only except for undo
    pub moves: Vec<Move>,
}

impl GameState {
    /// Create a fresh empty match with the specified board size
    pub fn new(board_size: u8) -> Self {
        Self {
            board: Board::new(board_size),
            current_player: Color::Black, // Black goes first
            finished: false,
            winner: None,
            undo_count: 0,
            moves: Vec::new(),
        }
    }

    /// Reset to a fresh empty match, keeping the board size
    pub fn reset(&mut self) {
        *self = Self::new(self.board.size());
    }

    /// Place a stone for the current player at `coord`.
    ///
    /// On success the move is recorded, win/draw is evaluated, and the turn
    /// flips only if the match did not just end. On failure nothing changes.
    pub fn place_stone(&mut self, coord: Coord) -> Result<(), GameError> {
        if self.finished {
            return Err(GameError::GameOver);
        }
        if !coord.is_valid(self.board.size()) {
            return Err(GameError::OutOfBounds);
        }
        if self.board.get(coord).is_some() {
            return Err(GameError::Occupied);
        }

        self.board.place(coord, self.current_player);
        self.moves.push(Move {
            row: coord.row,
            col: coord.col,
            player: self.current_player,
        });

        if rules::check_win(&self.board, coord) {
            self.finished = true;
            self.winner = Some(self.current_player);
        } else if self.is_full() {
            // Draw
            self.finished = true;
            self.winner = None;
        } else {
            self.current_player = self.current_player.opposite();
        }
        Ok(())
    }

    /// Undo the last placed stone.
    ///
    /// The turn goes back to the player who made the undone move, and the
    /// match resumes if it had ended. This does not bump `undo_count`: one
    /// logical undo action may pop twice in AI modes, so the caller counts
    /// actions via [`GameState::record_undo`].
    pub fn undo_last_move(&mut self) -> Result<(), GameError> {
        let last = self.moves.pop().ok_or(GameError::NoHistory)?;
        self.board.remove(Coord::new(last.row, last.col));

        self.current_player = last.player;
        if self.moves.is_empty() {
            self.current_player = Color::Black;
        }

        self.finished = false;
        self.winner = None;
        Ok(())
    }

    /// Count one logical undo action
    pub fn record_undo(&mut self) {
        self.undo_count += 1;
    }

    /// Whether every cell of the grid is occupied
    pub fn is_full(&self) -> bool {
        self.moves.len() == self.board.cell_count()
    }
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("coordinate is outside the board")]
    OutOfBounds,

    /// The cell is already occupied
    #[error("cell is already occupied")]
    Occupied,

    /// The match has already finished
    #[error("match is already finished")]
    GameOver,

    /// There is no move to undo
    #[error("no moves to undo")]
    NoHistory,
}
