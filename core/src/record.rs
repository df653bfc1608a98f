// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire records for durable match data
//!
//! These types define the one-JSON-object-per-line format shared by the
//! history log and the resume slot. The field names (`time`, `winner`,
//! `undo`, `moves`, `p`, `r`, `c`, `mode`, `elapsed`, `current`) are the
//! compatibility contract with previously written files; fields added after
//! the first release (`undo`, `elapsed`) default when absent so old lines
//! still decode.

use serde::{Serialize, Deserialize};

use crate::{Color, Coord, GameState, Move};

/// One placed stone as persisted: `p` is the wire color (1 = Black,
/// 2 = White), `r`/`c` the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub p: u8,
    pub r: u8,
    pub c: u8,
}

impl From<&Move> for MoveRecord {
    fn from(mv: &Move) -> Self {
        Self {
            p: mv.player.wire_code(),
            r: mv.row,
            c: mv.col,
        }
    }
}

/// The durable encoding of one finished match; one per line in the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Local wall-clock time the match was saved, `YYYY-MM-DD HH:MM:SS`
    pub time: String,
    /// Wire-coded winner; 0 is a draw
    pub winner: u8,
    /// Undo actions taken; absent in records written before the counter existed
    #[serde(default)]
    pub undo: u32,
    /// The full move sequence in play order
    pub moves: Vec<MoveRecord>,
}

impl MatchRecord {
    /// Snapshot a finished match, stamping it with the current local time
    pub fn from_game(game: &GameState) -> Self {
        Self {
            time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            winner: game.winner.map_or(0, |color| color.wire_code()),
            undo: game.undo_count,
            moves: game.moves.iter().map(MoveRecord::from).collect(),
        }
    }

    /// Rebuild the finished match on a fresh board of the given size.
    ///
    /// Moves are replayed onto an empty grid; `current_player` is derived
    /// from move-count parity so stepping through a replay deals the next
    /// color correctly.
    pub fn into_game(self, board_size: u8) -> GameState {
        let mut game = replay_moves(board_size, &self.moves);
        game.finished = true;
        game.winner = Color::from_wire(self.winner);
        game.undo_count = self.undo;
        game.current_player = parity_player(game.moves.len());
        game
    }
}

/// The durable encoding of an interrupted match plus session metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Session mode; opaque to the core beyond round-tripping (1 = two-human,
    /// 2..=4 = AI tiers)
    #[serde(default = "default_mode")]
    pub mode: i32,
    /// Wall-clock seconds already played
    #[serde(default)]
    pub elapsed: i64,
    /// Wire-coded player to move
    #[serde(default = "default_current")]
    pub current: u8,
    /// Undo actions taken so far
    #[serde(default)]
    pub undo: u32,
    /// The moves played so far, in order
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
}

fn default_mode() -> i32 {
    1
}

fn default_current() -> u8 {
    1
}

impl ResumeRecord {
    /// Snapshot an in-progress match; negative elapsed time is clamped to zero
    pub fn from_game(game: &GameState, mode: i32, elapsed_seconds: i64) -> Self {
        Self {
            mode,
            elapsed: elapsed_seconds.max(0),
            current: game.current_player.wire_code(),
            undo: game.undo_count,
            moves: game.moves.iter().map(MoveRecord::from).collect(),
        }
    }

    /// Rebuild the in-progress match and its session metadata.
    ///
    /// A resumed match is never pre-finished, so `finished`/`winner` are
    /// cleared unconditionally. The player to move comes from the `current`
    /// field when it carries a valid color, else from move-count parity.
    pub fn into_game(self, board_size: u8) -> (GameState, i32, i64) {
        let mut game = replay_moves(board_size, &self.moves);
        game.finished = false;
        game.winner = None;
        game.undo_count = self.undo;
        game.current_player = match Color::from_wire(self.current) {
            Some(color) => color,
            None => parity_player(game.moves.len()),
        };
        (game, self.mode, self.elapsed)
    }
}

/// Replay persisted moves onto an empty grid. Records that fall outside the
/// board or land on an occupied cell are skipped rather than failing the
/// whole load, matching how earlier files are tolerated.
fn replay_moves(board_size: u8, moves: &[MoveRecord]) -> GameState {
    let mut game = GameState::new(board_size);
    for record in moves {
        let coord = Coord::new(record.r, record.c);
        let player = match Color::from_wire(record.p) {
            Some(color) => color,
            // Earlier writers only ever emitted 1 or 2; treat the rest as White
            // the way the original loader collapsed non-black codes.
            None => Color::White,
        };
        if !coord.is_valid(board_size) {
            tracing::warn!("skipping off-board move ({}, {})", record.r, record.c);
            continue;
        }
        if game.board.place(coord, player) {
            game.moves.push(Move {
                row: coord.row,
                col: coord.col,
                player,
            });
        }
    }
    game
}

/// Who moves next after `move_count` stones: even counts put Black on move
fn parity_player(move_count: usize) -> Color {
    if move_count % 2 == 0 {
        Color::Black
    } else {
        Color::White
    }
}
