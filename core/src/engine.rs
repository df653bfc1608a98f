// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic AI move selection
//!
//! The engine is a bounded greedy heuristic, not a searcher: it rates empty
//! cells by local run lengths and plays the best one, with a layered
//! win/block/threat pass at the hardest tier. Hypothetical placements are
//! evaluated on scratch copies so the live state is untouched until the
//! final decision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rules::{self, DIRECTIONS};
use crate::{Coord, GameState, WIN_LENGTH};

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Uniform-random placement
    Easy,
    /// Local run scoring with random jitter
    Medium,
    /// Win, block, and threat passes before falling back to scoring
    Hard,
}

impl Difficulty {
    /// Map a persisted session mode to a tier. Mode 1 is two-human and has
    /// no AI; modes 2..=4 select increasing difficulty.
    pub fn from_mode(mode: i32) -> Option<Self> {
        match mode {
            2 => Some(Difficulty::Easy),
            3 => Some(Difficulty::Medium),
            4 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The session mode encoding this tier
    pub fn mode(&self) -> i32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

/// Score awarded for a run that wins outright
const WIN_BONUS: i64 = 100_000;
/// Score awarded for a run that denies the opponent a win
const BLOCK_BONUS: i64 = 90_000;
/// Tie-break jitter bound at Medium
const MEDIUM_JITTER: i64 = 5;
/// Tie-break jitter bound for the Hard fallback
const HARD_JITTER: i64 = 3;

/// AI opponent holding its own randomness source.
///
/// The RNG is an explicit handle seeded once at construction, so tests can
/// pin the engine's tie-breaking with [`Engine::with_seed`].
pub struct Engine {
    rng: StdRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed seed for deterministic play
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose and place one stone for the current player.
    ///
    /// Returns the coordinate played, or `None` without mutating anything
    /// when the match is finished or no empty cell remains.
    pub fn play(&mut self, game: &mut GameState, tier: Difficulty) -> Option<Coord> {
        if game.finished || game.is_full() {
            return None;
        }

        let coord = match tier {
            Difficulty::Easy => self.random_cell(game)?,
            Difficulty::Medium => self
                .best_scored_cell(game, MEDIUM_JITTER)
                .or_else(|| self.random_cell(game))?,
            Difficulty::Hard => self.hard_cell(game)?,
        };

        match game.place_stone(coord) {
            Ok(()) => {
                tracing::debug!("AI ({:?}) placed at ({}, {})", tier, coord.row, coord.col);
                Some(coord)
            }
            Err(err) => {
                tracing::warn!("AI chose an unplayable cell {:?}: {}", coord, err);
                None
            }
        }
    }

    /// Uniform-random empty cell
    fn random_cell(&mut self, game: &GameState) -> Option<Coord> {
        let empties = game.board.empty_coords();
        if empties.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..empties.len());
        Some(empties[pick])
    }

    /// Highest-scoring empty cell in row-major order, with additive jitter.
    /// Strict-greater comparison keeps the first cell attaining the maximum.
    fn best_scored_cell(&mut self, game: &GameState, jitter: i64) -> Option<Coord> {
        let mut best: Option<(Coord, i64)> = None;
        for coord in game.board.empty_coords() {
            let score = position_score(game, coord) + self.rng.gen_range(0..jitter);
            let improved = match best {
                None => true,
                Some((_, top)) => score > top,
            };
            if improved {
                best = Some((coord, score));
            }
        }
        best.map(|(coord, _)| coord)
    }

    /// Layered Hard policy: immediate win, immediate block, threat
    /// suppression, then the scored fallback.
    fn hard_cell(&mut self, game: &mut GameState) -> Option<Coord> {
        let me = game.current_player;
        let opp = me.opposite();

        // Pass 1+2: simulate each empty cell on a scratch copy, once as our
        // stone and once as the opponent's. A winning cell ends the scan; the
        // first blocking cell is remembered in case no win exists.
        let mut block: Option<Coord> = None;
        for coord in game.board.empty_coords() {
            let mut scratch = game.clone();
            if scratch.place_stone(coord).is_ok() && scratch.winner == Some(me) {
                return Some(coord);
            }

            if block.is_none() {
                let mut scratch = game.clone();
                scratch.current_player = opp;
                if scratch.place_stone(coord).is_ok() && scratch.winner == Some(opp) {
                    block = Some(coord);
                }
            }
        }
        if block.is_some() {
            return block;
        }

        // Pass 3: pre-empt a developing threat. Find the cell where the
        // opponent would build the longest run; block it once it could reach
        // WIN_LENGTH - 2.
        let mut threat: Option<(Coord, usize)> = None;
        for coord in game.board.empty_coords() {
            let reach = DIRECTIONS
                .iter()
                .map(|&(dr, dc)| rules::run_through(&game.board, coord, opp, dr, dc))
                .max()
                .unwrap_or(1);
            let improved = match threat {
                None => true,
                Some((_, top)) => reach > top,
            };
            if improved {
                threat = Some((coord, reach));
            }
        }
        let threshold = WIN_LENGTH.saturating_sub(2).max(2);
        if let Some((coord, reach)) = threat {
            if reach >= threshold {
                return Some(coord);
            }
        }

        self.best_scored_cell(game, HARD_JITTER)
            .or_else(|| self.random_cell(game))
    }
}

/// Local score of placing the current player's stone at `coord`: the sum over
/// the four axes of `own_run² × 10` and `opponent_run² × 9`, with large flat
/// bonuses when a run reaches [`WIN_LENGTH`] (an outright win outweighs a
/// block).
fn position_score(game: &GameState, coord: Coord) -> i64 {
    let me = game.current_player;
    let opp = me.opposite();

    let mut score = 0i64;
    for &(dr, dc) in DIRECTIONS.iter() {
        let own = rules::run_through(&game.board, coord, me, dr, dc);
        let theirs = rules::run_through(&game.board, coord, opp, dr, dc);

        score += if own >= WIN_LENGTH {
            WIN_BONUS
        } else {
            (own * own * 10) as i64
        };
        score += if theirs >= WIN_LENGTH {
            BLOCK_BONUS
        } else {
            (theirs * theirs * 9) as i64
        };
    }
    score
}
