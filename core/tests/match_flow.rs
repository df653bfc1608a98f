// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flow: play a match against the AI, interrupt and resume it,
//! finish it, and archive it to the history log.

use sixline_core::archiver::{HistoryStore, ResumeStore};
use sixline_core::engine::{Difficulty, Engine};
use sixline_core::{Color, Coord, GameState, BOARD_SIZE};

use tempfile::TempDir;

#[test]
fn interrupted_match_resumes_and_archives() {
    let dir = TempDir::new().unwrap();
    let history = HistoryStore::new(dir.path(), BOARD_SIZE);
    let resume = ResumeStore::new(dir.path(), BOARD_SIZE);

    // Human (Black) opens, AI (White) answers.
    let mut game = GameState::new(BOARD_SIZE);
    let mut engine = Engine::with_seed(2024);
    game.place_stone(Coord::new(9, 9)).unwrap();
    engine.play(&mut game, Difficulty::Hard).unwrap();
    assert_eq!(game.current_player, Color::Black);

    // Session is interrupted; the slot holds the half-played match.
    resume.save(&game, Difficulty::Hard.mode(), 42).unwrap();
    let (mut game, mode, elapsed) = resume.load().unwrap();
    assert_eq!(mode, Difficulty::Hard.mode());
    assert_eq!(elapsed, 42);
    assert_eq!(game.moves.len(), 2);
    assert!(!game.finished);

    // Black walks row 0 to victory while White answers along row 17. The
    // AI's earlier reply landed next to (9,9), so neither row collides.
    for c in 0..5u8 {
        game.place_stone(Coord::new(0, c)).unwrap();
        game.place_stone(Coord::new(17, c)).unwrap();
    }
    game.place_stone(Coord::new(0, 5)).unwrap();
    assert!(game.finished);
    assert_eq!(game.winner, Some(Color::Black));

    // Finished matches go to the log and free the resume slot.
    history.append(&game).unwrap();
    resume.clear().unwrap();
    assert!(!resume.exists());
    assert_eq!(history.count(), 1);

    let replay = history.load(0).unwrap();
    assert!(replay.finished);
    assert_eq!(replay.winner, Some(Color::Black));
    assert_eq!(replay.moves, game.moves);
}

#[test]
fn ai_undo_returns_the_turn_to_the_human() {
    // In AI modes one logical undo action pops the AI's answer and the
    // human's move, then bumps the counter once.
    let mut game = GameState::new(BOARD_SIZE);
    let mut engine = Engine::with_seed(5);

    game.place_stone(Coord::new(3, 3)).unwrap();
    engine.play(&mut game, Difficulty::Medium).unwrap();
    assert_eq!(game.moves.len(), 2);

    game.undo_last_move().unwrap();
    game.undo_last_move().unwrap();
    game.record_undo();

    assert!(game.moves.is_empty());
    assert_eq!(game.current_player, Color::Black);
    assert_eq!(game.undo_count, 1);
}
