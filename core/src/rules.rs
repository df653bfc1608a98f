// SPDX-License-Identifier: MIT OR Apache-2.0

//! Win detection and run counting

use crate::{board::Board, Color, Coord, WIN_LENGTH};

/// The four scan axes: horizontal, vertical, down-right and up-right diagonals.
/// The opposite signed directions are covered by scanning both ways.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Check whether the stone at `last` completes a winning run.
///
/// Counts contiguous same-color stones through `last` along each of the four
/// axes (both signed directions, origin counted once) and reports a win when
/// any count reaches [`WIN_LENGTH`]. Returns `false` for an empty cell.
pub fn check_win(board: &Board, last: Coord) -> bool {
    let color = match board.get(last) {
        Some(color) => color,
        None => return false,
    };

    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_through(board, last, color, dr, dc) >= WIN_LENGTH)
}

/// Length of the contiguous `color` run through `origin` along one axis, as if
/// a `color` stone stood at `origin`. The origin counts once; both signed
/// directions are summed. Works on an empty origin, which is how hypothetical
/// placements are scored without touching the board.
pub fn run_through(board: &Board, origin: Coord, color: Color, dr: i32, dc: i32) -> usize {
    1 + count_from(board, origin, color, dr, dc) + count_from(board, origin, color, -dr, -dc)
}

/// Contiguous `color` stones strictly after `origin` in one signed direction
fn count_from(board: &Board, origin: Coord, color: Color, dr: i32, dc: i32) -> usize {
    let size = board.size() as i32;
    let mut count = 0;
    let mut row = origin.row as i32 + dr;
    let mut col = origin.col as i32 + dc;

    while row >= 0 && row < size && col >= 0 && col < size {
        if board.get(Coord::new(row as u8, col as u8)) != Some(color) {
            break;
        }
        count += 1;
        row += dr;
        col += dc;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Coord, GameState, BOARD_SIZE};

    fn board_with_row(color: Color, row: u8, cols: std::ops::Range<u8>) -> Board {
        let mut board = Board::new(BOARD_SIZE);
        for col in cols {
            board.place(Coord::new(row, col), color);
        }
        board
    }

    #[test]
    fn five_in_a_row_is_not_a_win() {
        let board = board_with_row(Color::Black, 0, 0..5);
        assert!(!check_win(&board, Coord::new(0, 4)));
    }

    #[test]
    fn six_in_a_row_wins_each_axis() {
        // Horizontal
        let board = board_with_row(Color::Black, 3, 2..8);
        assert!(check_win(&board, Coord::new(3, 5)));

        // Vertical
        let mut board = Board::new(BOARD_SIZE);
        for row in 4..10u8 {
            board.place(Coord::new(row, 7), Color::White);
        }
        assert!(check_win(&board, Coord::new(9, 7)));

        // Down-right diagonal
        let mut board = Board::new(BOARD_SIZE);
        for i in 0..6u8 {
            board.place(Coord::new(i, i), Color::Black);
        }
        assert!(check_win(&board, Coord::new(0, 0)));

        // Up-right diagonal
        let mut board = Board::new(BOARD_SIZE);
        for i in 0..6u8 {
            board.place(Coord::new(10 - i, 2 + i), Color::White);
        }
        assert!(check_win(&board, Coord::new(7, 5)));
    }

    #[test]
    fn seven_in_a_row_still_wins() {
        let board = board_with_row(Color::Black, 0, 0..7);
        assert!(check_win(&board, Coord::new(0, 3)));
    }

    #[test]
    fn empty_origin_is_never_a_win() {
        let board = board_with_row(Color::Black, 0, 0..6);
        assert!(!check_win(&board, Coord::new(5, 5)));
    }

    #[test]
    fn run_through_counts_hypothetical_placement() {
        // Gap at (0,2) between two black pairs: placing there makes a run of 5.
        let mut board = Board::new(BOARD_SIZE);
        for col in [0u8, 1, 3, 4] {
            board.place(Coord::new(0, col), Color::Black);
        }
        assert_eq!(run_through(&board, Coord::new(0, 2), Color::Black, 0, 1), 5);
        assert_eq!(run_through(&board, Coord::new(0, 2), Color::White, 0, 1), 1);
    }

    #[test]
    fn concrete_win_and_undo_scenario() {
        // Black at (0,0..4), White elsewhere, then Black at (0,5).
        let mut game = GameState::new(BOARD_SIZE);
        for c in 0..5u8 {
            game.place_stone(Coord::new(0, c)).unwrap();
            game.place_stone(Coord::new(10, c)).unwrap();
        }
        game.place_stone(Coord::new(0, 5)).unwrap();
        assert!(game.finished);
        assert_eq!(game.winner, Some(Color::Black));

        game.undo_last_move().unwrap();
        assert!(!game.finished);
        assert_eq!(game.winner, None);
        assert_eq!(game.current_player, Color::Black);
        assert_eq!(game.board.get(Coord::new(0, 5)), None);
    }
}
