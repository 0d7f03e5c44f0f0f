//! Tests for outcome evaluation across whole board families.

use noughts_engine::rules::WIN_LINES;
use noughts_engine::{Board, Mark, Outcome, Position, Square, evaluate};

/// Every board reachable by filling squares with X, O or nothing.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(9)).map(|mut code| {
        let mut board = Board::new();
        for pos in Position::ALL {
            let square = match code % 3 {
                0 => Square::Empty,
                1 => Square::Occupied(Mark::X),
                _ => Square::Occupied(Mark::O),
            };
            board.set(pos, square);
            code /= 3;
        }
        board
    })
}

fn holds_line(board: &Board, mark: Mark) -> bool {
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == Square::Occupied(mark)))
}

fn is_full(board: &Board) -> bool {
    board.occupied_count() == 9
}

#[test]
fn test_single_line_owner_wins() {
    for board in all_boards() {
        let x = holds_line(&board, Mark::X);
        let o = holds_line(&board, Mark::O);
        match (x, o) {
            (true, false) => assert_eq!(evaluate(&board), Outcome::Win(Mark::X), "{:?}", board),
            (false, true) => assert_eq!(evaluate(&board), Outcome::Win(Mark::O), "{:?}", board),
            // Both marks holding a line is unreachable; only totality matters.
            (true, true) => assert!(matches!(evaluate(&board), Outcome::Win(_))),
            (false, false) => {}
        }
    }
}

#[test]
fn test_full_board_without_line_is_tie() {
    for board in all_boards().filter(is_full) {
        if !holds_line(&board, Mark::X) && !holds_line(&board, Mark::O) {
            assert_eq!(evaluate(&board), Outcome::Tie, "{:?}", board);
        }
    }
}

#[test]
fn test_open_board_without_line_is_none() {
    for board in all_boards().filter(|b| !is_full(b)) {
        if !holds_line(&board, Mark::X) && !holds_line(&board, Mark::O) {
            assert_eq!(evaluate(&board), Outcome::None, "{:?}", board);
        }
    }
}

#[test]
fn test_win_ignores_other_squares() {
    let board: Board = "OXO XXX O.O".parse().expect("valid board");
    assert_eq!(evaluate(&board), Outcome::Win(Mark::X));
}
