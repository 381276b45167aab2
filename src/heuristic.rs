//! Static board evaluation used at the leaves of the minmax search.
//!
//! Every line of four cells on the board (a [`Window`]) is scored on its own
//! and the scores are summed up. Pieces in the center column earn an extra
//! bonus, as the center takes part in the most lines.

use serde::{Deserialize, Serialize};

use crate::game::{Gameboard, Piece, Window};

/// Points of the window and center patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Four own pieces.
    pub four: i64,
    /// Three own pieces and one empty cell.
    pub three: i64,
    /// Two own pieces and two empty cells.
    pub two: i64,
    /// Three opponent pieces and one empty cell. Usually negative.
    pub opponent_three: i64,
    /// Per own piece in the center column.
    pub center: i64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            four: 100,
            three: 5,
            two: 2,
            opponent_three: -4,
            center: 3,
        }
    }
}

fn count(window: &Window, cell: Option<Piece>) -> usize {
    window.iter().filter(|&&c| c == cell).count()
}

/// Scores a single window from the perspective of `piece`.
#[must_use]
pub fn evaluate_window(window: &Window, piece: Piece, weights: &HeuristicWeights) -> i64 {
    let own = count(window, Some(piece));
    let opponent = count(window, Some(piece.opponent()));
    let empty = count(window, None);

    let mut score = match (own, empty) {
        (4, _) => weights.four,
        (3, 1) => weights.three,
        (2, 2) => weights.two,
        _ => 0,
    };

    // not exclusive with the own patterns above
    if opponent == 3 && empty == 1 {
        score += weights.opponent_three;
    }

    score
}

/// Sums up all window scores of the board plus the center column bonus.
///
/// A positive score means the position looks good for `piece`.
#[must_use]
pub fn score_position<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    weights: &HeuristicWeights,
) -> i64 {
    let center = board.count_in_column(W / 2, piece) as i64 * weights.center;

    let windows: i64 = board
        .windows()
        .map(|window| evaluate_window(&window, piece, weights))
        .sum();

    center + windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    const X: Option<Piece> = Some(Piece::Cross);
    const O: Option<Piece> = Some(Piece::Nought);
    const E: Option<Piece> = None;

    fn eval(window: Window) -> i64 {
        evaluate_window(&window, Piece::Cross, &HeuristicWeights::default())
    }

    #[test]
    fn test_evaluate_window() {
        assert_eq!(eval([X, X, X, X]), 100);
        assert_eq!(eval([X, E, X, X]), 5);
        assert_eq!(eval([E, X, X, E]), 2);
        assert_eq!(eval([O, O, E, O]), -4);
        assert_eq!(eval([E, E, E, E]), 0);
        assert_eq!(eval([X, E, E, E]), 0);
        assert_eq!(eval([X, X, X, O]), 0);
        assert_eq!(eval([X, X, O, O]), 0);
        assert_eq!(eval([O, O, O, O]), 0);
    }

    #[test]
    fn test_evaluate_window_custom_weights() {
        let weights = HeuristicWeights {
            three: 50,
            opponent_three: -80,
            ..HeuristicWeights::default()
        };
        assert_eq!(evaluate_window(&[X, X, E, X], Piece::Cross, &weights), 50);
        assert_eq!(evaluate_window(&[X, X, E, X], Piece::Nought, &weights), -80);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Gameboard::<7, 6>::new();
        let weights = HeuristicWeights::default();
        assert_eq!(score_position(&board, Piece::Cross, &weights), 0);
        assert_eq!(score_position(&board, Piece::Nought, &weights), 0);
    }

    #[test]
    fn test_single_piece_only_counts_in_center() {
        let weights = HeuristicWeights::default();

        let mut board = Gameboard::<7, 6>::new();
        board.insert_piece(3, Piece::Cross).unwrap();
        assert_eq!(score_position(&board, Piece::Cross, &weights), 3);
        assert_eq!(score_position(&board, Piece::Nought, &weights), 0);

        let mut board = Gameboard::<7, 6>::new();
        board.insert_piece(0, Piece::Cross).unwrap();
        assert_eq!(score_position(&board, Piece::Cross, &weights), 0);
    }

    #[test]
    fn test_horizontal_pair() {
        let weights = HeuristicWeights::default();
        let mut board = Gameboard::<7, 6>::new();
        board.insert_piece(0, Piece::Cross).unwrap();
        board.insert_piece(1, Piece::Cross).unwrap();

        // only the bottom row window starting at col 0 holds both pieces
        let pairs = board
            .windows_in(Direction::Horizontal)
            .filter(|w| eval(*w) == 2)
            .count();
        assert_eq!(pairs, 1);
        assert_eq!(score_position(&board, Piece::Cross, &weights), 2);
    }

    #[test]
    fn test_open_three_is_penalized_for_opponent() {
        let weights = HeuristicWeights::default();
        let mut board = Gameboard::<7, 6>::new();
        for col in 0..3 {
            board.insert_piece(col, Piece::Nought).unwrap();
        }

        // [O O O -] is the only window with three O and a gap
        assert_eq!(score_position(&board, Piece::Cross, &weights), -4);
        // O sees the three (5) and the pair [O O - -] (2)
        assert_eq!(score_position(&board, Piece::Nought, &weights), 5 + 2);
    }
}
