use std::time::Instant;

use tracing::info;

use crate::config::SearchConfig;
use crate::minmax::{SearchResult, minmax_search, minmax_search_parallel};
use crate::{Game, Piece};

/// Picks the move of the computer playing `piece`.
///
/// The column of the result is `None` if the game has no legal move left.
#[must_use]
pub fn search_best_move<const W: usize, const H: usize>(
    game: &Game<W, H>,
    piece: Piece,
    config: &SearchConfig,
) -> SearchResult {
    let started = Instant::now();

    let result = if config.parallel {
        let Ok(result) =
            minmax_search_parallel(game.board(), piece, config.depth, &config.weights, &());
        result
    } else {
        minmax_search(game.board(), piece, config.depth, &config.weights)
    };

    info!(
        round = game.round(),
        %piece,
        column = ?result.column,
        score = result.score,
        elapsed = ?started.elapsed(),
        "computer picked a move"
    );
    result
}
