//! Depth-limited minmax search.
//!
//! The search explores every line of play up to the given depth without any
//! pruning. Won or lost positions are scored with [`WIN_SCORE`], positions at
//! the depth limit with the static evaluation of [`crate::heuristic`]. All
//! scores are from the perspective of the piece the search runs for.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::error::SearchError;
use crate::game::{Gameboard, Piece};
use crate::heuristic::{HeuristicWeights, score_position};

/// Score of a won position. Large enough that no sum of window scores can
/// come close to it.
pub const WIN_SCORE: i64 = 100_000_000_000_000;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best column, `None` if there was no legal move or no move was
    /// searched.
    pub column: Option<usize>,
    /// pos: good for the searching piece, neg: good for the opponent
    pub score: i64,
}

impl SearchResult {
    const fn leaf(score: i64) -> Self {
        Self {
            column: None, /* upper level knows col */
            score,
        }
    }
}

/// Counters of a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, including the root.
    pub nodes: u64,
    /// Positions scored by the heuristic.
    pub leaf_evaluations: u64,
}

impl core::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaf_evaluations += rhs.leaf_evaluations;
    }
}

/// Polled by the search before every move it tries.
pub trait Interrupt {
    type Error;

    fn check(&self) -> Result<(), Self::Error>;
}

/// Never interrupts.
impl Interrupt for () {
    type Error = Infallible;

    fn check(&self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Shared flag to abort a running search from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Interrupt for CancelToken {
    type Error = SearchError;

    fn check(&self) -> Result<(), SearchError> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Minmax searcher for one piece.
#[derive(Debug)]
pub struct Minmax<'a, I: ?Sized = ()> {
    piece: Piece,
    weights: &'a HeuristicWeights,
    interrupt: &'a I,
    stats: SearchStats,
}

impl<'a> Minmax<'a> {
    #[must_use]
    pub const fn new(piece: Piece, weights: &'a HeuristicWeights) -> Self {
        Self::with_interrupt(piece, weights, &())
    }
}

impl<'a, I: Interrupt + ?Sized> Minmax<'a, I> {
    #[must_use]
    pub const fn with_interrupt(piece: Piece, weights: &'a HeuristicWeights, interrupt: &'a I) -> Self {
        Self {
            piece,
            weights,
            interrupt,
            stats: SearchStats {
                nodes: 0,
                leaf_evaluations: 0,
            },
        }
    }

    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches the best column for the piece, which is about to move.
    pub fn search<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
    ) -> Result<SearchResult, I::Error> {
        self.minmax(board, depth, true)
    }

    /// Recursive minmax logic including the recursion end conditions and the
    /// evaluation of winning/losing positions.
    fn minmax<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        maximizing: bool,
    ) -> Result<SearchResult, I::Error> {
        self.stats.nodes += 1;

        if board.is_terminal() {
            let score = if board.check_for_winner(self.piece) {
                WIN_SCORE
            } else if board.check_for_winner(self.piece.opponent()) {
                -WIN_SCORE
            } else {
                // draw
                0
            };
            return Ok(SearchResult::leaf(score));
        }

        if depth == 0 {
            self.stats.leaf_evaluations += 1;
            let score = score_position(board, self.piece, self.weights);
            return Ok(SearchResult::leaf(score));
        }

        if maximizing {
            self.minmax_step(board, depth, self.piece, i64::MIN, |new, best| new > best)
        } else {
            self.minmax_step(board, depth, self.piece.opponent(), i64::MAX, |new, best| {
                new < best
            })
        }
    }

    /// Tries every legal move of `mover` in ascending column order and keeps
    /// the first column with the best score.
    fn minmax_step<const W: usize, const H: usize>(
        &mut self,
        board: &Gameboard<W, H>,
        depth: usize,
        mover: Piece,
        initial_score: i64,
        better_score: impl Fn(i64, i64) -> bool,
    ) -> Result<SearchResult, I::Error> {
        let maximizing = mover == self.piece;
        let mut best = SearchResult {
            column: board.valid_moves().next(),
            score: initial_score,
        };

        for (col, row) in board.open_slots() {
            self.interrupt.check()?;

            let mut child = *board;
            child.drop_piece(row, col, mover);

            let SearchResult { score, .. } = self.minmax(&child, depth - 1, !maximizing)?;
            if better_score(score, best.score) {
                best = SearchResult {
                    column: Some(col),
                    score,
                };
            }
        }

        Ok(best)
    }
}

fn log_search(piece: Piece, depth: usize, result: &SearchResult, stats: SearchStats) {
    debug!(
        %piece,
        depth,
        column = ?result.column,
        score = result.score,
        nodes = stats.nodes,
        leaf_evaluations = stats.leaf_evaluations,
        "minmax search finished"
    );
}

/// Searches the best column for `piece`, which is about to move.
///
/// The column is `None` only if the board has no legal move or `depth` is 0.
#[must_use]
pub fn minmax_search<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    depth: usize,
    weights: &HeuristicWeights,
) -> SearchResult {
    let mut minmax = Minmax::new(piece, weights);
    let Ok(result) = minmax.search(board, depth);
    log_search(piece, depth, &result, minmax.stats());
    result
}

/// Like [`minmax_search`] but gives up as soon as the token is cancelled.
pub fn minmax_search_cancellable<const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    depth: usize,
    weights: &HeuristicWeights,
    token: &CancelToken,
) -> Result<SearchResult, SearchError> {
    let mut minmax = Minmax::with_interrupt(piece, weights, token);
    let result = minmax.search(board, depth)?;
    log_search(piece, depth, &result, minmax.stats());
    Ok(result)
}

/// Searches the subtrees of the root moves on the rayon thread pool.
///
/// Each subtree runs the sequential search on its own board copy. The scores
/// are compared in column order afterwards, so the result is the same as the
/// one of [`minmax_search`].
pub fn minmax_search_parallel<I, const W: usize, const H: usize>(
    board: &Gameboard<W, H>,
    piece: Piece,
    depth: usize,
    weights: &HeuristicWeights,
    interrupt: &I,
) -> Result<SearchResult, I::Error>
where
    I: Interrupt + Sync + ?Sized,
    I::Error: Send,
{
    if depth == 0 || board.is_terminal() {
        let mut minmax = Minmax::with_interrupt(piece, weights, interrupt);
        let result = minmax.search(board, depth)?;
        log_search(piece, depth, &result, minmax.stats());
        return Ok(result);
    }

    let slots = board.open_slots().collect::<Vec<_>>();
    let subtrees = slots
        .par_iter()
        .map(|&(col, row)| -> Result<_, I::Error> {
            interrupt.check()?;

            let mut child = *board;
            child.drop_piece(row, col, piece);

            let mut minmax = Minmax::with_interrupt(piece, weights, interrupt);
            let SearchResult { score, .. } = minmax.minmax(&child, depth - 1, false)?;
            Ok((col, score, minmax.stats()))
        })
        .collect::<Result<Vec<_>, I::Error>>()?;

    let mut stats = SearchStats {
        nodes: 1,
        leaf_evaluations: 0,
    };
    let mut best = SearchResult {
        column: board.valid_moves().next(),
        score: i64::MIN,
    };
    for (col, score, subtree_stats) in subtrees {
        stats += subtree_stats;
        if score > best.score {
            best = SearchResult {
                column: Some(col),
                score,
            };
        }
    }

    log_search(piece, depth, &best, stats);
    Ok(best)
}
