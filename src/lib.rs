//! _Connect Four_ against the computer.
//!
//! The computer looks for its moves with a depth-limited minmax search
//! ([`minmax`]) that scores the positions at the depth limit with a
//! sliding-window heuristic ([`heuristic`]).

#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from,
    clippy::multiple_crate_versions
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

mod ai_player;
pub mod config;
pub mod error;
mod game;
pub mod heuristic;
pub mod minmax;

pub use ai_player::search_best_move;
pub use error::{ConfigError, GameboardError, SearchError};
pub use game::{Direction, Game, Gameboard, MoveOutcome, Piece, SERIES_LEN, Window};
pub use minmax::{SearchResult, WIN_SCORE, minmax_search};
