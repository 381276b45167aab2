//! Game logic and game board.

use core::fmt;
use core::ops::Range;

use crate::error::GameboardError;

/// Number of pieces in a row to win the game.
pub const SERIES_LEN: usize = 4;

/// A straight line of [`SERIES_LEN`] cells.
pub type Window = [Option<Piece>; SERIES_LEN];

/// One of the two markers a player drops into the board.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Debug)]
pub enum Piece {
    /// `X`, played by the human in the CLI.
    Cross,
    /// `O`, played by the computer in the CLI.
    Nought,
}

impl Piece {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Cross => Self::Nought,
            Self::Nought => Self::Cross,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Cross => 'X',
            Self::Nought => 'O',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Direction of a line of cells, seen from its start cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    /// `-`
    Horizontal,
    /// `|`
    Vertical,
    /// `/`
    DiagonalUp,
    /// `\`
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DiagonalUp,
        Self::DiagonalDown,
    ];

    /// Row and column step from one cell of the line to the next.
    const fn step(self) -> (isize, usize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::DiagonalUp => (1, 1),
            Self::DiagonalDown => (-1, 1),
        }
    }

    /// Ranges of start rows and start columns whose line stays on a
    /// `W x H` board.
    const fn start_ranges(self, w: usize, h: usize) -> (Range<usize>, Range<usize>) {
        let last_row = h - SERIES_LEN + 1;
        let last_col = w - SERIES_LEN + 1;
        match self {
            Self::Horizontal => (0..h, 0..last_col),
            Self::Vertical => (0..last_row, 0..w),
            Self::DiagonalUp => (0..last_row, 0..last_col),
            Self::DiagonalDown => (SERIES_LEN - 1..h, 0..last_col),
        }
    }
}

/// The state after a piece was inserted into the board.
#[derive(Debug, PartialOrd, PartialEq, Clone, Copy, Eq)]
pub enum MoveOutcome {
    /// Game continues.
    Continue,
    /// The piece won with that insertion.
    Won(Piece),
    /// The board is full without a winner.
    Draw,
}

/// Game with all its state.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Game<const W: usize = 7, const H: usize = 6> {
    board: Gameboard<W, H>,
    round: usize,
}

impl<const W: usize, const H: usize> Game<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Gameboard::new(),
            round: 0,
        }
    }

    /// Inserts the piece and reports whether the game is over.
    pub fn play(&mut self, column: usize, piece: Piece) -> Result<MoveOutcome, GameboardError> {
        self.board.insert_piece(column, piece)?;
        self.round += 1;

        let outcome = if self.board.check_for_winner(piece) {
            MoveOutcome::Won(piece)
        } else if self.board.free_slots_in_total() == 0 {
            MoveOutcome::Draw
        } else {
            MoveOutcome::Continue
        };
        Ok(outcome)
    }

    #[must_use]
    pub const fn board(&self) -> &Gameboard<W, H> {
        &self.board
    }

    /// Number of pieces played so far.
    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }
}

impl<const W: usize, const H: usize> Default for Game<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Gameboard.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Gameboard<const W: usize = 7, const H: usize = 6>(
    /*
     * Board: rows --> col --> field
     * Technical indices correspond to the logical indices:
     * (row=0,col=0) <==> bottom left of game board
     */
    [[Option<Piece>; W]; H],
);

impl<const W: usize, const H: usize> Default for Gameboard<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Gameboard<W, H> {
    #[must_use]
    pub const fn new() -> Self {
        assert!(W >= SERIES_LEN);
        assert!(H >= SERIES_LEN);

        Self([[None; W]; H])
    }

    #[must_use]
    pub const fn cell(&self, row: usize, column: usize) -> Option<Piece> {
        self.0[row][column]
    }

    /// Whether a piece can be dropped into the column, i.e., its top cell is
    /// empty. Out-of-range columns are never valid.
    #[must_use]
    pub const fn is_valid_column(&self, column: usize) -> bool {
        column < W && self.0[H - 1][column].is_none()
    }

    /// Returns the index of the lowest empty row in the selected column.
    ///
    /// Returns `None` if there are no more free slots.
    #[must_use]
    pub fn next_open_row(&self, column: usize) -> Option<usize> {
        (0..H).find(|&row| self.0[row][column].is_none())
    }

    /// Writes the piece into the cell. Only debug builds check that the cell
    /// is the lowest free one of its column.
    ///
    /// The caller must pass the row returned by [`Self::next_open_row`].
    pub fn drop_piece(&mut self, row: usize, column: usize, piece: Piece) {
        debug_assert!(self.0[row][column].is_none(), "cell is occupied");
        debug_assert!(
            row == 0 || self.0[row - 1][column].is_some(),
            "piece would float"
        );
        self.0[row][column] = Some(piece);
    }

    /// Drops the piece into the column after validating the move.
    ///
    /// Returns the row the piece landed in.
    pub fn insert_piece(&mut self, column: usize, piece: Piece) -> Result<usize, GameboardError> {
        if column >= W {
            return Err(GameboardError::InvalidColumn(column));
        }

        let row = self
            .next_open_row(column)
            .ok_or(GameboardError::ColumnFull(column))?;
        self.drop_piece(row, column, piece);
        Ok(row)
    }

    /// Emits the column indices where moves are legal, in ascending order.
    pub fn valid_moves(&self) -> impl Iterator<Item = usize> {
        (0..W).filter(move |&col| self.is_valid_column(col))
    }

    /// Emits `(column, row)` of the cell the next piece of every legal move
    /// lands in, in ascending column order.
    pub fn open_slots(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..W).filter_map(move |col| self.next_open_row(col).map(|row| (col, row)))
    }

    /// Returns the number of free slots in the given column.
    #[must_use]
    pub fn free_slots_in_column(&self, column: usize) -> usize {
        self.next_open_row(column).map_or(0, |row| H - row)
    }

    /// Returns the number of free slots in total.
    #[must_use]
    pub fn free_slots_in_total(&self) -> usize {
        (0..W).map(|col| self.free_slots_in_column(col)).sum()
    }

    /// Number of cells in the column holding the piece.
    #[must_use]
    pub fn count_in_column(&self, column: usize, piece: Piece) -> usize {
        self.0
            .iter()
            .filter(|row| row[column] == Some(piece))
            .count()
    }

    /// Returns whether there are no legal moves left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.valid_moves().next().is_none()
    }

    /// The cells of the line starting at `(row, column)`. The line must fit
    /// on the board.
    #[must_use]
    pub fn window(&self, row: usize, column: usize, direction: Direction) -> Window {
        let (row_step, col_step) = direction.step();
        core::array::from_fn(|i| {
            let r = row.wrapping_add_signed(row_step * i as isize);
            self.0[r][column + col_step * i]
        })
    }

    /// All windows of one direction.
    pub fn windows_in(&self, direction: Direction) -> impl Iterator<Item = Window> {
        let (rows, cols) = direction.start_ranges(W, H);
        rows.flat_map(move |row| {
            cols.clone()
                .map(move |col| self.window(row, col, direction))
        })
    }

    /// All windows of the board, direction by direction.
    pub fn windows(&self) -> impl Iterator<Item = Window> {
        Direction::ALL
            .into_iter()
            .flat_map(move |direction| self.windows_in(direction))
    }

    fn check_for_winner_in(&self, direction: Direction, piece: Piece) -> bool {
        self.windows_in(direction)
            .any(|window| window.iter().all(|&cell| cell == Some(piece)))
    }

    /// Check if the piece has four in a row anywhere on the board.
    #[must_use]
    pub fn check_for_winner(&self, piece: Piece) -> bool {
        Direction::ALL
            .into_iter()
            .any(|direction| self.check_for_winner_in(direction, piece))
    }

    /// The piece that has four in a row, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Piece> {
        [Piece::Cross, Piece::Nought]
            .into_iter()
            .find(|&piece| self.check_for_winner(piece))
    }

    /// Whether the game is over: a win for either piece or a full board.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.check_for_winner(Piece::Cross) || self.check_for_winner(Piece::Nought) || self.is_full()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }
}

impl<const W: usize, const H: usize> fmt::Display for Gameboard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(2 * W + 2);

        write!(f, " ")?;
        for col in 0..W {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;

        // Top row first so that the board appears naturally.
        for row in self.0.iter().rev() {
            write!(f, "|")?;
            for cell in row {
                let symbol = cell.map_or('-', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f, " |")?;
        }
        write!(f, "{rule}")
    }
}
