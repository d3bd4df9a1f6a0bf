use std::fmt;

use crate::error::GameError;
use crate::types::{BOARD_SIZE, Cell, Color, NUM_SQUARES, Position};

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that color owns the
/// square; the two masks never overlap, so
/// `black_count + white_count + empty_count == 64` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Builds a board from raw masks. Squares set in both masks are rejected.
    pub fn from_bitboards(black: u64, white: u64) -> Result<Self, GameError> {
        if black & white != 0 {
            return Err(GameError::InvalidFixture(format!(
                "overlapping masks: {:#018x}",
                black & white
            )));
        }
        Ok(Self { black, white })
    }

    pub fn from_cells(cells: &[[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let square = bit(row * BOARD_SIZE + col);
                match cell {
                    Cell::Black => board.black |= square,
                    Cell::White => board.white |= square,
                    Cell::Empty => {}
                }
            }
        }
        board
    }

    /// Parses an 8-line snapshot of `B`, `W` and `.` symbols.
    /// Whitespace inside a line is ignored.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, GameError> {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(GameError::InvalidFixture(format!(
                    "row {row} has {} squares",
                    symbols.len()
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                cells[row][col] = Cell::from_symbol(symbol).ok_or_else(|| {
                    GameError::InvalidFixture(format!("unknown symbol {symbol:?} at ({row}, {col})"))
                })?;
            }
        }
        Ok(Self::from_cells(&cells))
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        ((self.black | self.white) & bit(pos.index())) == 0
    }

    /// Stores a disc on an empty square. Pure storage: legality is the
    /// validator's job.
    pub fn place(&mut self, pos: Position, color: Color) -> Result<(), GameError> {
        if !pos.is_on_board() {
            return Err(GameError::OutOfRange {
                row: pos.row,
                col: pos.col,
            });
        }
        if !self.is_empty(pos) {
            return Err(GameError::InvalidState(format!(
                "cannot place on occupied square {pos}"
            )));
        }
        *self.discs_mut(color) |= bit(pos.index());
        Ok(())
    }

    /// Recolors every square in `line` to `color`.
    /// Nothing is changed if any listed square is empty.
    pub fn apply_flips(&mut self, line: &[Position], color: Color) -> Result<(), GameError> {
        if let Some(pos) = line.iter().find(|pos| self.is_empty(**pos)) {
            return Err(GameError::InvalidState(format!(
                "flip line names empty square {pos}"
            )));
        }

        let mask = line.iter().fold(0u64, |acc, pos| acc | bit(pos.index()));
        *self.discs_mut(color) |= mask;
        *self.discs_mut(color.opposite()) &= !mask;
        Ok(())
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, color: Color) -> u8 {
        self.discs(color).count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.counts();
        NUM_SQUARES as u8 - black_count - white_count
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Clears the board and puts back the four center discs.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn to_cells(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all() {
            cells[pos.row as usize][pos.col as usize] = self.cell(pos);
        }
        cells
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, slot) in board.iter_mut().enumerate() {
            *slot = match self.cell(Position::from_index(idx)) {
                Cell::Empty => 0,
                Cell::Black => 1,
                Cell::White => 2,
            };
        }
        board
    }

    fn discs(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn discs_mut(&mut self, color: Color) -> &mut u64 {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_cells() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn bit(idx: usize) -> u64 {
    if idx < NUM_SQUARES { 1u64 << idx } else { 0 }
}
