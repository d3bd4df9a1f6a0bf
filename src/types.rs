use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Disc color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Host-facing player id: 1=black, 2=white.
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::White => f.write_str("white"),
        }
    }
}

/// Occupancy of a single square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Color::Black),
            Self::White => Some(Color::White),
        }
    }

    /// Fixture symbol: `B`, `W` or `.`.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Black => 'B',
            Self::White => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'B' | 'b' => Some(Self::Black),
            'W' | 'w' => Some(Self::White),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// A board coordinate. `(0, 0)` is a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Caller guarantees `row < 8 && col < 8`; use [`Position::checked`] for host input.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn checked(row: u8, col: u8) -> Result<Self, GameError> {
        let pos = Self { row, col };
        if !pos.is_on_board() {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(pos)
    }

    pub fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < NUM_SQUARES);
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    /// Neighbour one step away in `dir`, or `None` off the board.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let row = self.row as i8 + dir.dr;
        let col = self.col as i8 + dir.dc;
        let range = 0..BOARD_SIZE as i8;
        if range.contains(&row) && range.contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_SQUARES).map(Self::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the eight compass offsets used for line scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction { dr: -1, dc: -1 },
        Direction { dr: -1, dc: 0 },
        Direction { dr: -1, dc: 1 },
        Direction { dr: 0, dc: -1 },
        Direction { dr: 0, dc: 1 },
        Direction { dr: 1, dc: -1 },
        Direction { dr: 1, dc: 0 },
        Direction { dr: 1, dc: 1 },
    ];
}

/// Opponent discs captured by one move, direction-major and near-to-far.
pub type FlipLine = Vec<Position>;

/// Where the turn state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Playing,
    AwaitingFlip,
    TurnChange,
    Pass,
    Win,
    Draw,
    GameOver,
}

/// Final verdict on a terminal board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Color),
    Draw,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<u8>,
    pub current_player: u8,
    pub human_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub phase: GamePhase,
    pub is_game_over: bool,
    /// `true` while the side to move has no legal move and must pass.
    pub is_pass: bool,
    /// Discs recoloured by the most recent move; empty after a pass.
    pub flipped: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0 on a draw, otherwise the winner's player id.
    pub winner: u8,
    pub black_count: u8,
    pub white_count: u8,
}
