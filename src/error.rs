use thiserror::Error;

use crate::types::{Color, GamePhase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Target occupied, or no direction brackets an opponent run.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },
    /// Caller contract violation: check `has_any_legal_move` first.
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
    /// Internal consistency violation; unreachable in correct operation.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },
    #[error("{action} is not allowed in phase {phase:?}")]
    WrongPhase {
        action: &'static str,
        phase: GamePhase,
    },
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("invalid board fixture: {0}")]
    InvalidFixture(String),
}
