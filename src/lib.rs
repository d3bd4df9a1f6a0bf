use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::choose_ai_move;
pub use board::Board;
pub use error::GameError;
pub use game::{GameConfig, GameInstance, MoveSelector};
pub use rules::{apply_move, has_any_legal_move, is_terminal, legal_moves, score, winner};
pub use types::{Cell, Color, FlipLine, GamePhase, Outcome, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
