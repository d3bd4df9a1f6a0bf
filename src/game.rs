use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::choose_ai_move;
use crate::board::Board;
use crate::error::GameError;
use crate::rules;
use crate::types::{Color, FlipLine, GamePhase, GameResult, GameState, Outcome, Position};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position>;
}

/// The positional heuristic with corner priority and tiered tie-breaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector;

impl MoveSelector for HeuristicSelector {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position> {
        choose_ai_move(board, color)
            .inspect_err(|err| debug!(%err, %color, "heuristic selector found no move"))
            .ok()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position> {
        rules::legal_moves(board, color).first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The AI plays the other color. Black moves first.
    pub human_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_color: Color::Black,
        }
    }
}

/// A single in-memory game between a human and the AI.
///
/// Each step of a turn is an explicit transition so the host can pace the
/// animation: `Playing -> AwaitingFlip -> TurnChange -> Playing | Pass |
/// GameOver`, and `GameOver -> Win | Draw` once the result is read.
pub struct GameInstance {
    board: Board,
    config: GameConfig,
    current: Color,
    phase: GamePhase,
    pending: Option<FlipLine>,
    flipped: FlipLine,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            config,
            current: Color::Black,
            phase: GamePhase::Playing,
            pending: None,
            flipped: Vec::new(),
            selector,
        }
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(HeuristicSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_color(&self) -> Color {
        self.current
    }

    pub fn human_color(&self) -> Color {
        self.config.human_color
    }

    pub fn ai_color(&self) -> Color {
        self.config.human_color.opposite()
    }

    pub fn last_flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn is_game_over(&self) -> bool {
        matches!(
            self.phase,
            GamePhase::GameOver | GamePhase::Win | GamePhase::Draw
        )
    }

    /// Legal squares for the side to move.
    pub fn legal_moves(&self) -> Vec<Position> {
        rules::legal_moves(&self.board, self.current)
    }

    /// Human click on `(row, col)`.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Playing, "place")?;
        if self.current != self.human_color() {
            return Err(GameError::NotYourTurn(self.human_color()));
        }

        let pos = Position::checked(row, col)?;
        self.put(pos)
    }

    /// Lets the AI choose and place its disc.
    pub fn play_ai(&mut self) -> Result<Position, GameError> {
        self.expect_phase(GamePhase::Playing, "play_ai")?;
        let ai = self.ai_color();
        if self.current != ai {
            return Err(GameError::NotYourTurn(ai));
        }
        if !rules::has_any_legal_move(&self.board, ai) {
            return Err(GameError::NoLegalMoves(ai));
        }

        let selected = self
            .selector
            .select_move(&self.board, ai)
            .ok_or_else(|| GameError::InvalidState("AI could not select a move".to_string()))?;
        if !rules::is_legal(&self.board, ai, selected) {
            return Err(GameError::InvalidState(format!(
                "AI selected an illegal move {selected}"
            )));
        }

        self.put(selected)?;
        Ok(selected)
    }

    /// Recolors the discs captured by the pending move.
    pub fn resolve_flips(&mut self) -> Result<&[Position], GameError> {
        self.expect_phase(GamePhase::AwaitingFlip, "resolve_flips")?;
        let flips = self
            .pending
            .take()
            .ok_or_else(|| GameError::InvalidState("no pending move to flip".to_string()))?;

        self.board.apply_flips(&flips, self.current)?;
        self.flipped = flips;

        self.phase = if rules::is_full(&self.board) {
            self.log_game_over();
            GamePhase::GameOver
        } else {
            GamePhase::TurnChange
        };

        Ok(&self.flipped)
    }

    /// Hands the move to the other color and works out what it can do.
    pub fn change_turn(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::TurnChange, "change_turn")?;
        self.current = self.current.opposite();
        self.phase = self.detect_phase();
        Ok(self.phase)
    }

    /// Skips the side to move, which has no legal square.
    pub fn pass(&mut self) -> Result<GamePhase, GameError> {
        self.expect_phase(GamePhase::Pass, "pass")?;
        self.flipped.clear();
        self.current = self.current.opposite();
        self.phase = self.detect_phase();
        Ok(self.phase)
    }

    /// Settles a finished game into `Win` or `Draw`.
    pub fn conclude(&mut self) -> Result<Outcome, GameError> {
        self.expect_phase(GamePhase::GameOver, "conclude")?;
        let outcome = rules::winner(&self.board);
        self.phase = match outcome {
            Outcome::Win(_) => GamePhase::Win,
            Outcome::Draw => GamePhase::Draw,
        };
        Ok(outcome)
    }

    /// Outcome once the game has been concluded.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Win | GamePhase::Draw => Some(rules::winner(&self.board)),
            _ => None,
        }
    }

    /// Runs every step that needs no human input. Stops when the human is
    /// to move or the game has been concluded, and returns that phase.
    pub fn advance(&mut self) -> Result<GamePhase, GameError> {
        loop {
            match self.phase {
                GamePhase::AwaitingFlip => {
                    self.resolve_flips()?;
                }
                GamePhase::TurnChange => {
                    self.change_turn()?;
                }
                GamePhase::Pass => {
                    self.pass()?;
                }
                GamePhase::GameOver => {
                    self.conclude()?;
                }
                GamePhase::Playing if self.current == self.ai_color() => {
                    self.play_ai()?;
                }
                GamePhase::Playing | GamePhase::Win | GamePhase::Draw => return Ok(self.phase),
            }
        }
    }

    /// Starts over from the four center discs with Black to move.
    pub fn restart(&mut self) {
        self.board.reset();
        self.current = Color::Black;
        self.pending = None;
        self.flipped.clear();
        self.phase = GamePhase::Playing;
        debug!(human = %self.human_color(), "game restarted");
    }

    /// Swaps which side the human plays, then restarts.
    pub fn change_first_player(&mut self) {
        self.config.human_color = self.config.human_color.opposite();
        self.restart();
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.counts();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current.to_u8(),
            human_player: self.human_color().to_u8(),
            black_count,
            white_count,
            phase: self.phase,
            is_game_over: self.is_game_over(),
            is_pass: self.phase == GamePhase::Pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.counts();
        GameResult {
            winner: match rules::winner(&self.board) {
                Outcome::Win(color) => color.to_u8(),
                Outcome::Draw => 0,
            },
            black_count,
            white_count,
        }
    }

    fn put(&mut self, pos: Position) -> Result<(), GameError> {
        let flips = rules::flips_for(&self.board, self.current, pos);
        if flips.is_empty() {
            return Err(GameError::IllegalMove {
                row: pos.row,
                col: pos.col,
            });
        }

        self.board.place(pos, self.current)?;
        self.pending = Some(flips);
        self.phase = GamePhase::AwaitingFlip;
        Ok(())
    }

    fn detect_phase(&self) -> GamePhase {
        if rules::has_any_legal_move(&self.board, self.current) {
            GamePhase::Playing
        } else if rules::has_any_legal_move(&self.board, self.current.opposite()) {
            debug!(color = %self.current, "no legal move, pass");
            GamePhase::Pass
        } else {
            self.log_game_over();
            GamePhase::GameOver
        }
    }

    fn expect_phase(&self, expected: GamePhase, action: &'static str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn log_game_over(&self) {
        let (black, white) = self.board.counts();
        debug!(black, white, "game over");
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: Color) {
        self.board = board;
        self.current = current;
        self.pending = None;
        self.flipped.clear();
        self.phase = self.detect_phase();
    }
}
