//! Move validation, flip resolution, scoring and terminal detection.

use crate::board::Board;
use crate::error::GameError;
use crate::types::{Cell, Color, Direction, FlipLine, NUM_SQUARES, Outcome, Position};

/// Number of opponent discs bracketed by `color` when scanning from `pos`
/// in `dir`. Zero when the run hits the edge or an empty square, or when
/// the immediate neighbour is not an opponent disc.
fn run_length(board: &Board, color: Color, pos: Position, dir: Direction) -> usize {
    let mine = Cell::from(color);
    let theirs = Cell::from(color.opposite());
    let mut len = 0;
    let mut cursor = pos.step(dir);

    while let Some(square) = cursor {
        match board.cell(square) {
            cell if cell == theirs => len += 1,
            cell if cell == mine => return len,
            _ => return 0,
        }
        cursor = square.step(dir);
    }

    0
}

pub fn is_legal(board: &Board, color: Color, pos: Position) -> bool {
    pos.is_on_board()
        && board.is_empty(pos)
        && Direction::ALL
            .iter()
            .any(|&dir| run_length(board, color, pos, dir) > 0)
}

/// Opponent discs that flip if `color` plays `pos`, direction-major and
/// near-to-far. Empty when the move is illegal or off the board.
pub fn flips_for(board: &Board, color: Color, pos: Position) -> FlipLine {
    let mut flips = Vec::new();
    if !pos.is_on_board() || !board.is_empty(pos) {
        return flips;
    }

    for dir in Direction::ALL {
        let len = run_length(board, color, pos, dir);
        let mut cursor = pos;
        for _ in 0..len {
            match cursor.step(dir) {
                Some(next) => {
                    flips.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
    }

    flips
}

/// Legal squares for `color` in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Position> {
    Position::all()
        .filter(|&pos| is_legal(board, color, pos))
        .collect()
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    Position::all().any(|pos| is_legal(board, color, pos))
}

/// Places a disc for `color` at `pos` and flips the captured discs.
pub fn apply_move(board: &mut Board, color: Color, pos: Position) -> Result<FlipLine, GameError> {
    if !pos.is_on_board() {
        return Err(GameError::OutOfRange {
            row: pos.row,
            col: pos.col,
        });
    }

    let flips = flips_for(board, color, pos);
    if flips.is_empty() {
        if !has_any_legal_move(board, color) {
            return Err(GameError::NoLegalMoves(color));
        }
        return Err(GameError::IllegalMove {
            row: pos.row,
            col: pos.col,
        });
    }

    board.place(pos, color)?;
    board.apply_flips(&flips, color)?;
    Ok(flips)
}

/// Copy of `board` after `color` plays `pos`. The input is left untouched.
pub fn after_move(board: &Board, color: Color, pos: Position) -> Result<Board, GameError> {
    let mut next = *board;
    apply_move(&mut next, color, pos)?;
    Ok(next)
}

/// Returns `(black_count, white_count)`.
pub fn score(board: &Board) -> (u8, u8) {
    board.counts()
}

pub fn is_full(board: &Board) -> bool {
    let (black, white) = score(board);
    black as usize + white as usize == NUM_SQUARES
}

/// Full board, or neither color can move.
pub fn is_terminal(board: &Board) -> bool {
    is_full(board)
        || (!has_any_legal_move(board, Color::Black) && !has_any_legal_move(board, Color::White))
}

/// Decided by disc count. Meaningful once [`is_terminal`] holds.
pub fn winner(board: &Board) -> Outcome {
    let (black, white) = score(board);
    if black > white {
        Outcome::Win(Color::Black)
    } else if white > black {
        Outcome::Win(Color::White)
    } else {
        Outcome::Draw
    }
}
