use serde::Serialize;

use crate::ai::zone::Zone;
use crate::board::Board;
use crate::error::GameError;
use crate::rules;
use crate::types::{Color, Position};

/// How many ways the watched color could claim a sensitive empty square on
/// its next turn, summed over all of its legal replies.
///
/// The three counts use disjoint zones: `side` covers only [`Zone::Side`],
/// so a reply that takes a corner or an edge X-square is not also counted
/// as a side exposure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Exposure {
    pub corner: u32,
    pub around: u32,
    pub side: u32,
}

/// Looks one reply ahead from `board` (a position after a candidate move)
/// for `watched`. `board` is only read; every reply is played on a copy.
pub fn simulate(board: &Board, watched: Color) -> Result<Exposure, GameError> {
    let empty_in = |zone: Zone| -> Vec<Position> {
        zone.squares().filter(|&pos| board.is_empty(pos)).collect()
    };
    let empty_corners = empty_in(Zone::Corner);
    let empty_around = empty_in(Zone::XSquare);
    let empty_sides = empty_in(Zone::Side);

    let mut exposure = Exposure::default();
    for reply in rules::legal_moves(board, watched) {
        let next = rules::after_move(board, watched, reply)?;
        let claimed = |squares: &[Position]| -> u32 {
            squares
                .iter()
                .filter(|&&pos| next.cell(pos).color() == Some(watched))
                .count() as u32
        };

        exposure.corner += claimed(&empty_corners);
        exposure.around += claimed(&empty_around);
        exposure.side += claimed(&empty_sides);
    }

    Ok(exposure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_replies_expose_nothing() {
        let board = Board::new();

        let exposure = simulate(&board, Color::White).unwrap();

        assert_eq!(exposure, Exposure::default());
    }

    #[test]
    fn counts_a_reply_that_takes_a_corner() {
        let board = Board::from_rows([
            "........",
            ".B......",
            "..B.....",
            "...W....",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        let exposure = simulate(&board, Color::White).unwrap();

        assert_eq!(
            exposure,
            Exposure {
                corner: 1,
                around: 0,
                side: 0
            }
        );
    }

    #[test]
    fn counts_x_square_and_side_replies_separately() {
        let board = Board::from_rows([
            "........",
            "........",
            ".....B..",
            ".BW.W...",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        // White can reply at (1,6) next to a corner and at (3,0) on the side.
        assert_eq!(
            rules::legal_moves(&board, Color::White),
            vec![Position::new(1, 6), Position::new(3, 0)]
        );
        let exposure = simulate(&board, Color::White).unwrap();

        assert_eq!(
            exposure,
            Exposure {
                corner: 0,
                around: 1,
                side: 1
            }
        );
    }

    #[test]
    fn sums_over_every_reply() {
        let board = Board::from_rows([
            "........",
            ".B....B.",
            "..B..B..",
            "...WW...",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        let exposure = simulate(&board, Color::White).unwrap();

        assert_eq!(exposure.corner, 2);
    }

    #[test]
    fn simulate_does_not_mutate_board() {
        let board = Board::new();
        let before = board;

        let _ = simulate(&board, Color::Black).unwrap();

        assert_eq!(board, before);
    }
}
