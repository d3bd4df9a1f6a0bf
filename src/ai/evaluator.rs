use crate::ai::zone::Zone;
use crate::board::Board;
use crate::types::{Color, Position};

const CORNER_WEIGHT: i32 = 21;
const SIDE_WEIGHT: i32 = 8;
const X_SQUARE_PENALTY: i32 = 10;

/// Occupied squares in one zone, split by owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub own: i32,
    pub opp: i32,
}

impl Occupancy {
    fn margin(self) -> i32 {
        self.own - self.opp
    }
}

/// Per-zone occupancy from one color's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneTally {
    pub corner: Occupancy,
    pub x_square: Occupancy,
    pub side: Occupancy,
    pub interior: Occupancy,
}

impl ZoneTally {
    pub fn new(board: &Board, owner: Color) -> Self {
        let mut tally = Self::default();

        for pos in Position::all() {
            let Some(color) = board.cell(pos).color() else {
                continue;
            };
            let slot = match Zone::of(pos) {
                Zone::Corner => &mut tally.corner,
                Zone::XSquare => &mut tally.x_square,
                Zone::Side => &mut tally.side,
                Zone::Interior => &mut tally.interior,
            };
            if color == owner {
                slot.own += 1;
            } else {
                slot.opp += 1;
            }
        }

        tally
    }
}

/// Zone-weighted score of `board` for `owner`; higher is better.
///
/// Corners count once on their own and again at weight 21. Interior discs
/// are subtracted, sides are rewarded and X-squares penalised.
pub fn evaluate(board: &Board, owner: Color) -> i32 {
    let tally = ZoneTally::new(board, owner);
    let corner = tally.corner.margin();

    corner - tally.interior.margin() + CORNER_WEIGHT * corner + SIDE_WEIGHT * tally.side.margin()
        - X_SQUARE_PENALTY * tally.x_square.margin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows([
            "B..BB...",
            ".B......",
            "........",
            "...BW...",
            "....W...",
            "........",
            "......W.",
            "........",
        ])
        .unwrap()
    }

    #[test]
    fn tally_counts_only_occupied_squares() {
        let board = Board::from_rows([
            "W......W",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "W......B",
        ])
        .unwrap();

        let tally = ZoneTally::new(&board, Color::Black);

        assert_eq!(tally.corner, Occupancy { own: 1, opp: 3 });
        assert_eq!(tally.x_square, Occupancy::default());
        assert_eq!(tally.interior, Occupancy::default());
    }

    #[test]
    fn evaluate_weights_each_zone() {
        // Black: corner 1, sides 2, x-square 1, interior 1.
        // White: x-square 1, interior 2.
        assert_eq!(evaluate(&sample(), Color::Black), 1 + 1 + 21 + 16);
    }

    #[test]
    fn evaluate_is_antisymmetric_between_colors() {
        let board = sample();

        assert_eq!(
            evaluate(&board, Color::White),
            -evaluate(&board, Color::Black)
        );
        assert_eq!(evaluate(&Board::new(), Color::Black), 0);
    }

    #[test]
    fn owning_an_x_square_costs_ten() {
        let empty = Board::empty();
        let mut board = empty;
        board.place(Position::new(1, 1), Color::White).unwrap();

        assert_eq!(evaluate(&board, Color::White), -10);
        assert_eq!(evaluate(&empty, Color::White), 0);
    }

    #[test]
    fn evaluate_does_not_mutate_board() {
        let board = sample();
        let before = board;

        let _ = evaluate(&board, Color::Black);

        assert_eq!(board, before);
    }
}
