use once_cell::sync::Lazy;
use serde::Serialize;

use crate::types::{BOARD_SIZE, NUM_SQUARES, Position};

const CORNERS: [(u8, u8); 4] = [(0, 0), (0, 7), (7, 0), (7, 7)];

/// The three squares touching each corner, grouped per corner.
const X_SQUARES: [[(u8, u8); 3]; 4] = [
    [(0, 1), (1, 0), (1, 1)],
    [(0, 6), (1, 6), (1, 7)],
    [(6, 0), (6, 1), (7, 1)],
    [(6, 6), (6, 7), (7, 6)],
];

/// Strategic class of a square. The four zones partition the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    Corner,
    XSquare,
    Side,
    Interior,
}

static ZONES: Lazy<[Zone; NUM_SQUARES]> = Lazy::new(|| {
    let last = (BOARD_SIZE - 1) as u8;
    let mut zones = [Zone::Interior; NUM_SQUARES];

    for pos in Position::all() {
        if pos.row == 0 || pos.row == last || pos.col == 0 || pos.col == last {
            zones[pos.index()] = Zone::Side;
        }
    }
    for (row, col) in X_SQUARES.iter().flatten() {
        zones[Position::new(*row, *col).index()] = Zone::XSquare;
    }
    for (row, col) in CORNERS {
        zones[Position::new(row, col).index()] = Zone::Corner;
    }

    zones
});

impl Zone {
    pub fn of(pos: Position) -> Self {
        ZONES[pos.index()]
    }

    pub const ALL: [Zone; 4] = [Zone::Corner, Zone::XSquare, Zone::Side, Zone::Interior];

    /// Every square of this zone in row-major order.
    pub fn squares(self) -> impl Iterator<Item = Position> {
        Position::all().filter(move |&pos| Self::of(pos) == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_sizes_partition_the_board() {
        let sizes: Vec<usize> = Zone::ALL.iter().map(|z| z.squares().count()).collect();

        assert_eq!(sizes, vec![4, 12, 16, 32]);
        assert_eq!(sizes.iter().sum::<usize>(), NUM_SQUARES);
    }

    #[test]
    fn classifies_representative_squares() {
        assert_eq!(Zone::of(Position::new(7, 0)), Zone::Corner);
        assert_eq!(Zone::of(Position::new(1, 1)), Zone::XSquare);
        assert_eq!(Zone::of(Position::new(6, 7)), Zone::XSquare);
        assert_eq!(Zone::of(Position::new(0, 2)), Zone::Side);
        assert_eq!(Zone::of(Position::new(5, 7)), Zone::Side);
        assert_eq!(Zone::of(Position::new(1, 2)), Zone::Interior);
        assert_eq!(Zone::of(Position::new(3, 4)), Zone::Interior);
    }
}
