use rand::Rng;
use rand::seq::SliceRandom;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::ai::evaluator::evaluate;
use crate::ai::exposure::simulate;
use crate::ai::zone::Zone;
use crate::board::Board;
use crate::error::GameError;
use crate::rules;
use crate::types::{Color, Position};

/// One legal move scored on a scratch copy of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub position: Position,
    pub evaluation: i32,
    pub corner_exposure: u32,
    pub around_exposure: u32,
    pub side_exposure: u32,
}

impl Candidate {
    /// Plays `position` for `color` on a copy of `board`, scores the result
    /// for `color` and looks one reply ahead for the opponent.
    pub fn evaluate(board: &Board, color: Color, position: Position) -> Result<Self, GameError> {
        let next = rules::after_move(board, color, position)?;
        let exposure = simulate(&next, color.opposite())?;

        Ok(Self {
            position,
            evaluation: evaluate(&next, color),
            corner_exposure: exposure.corner,
            around_exposure: exposure.around,
            side_exposure: exposure.side,
        })
    }

    fn is_blank(&self) -> bool {
        self.evaluation == 0
            && self.corner_exposure == 0
            && self.around_exposure == 0
            && self.side_exposure == 0
    }

    fn fields(&self) -> (i64, i64, i64, i64) {
        (
            self.evaluation as i64,
            self.corner_exposure as i64,
            self.around_exposure as i64,
            self.side_exposure as i64,
        )
    }
}

/// Which rule picked the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reason {
    /// A legal corner was available.
    Corner,
    /// Every candidate was all-zero.
    Random,
    /// Row `n` of the preference table.
    Tier(u8),
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub position: Position,
    pub reason: Reason,
}

/// Smaller sorts first.
type SortKey = [i64; 4];

struct Tier {
    level: u8,
    accepts: fn(&Candidate) -> bool,
    key: fn(&Candidate) -> SortKey,
}

/// Preference table, first accepting row wins. Keys put the highest
/// evaluation first; around exposure is the one count the AI wants high.
const TIERS: [Tier; 8] = [
    Tier {
        level: 1,
        accepts: |c| c.corner_exposure == 0 && c.around_exposure > 0 && c.side_exposure == 0,
        key: |c| {
            let (e, _, a, _) = c.fields();
            [-e, -a, 0, 0]
        },
    },
    Tier {
        level: 2,
        accepts: |c| c.corner_exposure == 0 && c.around_exposure > 0,
        key: |c| {
            let (e, _, a, s) = c.fields();
            [-e, s, -a, 0]
        },
    },
    Tier {
        level: 3,
        accepts: |c| c.corner_exposure == 0 && c.side_exposure == 0,
        key: |c| [-c.fields().0, 0, 0, 0],
    },
    Tier {
        level: 4,
        accepts: |c| c.corner_exposure == 0,
        key: |c| {
            let (e, _, _, s) = c.fields();
            [-e, s, 0, 0]
        },
    },
    Tier {
        level: 5,
        accepts: |c| c.around_exposure > 0 && c.side_exposure == 0,
        key: |c| {
            let (e, k, a, _) = c.fields();
            [-e, k, -a, 0]
        },
    },
    Tier {
        level: 6,
        accepts: |c| c.around_exposure > 0,
        key: |c| {
            let (e, k, a, s) = c.fields();
            [-e, k, s, -a]
        },
    },
    Tier {
        level: 7,
        accepts: |c| c.side_exposure == 0,
        key: |c| {
            let (e, k, _, _) = c.fields();
            [-e, k, 0, 0]
        },
    },
    Tier {
        level: 8,
        accepts: |c| c.side_exposure > 0,
        key: |c| {
            let (e, k, _, s) = c.fields();
            [-e, k, s, 0]
        },
    },
];

/// Scores every move in `moves`, keeping their order.
pub fn candidates(
    board: &Board,
    color: Color,
    moves: &[Position],
) -> Result<Vec<Candidate>, GameError> {
    #[cfg(feature = "parallel")]
    let iter = moves.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = moves.iter();

    iter.map(|&pos| Candidate::evaluate(board, color, pos))
        .collect()
}

/// Runs the preference cascade. Within a tier ties go to the earliest
/// candidate. Returns `None` only for an empty slice.
pub fn rank<R: Rng + ?Sized>(candidates: &[Candidate], rng: &mut R) -> Option<Decision> {
    if candidates.iter().all(Candidate::is_blank) {
        return candidates.choose(rng).map(|c| Decision {
            position: c.position,
            reason: Reason::Random,
        });
    }

    for tier in &TIERS {
        let best = candidates
            .iter()
            .filter(|&c| (tier.accepts)(c))
            .min_by_key(|&c| (tier.key)(c));
        if let Some(best) = best {
            return Some(Decision {
                position: best.position,
                reason: Reason::Tier(tier.level),
            });
        }
    }

    candidates
        .iter()
        .min_by_key(|c| -(c.evaluation as i64))
        .map(|c| Decision {
            position: c.position,
            reason: Reason::Fallback,
        })
}

/// Picks a move for `color`. A legal corner is always taken; otherwise
/// X-squares are dropped when anything else remains and the rest go
/// through [`rank`].
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    rng: &mut R,
) -> Result<Decision, GameError> {
    let moves = rules::legal_moves(board, color);
    if moves.is_empty() {
        return Err(GameError::NoLegalMoves(color));
    }

    if let Some(&corner) = moves.iter().find(|&&pos| Zone::of(pos) == Zone::Corner) {
        debug!(%color, position = %corner, "ai takes corner");
        return Ok(Decision {
            position: corner,
            reason: Reason::Corner,
        });
    }

    let safe: Vec<Position> = moves
        .iter()
        .copied()
        .filter(|&pos| Zone::of(pos) != Zone::XSquare)
        .collect();
    let pool = if safe.is_empty() { moves } else { safe };

    let candidates = candidates(board, color, &pool)?;
    for candidate in &candidates {
        trace!(?candidate, "scored");
    }

    let decision = rank(&candidates, rng).ok_or(GameError::NoLegalMoves(color))?;
    debug!(%color, position = %decision.position, reason = ?decision.reason, "ai move chosen");
    Ok(decision)
}

/// Caller contract: `color` must have at least one legal move.
pub fn choose_ai_move(board: &Board, color: Color) -> Result<Position, GameError> {
    choose_ai_move_with(board, color, &mut rand::thread_rng())
}

pub fn choose_ai_move_with<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    rng: &mut R,
) -> Result<Position, GameError> {
    decide(board, color, rng).map(|decision| decision.position)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn cand(idx: usize, evaluation: i32, corner: u32, around: u32, side: u32) -> Candidate {
        Candidate {
            position: Position::from_index(idx),
            evaluation,
            corner_exposure: corner,
            around_exposure: around,
            side_exposure: side,
        }
    }

    fn pick(candidates: &[Candidate]) -> Decision {
        rank(candidates, &mut rng()).unwrap()
    }

    #[test]
    fn all_blank_candidates_are_chosen_at_random() {
        let candidates = [cand(10, 0, 0, 0, 0), cand(20, 0, 0, 0, 0), cand(30, 0, 0, 0, 0)];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Random);
        assert!(candidates.iter().any(|c| c.position == decision.position));
    }

    #[test]
    fn one_nonzero_field_skips_random_choice() {
        let candidates = [cand(10, 0, 0, 0, 0), cand(20, 0, 0, 0, 1), cand(30, 0, 0, 0, 0)];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(3));
        assert_eq!(decision.position, Position::from_index(10));
    }

    #[test]
    fn tier_one_prefers_evaluation_then_more_around_exposure() {
        let candidates = [
            cand(10, 5, 0, 1, 0),
            cand(11, 5, 0, 3, 0),
            cand(12, 9, 0, 0, 0),
            cand(13, 20, 0, 2, 1),
        ];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(1));
        assert_eq!(decision.position, Position::from_index(11));
    }

    #[test]
    fn tier_two_breaks_ties_on_side_then_around() {
        let candidates = [
            cand(10, 3, 0, 1, 2),
            cand(11, 3, 0, 4, 1),
            cand(12, 3, 0, 5, 1),
            cand(13, 10, 1, 0, 0),
        ];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(2));
        assert_eq!(decision.position, Position::from_index(12));
    }

    #[test]
    fn tier_four_prefers_fewer_side_exposures() {
        let candidates = [cand(10, 2, 0, 0, 3), cand(11, 2, 0, 0, 1), cand(12, 50, 1, 0, 0)];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(4));
        assert_eq!(decision.position, Position::from_index(11));
    }

    #[test]
    fn tier_five_applies_when_every_move_exposes_a_corner() {
        let candidates = [cand(10, 1, 2, 1, 0), cand(11, 1, 1, 1, 0), cand(12, 1, 1, 2, 0)];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(5));
        assert_eq!(decision.position, Position::from_index(12));
    }

    #[test]
    fn tier_six_orders_corner_then_side_then_more_around() {
        let candidates = [
            cand(10, 5, 1, 1, 2),
            cand(11, 5, 1, 3, 1),
            cand(12, 5, 1, 2, 1),
            cand(13, 5, 2, 9, 1),
        ];

        let decision = pick(&candidates);

        assert_eq!(decision.reason, Reason::Tier(6));
        assert_eq!(decision.position, Position::from_index(11));
    }

    #[test]
    fn tiers_seven_and_eight_cover_remaining_shapes() {
        let decision = pick(&[cand(10, 0, 1, 0, 0), cand(11, 4, 2, 0, 0)]);
        assert_eq!(decision.reason, Reason::Tier(7));
        assert_eq!(decision.position, Position::from_index(11));

        let decision = pick(&[cand(10, 0, 1, 0, 2), cand(11, 0, 1, 0, 1)]);
        assert_eq!(decision.reason, Reason::Tier(8));
        assert_eq!(decision.position, Position::from_index(11));
    }

    #[test]
    fn rank_of_nothing_is_none() {
        assert_eq!(rank(&[], &mut rng()), None);
    }

    #[test]
    fn opening_move_is_first_of_equal_interior_candidates() {
        let decision = decide(&Board::new(), Color::Black, &mut rng()).unwrap();

        assert_eq!(decision.position, Position::new(2, 3));
        assert_eq!(decision.reason, Reason::Tier(3));
    }

    #[test]
    fn candidates_follow_move_order() {
        let board = Board::new();
        let moves = rules::legal_moves(&board, Color::Black);

        let scored = candidates(&board, Color::Black, &moves).unwrap();

        let positions: Vec<Position> = scored.iter().map(|c| c.position).collect();
        assert_eq!(positions, moves);
        assert!(scored.iter().all(|c| c.evaluation == -3));
    }

    #[test]
    fn x_squares_are_avoided_when_alternatives_exist() {
        let board = Board::from_rows([
            "........",
            "........",
            "..B.....",
            "...W....",
            "....B...",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        assert_eq!(
            rules::legal_moves(&board, Color::White),
            vec![Position::new(1, 1), Position::new(5, 5)]
        );

        let mv = choose_ai_move_with(&board, Color::White, &mut rng()).unwrap();

        assert_eq!(mv, Position::new(5, 5));
    }

    #[test]
    fn x_square_is_played_when_it_is_the_only_move() {
        let board = Board::from_rows([
            "........",
            "........",
            "..B.....",
            "...W....",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        let mv = choose_ai_move_with(&board, Color::White, &mut rng()).unwrap();

        assert_eq!(mv, Position::new(1, 1));
    }

    #[test]
    fn choose_ai_move_without_legal_moves_is_an_error() {
        let board = Board::from_rows([
            "B.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".......W",
        ])
        .unwrap();

        assert_eq!(
            choose_ai_move(&board, Color::White),
            Err(GameError::NoLegalMoves(Color::White))
        );
    }
}
