pub mod evaluator;
pub mod exposure;
pub mod selector;
pub mod zone;

pub use evaluator::evaluate;
pub use exposure::{Exposure, simulate};
pub use selector::{Candidate, Decision, Reason, choose_ai_move, choose_ai_move_with, decide};
pub use zone::Zone;
