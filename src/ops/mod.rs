pub mod check;
pub mod engine;
pub mod helpers;
pub mod names;
pub mod parent;
pub mod reference;
pub mod sort;
pub mod state;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use engine::{MoveOutcome, MoveRequest, move_category, plan_move};
pub use sort::sort_by_display_order;
pub use validate::{MoveCheck, MoveRejection};
