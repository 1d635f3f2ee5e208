//! Battle and round entities

mod battle;
mod round;

pub use battle::Battle;
pub use round::{MAX_EFFICIENCY, Round};
