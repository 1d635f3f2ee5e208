//! Battle lifecycle state machine

mod outcome;
mod store;
mod transitions;

pub use outcome::{Ignored, Outcome};
pub use store::BattleMachine;
