//! Lead-PR queue engine
//!
//! Three-phase pattern, one pass per cycle:
//! 1. Select - pick the lead PR from the open set (pure)
//! 2. Decide - choose the single action to take for it (pure, testable)
//! 3. Cycle - fetch, compare and perform the action (effectful)
//!
//! [`run_queue`] repeats cycles on a fixed delay.

mod cycle;
mod decide;
mod schedule;
mod select;

pub use cycle::{CycleOutcome, run_cycle, squash_headline};
pub use decide::{Decision, DecisionOptions, decide};
pub use schedule::{Schedule, run_queue};
pub use select::{is_eligible, select_candidate};
