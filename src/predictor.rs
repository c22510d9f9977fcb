//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod gshare;
pub mod counter;
pub mod tournament;

pub use table::*;
pub use simple::*;
pub use gshare::*;
pub use counter::*;
pub use tournament::*;

use crate::Outcome;

/// Interface to a conditional branch direction predictor.
///
/// Creating a predictor allocates and seeds its tables; dropping it
/// releases them.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Return the predicted direction for the branch at `pc`.
    ///
    /// This never changes the state of the predictor.
    fn predict(&self, pc: u32) -> Outcome;

    /// Update the internal state of the predictor with the resolved outcome
    /// of the conditional branch at `pc`.
    fn train(&mut self, pc: u32, outcome: Outcome);

    /// Restore every table and history register to its seed value.
    fn reset(&mut self);
}
