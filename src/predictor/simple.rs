
use crate::Outcome;
use crate::predictor::BranchPredictor;

/// A simple predictor with no state: always predict 'taken'.
#[derive(Clone, Copy, Debug, Default)]
pub struct TakenPredictor;
impl BranchPredictor for TakenPredictor {
    fn name(&self) -> &'static str { "Static" }
    fn predict(&self, _pc: u32) -> Outcome { Outcome::T }
    fn train(&mut self, _pc: u32, _outcome: Outcome) {}
    fn reset(&mut self) {}
}
