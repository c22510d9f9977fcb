//! Implementation of a two-level adaptive "tournament" predictor.
//!
//! A global component and a per-address local component each make a
//! prediction, and a table of meta-predictors (the chooser) learns which of
//! the two to trust in each global history context.
//!
//! See the following:
//!  - "Combining Branch Predictors" (McFarling, 1993).
//!  - "The Alpha 21264 Microprocessor" (Kessler, 1999).

pub mod component;
pub mod config;

pub use component::*;
pub use config::*;

use tracing::trace;

use crate::Outcome;
use crate::predictor::*;

/// Container for output from [`TournamentPredictor::lookup`], including the
/// final predicted outcome and the predictions of both components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentPrediction {
    /// The component providing the prediction
    pub provider: Provider,

    /// The final predicted direction
    pub outcome: Outcome,

    /// Predicted direction from the global component
    pub global: Outcome,

    /// Predicted direction from the local component
    pub local: Outcome,

    /// Index into the global table and the chooser
    pub global_idx: usize,

    /// Index into the local pattern table
    pub local_idx: usize,
}

/// A two-level adaptive predictor parameterized by a [`TournamentConfig`].
///
/// The reference and the tunable ("custom") tournament predictors are both
/// instances of this type; each instance owns all of its tables.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Display name reported by [BranchPredictor::name]
    pub(crate) name: &'static str,

    /// The configuration used to create this object
    pub(crate) cfg: TournamentConfig,

    /// Global component
    pub(crate) global: GlobalComponent,

    /// Local component
    pub(crate) local: LocalComponent,

    /// Meta-predictor selecting between components
    pub(crate) chooser: Chooser,
}

impl TournamentPredictor {
    pub fn cfg(&self) -> &TournamentConfig { &self.cfg }

    /// Make a prediction for `pc`, keeping the details of how it was made.
    pub fn lookup(&self, pc: u32) -> TournamentPrediction {
        let global_idx = self.global.get_index();
        let local_idx = self.local.get_index(pc);
        let global = self.global.predict();
        let local = self.local.predict(pc);

        let provider = self.chooser.provider(global_idx);
        let outcome = match provider {
            Provider::Global => global,
            Provider::Local => local,
        };
        TournamentPrediction {
            provider, outcome, global, local, global_idx, local_idx,
        }
    }

    /// Return the raw chooser value for the current global history.
    pub fn chooser_value(&self) -> u8 {
        self.chooser.value(self.global.get_index())
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { self.name }

    fn predict(&self, pc: u32) -> Outcome {
        self.lookup(pc).outcome
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        // The chooser is indexed with global history *before* this outcome
        // is shifted in.
        let idx = self.global.get_index();

        let global_guess = self.global.update(outcome);
        let local_guess = self.local.update(pc, outcome);
        self.chooser.update(idx, global_guess, local_guess, outcome);

        trace!(pc, idx, ?global_guess, ?local_guess, ?outcome,
            chooser = self.chooser.value(idx), "tournament update");
    }

    fn reset(&mut self) {
        self.global.reset();
        self.local.reset();
        self.chooser.reset();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build(local: usize, global: usize) -> TournamentPredictor {
        TournamentConfig {
            local_history_bits: local,
            global_history_bits: global,
        }.build()
    }

    #[test]
    fn reports_configured_name() {
        assert_eq!(build(2, 2).name(), "Tournament");
        let p = TournamentConfig::custom().build_named("Custom");
        assert_eq!(p.name(), "Custom");
        assert_eq!(p.cfg(), &TournamentConfig::custom());
    }

    #[test]
    fn seeded_state() {
        let p = build(4, 3);
        assert_eq!(p.global.ghr.low_bits(16), 0);
        assert_eq!(p.global.pht.size(), 8);
        assert_eq!(p.chooser_value(), 1);
        assert_eq!(p.local.lht.size(), 16);
        assert_eq!(p.local.lht.get_entry(7).low_bits(16), 0xAAAA);
        assert_eq!(p.local.pht.state(0), Ok(ThreeBitCounter::N0));

        let pred = p.lookup(0x1234);
        assert_eq!(pred.provider, Provider::Local);
        assert_eq!(pred.global_idx, 0);
        assert_eq!(pred.local_idx, 0b1010);
        assert_eq!(pred.outcome, Outcome::N);
    }

    #[test]
    fn chooser_moves_toward_global() {
        let mut p = build(4, 3);

        // Global predicts taken, local predicts not-taken
        *p.global.pht.get_entry_mut(0) = TwoBitCounter::WeaklyTaken.into();
        let before = p.lookup(0x10);
        assert_eq!(before.global, Outcome::T);
        assert_eq!(before.local, Outcome::N);
        assert_eq!(before.provider, Provider::Local);
        assert_eq!(before.outcome, Outcome::N);

        // Global right, local wrong
        p.train(0x10, Outcome::T);
        assert_eq!(p.chooser.value(0), 2);
        assert_eq!(p.chooser.provider(0), Provider::Global);

        // Return global history to index 0 and check the arbitration.
        for _ in 0..3 {
            p.global.ghr.shift_in(Outcome::N);
        }
        let after = p.lookup(0x10);
        assert_eq!(after.global_idx, 0);
        assert_eq!(after.provider, Provider::Global);
        assert_eq!(after.outcome, after.global);
    }

    #[test]
    fn chooser_moves_toward_local() {
        let mut p = build(4, 3);
        *p.local.pht.get_entry_mut(0b1010) = ThreeBitCounter::T0.into();
        // Global guesses N, local guesses T, outcome T
        p.train(0x0, Outcome::T);
        assert_eq!(p.chooser.value(0), 0);
        assert_eq!(p.chooser.provider(0), Provider::Local);
    }

    #[test]
    fn chooser_unchanged_when_both_wrong() {
        let mut p = build(4, 3);
        // Both guess N (seed states) and the outcome is T
        p.train(0x0, Outcome::T);
        assert_eq!(p.chooser.value(0), 1);
    }

    #[test]
    fn histories_shift_after_training() {
        let mut p = build(4, 3);
        p.train(0x3, Outcome::T);
        assert_eq!(p.global.ghr.low_bits(16), 0b1);
        assert_eq!(p.local.lht.get_entry(0x3).low_bits(16), 0x5555);
        // Other local slots are untouched
        assert_eq!(p.local.lht.get_entry(0x4).low_bits(16), 0xAAAA);
        // The local counter indexed by the old history was trained
        assert_eq!(p.local.pht.state(0b1010), Ok(ThreeBitCounter::T0));
        // The global counter indexed by the old history was trained
        assert_eq!(p.global.pht.state(0), Ok(TwoBitCounter::WeaklyTaken));
    }

    #[test]
    fn instances_do_not_share_state() {
        let mut a = TournamentConfig::tournament().build();
        let b = TournamentConfig::custom().build();
        for _ in 0..8 {
            a.train(0x400, Outcome::T);
        }
        assert_eq!(b.global.ghr.low_bits(16), 0);
        assert_eq!(b.local.lht.get_entry(0x400).low_bits(16), 0xAAAA);
        assert_eq!(a.global.ghr.low_bits(16), 0xff);
    }

    #[test]
    fn reset_restores_seed() {
        let mut p = build(2, 2);
        for i in 0..32 {
            p.train(i, Outcome::from(i % 3 == 0));
        }
        p.reset();
        assert_eq!(p.global.ghr.low_bits(16), 0);
        for idx in 0..4 {
            assert_eq!(p.chooser.value(idx), 1);
            assert_eq!(p.global.pht.state(idx), Ok(TwoBitCounter::WeaklyNotTaken));
            assert_eq!(p.local.pht.state(idx), Ok(ThreeBitCounter::N0));
            assert_eq!(p.local.lht.get_entry(idx).low_bits(16), 0xAAAA);
        }
    }

    #[test]
    fn validate_limits() {
        let ok = TournamentConfig { local_history_bits: 16, global_history_bits: 16 };
        assert!(ok.validate().is_ok());
        let bad = TournamentConfig { local_history_bits: 17, global_history_bits: 4 };
        assert!(bad.validate().is_err());
        let bad = TournamentConfig { local_history_bits: 4, global_history_bits: 17 };
        assert!(bad.validate().is_err());
    }
}
