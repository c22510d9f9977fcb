//! Implementation of a "gshare" predictor.
//!
//! See "Combining Branch Predictors" (McFarling, 1993).

use serde::Deserialize;
use tracing::trace;

use crate::Outcome;
use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::*;

/// Length of the global history register [in bits].
pub const GSHARE_GHR_BITS: usize = 64;

/// Configuration for building a [`GsharePredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GshareConfig {
    /// Number of global history bits (log2 of the table size)
    pub history_bits: usize,
}
impl GshareConfig {
    pub const DEFAULT_HISTORY_BITS: usize = 15;
    pub const MAX_HISTORY_BITS: usize = 30;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_bits > Self::MAX_HISTORY_BITS {
            return Err(ConfigError::HistoryBits {
                name: "gshare history",
                bits: self.history_bits,
                max: Self::MAX_HISTORY_BITS,
            });
        }
        Ok(())
    }

    /// Get the [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        (2 << self.history_bits) + GSHARE_GHR_BITS
    }

    /// Use this configuration to create a new [`GsharePredictor`].
    pub fn build(self) -> GsharePredictor {
        GsharePredictor {
            pht: CounterTable::new(self.history_bits),
            ghr: HistoryRegister::new(GSHARE_GHR_BITS),
            cfg: self,
        }
    }
}
impl Default for GshareConfig {
    fn default() -> Self {
        Self { history_bits: Self::DEFAULT_HISTORY_BITS }
    }
}

/// A table of 2-bit counters indexed by the program counter XOR'ed with
/// global history.
#[derive(Clone, Debug)]
pub struct GsharePredictor {
    /// The configuration used to create this object
    cfg: GshareConfig,

    /// Pattern history table
    pht: CounterTable<TwoBitCounter>,

    /// Global history register
    ghr: HistoryRegister,
}
impl GsharePredictor {
    pub fn cfg(&self) -> &GshareConfig { &self.cfg }

    /// Form an index from the low bits of the program counter and the low
    /// bits of global history.
    pub fn get_index(&self, pc: u32) -> usize {
        let mask = self.pht.index_mask();
        let pc_bits = pc as usize & mask;
        let ghr_bits = self.ghr.low_bits(self.cfg.history_bits) & mask;
        pc_bits ^ ghr_bits
    }

    /// Decode the counter that would be used for `pc`.
    pub fn counter(&self, pc: u32)
        -> Result<TwoBitCounter, crate::error::InvalidCounterState>
    {
        self.pht.state(self.get_index(pc))
    }
}

impl BranchPredictor for GsharePredictor {
    fn name(&self) -> &'static str { "Gshare" }

    fn predict(&self, pc: u32) -> Outcome {
        self.pht.predict(self.get_index(pc))
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.get_index(pc);
        let guess = self.pht.update(idx, outcome);
        self.ghr.shift_in(outcome);
        trace!(pc, idx, ?guess, ?outcome, "gshare update");
    }

    fn reset(&mut self) {
        self.pht.fill(TwoBitCounter::INIT);
        self.ghr = HistoryRegister::new(GSHARE_GHR_BITS);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build(bits: usize) -> GsharePredictor {
        GshareConfig { history_bits: bits }.build()
    }

    #[test]
    fn trains_toward_taken() {
        let mut p = build(2);
        assert_eq!(p.counter(0), Ok(TwoBitCounter::WeaklyNotTaken));

        // ghr=0b00 -> index 0
        p.train(0, Outcome::T);
        assert_eq!(p.pht.state(0), Ok(TwoBitCounter::WeaklyTaken));
        assert_eq!(p.ghr.low_bits(2), 0b01);

        // ghr=0b01 -> index 1
        p.train(0, Outcome::T);
        assert_eq!(p.pht.state(1), Ok(TwoBitCounter::WeaklyTaken));
        assert_eq!(p.ghr.low_bits(2), 0b11);

        // ghr=0b11 -> index 3
        p.train(0, Outcome::T);
        assert_eq!(p.pht.state(3), Ok(TwoBitCounter::WeaklyTaken));
        assert_eq!(p.ghr.low_bits(64), 0b111);
        assert_eq!(p.ghr.low_bits(2), 0b11);

        // Index 3 is used again and now predicts taken
        assert_eq!(p.get_index(0), 3);
        assert_eq!(p.predict(0), Outcome::T);
    }

    #[test]
    fn same_index_progression() {
        let mut p = build(2);
        // Keep the index fixed by moving pc along with history
        p.train(0b00, Outcome::T);
        p.train(0b01, Outcome::T);
        assert_eq!(p.pht.state(0), Ok(TwoBitCounter::StronglyTaken));
        assert_eq!(p.ghr.low_bits(2), 0b11);
        assert_eq!(p.predict(0b11), Outcome::T);
    }

    #[test]
    fn index_depends_on_low_bits_only() {
        let mut p = build(4);
        for o in [Outcome::T, Outcome::N, Outcome::T, Outcome::T, Outcome::N] {
            p.train(0x40, o);
        }
        for pc in [0x13_u32, 0x7777_0003, 0x3] {
            p.train(pc, Outcome::T);
        }
        assert_eq!(p.get_index(0x1235), p.get_index(0xffff_fff5));
        assert_eq!(p.predict(0x1235), p.predict(0xffff_fff5));
    }

    #[test]
    fn reset_restores_seed() {
        let mut p = build(3);
        for _ in 0..10 {
            p.train(0x8, Outcome::T);
        }
        p.reset();
        assert_eq!(p.ghr.low_bits(64), 0);
        for idx in 0..8 {
            assert_eq!(p.pht.state(idx), Ok(TwoBitCounter::WeaklyNotTaken));
        }
    }

    #[test]
    fn validate_limits() {
        assert!(GshareConfig { history_bits: 30 }.validate().is_ok());
        assert!(GshareConfig { history_bits: 31 }.validate().is_err());
        assert_eq!(GshareConfig::default().history_bits, 15);
    }
}
