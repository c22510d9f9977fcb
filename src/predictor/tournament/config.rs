
use serde::Deserialize;

use crate::error::ConfigError;
use crate::history::*;
use crate::predictor::*;

/// Length of the global and local history registers [in bits].
pub const TOURNAMENT_HISTORY_LEN: usize = 16;

/// Seed for every local history register.
///
/// An alternating pattern keeps freshly allocated branches from all sharing
/// the same all-not-taken history.
pub const LOCAL_HISTORY_SEED: u64 = 0xAAAA;

/// Configuration for a [`TournamentPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Number of program counter bits selecting a local history register,
    /// and number of local history bits indexing the local pattern table
    pub local_history_bits: usize,

    /// Number of global history bits indexing the global table and the
    /// chooser
    pub global_history_bits: usize,
}
impl TournamentConfig {
    pub const MAX_HISTORY_BITS: usize = TOURNAMENT_HISTORY_LEN;

    /// Parameters of the reference tournament predictor.
    pub const fn tournament() -> Self {
        Self { local_history_bits: 10, global_history_bits: 12 }
    }

    /// Parameters of the tunable tournament predictor.
    pub const fn custom() -> Self {
        Self { local_history_bits: 12, global_history_bits: 12 }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_history_bits > Self::MAX_HISTORY_BITS {
            return Err(ConfigError::HistoryBits {
                name: "local history",
                bits: self.local_history_bits,
                max: Self::MAX_HISTORY_BITS,
            });
        }
        if self.global_history_bits > Self::MAX_HISTORY_BITS {
            return Err(ConfigError::HistoryBits {
                name: "global history",
                bits: self.global_history_bits,
                max: Self::MAX_HISTORY_BITS,
            });
        }
        Ok(())
    }

    /// Get the [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        let global = (1 << self.global_history_bits) * 2;
        let chooser = (1 << self.global_history_bits) * 2;
        let local_hist = (1 << self.local_history_bits) * TOURNAMENT_HISTORY_LEN;
        let local_pht = (1 << self.local_history_bits) * 3;
        global + chooser + local_hist + local_pht + TOURNAMENT_HISTORY_LEN
    }

    /// Use this configuration to create a new [`TournamentPredictor`].
    pub fn build(self) -> TournamentPredictor {
        self.build_named("Tournament")
    }

    /// Like [`TournamentConfig::build`], but the predictor reports `name`.
    pub fn build_named(self, name: &'static str) -> TournamentPredictor {
        TournamentPredictor {
            name,
            global: GlobalComponent {
                ghr: HistoryRegister::new(TOURNAMENT_HISTORY_LEN),
                pht: CounterTable::new(self.global_history_bits),
                bits: self.global_history_bits,
            },
            local: LocalComponent {
                lht: HistoryTable::new(
                    self.local_history_bits,
                    TOURNAMENT_HISTORY_LEN,
                    LOCAL_HISTORY_SEED,
                ),
                pht: CounterTable::new(self.local_history_bits),
            },
            chooser: Chooser::new(self.global_history_bits),
            cfg: self,
        }
    }
}
impl Default for TournamentConfig {
    fn default() -> Self { Self::tournament() }
}
