//! Predictor configuration.
//!
//! A [`Config`] is chosen once before a run and selects which predictor the
//! [`Dispatcher`](crate::Dispatcher) activates. Every field has a default, so
//! an empty JSON object is a valid configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::predictor::*;

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PredictorKind {
    /// Always predict taken.
    #[serde(alias = "static", alias = "STATIC")]
    Static,
    /// Global history XOR'ed with the program counter.
    #[default]
    #[serde(alias = "gshare", alias = "GShare", alias = "GSHARE")]
    Gshare,
    /// The reference tournament predictor.
    #[serde(alias = "tournament", alias = "TOURNAMENT")]
    Tournament,
    /// The tunable tournament predictor.
    #[serde(alias = "custom", alias = "CUSTOM")]
    Custom,
}
impl PredictorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
        }
    }
}
impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which predictor is active for this run
    pub predictor: PredictorKind,

    /// Gshare predictor configuration
    pub gshare: GshareConfig,

    /// Reference tournament predictor configuration
    pub tournament: TournamentConfig,

    /// Tunable tournament predictor configuration
    pub custom: TournamentConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            predictor: PredictorKind::default(),
            gshare: GshareConfig::default(),
            tournament: TournamentConfig::tournament(),
            custom: TournamentConfig::custom(),
        }
    }
}
impl Config {
    /// Default configuration for a particular kind of predictor.
    pub fn new(predictor: PredictorKind) -> Self {
        Self { predictor, ..Self::default() }
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        Self::from_json(&s)
    }

    /// Check every predictor configuration, including inactive ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gshare.validate()?;
        self.tournament.validate()?;
        self.custom.validate()?;
        Ok(())
    }

    /// Allocate and seed the selected predictor.
    pub fn build(&self) -> Box<dyn BranchPredictor> {
        match self.predictor {
            PredictorKind::Static => Box::new(TakenPredictor),
            PredictorKind::Gshare => Box::new(self.gshare.build()),
            PredictorKind::Tournament => {
                Box::new(self.tournament.build_named(self.predictor.name()))
            },
            PredictorKind::Custom => {
                Box::new(self.custom.build_named(self.predictor.name()))
            },
        }
    }

    /// Get the [approximate] number of storage bits used by the selected
    /// predictor.
    pub fn storage_bits(&self) -> usize {
        match self.predictor {
            PredictorKind::Static => 0,
            PredictorKind::Gshare => self.gshare.storage_bits(),
            PredictorKind::Tournament => self.tournament.storage_bits(),
            PredictorKind::Custom => self.custom.storage_bits(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.predictor, PredictorKind::Gshare);
        assert_eq!(cfg.gshare.history_bits, 15);
        assert_eq!(cfg.tournament.local_history_bits, 10);
        assert_eq!(cfg.tournament.global_history_bits, 12);
        assert_eq!(cfg.custom.local_history_bits, 12);
        assert_eq!(cfg.custom.global_history_bits, 12);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_json() {
        let cfg = Config::from_json(r#"{
            "predictor": "custom",
            "custom": { "local_history_bits": 9 }
        }"#).unwrap();
        assert_eq!(cfg.predictor, PredictorKind::Custom);
        assert_eq!(cfg.custom.local_history_bits, 9);
        assert_eq!(cfg.custom.global_history_bits, 12);
        assert_eq!(cfg.tournament, TournamentConfig::tournament());
    }

    #[test]
    fn rejects_bad_widths() {
        let err = Config::from_json(r#"{ "gshare": { "history_bits": 40 } }"#);
        assert!(matches!(err, Err(ConfigError::HistoryBits { bits: 40, .. })));

        let err = Config::from_json(r#"{ "tournament": { "global_history_bits": 20 } }"#);
        assert!(matches!(err, Err(ConfigError::HistoryBits { max: 16, .. })));

        let err = Config::from_json(r#"{ "predictor": "Perceptron" }"#);
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn build_selects_variant() {
        for (kind, name) in [
            (PredictorKind::Static, "Static"),
            (PredictorKind::Gshare, "Gshare"),
            (PredictorKind::Tournament, "Tournament"),
            (PredictorKind::Custom, "Custom"),
        ] {
            assert_eq!(Config::new(kind).build().name(), name);
            assert_eq!(kind.name(), name);
        }
    }

    #[test]
    fn storage_bits_follow_selected_predictor() {
        let mut cfg = Config::new(PredictorKind::Static);
        assert_eq!(cfg.storage_bits(), 0);

        cfg.predictor = PredictorKind::Gshare;
        cfg.gshare.history_bits = 4;
        assert_eq!(cfg.storage_bits(), 2 * 16 + 64);

        // 2-bit global and chooser tables, 16-bit local histories, 3-bit
        // local counters, and the global history register
        cfg.predictor = PredictorKind::Custom;
        cfg.custom = TournamentConfig { local_history_bits: 2, global_history_bits: 3 };
        assert_eq!(cfg.storage_bits(), 8 * 2 + 8 * 2 + 4 * 16 + 4 * 3 + 16);

        cfg.predictor = PredictorKind::Tournament;
        assert_eq!(cfg.storage_bits(), TournamentConfig::tournament().storage_bits());
        assert!(cfg.storage_bits() < Config::new(PredictorKind::Custom).storage_bits());
    }
}
