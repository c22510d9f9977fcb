//! Routing `predict`/`train` calls to the configured predictor.

use tracing::{debug, warn};

use crate::Outcome;
use crate::branch::*;
use crate::config::*;
use crate::error::ConfigError;
use crate::predictor::*;

/// Owns the single active predictor for a run.
///
/// The predictor is allocated by [Dispatcher::initialize] and released by
/// [Dispatcher::teardown]. Calls made while no predictor is active are
/// reported and predict not-taken.
pub struct Dispatcher {
    cfg: Config,
    active: Option<Box<dyn BranchPredictor>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("cfg", &self.cfg)
            .field("active", &self.active.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher for a validated configuration. No predictor state
    /// is allocated until [Dispatcher::initialize] is called.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg, active: None })
    }

    /// Create a dispatcher and immediately activate its predictor.
    pub fn with_active(cfg: Config) -> Result<Self, ConfigError> {
        let mut res = Self::new(cfg)?;
        res.initialize();
        Ok(res)
    }

    pub fn cfg(&self) -> &Config { &self.cfg }
    pub fn kind(&self) -> PredictorKind { self.cfg.predictor }
    pub fn name(&self) -> &'static str { self.cfg.predictor.name() }
    pub fn is_active(&self) -> bool { self.active.is_some() }

    /// Allocate and seed the configured predictor.
    ///
    /// Calling this while a predictor is already active keeps its tables and
    /// reseeds them in place.
    pub fn initialize(&mut self) {
        match self.active.as_mut() {
            Some(p) => {
                warn!(kind = %self.cfg.predictor, "predictor already active, reseeding");
                p.reset();
            },
            None => {
                self.active = Some(self.cfg.build());
                debug!(kind = %self.kind(), "predictor initialized");
            },
        }
    }

    /// Release the active predictor and all of its tables.
    pub fn teardown(&mut self) {
        if self.active.take().is_some() {
            debug!(kind = %self.kind(), "predictor released");
        }
    }

    /// Predict the direction of the branch at `pc`.
    pub fn predict(&self, pc: u32) -> Outcome {
        match self.active.as_ref() {
            Some(p) => p.predict(pc),
            None => {
                warn!(pc, "predict called with no active predictor");
                Outcome::N
            },
        }
    }

    /// Train the active predictor with a resolved branch.
    ///
    /// Only conditional branches change predictor state. The target and
    /// call/return/direct classification are accepted but unused.
    pub fn train(&mut self, record: &BranchRecord) {
        if !record.is_conditional() {
            return;
        }
        match self.active.as_mut() {
            Some(p) => p.train(record.pc, record.outcome),
            None => {
                warn!(pc = record.pc, "train called with no active predictor");
            },
        }
    }
}
