//! Conditional branch direction predictors for trace-driven simulation.
//!
//! A [`Dispatcher`] owns exactly one predictor selected by a [`Config`]:
//! a static always-taken predictor, a gshare predictor, or one of two
//! independently configured tournament predictors.

pub mod branch;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::{Config, PredictorKind};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use history::*;
pub use predictor::*;
