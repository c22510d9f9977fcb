//! Types for implementing a table of predictors.

use std::marker::PhantomData;

use tracing::warn;

use crate::Outcome;
use crate::history::*;
use crate::predictor::counter::*;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of `2^bits` saturating counters stored as raw bytes.
///
/// Every index is masked with [PredictorTable::index_mask] before use, so
/// only the low `bits` bits of an index participate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTable<C: CounterFsm> {
    data: Vec<u8>,
    _counter: PhantomData<C>,
}
impl<C: CounterFsm> CounterTable<C> {
    /// Create a table with every entry set to [CounterFsm::INIT].
    pub fn new(bits: usize) -> Self {
        Self::with_init(bits, C::INIT)
    }

    /// Create a table with every entry set to `init`.
    pub fn with_init(bits: usize, init: C) -> Self {
        Self {
            data: vec![init.into(); 1 << bits],
            _counter: PhantomData,
        }
    }

    /// Reset every entry to `init`.
    pub fn fill(&mut self, init: C) {
        self.data.fill(init.into());
    }

    /// Decode the counter at `idx`.
    pub fn state(&self, idx: usize) -> Result<C, crate::error::InvalidCounterState> {
        C::try_from(*self.get_entry(idx))
    }

    /// Return the direction predicted by the counter at `idx`.
    ///
    /// An undefined counter state is reported and predicts not-taken.
    pub fn predict(&self, idx: usize) -> Outcome {
        match self.state(idx) {
            Ok(ctr) => ctr.predict(),
            Err(e) => {
                warn!(index = idx & self.index_mask(), "{}", e);
                Outcome::N
            },
        }
    }

    /// Move the counter at `idx` one step toward `outcome`, returning the
    /// direction it predicted before the update.
    ///
    /// An entry holding an undefined state is reported, left untouched, and
    /// treated as having predicted not-taken.
    pub fn update(&mut self, idx: usize, outcome: Outcome) -> Outcome {
        match self.state(idx) {
            Ok(ctr) => {
                *self.get_entry_mut(idx) = ctr.transition(outcome).into();
                ctr.predict()
            },
            Err(e) => {
                warn!(index = idx & self.index_mask(), "{}", e);
                Outcome::N
            },
        }
    }

    /// Move the counter at `idx` one step toward `outcome`.
    pub fn step(&mut self, idx: usize, outcome: Outcome) {
        self.update(idx, outcome);
    }
}

impl<C: CounterFsm> PredictorTable for CounterTable<C> {
    type Entry = u8;

    fn size(&self) -> usize { self.data.len() }

    fn get_entry(&self, idx: usize) -> &u8 {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut u8 {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

/// A table of `2^bits` per-address [HistoryRegister]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryTable {
    data: Vec<HistoryRegister>,
    seed: u64,
}
impl HistoryTable {
    /// Create a table of `len`-bit registers, each seeded with `seed`.
    pub fn new(bits: usize, len: usize, seed: u64) -> Self {
        Self {
            data: vec![HistoryRegister::with_pattern(len, seed); 1 << bits],
            seed,
        }
    }

    /// Reseed every register.
    pub fn reset(&mut self) {
        let seed = self.seed;
        for reg in self.data.iter_mut() {
            reg.fill(seed);
        }
    }
}

impl PredictorTable for HistoryTable {
    type Entry = HistoryRegister;

    fn size(&self) -> usize { self.data.len() }

    fn get_entry(&self, idx: usize) -> &HistoryRegister {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut HistoryRegister {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}
