use crate::Outcome;
use crate::history::*;
use crate::predictor::*;

/// The global component of a [TournamentPredictor]: a table of 2-bit
/// counters indexed by global history alone.
#[derive(Clone, Debug)]
pub struct GlobalComponent {
    /// Global history register
    pub ghr: HistoryRegister,

    /// A table of saturating counters
    pub pht: CounterTable<TwoBitCounter>,

    /// Number of global history bits used to form an index
    pub bits: usize,
}
impl GlobalComponent {
    /// Index shared by the global table and the chooser.
    pub fn get_index(&self) -> usize {
        self.ghr.low_bits(self.bits) & self.pht.index_mask()
    }

    pub fn predict(&self) -> Outcome {
        self.pht.predict(self.get_index())
    }

    /// Train the entry selected by the current history, then shift the
    /// outcome into global history. Returns the pre-update prediction.
    pub fn update(&mut self, outcome: Outcome) -> Outcome {
        let idx = self.get_index();
        let guess = self.pht.update(idx, outcome);
        self.ghr.shift_in(outcome);
        guess
    }

    pub fn reset(&mut self) {
        self.ghr = HistoryRegister::new(self.ghr.len());
        self.pht.fill(TwoBitCounter::INIT);
    }
}

/// The local component of a [TournamentPredictor].
///
/// The low bits of the program counter select a per-branch history
/// register, and the low bits of that register select a 3-bit counter.
#[derive(Clone, Debug)]
pub struct LocalComponent {
    /// Local history table
    pub lht: HistoryTable,

    /// Local pattern history table
    pub pht: CounterTable<ThreeBitCounter>,
}
impl LocalComponent {
    /// Returns the index into the local pattern table for `pc`.
    pub fn get_index(&self, pc: u32) -> usize {
        let mask = self.pht.index_mask();
        self.lht.get_entry(pc as usize).low_bits(usize::BITS as usize) & mask
    }

    pub fn predict(&self, pc: u32) -> Outcome {
        self.pht.predict(self.get_index(pc))
    }

    /// Train the entry selected by the current local history of `pc`, then
    /// shift the outcome into that history. Returns the pre-update
    /// prediction.
    pub fn update(&mut self, pc: u32, outcome: Outcome) -> Outcome {
        let idx = self.get_index(pc);
        let guess = self.pht.update(idx, outcome);
        self.lht.get_entry_mut(pc as usize).shift_in(outcome);
        guess
    }

    pub fn reset(&mut self) {
        self.lht.reset();
        self.pht.fill(ThreeBitCounter::INIT);
    }
}

/// Which component a [Chooser] entry favors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Global,
    Local,
}

/// A table of 2-bit meta-predictors selecting between the global and local
/// components. Values 0 and 1 select local, values 2 and 3 select global.
#[derive(Clone, Debug)]
pub struct Chooser {
    data: CounterTable<TwoBitCounter>,
}
impl Chooser {
    /// Every entry starts at 1 (weakly favoring local).
    pub const INIT: TwoBitCounter = TwoBitCounter::WeaklyNotTaken;

    pub fn new(bits: usize) -> Self {
        Self { data: CounterTable::with_init(bits, Self::INIT) }
    }

    /// Return the raw value of the entry at `idx`.
    pub fn value(&self, idx: usize) -> u8 {
        *self.data.get_entry(idx)
    }

    pub fn provider(&self, idx: usize) -> Provider {
        match self.data.predict(idx) {
            Outcome::T => Provider::Global,
            Outcome::N => Provider::Local,
        }
    }

    /// Update the entry at `idx` given the pre-update guesses of both
    /// components.
    ///
    /// NOTE: Nothing changes when both components made the same guess,
    /// even if both were wrong.
    pub fn update(&mut self,
        idx: usize,
        global_guess: Outcome,
        local_guess: Outcome,
        outcome: Outcome
    )
    {
        if global_guess == local_guess {
            return;
        }
        if global_guess == outcome {
            self.data.step(idx, Outcome::T);
        } else if local_guess == outcome {
            self.data.step(idx, Outcome::N);
        }
    }

    pub fn reset(&mut self) {
        self.data.fill(Self::INIT);
    }
}
