//! Saturating counter state machines.
//!
//! Tables store counters as raw bytes; these types give those bytes their
//! meaning. Decoding a raw byte with [`TryFrom<u8>`] is the only place an
//! out-of-range value can be observed.

use crate::Outcome;
use crate::error::InvalidCounterState;

/// Interface to a saturating counter FSM.
///
/// States are totally ordered. Training with [Outcome::T] moves one step
/// toward the strongest taken state, training with [Outcome::N] moves one
/// step toward the strongest not-taken state. Both ends are clamped.
pub trait CounterFsm: Copy + Eq + std::fmt::Debug + 'static
    + TryFrom<u8, Error = InvalidCounterState> + Into<u8>
{
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Every state, from strongest not-taken to strongest taken.
    const STATES: &'static [Self];

    /// The state used to seed a freshly allocated table.
    const INIT: Self;

    /// Return the direction predicted by this state.
    fn predict(self) -> Outcome;

    /// Return the position of this state in [CounterFsm::STATES].
    fn level(self) -> usize { Into::<u8>::into(self) as usize }

    /// Return the next state after observing `outcome`.
    fn transition(self, outcome: Outcome) -> Self {
        let max = Self::STATES.len() - 1;
        let next = match outcome {
            Outcome::T => (self.level() + 1).min(max),
            Outcome::N => self.level().saturating_sub(1),
        };
        Self::STATES[next]
    }

    /// Decode a raw table entry.
    fn decode(raw: u8) -> Result<Self, InvalidCounterState> {
        Self::STATES.get(raw as usize).copied().ok_or(InvalidCounterState {
            kind: Self::NAME,
            value: raw,
        })
    }
}

/// A 2-bit (4-state) saturating counter.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwoBitCounter {
    StronglyNotTaken = 0,
    WeaklyNotTaken = 1,
    WeaklyTaken = 2,
    StronglyTaken = 3,
}

impl CounterFsm for TwoBitCounter {
    const NAME: &'static str = "2-bit";
    const STATES: &'static [Self] = &[
        Self::StronglyNotTaken,
        Self::WeaklyNotTaken,
        Self::WeaklyTaken,
        Self::StronglyTaken,
    ];
    const INIT: Self = Self::WeaklyNotTaken;

    fn predict(self) -> Outcome {
        match self {
            Self::StronglyNotTaken | Self::WeaklyNotTaken => Outcome::N,
            Self::WeaklyTaken | Self::StronglyTaken => Outcome::T,
        }
    }
}

impl TryFrom<u8> for TwoBitCounter {
    type Error = InvalidCounterState;
    fn try_from(raw: u8) -> Result<Self, Self::Error> { Self::decode(raw) }
}

impl From<TwoBitCounter> for u8 {
    fn from(x: TwoBitCounter) -> u8 { x as u8 }
}

/// A 3-bit (8-state) saturating counter.
///
/// `N3` is the strongest not-taken level and `N0` the weakest; `T0` is the
/// weakest taken level and `T3` the strongest.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThreeBitCounter {
    N3 = 0,
    N2 = 1,
    N1 = 2,
    N0 = 3,
    T0 = 4,
    T1 = 5,
    T2 = 6,
    T3 = 7,
}

impl CounterFsm for ThreeBitCounter {
    const NAME: &'static str = "3-bit";
    const STATES: &'static [Self] = &[
        Self::N3, Self::N2, Self::N1, Self::N0,
        Self::T0, Self::T1, Self::T2, Self::T3,
    ];
    const INIT: Self = Self::N0;

    fn predict(self) -> Outcome {
        Outcome::from(self >= Self::T0)
    }
}

impl TryFrom<u8> for ThreeBitCounter {
    type Error = InvalidCounterState;
    fn try_from(raw: u8) -> Result<Self, Self::Error> { Self::decode(raw) }
}

impl From<ThreeBitCounter> for u8 {
    fn from(x: ThreeBitCounter) -> u8 { x as u8 }
}
