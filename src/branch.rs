//! Types for representing branches and branch outcomes.

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    pub fn from_bool(b: bool) -> Self {
        match b {
            true => Self::T,
            false => Self::N,
        }
    }

    /// Decode the `0`/`1` representation used by text traces.
    pub fn from_bit(bit: u32) -> Option<Self> {
        match bit {
            0 => Some(Self::N),
            1 => Some(Self::T),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self { Self::from_bool(x) }
}

impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}

/// Classification bits attached to a retired control-flow instruction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchFlags(pub u32);
impl BranchFlags {
    pub const BRN_FLAG: u32  = 1 << 0;
    pub const CALL_FLAG: u32 = 1 << 1;
    pub const RET_FLAG: u32  = 1 << 2;
    pub const IND_FLAG: u32  = 1 << 3;

    pub fn new(conditional: bool, call: bool, ret: bool, direct: bool)
        -> Self
    {
        let mut bits = 0;
        if conditional { bits |= Self::BRN_FLAG; }
        if call { bits |= Self::CALL_FLAG; }
        if ret { bits |= Self::RET_FLAG; }
        if !direct { bits |= Self::IND_FLAG; }
        Self(bits)
    }

    pub fn is_brn(&self) -> bool { self.0 & Self::BRN_FLAG != 0 }
    pub fn is_call(&self) -> bool { self.0 & Self::CALL_FLAG != 0 }
    pub fn is_ret(&self) -> bool { self.0 & Self::RET_FLAG != 0 }
    pub fn is_direct(&self) -> bool { self.0 & Self::IND_FLAG == 0 }
    pub fn is_indirect(&self) -> bool { self.0 & Self::IND_FLAG != 0 }
}

/// A record of branch execution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: u32,

    /// The target address evaluated for this branch
    pub tgt: u32,

    /// The resolved outcome for this branch
    pub outcome: Outcome,

    pub flags: BranchFlags,
}
impl BranchRecord {
    /// A direct conditional branch.
    pub fn conditional(pc: u32, tgt: u32, outcome: Outcome) -> Self {
        Self {
            pc,
            tgt,
            outcome,
            flags: BranchFlags::new(true, false, false, true),
        }
    }

    /// An unconditional control transfer (jump, call or return).
    pub fn unconditional(pc: u32, tgt: u32, flags: BranchFlags) -> Self {
        let flags = BranchFlags(flags.0 & !BranchFlags::BRN_FLAG);
        Self { pc, tgt, outcome: Outcome::T, flags }
    }

    /// Returns 'true' if this is a conditional instruction.
    pub fn is_conditional(&self) -> bool {
        self.flags.is_brn()
    }

    /// Returns 'true' if this is an unconditional instruction.
    pub fn is_unconditional(&self) -> bool {
        !self.flags.is_brn()
    }

    /// Returns 'true' if this instruction directly specifies the target.
    pub fn is_direct(&self) -> bool {
        self.flags.is_direct()
    }

    pub fn is_call(&self) -> bool { self.flags.is_call() }
    pub fn is_return(&self) -> bool { self.flags.is_ret() }

    /// Returns 'true' if this is a "call" or "return".
    pub fn is_procedural(&self) -> bool {
        self.flags.is_call() || self.flags.is_ret()
    }
}
