use bitvec::prelude::*;

/// A shift register recording recent branch outcomes.
///
/// Bit 0 holds the most recent outcome. Older outcomes age toward the high
/// end and are discarded once they move past the length of the register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    /// Create a register whose low bits are initialized from `pattern`.
    pub fn with_pattern(len: usize, pattern: u64) -> Self {
        let mut res = Self::new(len);
        res.fill(pattern);
        res
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Overwrite the register with the low bits of `pattern`.
    pub fn fill(&mut self, pattern: u64) {
        self.data.fill(false);
        let width = self.len.min(u64::BITS as usize);
        if width != 0 {
            self.data[..width].store_le::<u64>(pattern);
        }
    }
}

impl HistoryRegister {
    /// Shift a resolved outcome into the bottom of the register.
    ///
    /// The top bit wraps around to bit 0 and is then overwritten, so it is
    /// discarded.
    pub fn shift_in(&mut self, outcome: impl Into<bool>) {
        if self.len == 0 {
            return;
        }
        self.data.rotate_right(1);
        self.data.set(0, outcome.into());
    }

    /// Return the low `n` bits of the register as an integer.
    ///
    /// Bits above the length of the register read as zero.
    pub fn low_bits(&self, n: usize) -> usize {
        let width = n.min(self.len).min(usize::BITS as usize);
        if width == 0 {
            return 0;
        }
        self.data[..width].load_le::<usize>()
    }
}
