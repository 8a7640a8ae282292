//! Integer register file.
//!
//! Capability instructions read integer operands (lengths, offsets,
//! addresses) from here and write scalar results (`cget*`, `ctoptr`, `csub`)
//! back. Register `x0` reads as zero and ignores writes.

/// General-purpose integer registers.
#[derive(Debug, Clone, Default)]
pub struct Gpr {
    regs: [u64; 32],
}

impl Gpr {
    /// Creates a register file with every register zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads register `idx`; `x0` is always zero.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx & 0x1f] }
    }

    /// Writes register `idx`; writes to `x0` are dropped.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx & 0x1f] = val;
        }
    }
}
