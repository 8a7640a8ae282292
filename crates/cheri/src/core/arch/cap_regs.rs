//! General capability register file.
//!
//! Thirty-two capability registers `c0`-`c31`. `c0` reads as the null
//! capability; writes to it are accepted and never observable.

use crate::cap::Capability;

/// ABI names of the capability registers, `cnull` through `ct6`.
pub const CAP_REG_NAMES: [&str; 32] = [
    "cnull", "cra", "csp", "cgp", "ctp", "ct0", "ct1", "ct2", "cs0", "cs1", "ca0", "ca1", "ca2",
    "ca3", "ca4", "ca5", "ca6", "ca7", "cs2", "cs3", "cs4", "cs5", "cs6", "cs7", "cs8", "cs9",
    "cs10", "cs11", "ct3", "ct4", "ct5", "ct6",
];

/// Link register written by `cjalr` and `ccall`.
pub const CRA: usize = 1;

/// Invoked data capability register written by `ccall`.
pub const IDC: usize = 31;

/// Capability register file.
#[derive(Debug, Clone)]
pub struct CapRegisterFile {
    regs: [Capability; 32],
}

impl Default for CapRegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl CapRegisterFile {
    /// Creates a register file with every register null.
    pub fn new() -> Self {
        Self {
            regs: [Capability::null(); 32],
        }
    }

    /// Reads register `idx`; `c0` is always null.
    #[inline]
    pub fn read(&self, idx: usize) -> Capability {
        if idx == 0 {
            Capability::null()
        } else {
            self.regs[idx & 0x1f]
        }
    }

    /// Writes register `idx`.
    #[inline]
    pub fn write(&mut self, idx: usize, cap: Capability) {
        self.regs[idx & 0x1f] = cap;
    }

    /// Resets every register to null.
    pub fn reset(&mut self) {
        self.regs = [Capability::null(); 32];
    }

    /// Parses `c<n>` or an ABI name into a register index.
    pub fn index_of(name: &str) -> Option<usize> {
        if let Some(idx) = CAP_REG_NAMES.iter().position(|n| *n == name) {
            return Some(idx);
        }
        let idx: usize = name.strip_prefix('c')?.parse().ok()?;
        (idx < 32).then_some(idx)
    }
}
