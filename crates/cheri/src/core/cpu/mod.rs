//! Hart State and PC/SCR Coupling.
//!
//! This module defines the `Hart`, the container for all architectural state
//! the capability extension touches. It coordinates the following:
//! 1. **Register Files:** Integer registers, the 32 capability registers and
//!    the special capability registers.
//! 2. **Coupling:** PCC and the coupled trap SCRs are stored once. The
//!    capability slot holds bounds, permissions and type; the cursor is held
//!    as an offset in the scalar `pc` or trap CSR and composed on every read.
//! 3. **Fault Recording:** The capability cause register.
//! 4. **Trap Delivery:** See `trap`.

/// Debugger-facing register lookup and formatting.
pub mod debug;

/// Instruction fetch authorization.
pub mod fetch;

/// Trap entry and return.
pub mod trap;

use tracing::{debug, trace};

use crate::cap::Capability;
use crate::common::CapFault;
use crate::config::CheriConfig;
use crate::core::arch::cap_regs::CapRegisterFile;
use crate::core::arch::csr::Csrs;
use crate::core::arch::gpr::Gpr;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::scr::{ScrFile, ScrIndex};
use crate::core::units::CapCheckUnit;

/// Architectural state of one hart.
///
/// The scalar program counter is private: it is the offset half of PCC and
/// can only be moved through `write_pcc`, `set_arch_pc` or `advance_pc`.
#[derive(Debug, Clone)]
pub struct Hart {
    /// Integer registers.
    pub regs: Gpr,
    /// General capability registers.
    pub cregs: CapRegisterFile,
    /// Trap CSRs. `mtvec`, `mepc`, `stvec` and `sepc` are the offset halves
    /// of MTCC, MEPCC, STCC and SEPCC.
    pub csrs: Csrs,
    /// Current privilege mode.
    pub privilege: PrivilegeMode,
    /// Capability cause register: `(cause << 8) | reg` of the last fault.
    pub ccsr: u64,
    /// Check engine.
    pub check: CapCheckUnit,
    pc: u64,
    scrs: ScrFile,
    ddc_almighty: bool,
    start_pc: u64,
}

impl Hart {
    /// Creates a hart in its reset state.
    pub fn new(config: &CheriConfig) -> Self {
        let mut hart = Self {
            regs: Gpr::new(),
            cregs: CapRegisterFile::new(),
            csrs: Csrs::default(),
            privilege: PrivilegeMode::Machine,
            ccsr: 0,
            check: CapCheckUnit::new(config.general.trace_checks),
            pc: 0,
            scrs: ScrFile::new(config.reset.ddc_almighty),
            ddc_almighty: config.reset.ddc_almighty,
            start_pc: config.start_pc(),
        };
        hart.reset();
        hart
    }

    /// Reinitializes every register. PCC is almighty with its cursor at the
    /// configured start address.
    pub fn reset(&mut self) {
        self.regs = Gpr::new();
        self.cregs.reset();
        self.csrs = Csrs::default();
        self.privilege = PrivilegeMode::Machine;
        self.ccsr = 0;
        self.scrs.reset(self.ddc_almighty);
        self.pc = self.start_pc;
    }

    /// Scalar program counter: the offset of PCC.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Program counter in architectural address space, `PCC.base + pc`.
    #[inline]
    pub fn arch_pc(&self) -> u64 {
        self.scrs.raw(ScrIndex::Pcc).base().wrapping_add(self.pc)
    }

    /// Moves the program counter to architectural address `addr` without
    /// changing PCC metadata.
    #[inline]
    pub fn set_arch_pc(&mut self, addr: u64) {
        self.pc = addr.wrapping_sub(self.scrs.raw(ScrIndex::Pcc).base());
    }

    /// Advances the program counter by `bytes`.
    #[inline]
    pub const fn advance_pc(&mut self, bytes: u64) {
        self.pc = self.pc.wrapping_add(bytes);
    }

    /// The program counter capability.
    #[inline]
    pub fn pcc(&self) -> Capability {
        self.read_scr(ScrIndex::Pcc)
    }

    /// Installs `cap` as PCC; the program counter follows its cursor.
    #[inline]
    pub fn write_pcc(&mut self, cap: Capability) {
        self.write_scr(ScrIndex::Pcc, cap);
    }

    /// The default data capability.
    #[inline]
    pub fn ddc(&self) -> Capability {
        self.scrs.raw(ScrIndex::Ddc)
    }

    fn coupled_scalar(&self, scr: ScrIndex) -> Option<u64> {
        match scr {
            ScrIndex::Pcc => Some(self.pc),
            ScrIndex::Stcc => Some(self.csrs.stvec),
            ScrIndex::Sepcc => Some(self.csrs.sepc),
            ScrIndex::Mtcc => Some(self.csrs.mtvec),
            ScrIndex::Mepcc => Some(self.csrs.mepc),
            _ => None,
        }
    }

    fn coupled_scalar_mut(&mut self, scr: ScrIndex) -> Option<&mut u64> {
        match scr {
            ScrIndex::Pcc => Some(&mut self.pc),
            ScrIndex::Stcc => Some(&mut self.csrs.stvec),
            ScrIndex::Sepcc => Some(&mut self.csrs.sepc),
            ScrIndex::Mtcc => Some(&mut self.csrs.mtvec),
            ScrIndex::Mepcc => Some(&mut self.csrs.mepc),
            _ => None,
        }
    }

    /// Reads a special capability register. For coupled registers the cursor
    /// is `base + scalar`, taken from the live scalar register.
    pub fn read_scr(&self, scr: ScrIndex) -> Capability {
        let raw = self.scrs.raw(scr);
        match self.coupled_scalar(scr) {
            Some(offset) => raw.with_cursor_unchecked(raw.base().wrapping_add(offset)),
            None => raw,
        }
    }

    /// Writes a special capability register. For coupled registers the
    /// offset of `cap` is routed into the scalar register.
    pub fn write_scr(&mut self, scr: ScrIndex, cap: Capability) {
        trace!(scr = scr.name(), cap = %cap, "scr write");
        if let Some(scalar) = self.coupled_scalar_mut(scr) {
            *scalar = cap.offset();
        }
        self.scrs.set_raw(scr, cap);
    }

    /// Records a capability fault in the cause register.
    pub fn record_fault(&mut self, fault: CapFault) {
        self.ccsr = fault.ccsr_bits();
        debug!(
            pc = self.arch_pc(),
            ccsr = self.ccsr,
            fault = %fault,
            "capability fault"
        );
    }
}
