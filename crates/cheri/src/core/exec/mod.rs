//! Capability Instruction Execution.
//!
//! This module executes decoded capability instructions against a hart, its
//! tag memory and the external memory port. It performs the following:
//! 1. **Dispatch:** Routes each `CheriOp` to its semantics.
//! 2. **Atomicity:** Every fault check runs against unmodified source
//!    operands before the single destination write.
//! 3. **Fault Recording:** A capability fault is written to the cause
//!    register; the program counter is left on the faulting instruction.
//! 4. **PC Advance:** Non-jumping instructions advance the program counter.

/// Bounds narrowing.
pub mod bounds;

/// Control transfer through capabilities.
pub mod control;

/// Derivation from an authority (`cbuildcap`, `ccopytype`, `candperm`, ...).
pub mod derive;

/// Integer projections.
pub mod inspect;

/// Capability-relative and DDC-relative loads and stores.
pub mod memory;

/// Cursor, offset and pointer conversion.
pub mod pointer;

/// Sealing and unsealing.
pub mod seal;

/// Special capability register access.
pub mod special;

use tracing::trace;

use crate::cap::Capability;
use crate::common::constants::CHERI_INSTRUCTION_BYTES;
use crate::common::{CapCause, CapFault, Trap};
use crate::core::cpu::Hart;
use crate::core::units::AuthReg;
use crate::isa::xcheri::{CheriOp, decode};
use crate::soc::memory::tags::TagMemory;
use crate::soc::traits::MemoryPort;

/// Outcome of a successful instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fall through to the next instruction.
    Next,
    /// PCC was replaced; the program counter is already at the target.
    Jump,
}

/// Everything a capability instruction may read or write.
pub struct ExecContext<'a> {
    /// Architectural state.
    pub hart: &'a mut Hart,
    /// Tag memory.
    pub tags: &'a mut TagMemory,
    /// Translator and scalar memory.
    pub bus: &'a mut dyn MemoryPort,
}

impl std::fmt::Debug for ExecContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecContext")
            .field("pc", &self.hart.arch_pc())
            .field("privilege", &self.hart.privilege)
            .finish_non_exhaustive()
    }
}

impl<'a> ExecContext<'a> {
    /// Bundles a hart with its memory.
    pub fn new(hart: &'a mut Hart, tags: &'a mut TagMemory, bus: &'a mut dyn MemoryPort) -> Self {
        Self { hart, tags, bus }
    }

    /// Decodes and executes one capability instruction.
    ///
    /// # Errors
    ///
    /// `IllegalInstruction` for encodings outside the extension, otherwise
    /// as `execute`.
    pub fn step(&mut self, insn: u32) -> Result<Flow, Trap> {
        let op = decode(insn)?;
        self.execute(insn, op)
    }

    /// Executes a decoded instruction; `insn` is its encoding, reported by
    /// illegal-instruction traps.
    ///
    /// On success the program counter advances past the instruction unless
    /// it jumped. On a fault no register is written except the capability
    /// cause register, and the program counter is unchanged.
    ///
    /// # Errors
    ///
    /// The trap raised by the instruction.
    pub fn execute(&mut self, insn: u32, op: CheriOp) -> Result<Flow, Trap> {
        trace!(pc = self.hart.arch_pc(), op = ?op, "execute");
        let result = self.dispatch(insn, op);
        match result {
            Ok(Flow::Next) => self.hart.advance_pc(CHERI_INSTRUCTION_BYTES),
            Ok(Flow::Jump) => {}
            Err(Trap::Capability(fault)) => self.hart.record_fault(fault),
            Err(_) => {}
        }
        result
    }

    fn dispatch(&mut self, insn: u32, op: CheriOp) -> Result<Flow, Trap> {
        match op {
            CheriOp::Inspect { op, rd, cs1 } => self.exec_inspect(op, rd, cs1),
            CheriOp::Move { cd, cs1 } => self.exec_move(cd, cs1),
            CheriOp::ClearTag { cd, cs1 } => self.exec_clear_tag(cd, cs1),
            CheriOp::Sub { rd, cs1, cs2 } => self.exec_sub(rd, cs1, cs2),
            CheriOp::TestSubset { rd, cs1, cs2 } => self.exec_test_subset(rd, cs1, cs2),
            CheriOp::SetBounds { cd, cs1, rs2, exact } => {
                let len = self.xreg(rs2);
                self.exec_set_bounds(cd, cs1, len, exact)?;
            }
            CheriOp::SetBoundsImm { cd, cs1, imm } => self.exec_set_bounds(cd, cs1, imm, false)?,
            CheriOp::SetOffset { cd, cs1, rs2 } => self.exec_set_offset(cd, cs1, rs2)?,
            CheriOp::SetAddr { cd, cs1, rs2 } => self.exec_set_addr(cd, cs1, rs2)?,
            CheriOp::IncOffset { cd, cs1, rs2 } => {
                let delta = self.xreg(rs2);
                self.exec_inc_offset(cd, cs1, delta)?;
            }
            CheriOp::IncOffsetImm { cd, cs1, imm } => self.exec_inc_offset(cd, cs1, imm as u64)?,
            CheriOp::SetFlags { cd, cs1, rs2 } => self.exec_set_flags(cd, cs1, rs2)?,
            CheriOp::AndPerm { cd, cs1, rs2 } => self.exec_and_perm(cd, cs1, rs2)?,
            CheriOp::Seal { cd, cs1, cs2 } => self.exec_seal(cd, cs1, cs2)?,
            CheriOp::CondSeal { cd, cs1, cs2 } => self.exec_cond_seal(cd, cs1, cs2)?,
            CheriOp::Unseal { cd, cs1, cs2 } => self.exec_unseal(cd, cs1, cs2)?,
            CheriOp::BuildCap { cd, cs1, cs2 } => self.exec_build_cap(cd, cs1, cs2)?,
            CheriOp::CopyType { cd, cs1, cs2 } => self.exec_copy_type(cd, cs1, cs2)?,
            CheriOp::ToPtr { rd, cs1, cs2 } => self.exec_to_ptr(rd, cs1, cs2)?,
            CheriOp::FromPtr { cd, cs1, rs2 } => self.exec_from_ptr(cd, cs1, rs2)?,
            CheriOp::SpecialRw { cd, cs1, scr } => self.exec_special_rw(insn, cd, cs1, scr)?,
            CheriOp::Load {
                rd,
                rs1,
                imm,
                width,
                unsigned,
                via,
            } => self.exec_load(rd, rs1, imm, width, unsigned, via)?,
            CheriOp::Store {
                rs1,
                rs2,
                imm,
                width,
                via,
            } => self.exec_store(rs1, rs2, imm, width, via)?,
            CheriOp::LoadCap { cd, rs1, imm, via } => self.exec_load_cap(cd, rs1, imm, via)?,
            CheriOp::StoreCap { rs1, cs2, imm, via } => self.exec_store_cap(rs1, cs2, imm, via)?,
            CheriOp::JumpLink { cd, cs1 } => {
                self.exec_jalr(cd, cs1)?;
                return Ok(Flow::Jump);
            }
            CheriOp::Call { cs1, cs2 } => {
                self.exec_call(cs1, cs2)?;
                return Ok(Flow::Jump);
            }
        }
        Ok(Flow::Next)
    }

    #[inline]
    fn creg(&self, idx: usize) -> Capability {
        self.hart.cregs.read(idx)
    }

    #[inline]
    fn set_creg(&mut self, idx: usize, cap: Capability) {
        self.hart.cregs.write(idx, cap);
    }

    #[inline]
    fn xreg(&self, idx: usize) -> u64 {
        self.hart.regs.read(idx)
    }

    #[inline]
    fn set_xreg(&mut self, idx: usize, val: u64) {
        self.hart.regs.write(idx, val);
    }

    /// Operand `idx`, or DDC when `idx` is 0.
    fn creg_or_ddc(&self, idx: usize) -> (Capability, AuthReg) {
        if idx == 0 {
            (self.hart.ddc(), AuthReg::DDC)
        } else {
            (self.creg(idx), AuthReg::gpr(idx))
        }
    }
}

/// Fault blamed on general capability register `idx`.
#[inline]
const fn fault(cause: CapCause, idx: usize) -> Trap {
    Trap::Capability(CapFault::new(cause, idx))
}
