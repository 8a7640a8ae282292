//! RISC-V Trap Cause Codes.
//!
//! Exception codes written to `mcause`/`scause` by trap delivery. Capability
//! faults share a single code; the CHERI cause lives in the capability cause
//! register and in `xtval`.

use crate::common::Trap;

/// Exception definitions (MSB = 0).
pub mod exception {
    /// Instruction address misaligned (0).
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u64 = 0;
    /// Instruction access fault (1).
    pub const INSTRUCTION_ACCESS_FAULT: u64 = 1;
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u64 = 2;
    /// Load address misaligned (4).
    pub const LOAD_ADDRESS_MISALIGNED: u64 = 4;
    /// Load access fault (5).
    pub const LOAD_ACCESS_FAULT: u64 = 5;
    /// Store/AMO address misaligned (6).
    pub const STORE_ADDRESS_MISALIGNED: u64 = 6;
    /// Store/AMO access fault (7).
    pub const STORE_ACCESS_FAULT: u64 = 7;
    /// Instruction page fault (12).
    pub const INSTRUCTION_PAGE_FAULT: u64 = 12;
    /// Load page fault (13).
    pub const LOAD_PAGE_FAULT: u64 = 13;
    /// Store/AMO page fault (15).
    pub const STORE_PAGE_FAULT: u64 = 15;
    /// CHERI capability exception (28).
    pub const CHERI_FAULT: u64 = 0x1c;
}

/// Returns the exception code and trap value delivered for `trap`.
///
/// Capability faults report the capability cause register bits as the trap
/// value.
pub const fn code_and_tval(trap: &Trap) -> (u64, u64) {
    match *trap {
        Trap::InstructionAddressMisaligned(a) => (exception::INSTRUCTION_ADDRESS_MISALIGNED, a),
        Trap::InstructionAccessFault(a) => (exception::INSTRUCTION_ACCESS_FAULT, a),
        Trap::IllegalInstruction(insn) => (exception::ILLEGAL_INSTRUCTION, insn as u64),
        Trap::LoadAddressMisaligned(a) => (exception::LOAD_ADDRESS_MISALIGNED, a),
        Trap::LoadAccessFault(a) => (exception::LOAD_ACCESS_FAULT, a),
        Trap::StoreAddressMisaligned(a) => (exception::STORE_ADDRESS_MISALIGNED, a),
        Trap::StoreAccessFault(a) => (exception::STORE_ACCESS_FAULT, a),
        Trap::InstructionPageFault(a) => (exception::INSTRUCTION_PAGE_FAULT, a),
        Trap::LoadPageFault(a) => (exception::LOAD_PAGE_FAULT, a),
        Trap::StorePageFault(a) => (exception::STORE_PAGE_FAULT, a),
        Trap::Capability(fault) => (exception::CHERI_FAULT, fault.ccsr_bits()),
    }
}
