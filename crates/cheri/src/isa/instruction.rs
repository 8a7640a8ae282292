//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for the RISC-V instruction fields the
//! capability instructions use.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Capability stores reuse this field as a `funct5` sub-opcode.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    ///
    /// Single-source capability instructions reuse this field as a `funct5`
    /// sub-opcode; `CSpecialRW` holds the special register index here.
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Sign-extended I-type immediate (bits 20-31).
    fn imm_i(&self) -> i64;

    /// Zero-extended I-type immediate (bits 20-31).
    fn uimm_i(&self) -> u64;

    /// Sign-extended S-type immediate (bits 25-31 and 7-11).
    fn imm_s(&self) -> i64;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn imm_i(&self) -> i64 {
        i64::from((*self as i32) >> 20)
    }

    #[inline(always)]
    fn uimm_i(&self) -> u64 {
        u64::from(self >> 20)
    }

    #[inline(always)]
    fn imm_s(&self) -> i64 {
        let hi = (*self as i32) >> 25;
        let lo = ((self >> 7) & REG_MASK) as i32;
        i64::from((hi << 5) | lo)
    }
}
