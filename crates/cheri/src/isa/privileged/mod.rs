//! Privileged architecture definitions used by trap delivery.

/// Trap cause codes.
pub mod cause;

/// Encodings of the trap-return instructions.
pub mod opcodes {
    /// `MRET` encoding.
    pub const MRET: u32 = 0x3020_0073;
    /// `SRET` encoding.
    pub const SRET: u32 = 0x1020_0073;
}
