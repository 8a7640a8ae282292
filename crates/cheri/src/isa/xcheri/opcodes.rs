//! Capability Extension Opcodes.

/// Custom-2 opcode holding the capability instructions.
pub const OP_CHERI: u32 = 0b101_1011;

/// `MISC-MEM`; funct3 `0b010` is `LQ` (`clc` with an immediate).
pub const OP_MISC_MEM: u32 = 0b000_1111;

/// `STORE`; funct3 `0b100` is `SQ` (`csc` with an immediate).
pub const OP_STORE: u32 = 0b010_0011;
