//! Capability Extension Function Codes (funct3).

/// Three-register forms, selected by funct7.
pub const THREE_OP: u32 = 0b000;

/// `CIncOffsetImm`.
pub const CINCOFFSETIMM: u32 = 0b001;

/// `CSetBoundsImm`.
pub const CSETBOUNDSIMM: u32 = 0b010;

/// `LQ` under `MISC-MEM`.
pub const LQ: u32 = 0b010;

/// `SQ` under `STORE`.
pub const SQ: u32 = 0b100;
