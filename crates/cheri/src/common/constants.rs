//! Capability geometry and architectural constants.

/// Size in bytes of one capability in memory (128-bit format).
pub const CAP_SIZE_BYTES: u64 = 16;

/// log2 of the tag granule size; one tag bit covers `1 << GRANULE_SHIFT` bytes.
pub const GRANULE_SHIFT: u32 = 4;

/// Smallest instruction the fetch unit can deliver (compressed instructions).
pub const MIN_INSTRUCTION_BYTES: u64 = 2;

/// Width of every capability instruction; the link address is `pc + 4`.
pub const CHERI_INSTRUCTION_BYTES: u64 = 4;

/// Bit in a fault register index marking a special capability register source.
pub const SCR_INDEX_FLAG: u8 = 0x20;

/// Bit position of the user permissions in `cgetperm`/`candperm` operands.
pub const USER_PERMS_SHIFT: u32 = 15;

/// Address width of the architecture, in bits.
pub const ADDR_WIDTH: u32 = 64;
