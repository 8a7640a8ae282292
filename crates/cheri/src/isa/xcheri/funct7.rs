//! Capability Extension Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) selects the operation when funct3 is 0.

/// `CSpecialRW`; rs2 holds the special register index.
pub const CSPECIALRW: u32 = 0x01;
/// `CSetBounds`.
pub const CSETBOUNDS: u32 = 0x08;
/// `CSetBoundsExact`.
pub const CSETBOUNDSEXACT: u32 = 0x09;
/// `CSeal`.
pub const CSEAL: u32 = 0x0b;
/// `CUnseal`.
pub const CUNSEAL: u32 = 0x0c;
/// `CAndPerm`.
pub const CANDPERM: u32 = 0x0d;
/// `CSetFlags`.
pub const CSETFLAGS: u32 = 0x0e;
/// `CSetOffset`.
pub const CSETOFFSET: u32 = 0x0f;
/// `CSetAddr`.
pub const CSETADDR: u32 = 0x10;
/// `CIncOffset`.
pub const CINCOFFSET: u32 = 0x11;
/// `CToPtr`.
pub const CTOPTR: u32 = 0x12;
/// `CFromPtr`.
pub const CFROMPTR: u32 = 0x13;
/// `CSub`.
pub const CSUB: u32 = 0x14;
/// `CBuildCap`.
pub const CBUILDCAP: u32 = 0x1d;
/// `CCopyType`.
pub const CCOPYTYPE: u32 = 0x1e;
/// `CCSeal`.
pub const CCSEAL: u32 = 0x1f;
/// `CTestSubset`.
pub const CTESTSUBSET: u32 = 0x20;
/// Stores; rd holds the funct5 sub-opcode.
pub const STORE: u32 = 0x7c;
/// Loads; rs2 holds the funct5 sub-opcode.
pub const LOAD: u32 = 0x7d;
/// `CCall`; rd must be 1.
pub const CCALL: u32 = 0x7e;
/// Single-source operations; rs2 holds the funct5 sub-opcode.
pub const SOURCE_DEST: u32 = 0x7f;
