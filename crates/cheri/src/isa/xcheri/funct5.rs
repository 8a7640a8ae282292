//! Capability Extension Sub-opcodes (funct5).

/// Single-source operations under `funct7::SOURCE_DEST` (in rs2).
pub mod source_dest {
    /// `CGetPerm`.
    pub const CGETPERM: u32 = 0x00;
    /// `CGetType`.
    pub const CGETTYPE: u32 = 0x01;
    /// `CGetBase`.
    pub const CGETBASE: u32 = 0x02;
    /// `CGetLen`.
    pub const CGETLEN: u32 = 0x03;
    /// `CGetTag`.
    pub const CGETTAG: u32 = 0x04;
    /// `CGetSealed`.
    pub const CGETSEALED: u32 = 0x05;
    /// `CGetOffset`.
    pub const CGETOFFSET: u32 = 0x06;
    /// `CGetFlags`.
    pub const CGETFLAGS: u32 = 0x07;
    /// `CRoundRepresentableLength`.
    pub const CRRL: u32 = 0x08;
    /// `CRepresentableAlignmentMask`.
    pub const CRAM: u32 = 0x09;
    /// `CMove`.
    pub const CMOVE: u32 = 0x0a;
    /// `CClearTag`.
    pub const CCLEARTAG: u32 = 0x0b;
    /// `CJALR`.
    pub const CJALR: u32 = 0x0c;
    /// `CGetAddr`.
    pub const CGETADDR: u32 = 0x0f;
}

/// Loads under `funct7::LOAD` (in rs2).
///
/// Bit 3 selects capability-relative addressing, bit 2 zero extension and
/// bits 1-0 the width.
pub mod load {
    /// Capability-relative (versus DDC-relative) addressing.
    pub const CAP_BIT: u32 = 0x08;
    /// Zero-extending load.
    pub const UNSIGNED_BIT: u32 = 0x04;
    /// Width field mask.
    pub const WIDTH_MASK: u32 = 0x03;
    /// `LQ.DDC` (`LC.DDC`).
    pub const LC_DDC: u32 = 0x17;
    /// `LQ.CAP` (`LC.CAP`).
    pub const LC_CAP: u32 = 0x1f;
}

/// Stores under `funct7::STORE` (in rd).
///
/// Bit 3 selects capability-relative addressing, bits 1-0 the width.
pub mod store {
    /// Capability-relative (versus DDC-relative) addressing.
    pub const CAP_BIT: u32 = 0x08;
    /// Width field mask.
    pub const WIDTH_MASK: u32 = 0x03;
    /// `SQ.DDC` (`SC.DDC`).
    pub const SC_DDC: u32 = 0x04;
    /// `SQ.CAP` (`SC.CAP`).
    pub const SC_CAP: u32 = 0x0c;
}
