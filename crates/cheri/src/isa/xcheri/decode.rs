//! Capability Instruction Decoder.
//!
//! Decodes a 32-bit encoding into a `CheriOp`. Register fields are kept as
//! raw indices; which file they name (integer or capability) is implied by
//! the operand name (`rd`/`rs*` integer, `cd`/`cs*` capability).

use super::{funct3, funct5, funct7, opcodes};
use crate::common::Trap;
use crate::isa::instruction::InstructionBits;

/// Projections of a capability into an integer register, plus the two
/// integer-to-integer representability helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InspectOp {
    /// `CGetPerm`.
    Perm,
    /// `CGetType`.
    Type,
    /// `CGetBase`.
    Base,
    /// `CGetLen`.
    Len,
    /// `CGetTag`.
    Tag,
    /// `CGetSealed`.
    Sealed,
    /// `CGetOffset`.
    Offset,
    /// `CGetFlags`.
    Flags,
    /// `CGetAddr`.
    Addr,
    /// `CRRL`: operand is an integer register.
    RoundLength,
    /// `CRAM`: operand is an integer register.
    AlignMask,
}

/// Scalar access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemWidth {
    /// 1 byte.
    Byte,
    /// 2 bytes.
    Half,
    /// 4 bytes.
    Word,
    /// 8 bytes.
    Double,
}

impl MemWidth {
    /// Decodes the two-bit width field.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => Self::Byte,
            1 => Self::Half,
            2 => Self::Word,
            _ => Self::Double,
        }
    }

    /// Access size in bytes.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

    /// Assembler suffix.
    pub const fn suffix(self) -> char {
        match self {
            Self::Byte => 'b',
            Self::Half => 'h',
            Self::Word => 'w',
            Self::Double => 'd',
        }
    }
}

/// How a load or store forms its address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// `DDC.cursor + x[rs1] + imm`, authorized by DDC.
    Ddc,
    /// `c[rs1].cursor + imm`, authorized by `c[rs1]`.
    Cap,
    /// `Cap` when `PCC.flags` is set, `Ddc` otherwise.
    ByMode,
}

/// A decoded capability instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheriOp {
    /// Integer projection of `c[cs1]` (or of `x[cs1]` for CRRL/CRAM).
    Inspect {
        /// Operation.
        op: InspectOp,
        /// Destination integer register.
        rd: usize,
        /// Source register.
        cs1: usize,
    },
    /// `CMove`.
    Move {
        /// Destination.
        cd: usize,
        /// Source.
        cs1: usize,
    },
    /// `CClearTag`.
    ClearTag {
        /// Destination.
        cd: usize,
        /// Source.
        cs1: usize,
    },
    /// `CSetBounds` / `CSetBoundsExact`.
    SetBounds {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Length register.
        rs2: usize,
        /// Fault if the bounds cannot be represented exactly.
        exact: bool,
    },
    /// `CSetBoundsImm`.
    SetBoundsImm {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Unsigned length.
        imm: u64,
    },
    /// `CSetOffset`.
    SetOffset {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Offset register.
        rs2: usize,
    },
    /// `CSetAddr`.
    SetAddr {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Address register.
        rs2: usize,
    },
    /// `CIncOffset`.
    IncOffset {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Increment register.
        rs2: usize,
    },
    /// `CIncOffsetImm`.
    IncOffsetImm {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Signed increment.
        imm: i64,
    },
    /// `CSetFlags`.
    SetFlags {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Flags register.
        rs2: usize,
    },
    /// `CAndPerm`.
    AndPerm {
        /// Destination.
        cd: usize,
        /// Source capability.
        cs1: usize,
        /// Permission mask register.
        rs2: usize,
    },
    /// `CSeal`.
    Seal {
        /// Destination.
        cd: usize,
        /// Capability to seal.
        cs1: usize,
        /// Sealing authority.
        cs2: usize,
    },
    /// `CCSeal`.
    CondSeal {
        /// Destination.
        cd: usize,
        /// Capability to seal.
        cs1: usize,
        /// Sealing authority.
        cs2: usize,
    },
    /// `CUnseal`.
    Unseal {
        /// Destination.
        cd: usize,
        /// Sealed capability.
        cs1: usize,
        /// Unsealing authority.
        cs2: usize,
    },
    /// `CBuildCap`.
    BuildCap {
        /// Destination.
        cd: usize,
        /// Authority (DDC when 0).
        cs1: usize,
        /// Untagged bit pattern.
        cs2: usize,
    },
    /// `CCopyType`.
    CopyType {
        /// Destination.
        cd: usize,
        /// Authority.
        cs1: usize,
        /// Capability whose type is copied.
        cs2: usize,
    },
    /// `CToPtr`.
    ToPtr {
        /// Destination integer register.
        rd: usize,
        /// Capability to convert.
        cs1: usize,
        /// Authority (DDC when 0).
        cs2: usize,
    },
    /// `CFromPtr`.
    FromPtr {
        /// Destination.
        cd: usize,
        /// Authority (DDC when 0).
        cs1: usize,
        /// Offset register.
        rs2: usize,
    },
    /// `CSub`.
    Sub {
        /// Destination integer register.
        rd: usize,
        /// Minuend.
        cs1: usize,
        /// Subtrahend.
        cs2: usize,
    },
    /// `CTestSubset`.
    TestSubset {
        /// Destination integer register.
        rd: usize,
        /// Candidate superset (DDC when 0).
        cs1: usize,
        /// Candidate subset.
        cs2: usize,
    },
    /// `CJALR`.
    JumpLink {
        /// Link destination.
        cd: usize,
        /// Jump target.
        cs1: usize,
    },
    /// `CCall`.
    Call {
        /// Sealed code capability.
        cs1: usize,
        /// Sealed data capability.
        cs2: usize,
    },
    /// `CSpecialRW`.
    SpecialRw {
        /// Destination for the old value.
        cd: usize,
        /// New value (no write when 0).
        cs1: usize,
        /// Special register index.
        scr: u8,
    },
    /// Scalar load.
    Load {
        /// Destination integer register.
        rd: usize,
        /// Address register.
        rs1: usize,
        /// Signed offset.
        imm: i64,
        /// Width.
        width: MemWidth,
        /// Zero extension.
        unsigned: bool,
        /// Addressing mode.
        via: Addressing,
    },
    /// Scalar store.
    Store {
        /// Address register.
        rs1: usize,
        /// Data integer register.
        rs2: usize,
        /// Signed offset.
        imm: i64,
        /// Width.
        width: MemWidth,
        /// Addressing mode.
        via: Addressing,
    },
    /// Capability load (`LC`).
    LoadCap {
        /// Destination capability register.
        cd: usize,
        /// Address register.
        rs1: usize,
        /// Signed offset.
        imm: i64,
        /// Addressing mode.
        via: Addressing,
    },
    /// Capability store (`SC`).
    StoreCap {
        /// Address register.
        rs1: usize,
        /// Data capability register.
        cs2: usize,
        /// Signed offset.
        imm: i64,
        /// Addressing mode.
        via: Addressing,
    },
}

/// Decodes a capability instruction.
///
/// # Errors
///
/// `IllegalInstruction` for encodings that are not capability instructions.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::isa::xcheri::{CheriOp, decode};
///
/// // csetbounds c1, c2, x3
/// let op = decode(0x1031_00db).unwrap();
/// assert_eq!(op, CheriOp::SetBounds { cd: 1, cs1: 2, rs2: 3, exact: false });
/// ```
pub fn decode(insn: u32) -> Result<CheriOp, Trap> {
    let illegal = Trap::IllegalInstruction(insn);
    let (rd, rs1, rs2) = (insn.rd(), insn.rs1(), insn.rs2());

    match (insn.opcode(), insn.funct3()) {
        (opcodes::OP_MISC_MEM, funct3::LQ) => {
            return Ok(CheriOp::LoadCap {
                cd: rd,
                rs1,
                imm: insn.imm_i(),
                via: Addressing::ByMode,
            });
        }
        (opcodes::OP_STORE, funct3::SQ) => {
            return Ok(CheriOp::StoreCap {
                rs1,
                cs2: rs2,
                imm: insn.imm_s(),
                via: Addressing::ByMode,
            });
        }
        (opcodes::OP_CHERI, funct3::CINCOFFSETIMM) => {
            return Ok(CheriOp::IncOffsetImm {
                cd: rd,
                cs1: rs1,
                imm: insn.imm_i(),
            });
        }
        (opcodes::OP_CHERI, funct3::CSETBOUNDSIMM) => {
            return Ok(CheriOp::SetBoundsImm {
                cd: rd,
                cs1: rs1,
                imm: insn.uimm_i(),
            });
        }
        (opcodes::OP_CHERI, funct3::THREE_OP) => {}
        _ => return Err(illegal),
    }

    let op = match insn.funct7() {
        funct7::CSPECIALRW => CheriOp::SpecialRw {
            cd: rd,
            cs1: rs1,
            scr: rs2 as u8,
        },
        funct7::CSETBOUNDS => CheriOp::SetBounds {
            cd: rd,
            cs1: rs1,
            rs2,
            exact: false,
        },
        funct7::CSETBOUNDSEXACT => CheriOp::SetBounds {
            cd: rd,
            cs1: rs1,
            rs2,
            exact: true,
        },
        funct7::CSEAL => CheriOp::Seal {
            cd: rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CUNSEAL => CheriOp::Unseal {
            cd: rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CANDPERM => CheriOp::AndPerm {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CSETFLAGS => CheriOp::SetFlags {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CSETOFFSET => CheriOp::SetOffset {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CSETADDR => CheriOp::SetAddr {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CINCOFFSET => CheriOp::IncOffset {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CTOPTR => CheriOp::ToPtr {
            rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CFROMPTR => CheriOp::FromPtr {
            cd: rd,
            cs1: rs1,
            rs2,
        },
        funct7::CSUB => CheriOp::Sub {
            rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CBUILDCAP => CheriOp::BuildCap {
            cd: rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CCOPYTYPE => CheriOp::CopyType {
            cd: rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CCSEAL => CheriOp::CondSeal {
            cd: rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CTESTSUBSET => CheriOp::TestSubset {
            rd,
            cs1: rs1,
            cs2: rs2,
        },
        funct7::CCALL if rd == 1 => CheriOp::Call {
            cs1: rs1,
            cs2: rs2,
        },
        funct7::SOURCE_DEST => decode_source_dest(rs2 as u32, rd, rs1).ok_or(illegal)?,
        funct7::LOAD => decode_load(rs2 as u32, rd, rs1).ok_or(illegal)?,
        funct7::STORE => decode_store(rd as u32, rs1, rs2).ok_or(illegal)?,
        _ => return Err(illegal),
    };
    Ok(op)
}

fn decode_source_dest(f5: u32, rd: usize, rs1: usize) -> Option<CheriOp> {
    use funct5::source_dest as sd;

    let inspect = |op| Some(CheriOp::Inspect { op, rd, cs1: rs1 });
    match f5 {
        sd::CGETPERM => inspect(InspectOp::Perm),
        sd::CGETTYPE => inspect(InspectOp::Type),
        sd::CGETBASE => inspect(InspectOp::Base),
        sd::CGETLEN => inspect(InspectOp::Len),
        sd::CGETTAG => inspect(InspectOp::Tag),
        sd::CGETSEALED => inspect(InspectOp::Sealed),
        sd::CGETOFFSET => inspect(InspectOp::Offset),
        sd::CGETFLAGS => inspect(InspectOp::Flags),
        sd::CGETADDR => inspect(InspectOp::Addr),
        sd::CRRL => inspect(InspectOp::RoundLength),
        sd::CRAM => inspect(InspectOp::AlignMask),
        sd::CMOVE => Some(CheriOp::Move { cd: rd, cs1: rs1 }),
        sd::CCLEARTAG => Some(CheriOp::ClearTag { cd: rd, cs1: rs1 }),
        sd::CJALR => Some(CheriOp::JumpLink { cd: rd, cs1: rs1 }),
        _ => None,
    }
}

const fn via_from(cap_bit: bool) -> Addressing {
    if cap_bit {
        Addressing::Cap
    } else {
        Addressing::Ddc
    }
}

fn decode_load(f5: u32, rd: usize, rs1: usize) -> Option<CheriOp> {
    use funct5::load;

    if f5 == load::LC_DDC || f5 == load::LC_CAP {
        return Some(CheriOp::LoadCap {
            cd: rd,
            rs1,
            imm: 0,
            via: via_from(f5 == load::LC_CAP),
        });
    }
    if f5 > (load::CAP_BIT | load::UNSIGNED_BIT | load::WIDTH_MASK) {
        return None;
    }
    let width = MemWidth::from_bits(f5 & load::WIDTH_MASK);
    let unsigned = f5 & load::UNSIGNED_BIT != 0;
    if unsigned && width == MemWidth::Double {
        return None;
    }
    Some(CheriOp::Load {
        rd,
        rs1,
        imm: 0,
        width,
        unsigned,
        via: via_from(f5 & load::CAP_BIT != 0),
    })
}

fn decode_store(f5: u32, rs1: usize, rs2: usize) -> Option<CheriOp> {
    use funct5::store;

    match f5 {
        store::SC_DDC | store::SC_CAP => Some(CheriOp::StoreCap {
            rs1,
            cs2: rs2,
            imm: 0,
            via: via_from(f5 == store::SC_CAP),
        }),
        0x00..=0x03 | 0x08..=0x0b => Some(CheriOp::Store {
            rs1,
            rs2,
            imm: 0,
            width: MemWidth::from_bits(f5 & store::WIDTH_MASK),
            via: via_from(f5 & store::CAP_BIT != 0),
        }),
        _ => None,
    }
}
