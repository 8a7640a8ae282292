//! Capability Instruction Disassembler.
//!
//! Converts a capability instruction encoding into a mnemonic string for
//! trace output and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvsim_cheri::isa::xcheri::disassemble_cheri;
//!
//! assert_eq!(disassemble_cheri(0x1031_00db), "csetbounds cra, csp, gp");
//! ```

use super::decode::{Addressing, CheriOp, InspectOp, decode};
use crate::core::arch::cap_regs::CAP_REG_NAMES;
use crate::core::arch::scr::ScrIndex;

/// ABI names for x0-x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

#[inline]
fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

#[inline]
fn creg(idx: usize) -> &'static str {
    CAP_REG_NAMES.get(idx).copied().unwrap_or("c??")
}

const fn inspect_mnemonic(op: InspectOp) -> &'static str {
    match op {
        InspectOp::Perm => "cgetperm",
        InspectOp::Type => "cgettype",
        InspectOp::Base => "cgetbase",
        InspectOp::Len => "cgetlen",
        InspectOp::Tag => "cgettag",
        InspectOp::Sealed => "cgetsealed",
        InspectOp::Offset => "cgetoffset",
        InspectOp::Flags => "cgetflags",
        InspectOp::Addr => "cgetaddr",
        InspectOp::RoundLength => "crrl",
        InspectOp::AlignMask => "cram",
    }
}

/// Formats a memory operand: `(ddc+x)`, `(cN)` or `imm(rN)` for the
/// mode-selected immediate forms.
fn mem_operand(via: Addressing, rs1: usize, imm: i64) -> String {
    match via {
        Addressing::Ddc => format!("{imm}(ddc+{})", xreg(rs1)),
        Addressing::Cap => format!("{imm}({})", creg(rs1)),
        Addressing::ByMode => format!("{imm}({}/{})", creg(rs1), xreg(rs1)),
    }
}

const fn via_suffix(via: Addressing) -> &'static str {
    match via {
        Addressing::Ddc => ".ddc",
        Addressing::Cap => ".cap",
        Addressing::ByMode => "",
    }
}

/// Disassembles a capability instruction; returns `"unknown"` for
/// encodings outside the capability extension.
pub fn disassemble_cheri(insn: u32) -> String {
    let Ok(op) = decode(insn) else {
        return "unknown".to_string();
    };
    match op {
        CheriOp::Inspect { op, rd, cs1 } => {
            let src = match op {
                InspectOp::RoundLength | InspectOp::AlignMask => xreg(cs1),
                _ => creg(cs1),
            };
            format!("{} {}, {src}", inspect_mnemonic(op), xreg(rd))
        }
        CheriOp::Move { cd, cs1 } => format!("cmove {}, {}", creg(cd), creg(cs1)),
        CheriOp::ClearTag { cd, cs1 } => format!("ccleartag {}, {}", creg(cd), creg(cs1)),
        CheriOp::SetBounds { cd, cs1, rs2, exact } => format!(
            "{} {}, {}, {}",
            if exact { "csetboundsexact" } else { "csetbounds" },
            creg(cd),
            creg(cs1),
            xreg(rs2)
        ),
        CheriOp::SetBoundsImm { cd, cs1, imm } => {
            format!("csetboundsimm {}, {}, {imm}", creg(cd), creg(cs1))
        }
        CheriOp::SetOffset { cd, cs1, rs2 } => {
            format!("csetoffset {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::SetAddr { cd, cs1, rs2 } => {
            format!("csetaddr {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::IncOffset { cd, cs1, rs2 } => {
            format!("cincoffset {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::IncOffsetImm { cd, cs1, imm } => {
            format!("cincoffsetimm {}, {}, {imm}", creg(cd), creg(cs1))
        }
        CheriOp::SetFlags { cd, cs1, rs2 } => {
            format!("csetflags {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::AndPerm { cd, cs1, rs2 } => {
            format!("candperm {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::Seal { cd, cs1, cs2 } => {
            format!("cseal {}, {}, {}", creg(cd), creg(cs1), creg(cs2))
        }
        CheriOp::CondSeal { cd, cs1, cs2 } => {
            format!("ccseal {}, {}, {}", creg(cd), creg(cs1), creg(cs2))
        }
        CheriOp::Unseal { cd, cs1, cs2 } => {
            format!("cunseal {}, {}, {}", creg(cd), creg(cs1), creg(cs2))
        }
        CheriOp::BuildCap { cd, cs1, cs2 } => {
            format!("cbuildcap {}, {}, {}", creg(cd), creg(cs1), creg(cs2))
        }
        CheriOp::CopyType { cd, cs1, cs2 } => {
            format!("ccopytype {}, {}, {}", creg(cd), creg(cs1), creg(cs2))
        }
        CheriOp::ToPtr { rd, cs1, cs2 } => {
            format!("ctoptr {}, {}, {}", xreg(rd), creg(cs1), creg(cs2))
        }
        CheriOp::FromPtr { cd, cs1, rs2 } => {
            format!("cfromptr {}, {}, {}", creg(cd), creg(cs1), xreg(rs2))
        }
        CheriOp::Sub { rd, cs1, cs2 } => {
            format!("csub {}, {}, {}", xreg(rd), creg(cs1), creg(cs2))
        }
        CheriOp::TestSubset { rd, cs1, cs2 } => {
            format!("ctestsubset {}, {}, {}", xreg(rd), creg(cs1), creg(cs2))
        }
        CheriOp::JumpLink { cd, cs1 } => format!("cjalr {}, {}", creg(cd), creg(cs1)),
        CheriOp::Call { cs1, cs2 } => format!("ccall {}, {}", creg(cs1), creg(cs2)),
        CheriOp::SpecialRw { cd, cs1, scr } => {
            let name = ScrIndex::from_u8(scr)
                .map_or_else(|| format!("scr{scr}"), |s| s.name().to_string());
            format!("cspecialrw {}, {name}, {}", creg(cd), creg(cs1))
        }
        CheriOp::Load {
            rd,
            rs1,
            imm,
            width,
            unsigned,
            via,
        } => format!(
            "l{}{}{} {}, {}",
            width.suffix(),
            if unsigned { "u" } else { "" },
            via_suffix(via),
            xreg(rd),
            mem_operand(via, rs1, imm)
        ),
        CheriOp::Store {
            rs1,
            rs2,
            imm,
            width,
            via,
        } => format!(
            "s{}{} {}, {}",
            width.suffix(),
            via_suffix(via),
            xreg(rs2),
            mem_operand(via, rs1, imm)
        ),
        CheriOp::LoadCap { cd, rs1, imm, via } => format!(
            "lc{} {}, {}",
            via_suffix(via),
            creg(cd),
            mem_operand(via, rs1, imm)
        ),
        CheriOp::StoreCap { rs1, cs2, imm, via } => format!(
            "sc{} {}, {}",
            via_suffix(via),
            creg(cs2),
            mem_operand(via, rs1, imm)
        ),
    }
}
