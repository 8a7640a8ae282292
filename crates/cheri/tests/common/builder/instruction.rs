//! Encoders for the capability instructions.
//!
//! Register arguments are raw indices. Each encoder produces the 32-bit word
//! the decoder expects.

const OP_CHERI: u32 = 0x5b;
const OP_MISC_MEM: u32 = 0x0f;
const OP_STORE: u32 = 0x23;

/// R-type layout.
pub const fn r_type(
    funct7: u32,
    rs2: usize,
    rs1: usize,
    funct3: u32,
    rd: usize,
    opcode: u32,
) -> u32 {
    (funct7 << 25)
        | ((rs2 as u32 & 0x1f) << 20)
        | ((rs1 as u32 & 0x1f) << 15)
        | (funct3 << 12)
        | ((rd as u32 & 0x1f) << 7)
        | opcode
}

/// I-type layout.
pub const fn i_type(imm: i32, rs1: usize, funct3: u32, rd: usize, opcode: u32) -> u32 {
    (((imm as u32) & 0xfff) << 20)
        | ((rs1 as u32 & 0x1f) << 15)
        | (funct3 << 12)
        | ((rd as u32 & 0x1f) << 7)
        | opcode
}

/// S-type layout.
pub const fn s_type(imm: i32, rs2: usize, rs1: usize, funct3: u32, opcode: u32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7f) << 25)
        | ((rs2 as u32 & 0x1f) << 20)
        | ((rs1 as u32 & 0x1f) << 15)
        | (funct3 << 12)
        | ((imm & 0x1f) << 7)
        | opcode
}

const fn three(funct7: u32, rd: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(funct7, rs2, rs1, 0, rd, OP_CHERI)
}

const fn source_dest(f5: usize, rd: usize, rs1: usize) -> u32 {
    r_type(0x7f, f5, rs1, 0, rd, OP_CHERI)
}

pub const fn cspecialrw(cd: usize, scr: usize, cs1: usize) -> u32 {
    three(0x01, cd, cs1, scr)
}
pub const fn csetbounds(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x08, cd, cs1, rs2)
}
pub const fn csetboundsexact(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x09, cd, cs1, rs2)
}
pub const fn cseal(cd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x0b, cd, cs1, cs2)
}
pub const fn cunseal(cd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x0c, cd, cs1, cs2)
}
pub const fn candperm(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x0d, cd, cs1, rs2)
}
pub const fn csetflags(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x0e, cd, cs1, rs2)
}
pub const fn csetoffset(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x0f, cd, cs1, rs2)
}
pub const fn csetaddr(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x10, cd, cs1, rs2)
}
pub const fn cincoffset(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x11, cd, cs1, rs2)
}
pub const fn ctoptr(rd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x12, rd, cs1, cs2)
}
pub const fn cfromptr(cd: usize, cs1: usize, rs2: usize) -> u32 {
    three(0x13, cd, cs1, rs2)
}
pub const fn csub(rd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x14, rd, cs1, cs2)
}
pub const fn cbuildcap(cd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x1d, cd, cs1, cs2)
}
pub const fn ccopytype(cd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x1e, cd, cs1, cs2)
}
pub const fn ccseal(cd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x1f, cd, cs1, cs2)
}
pub const fn ctestsubset(rd: usize, cs1: usize, cs2: usize) -> u32 {
    three(0x20, rd, cs1, cs2)
}
pub const fn ccall(cs1: usize, cs2: usize) -> u32 {
    three(0x7e, 1, cs1, cs2)
}

pub const fn cincoffsetimm(cd: usize, cs1: usize, imm: i32) -> u32 {
    i_type(imm, cs1, 1, cd, OP_CHERI)
}
pub const fn csetboundsimm(cd: usize, cs1: usize, imm: u32) -> u32 {
    i_type(imm as i32, cs1, 2, cd, OP_CHERI)
}

pub const fn cgetperm(rd: usize, cs1: usize) -> u32 {
    source_dest(0x00, rd, cs1)
}
pub const fn cgettype(rd: usize, cs1: usize) -> u32 {
    source_dest(0x01, rd, cs1)
}
pub const fn cgetbase(rd: usize, cs1: usize) -> u32 {
    source_dest(0x02, rd, cs1)
}
pub const fn cgetlen(rd: usize, cs1: usize) -> u32 {
    source_dest(0x03, rd, cs1)
}
pub const fn cgettag(rd: usize, cs1: usize) -> u32 {
    source_dest(0x04, rd, cs1)
}
pub const fn cgetsealed(rd: usize, cs1: usize) -> u32 {
    source_dest(0x05, rd, cs1)
}
pub const fn cgetoffset(rd: usize, cs1: usize) -> u32 {
    source_dest(0x06, rd, cs1)
}
pub const fn cgetflags(rd: usize, cs1: usize) -> u32 {
    source_dest(0x07, rd, cs1)
}
pub const fn crrl(rd: usize, rs1: usize) -> u32 {
    source_dest(0x08, rd, rs1)
}
pub const fn cram(rd: usize, rs1: usize) -> u32 {
    source_dest(0x09, rd, rs1)
}
pub const fn cmove(cd: usize, cs1: usize) -> u32 {
    source_dest(0x0a, cd, cs1)
}
pub const fn ccleartag(cd: usize, cs1: usize) -> u32 {
    source_dest(0x0b, cd, cs1)
}
pub const fn cjalr(cd: usize, cs1: usize) -> u32 {
    source_dest(0x0c, cd, cs1)
}
pub const fn cgetaddr(rd: usize, cs1: usize) -> u32 {
    source_dest(0x0f, rd, cs1)
}

/// Scalar load; `f5` is the raw sub-opcode (bit 3 capability-relative).
pub const fn load(f5: usize, rd: usize, rs1: usize) -> u32 {
    r_type(0x7d, f5, rs1, 0, rd, OP_CHERI)
}
pub const fn ld_ddc(rd: usize, rs1: usize) -> u32 {
    load(0x03, rd, rs1)
}
pub const fn ld_cap(rd: usize, cs1: usize) -> u32 {
    load(0x0b, rd, cs1)
}
pub const fn lbu_cap(rd: usize, cs1: usize) -> u32 {
    load(0x0c, rd, cs1)
}
pub const fn lb_cap(rd: usize, cs1: usize) -> u32 {
    load(0x08, rd, cs1)
}
pub const fn lc_cap(cd: usize, cs1: usize) -> u32 {
    load(0x1f, cd, cs1)
}
pub const fn lc_ddc(cd: usize, rs1: usize) -> u32 {
    load(0x17, cd, rs1)
}

/// Scalar store; `f5` is the raw sub-opcode (bit 3 capability-relative).
pub const fn store(f5: usize, rs1: usize, rs2: usize) -> u32 {
    r_type(0x7c, rs2, rs1, 0, f5, OP_CHERI)
}
pub const fn sb_cap(rs2: usize, cs1: usize) -> u32 {
    store(0x08, cs1, rs2)
}
pub const fn sd_cap(rs2: usize, cs1: usize) -> u32 {
    store(0x0b, cs1, rs2)
}
pub const fn sd_ddc(rs2: usize, rs1: usize) -> u32 {
    store(0x03, rs1, rs2)
}
pub const fn sc_cap(cs2: usize, cs1: usize) -> u32 {
    store(0x0c, cs1, cs2)
}
pub const fn sc_ddc(cs2: usize, rs1: usize) -> u32 {
    store(0x04, rs1, cs2)
}

/// `clc cd, imm(rs1)`, addressing chosen by the capability-mode flag.
pub const fn clc(cd: usize, rs1: usize, imm: i32) -> u32 {
    i_type(imm, rs1, 2, cd, OP_MISC_MEM)
}

/// `csc cs2, imm(rs1)`, addressing chosen by the capability-mode flag.
pub const fn csc(cs2: usize, rs1: usize, imm: i32) -> u32 {
    s_type(imm, cs2, rs1, 4, OP_STORE)
}
