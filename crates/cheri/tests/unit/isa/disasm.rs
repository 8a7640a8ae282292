//! # Disassembler Tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvsim_cheri::isa::xcheri::disassemble_cheri;

use crate::common::builder::instruction::*;

#[rstest]
#[case(csetbounds(1, 2, 3), "csetbounds cra, csp, gp")]
#[case(csetboundsexact(10, 11, 12), "csetboundsexact ca0, ca1, a2")]
#[case(cgetlen(10, 2), "cgetlen a0, csp")]
#[case(crrl(10, 11), "crrl a0, a1")]
#[case(cmove(0, 1), "cmove cnull, cra")]
#[case(cjalr(1, 5), "cjalr cra, ct0")]
#[case(ccall(5, 6), "ccall ct0, ct1")]
#[case(ctoptr(10, 2, 0), "ctoptr a0, csp, cnull")]
#[case(cincoffsetimm(2, 2, -16), "cincoffsetimm csp, csp, -16")]
#[case(csetboundsimm(2, 2, 64), "csetboundsimm csp, csp, 64")]
#[case(cspecialrw(1, 1, 0), "cspecialrw cra, ddc, cnull")]
#[case(cspecialrw(1, 2, 0), "cspecialrw cra, scr2, cnull")]
fn test_register_forms(#[case] insn: u32, #[case] expected: &str) {
    assert_eq!(disassemble_cheri(insn), expected);
}

#[rstest]
#[case(ld_ddc(10, 11), "ld.ddc a0, 0(ddc+a1)")]
#[case(ld_cap(10, 11), "ld.cap a0, 0(ca1)")]
#[case(lbu_cap(10, 2), "lbu.cap a0, 0(csp)")]
#[case(sd_cap(10, 2), "sd.cap a0, 0(csp)")]
#[case(sd_ddc(10, 2), "sd.ddc a0, 0(ddc+sp)")]
#[case(lc_cap(3, 2), "lc.cap cgp, 0(csp)")]
#[case(sc_ddc(3, 2), "sc.ddc cgp, 0(ddc+sp)")]
#[case(clc(3, 2, 32), "lc cgp, 32(csp/sp)")]
#[case(csc(3, 2, -16), "sc cgp, -16(csp/sp)")]
fn test_memory_forms(#[case] insn: u32, #[case] expected: &str) {
    assert_eq!(disassemble_cheri(insn), expected);
}

#[test]
fn test_unknown() {
    assert_eq!(disassemble_cheri(0x0000_0013), "unknown");
    assert_eq!(disassemble_cheri(load(0x07, 1, 2)), "unknown");
}
