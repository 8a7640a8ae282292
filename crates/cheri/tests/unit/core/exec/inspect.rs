//! # Inspection Tests

use rstest::rstest;
use rvsim_cheri::cap::{Capability, Permissions};

use crate::common::builder::instruction::*;
use crate::common::harness::{TestContext, bounded};

fn inspect(cap: Capability, insn: fn(usize, usize) -> u32) -> u64 {
    let mut ctx = TestContext::new();
    ctx.set_cap(2, cap);
    ctx.exec(insn(10, 2)).unwrap();
    ctx.get_reg(10)
}

fn sample() -> Capability {
    let mut cap = bounded(0x1000, 0x100);
    cap.inc_offset(0x18);
    cap.perms = Permissions::LOAD | Permissions::STORE;
    cap.flags = true;
    cap
}

#[rstest]
#[case(cgetbase, 0x1000)]
#[case(cgetlen, 0x100)]
#[case(cgetoffset, 0x18)]
#[case(cgetaddr, 0x1018)]
#[case(cgettag, 1)]
#[case(cgetsealed, 0)]
#[case(cgetflags, 1)]
#[case(cgetperm, 0x7_800c)]
#[case(cgettype, u64::MAX)]
fn test_unsealed_projections(#[case] insn: fn(usize, usize) -> u32, #[case] expected: u64) {
    assert_eq!(inspect(sample(), insn), expected);
}

#[test]
fn test_sealed_projections() {
    let sealed = sample().sealed_with(0x77);
    assert_eq!(inspect(sealed, cgettype), 0x77);
    assert_eq!(inspect(sealed, cgetsealed), 1);
}

#[test]
fn test_null_projections() {
    assert_eq!(inspect(Capability::null(), cgettag), 0);
    assert_eq!(inspect(Capability::null(), cgetbase), 0);
    assert_eq!(inspect(Capability::null(), cgetlen), u64::MAX);
    assert_eq!(inspect(Capability::null(), cgetperm), 0);
}

#[test]
fn test_rrl_and_ram_read_integer_registers() {
    let mut ctx = TestContext::new();
    ctx.set_reg(5, 0x10_0001);
    ctx.exec(crrl(10, 5)).unwrap();
    ctx.exec(cram(11, 5)).unwrap();
    assert_eq!(ctx.get_reg(10), 0x10_0800);
    assert_eq!(ctx.get_reg(11), !0x7ff);

    ctx.set_reg(5, 0x100);
    ctx.exec(crrl(10, 5)).unwrap();
    ctx.exec(cram(11, 5)).unwrap();
    assert_eq!(ctx.get_reg(10), 0x100);
    assert_eq!(ctx.get_reg(11), u64::MAX);
}

#[test]
fn test_write_to_x0_is_discarded() {
    let mut ctx = TestContext::new();
    ctx.set_cap(2, sample());
    ctx.exec(cgetaddr(0, 2)).unwrap();
    assert_eq!(ctx.get_reg(0), 0);
}
