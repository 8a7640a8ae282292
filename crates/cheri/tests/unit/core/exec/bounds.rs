//! # Bounds Narrowing Tests

use rvsim_cheri::cap::Capability;
use rvsim_cheri::common::CapCause;

use crate::common::builder::instruction::*;
use crate::common::harness::{TestContext, bounded};

fn ctx_with(cap: Capability) -> TestContext {
    let mut ctx = TestContext::new();
    ctx.set_cap(1, cap);
    ctx
}

#[test]
fn test_set_bounds_from_cursor() {
    let mut parent = bounded(0x1000, 0x1000);
    parent.set_cursor(0x1100);
    let mut ctx = ctx_with(parent);
    ctx.set_reg(5, 0x40);
    ctx.exec(csetbounds(2, 1, 5)).unwrap();

    let child = ctx.cap(2);
    assert!(child.tag);
    assert_eq!(child.base(), 0x1100);
    assert_eq!(child.top(), 0x1140);
    assert_eq!(child.cursor(), 0x1100);
    assert_eq!(child.perms, parent.perms);
}

#[test]
fn test_set_bounds_imm() {
    let mut ctx = ctx_with(bounded(0x1000, 0x1000));
    ctx.exec(csetboundsimm(2, 1, 0x800)).unwrap();
    assert_eq!(ctx.cap(2).top(), 0x1800);
}

#[test]
fn test_inexact_bounds_round_outward() {
    let mut parent = bounded(0x10_0000, 0x100_0000);
    parent.set_cursor(0x10_0001);
    let mut ctx = ctx_with(parent);
    ctx.set_reg(5, 0x10_0001);
    ctx.exec(csetbounds(2, 1, 5)).unwrap();

    let child = ctx.cap(2);
    assert!(child.tag);
    assert!(child.base() <= 0x10_0001);
    assert!(child.top() >= 0x20_0002);
    assert!(child.base() >= parent.base());
    assert!(child.top() <= parent.top());
}

#[test]
fn test_exact_variant_faults_when_rounding() {
    let mut parent = bounded(0x10_0000, 0x100_0000);
    parent.set_cursor(0x10_0001);
    let mut ctx = ctx_with(parent);
    ctx.set_reg(5, 0x10_0001);
    let err = ctx.exec(csetboundsexact(2, 1, 5)).unwrap_err();
    assert_eq!(err.cap_fault().map(|f| f.cause), Some(CapCause::InexactBounds));
    assert_eq!(ctx.cap(2), Capability::null());
    assert_eq!(ctx.hart.ccsr, 0x0a01);

    ctx.set_reg(5, 0x40);
    ctx.exec(csetboundsexact(2, 1, 5)).unwrap();
    assert_eq!(ctx.cap(2).length(), 0x40);
}

#[test]
fn test_length_fault_past_top() {
    let mut parent = bounded(0x1000, 0x100);
    parent.set_cursor(0x10f0);
    let mut ctx = ctx_with(parent);
    ctx.set_reg(5, 0x11);
    let err = ctx.exec(csetbounds(2, 1, 5)).unwrap_err();
    assert_eq!(err.cap_fault().map(|f| f.cause), Some(CapCause::LengthViolation));

    ctx.set_reg(5, 0x10);
    ctx.exec(csetbounds(2, 1, 5)).unwrap();
    assert_eq!(ctx.cap(2).top(), 0x1100);
}

#[test]
fn test_length_fault_below_base() {
    let mut parent = bounded(0x1000, 0x100);
    parent.set_cursor(0xff0);
    let mut ctx = ctx_with(parent);
    ctx.set_reg(5, 4);
    let err = ctx.exec(csetbounds(2, 1, 5)).unwrap_err();
    assert_eq!(err.cap_fault().map(|f| f.cause), Some(CapCause::LengthViolation));
}

#[test]
fn test_tag_then_seal_faults() {
    let mut ctx = ctx_with(bounded(0x1000, 0x100).cleared().sealed_with(4));
    let err = ctx.exec(csetbounds(2, 1, 0)).unwrap_err();
    assert_eq!(err.cap_fault().map(|f| f.cause), Some(CapCause::TagViolation));

    ctx.set_cap(1, bounded(0x1000, 0x100).sealed_with(4));
    let err = ctx.exec(csetbounds(2, 1, 0)).unwrap_err();
    assert_eq!(err.cap_fault().map(|f| f.cause), Some(CapCause::SealViolation));
}
