//! # PC and SCR Coupling Tests
//!
//! PCC and the coupled trap SCRs hold their cursor as an offset in the
//! scalar `pc` or trap CSR. Writes through either view must be visible
//! through the other.

use pretty_assertions::assert_eq;
use rvsim_cheri::cap::Capability;
use rvsim_cheri::config::CheriConfig;
use rvsim_cheri::core::Hart;
use rvsim_cheri::core::arch::csr;
use rvsim_cheri::core::arch::mode::PrivilegeMode;
use rvsim_cheri::core::arch::scr::ScrIndex;

use crate::common::harness::{RAM_BASE, TestContext, bounded};

#[test]
fn test_reset_state() {
    let ctx = TestContext::new();
    let hart = &ctx.hart;
    assert_eq!(hart.pc(), RAM_BASE);
    assert_eq!(hart.arch_pc(), RAM_BASE);
    assert_eq!(hart.privilege, PrivilegeMode::Machine);
    assert_eq!(hart.ccsr, 0);

    let pcc = hart.pcc();
    assert!(pcc.tag);
    assert_eq!(pcc.cursor(), RAM_BASE);
    assert_eq!(pcc.length(), 1 << 64);
    assert_eq!(hart.ddc(), Capability::almighty());

    for scr in ScrIndex::ALL {
        let expect_tag = matches!(
            scr,
            ScrIndex::Pcc
                | ScrIndex::Ddc
                | ScrIndex::Utcc
                | ScrIndex::Stcc
                | ScrIndex::Mtcc
                | ScrIndex::Uepcc
                | ScrIndex::Sepcc
                | ScrIndex::Mepcc
        );
        assert_eq!(hart.read_scr(scr).tag, expect_tag, "{}", scr.name());
    }
}

#[test]
fn test_ddc_reset_follows_config() {
    let config = CheriConfig::from_json(r#"{ "reset": { "ddc_almighty": false } }"#).unwrap();
    let hart = Hart::new(&config);
    assert_eq!(hart.ddc(), Capability::null());
}

#[test]
fn test_pc_moves_pcc_cursor() {
    let mut ctx = TestContext::new();
    ctx.hart.advance_pc(4);
    assert_eq!(ctx.hart.pcc().cursor(), RAM_BASE + 4);

    ctx.hart.set_arch_pc(RAM_BASE + 0x100);
    assert_eq!(ctx.hart.pc(), RAM_BASE + 0x100);
    assert_eq!(ctx.hart.pcc().cursor(), RAM_BASE + 0x100);
}

#[test]
fn test_write_pcc_sets_pc_offset() {
    let mut ctx = TestContext::new();
    let mut code = bounded(RAM_BASE + 0x1000, 0x100);
    code.set_cursor(RAM_BASE + 0x1010);
    ctx.hart.write_pcc(code);

    assert_eq!(ctx.hart.pc(), 0x10);
    assert_eq!(ctx.hart.arch_pc(), RAM_BASE + 0x1010);
    assert_eq!(ctx.hart.pcc(), code);

    ctx.hart.advance_pc(4);
    assert_eq!(ctx.hart.pcc().cursor(), RAM_BASE + 0x1014);
    assert_eq!(ctx.hart.pcc().base(), RAM_BASE + 0x1000);

    ctx.hart.set_arch_pc(RAM_BASE + 0x1040);
    assert_eq!(ctx.hart.pc(), 0x40);
}

#[test]
fn test_mtvec_is_mtcc_offset() {
    let mut ctx = TestContext::new();
    ctx.hart.csrs.write(csr::MTVEC, RAM_BASE + 0x200);
    assert_eq!(ctx.hart.read_scr(ScrIndex::Mtcc).cursor(), RAM_BASE + 0x200);

    let mut vector = bounded(RAM_BASE + 0x2000, 0x100);
    vector.set_cursor(RAM_BASE + 0x2040);
    ctx.hart.write_scr(ScrIndex::Mtcc, vector);
    assert_eq!(ctx.hart.csrs.read(csr::MTVEC), 0x40);
    assert_eq!(ctx.hart.read_scr(ScrIndex::Mtcc), vector);
}

#[test]
fn test_epc_csrs_are_epcc_offsets() {
    let mut ctx = TestContext::new();
    ctx.hart.csrs.write(csr::MEPC, 0x1234);
    ctx.hart.csrs.write(csr::SEPC, 0x5678);
    assert_eq!(ctx.hart.read_scr(ScrIndex::Mepcc).cursor(), 0x1234);
    assert_eq!(ctx.hart.read_scr(ScrIndex::Sepcc).cursor(), 0x5678);

    let mut epcc = bounded(0x4000, 0x100);
    epcc.set_cursor(0x4008);
    ctx.hart.write_scr(ScrIndex::Sepcc, epcc);
    assert_eq!(ctx.hart.csrs.sepc, 8);
    assert_eq!(ctx.hart.csrs.stvec, 0);
}

#[test]
fn test_uncoupled_registers_keep_their_cursor() {
    let mut ctx = TestContext::new();
    let mut scratch = bounded(0x4000, 0x100);
    scratch.set_cursor(0x4020);
    ctx.hart.write_scr(ScrIndex::MScratchC, scratch);
    ctx.hart.csrs.mscratch = 0xdead;
    assert_eq!(ctx.hart.read_scr(ScrIndex::MScratchC), scratch);
}

#[test]
fn test_sstatus_is_masked_view() {
    let mut ctx = TestContext::new();
    ctx.hart.csrs.write(csr::MSTATUS, csr::MSTATUS_MIE | csr::MSTATUS_SIE);
    assert_eq!(ctx.hart.csrs.read(csr::SSTATUS), csr::MSTATUS_SIE);

    ctx.hart.csrs.write(csr::SSTATUS, csr::MSTATUS_SPP);
    assert_eq!(ctx.hart.csrs.mstatus, csr::MSTATUS_MIE | csr::MSTATUS_SPP);
}

#[test]
fn test_reset_restores_coupled_state() {
    let mut ctx = TestContext::new();
    ctx.hart.write_pcc(bounded(0x4000, 0x100));
    ctx.hart.privilege = PrivilegeMode::User;
    ctx.hart.ccsr = 0x0205;
    ctx.hart.reset();
    assert_eq!(ctx.hart.pcc().length(), 1 << 64);
    assert_eq!(ctx.hart.arch_pc(), RAM_BASE);
    assert_eq!(ctx.hart.privilege, PrivilegeMode::Machine);
    assert_eq!(ctx.hart.ccsr, 0);
}
