//! Control transfer through capabilities: `CJALR` and `CCall`.
//!
//! Both install a new PCC through the coupled view, so the scalar program
//! counter follows the target's offset. Every check completes before the
//! first register write.

use super::{ExecContext, fault};
use crate::cap::{Capability, Permissions};
use crate::common::constants::{CHERI_INSTRUCTION_BYTES, MIN_INSTRUCTION_BYTES};
use crate::common::{CapCause, Trap};
use crate::core::arch::cap_regs::{CRA, IDC};

impl ExecContext<'_> {
    /// PCC with its cursor on the instruction after this one.
    fn link_capability(&self) -> Capability {
        let mut link = self.hart.pcc();
        link.set_cursor(self.hart.arch_pc().wrapping_add(CHERI_INSTRUCTION_BYTES));
        link
    }

    /// `CJALR`: jumps to `c[cs1]` with bit 0 of its address cleared and
    /// writes the link capability to `c[cd]`.
    pub(super) fn exec_jalr(&mut self, cd: usize, cs1: usize) -> Result<(), Trap> {
        let mut target = self.creg(cs1);
        let addr = target.cursor() & !1;
        match () {
            () if !target.tag => return Err(fault(CapCause::TagViolation, cs1)),
            () if target.is_sealed() => return Err(fault(CapCause::SealViolation, cs1)),
            () if !target.perms.contains(Permissions::EXECUTE) => {
                return Err(fault(CapCause::PermitExecuteViolation, cs1));
            }
            () if !target.in_bounds(addr, MIN_INSTRUCTION_BYTES) => {
                return Err(fault(CapCause::LengthViolation, cs1));
            }
            () => {}
        }
        target.set_cursor(addr);

        let link = self.link_capability();
        self.hart.write_pcc(target);
        self.set_creg(cd, link);
        Ok(())
    }

    /// `CCall`: jumps into a sealed code/data pair. The code capability
    /// becomes PCC and the data capability IDC, both unsealed; the link
    /// capability goes to `cra`.
    pub(super) fn exec_call(&mut self, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let code = self.creg(cs1);
        let data = self.creg(cs2);
        match () {
            () if !code.tag => return Err(fault(CapCause::TagViolation, cs1)),
            () if !data.tag => return Err(fault(CapCause::TagViolation, cs2)),
            () if !code.is_sealed() => return Err(fault(CapCause::SealViolation, cs1)),
            () if !data.is_sealed() => return Err(fault(CapCause::SealViolation, cs2)),
            () if code.otype != data.otype => return Err(fault(CapCause::TypeViolation, cs1)),
            () if !code.perms.contains(Permissions::CCALL) => {
                return Err(fault(CapCause::PermitCCallViolation, cs1));
            }
            () if !data.perms.contains(Permissions::CCALL) => {
                return Err(fault(CapCause::PermitCCallViolation, cs2));
            }
            () if !code.perms.contains(Permissions::EXECUTE) => {
                return Err(fault(CapCause::PermitExecuteViolation, cs1));
            }
            () if data.perms.contains(Permissions::EXECUTE) => {
                return Err(fault(CapCause::PermitExecuteViolation, cs2));
            }
            () if !code.in_bounds(code.cursor(), MIN_INSTRUCTION_BYTES) => {
                return Err(fault(CapCause::LengthViolation, cs1));
            }
            () => {}
        }

        let link = self.link_capability();
        self.set_creg(CRA, link);
        self.set_creg(IDC, data.unsealed());
        self.hart.write_pcc(code.unsealed());
        Ok(())
    }
}
