//! Trap Handling Logic.
//!
//! This module implements trap delivery for a capability hart. It performs
//! the following:
//! 1. **Trap Dispatch:** Maps the trap to an exception code and trap value.
//! 2. **Delegation:** Routes traps taken below machine mode to supervisor
//!    mode when the matching `medeleg` bit is set.
//! 3. **Context Saving:** Saves PCC into xEPCC and installs xTCC as PCC
//!    through the coupled views, so `xepc` and `pc` move with them.
//! 4. **Return Handling:** `MRET` and `SRET` restore PCC from xEPCC.

use tracing::debug;

use super::Hart;
use crate::common::Trap;
use crate::core::arch::csr;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::scr::ScrIndex;
use crate::isa::privileged::cause::code_and_tval;
use crate::isa::privileged::opcodes;

impl Hart {
    /// Delivers a synchronous trap raised at the current program counter.
    ///
    /// `ccsr` is left alone: capability faults are recorded where they are
    /// raised, by `ExecContext::execute` and `check_ifetch`.
    pub fn take_trap(&mut self, trap: &Trap) {
        let (code, tval) = code_and_tval(trap);
        let delegate_to_s =
            self.privilege <= PrivilegeMode::Supervisor && (self.csrs.medeleg >> code) & 1 != 0;
        let epcc = self.pcc();

        debug!(
            trap = %trap,
            epc = epcc.cursor(),
            from = %self.privilege,
            to_supervisor = delegate_to_s,
            "taking trap"
        );

        if delegate_to_s {
            self.csrs.scause = code;
            self.csrs.stval = tval;
            self.write_scr(ScrIndex::Sepcc, epcc);

            let mut mstatus = self.csrs.mstatus;
            if mstatus & csr::MSTATUS_SIE != 0 {
                mstatus |= csr::MSTATUS_SPIE;
            } else {
                mstatus &= !csr::MSTATUS_SPIE;
            }
            if self.privilege == PrivilegeMode::Supervisor {
                mstatus |= csr::MSTATUS_SPP;
            } else {
                mstatus &= !csr::MSTATUS_SPP;
            }
            mstatus &= !csr::MSTATUS_SIE;
            self.csrs.mstatus = mstatus;

            self.privilege = PrivilegeMode::Supervisor;
            self.enter_vector(ScrIndex::Stcc);
        } else {
            self.csrs.mcause = code;
            self.csrs.mtval = tval;
            self.write_scr(ScrIndex::Mepcc, epcc);

            let mut mstatus = self.csrs.mstatus;
            if mstatus & csr::MSTATUS_MIE != 0 {
                mstatus |= csr::MSTATUS_MPIE;
            } else {
                mstatus &= !csr::MSTATUS_MPIE;
            }
            mstatus &= !csr::MSTATUS_MPP;
            mstatus |= u64::from(self.privilege.to_u8()) << csr::MSTATUS_MPP_SHIFT;
            mstatus &= !csr::MSTATUS_MIE;
            self.csrs.mstatus = mstatus;

            self.privilege = PrivilegeMode::Machine;
            self.enter_vector(ScrIndex::Mtcc);
        }
    }

    /// Installs trap vector `tcc` as PCC, at the direct-mode handler address.
    fn enter_vector(&mut self, tcc: ScrIndex) {
        let vector = self.read_scr(tcc);
        let handler = vector.offset() & !csr::TVEC_MODE_MASK;
        let pcc = vector.with_cursor_unchecked(vector.base().wrapping_add(handler));
        self.write_pcc(pcc);
    }

    /// Executes `MRET` (`mode == Machine`) or `SRET` (`mode == Supervisor`).
    ///
    /// PCC is restored from xEPCC with bit 0 of the offset cleared.
    ///
    /// # Errors
    ///
    /// `IllegalInstruction` if the current privilege is below `mode`, or
    /// `mode` is User.
    pub fn trap_return(&mut self, mode: PrivilegeMode) -> Result<(), Trap> {
        let (epcc, insn) = match mode {
            PrivilegeMode::Machine => (ScrIndex::Mepcc, opcodes::MRET),
            PrivilegeMode::Supervisor => (ScrIndex::Sepcc, opcodes::SRET),
            PrivilegeMode::User => return Err(Trap::IllegalInstruction(opcodes::SRET)),
        };
        if self.privilege < mode {
            return Err(Trap::IllegalInstruction(insn));
        }

        let target = self.read_scr(epcc);
        let pcc = target.with_cursor_unchecked(target.base().wrapping_add(target.offset() & !1));
        let mstatus = self.csrs.mstatus;

        let new_privilege = if mode == PrivilegeMode::Machine {
            let mpp = (mstatus & csr::MSTATUS_MPP) >> csr::MSTATUS_MPP_SHIFT;
            let mut new_mstatus = mstatus;
            if mstatus & csr::MSTATUS_MPIE != 0 {
                new_mstatus |= csr::MSTATUS_MIE;
            } else {
                new_mstatus &= !csr::MSTATUS_MIE;
            }
            new_mstatus |= csr::MSTATUS_MPIE;
            new_mstatus &= !csr::MSTATUS_MPP;
            self.csrs.mstatus = new_mstatus;
            PrivilegeMode::from_u8(mpp as u8)
        } else {
            let spp = mstatus & csr::MSTATUS_SPP != 0;
            let mut new_mstatus = mstatus;
            if mstatus & csr::MSTATUS_SPIE != 0 {
                new_mstatus |= csr::MSTATUS_SIE;
            } else {
                new_mstatus &= !csr::MSTATUS_SIE;
            }
            new_mstatus |= csr::MSTATUS_SPIE;
            new_mstatus &= !csr::MSTATUS_SPP;
            self.csrs.mstatus = new_mstatus;
            if spp {
                PrivilegeMode::Supervisor
            } else {
                PrivilegeMode::User
            }
        };

        debug!(from = %self.privilege, to = %new_privilege, pc = pcc.cursor(), "trap return");
        self.privilege = new_privilege;
        self.write_pcc(pcc);
        Ok(())
    }
}
