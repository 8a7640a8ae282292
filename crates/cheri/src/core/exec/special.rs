//! Special capability register access: `CSpecialRW`.

use super::ExecContext;
use crate::cap::Permissions;
use crate::common::{CapCause, Trap};
use crate::core::arch::scr::ScrIndex;
use crate::core::units::AuthReg;

impl ExecContext<'_> {
    /// Reads special register `scr` into `c[cd]` and, when `cs1` is not 0,
    /// writes `c[cs1]` into it.
    ///
    /// Unknown registers, writes to PCC and access below the register's
    /// privilege level are illegal instructions. Registers other than PCC and
    /// DDC also need the access-system-registers permission on PCC.
    pub(super) fn exec_special_rw(
        &mut self,
        insn: u32,
        cd: usize,
        cs1: usize,
        scr: u8,
    ) -> Result<(), Trap> {
        let Some(scr) = ScrIndex::from_u8(scr) else {
            return Err(Trap::IllegalInstruction(insn));
        };
        let access = scr.access();
        if (access.read_only && cs1 != 0) || self.hart.privilege < access.privilege {
            return Err(Trap::IllegalInstruction(insn));
        }
        if access.needs_asr && !self.hart.pcc().perms.contains(Permissions::ACCESS_SYS_REGS) {
            return Err(AuthReg::scr(scr).fault(CapCause::AccessSystemRegsViolation).into());
        }

        let old = self.hart.read_scr(scr);
        if cs1 != 0 {
            let new = self.creg(cs1);
            self.hart.write_scr(scr, new);
        }
        if cd != 0 {
            self.set_creg(cd, old);
        }
        Ok(())
    }
}
