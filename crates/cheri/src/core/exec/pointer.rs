//! Cursor, offset and pointer conversion.
//!
//! These are address computations, not accesses: an unrepresentable result
//! is an untagged capability carrying the requested address, never a fault.
//! The only fault is moving the cursor of a tagged sealed capability.

use super::{ExecContext, fault};
use crate::cap::Capability;
use crate::common::{CapCause, Trap};

impl ExecContext<'_> {
    fn unsealed_operand(&self, cs1: usize) -> Result<Capability, Trap> {
        let cap = self.creg(cs1);
        if cap.tag && cap.is_sealed() {
            return Err(fault(CapCause::SealViolation, cs1));
        }
        Ok(cap)
    }

    /// `CIncOffset` and `CIncOffsetImm`.
    pub(super) fn exec_inc_offset(
        &mut self,
        cd: usize,
        cs1: usize,
        delta: u64,
    ) -> Result<(), Trap> {
        let mut cap = self.unsealed_operand(cs1)?;
        cap.inc_offset(delta);
        self.set_creg(cd, cap);
        Ok(())
    }

    /// `CSetOffset`.
    pub(super) fn exec_set_offset(
        &mut self,
        cd: usize,
        cs1: usize,
        rs2: usize,
    ) -> Result<(), Trap> {
        let mut cap = self.unsealed_operand(cs1)?;
        cap.set_offset(self.xreg(rs2));
        self.set_creg(cd, cap);
        Ok(())
    }

    /// `CSetAddr`.
    pub(super) fn exec_set_addr(&mut self, cd: usize, cs1: usize, rs2: usize) -> Result<(), Trap> {
        let mut cap = self.unsealed_operand(cs1)?;
        cap.set_cursor(self.xreg(rs2));
        self.set_creg(cd, cap);
        Ok(())
    }

    /// `CSetFlags`: bit 0 of `x[rs2]` becomes the capability-mode flag.
    pub(super) fn exec_set_flags(&mut self, cd: usize, cs1: usize, rs2: usize) -> Result<(), Trap> {
        let mut cap = self.unsealed_operand(cs1)?;
        cap.flags = self.xreg(rs2) & 1 != 0;
        self.set_creg(cd, cap);
        Ok(())
    }

    /// `CFromPtr`: `auth` with offset `x[rs2]`, or null when `x[rs2]` is 0.
    /// The authority is DDC when `cs1` is 0.
    pub(super) fn exec_from_ptr(&mut self, cd: usize, cs1: usize, rs2: usize) -> Result<(), Trap> {
        let offset = self.xreg(rs2);
        if offset == 0 {
            self.set_creg(cd, Capability::null());
            return Ok(());
        }
        let (mut auth, reg) = self.creg_or_ddc(cs1);
        if !auth.tag {
            return Err(reg.fault(CapCause::TagViolation).into());
        }
        if auth.is_sealed() {
            return Err(reg.fault(CapCause::SealViolation).into());
        }
        auth.set_offset(offset);
        self.set_creg(cd, auth);
        Ok(())
    }

    /// `CToPtr`: the offset of `c[cs1]` relative to the authority's base, or
    /// 0 if `c[cs1]` is untagged. The authority is DDC when `cs2` is 0.
    pub(super) fn exec_to_ptr(&mut self, rd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let cap = self.creg(cs1);
        let (auth, reg) = self.creg_or_ddc(cs2);
        if !auth.tag {
            return Err(reg.fault(CapCause::TagViolation).into());
        }
        if cap.tag && cap.is_sealed() {
            return Err(fault(CapCause::SealViolation, cs1));
        }
        let ptr = if cap.tag {
            cap.cursor().wrapping_sub(auth.base())
        } else {
            0
        };
        self.set_xreg(rd, ptr);
        Ok(())
    }

    /// `CSub`: difference of the two cursors.
    pub(super) fn exec_sub(&mut self, rd: usize, cs1: usize, cs2: usize) {
        let diff = self.creg(cs1).cursor().wrapping_sub(self.creg(cs2).cursor());
        self.set_xreg(rd, diff);
    }

    /// `CMove`.
    pub(super) fn exec_move(&mut self, cd: usize, cs1: usize) {
        let cap = self.creg(cs1);
        self.set_creg(cd, cap);
    }

    /// `CClearTag`.
    pub(super) fn exec_clear_tag(&mut self, cd: usize, cs1: usize) {
        let cap = self.creg(cs1).cleared();
        self.set_creg(cd, cap);
    }
}
