//! Derivation from an authority: `CAndPerm`, `CBuildCap`, `CCopyType` and
//! `CTestSubset`.

use super::{ExecContext, fault};
use crate::cap::{Capability, Permissions, UserPerms};
use crate::common::constants::USER_PERMS_SHIFT;
use crate::common::{CapCause, Trap};

impl ExecContext<'_> {
    /// `CAndPerm`: intersects the permissions of `c[cs1]` with `x[rs2]`
    /// (`cgetperm` layout).
    pub(super) fn exec_and_perm(&mut self, cd: usize, cs1: usize, rs2: usize) -> Result<(), Trap> {
        let mut cap = self.creg(cs1);
        if !cap.tag {
            return Err(fault(CapCause::TagViolation, cs1));
        }
        if cap.is_sealed() {
            return Err(fault(CapCause::SealViolation, cs1));
        }
        let mask = self.xreg(rs2);
        cap.perms &= Permissions::from_bits_truncate(mask as u16);
        cap.uperms &= UserPerms::from_bits_truncate((mask >> USER_PERMS_SHIFT) as u8);
        self.set_creg(cd, cap);
        Ok(())
    }

    /// `CBuildCap`: re-derives the untagged bit pattern `c[cs2]` from the
    /// authority (DDC when `cs1` is 0). The result is `c[cs2]` unsealed and
    /// tagged; its encoded bounds are kept as they are, so a pattern whose
    /// bounds were rounded outward comes back with the same bounds.
    pub(super) fn exec_build_cap(&mut self, cd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let (auth, reg) = self.creg_or_ddc(cs1);
        let bits = self.creg(cs2);
        let bits_base = u128::from(bits.base());

        match () {
            () if !auth.tag => return Err(reg.fault(CapCause::TagViolation).into()),
            () if auth.is_sealed() => return Err(reg.fault(CapCause::SealViolation).into()),
            () if bits.base() < auth.base() || bits.top() > auth.top() => {
                return Err(reg.fault(CapCause::LengthViolation).into());
            }
            () if bits_base > bits.top() => return Err(fault(CapCause::LengthViolation, cs2)),
            () if !auth.perms.contains(bits.perms) || !auth.uperms.contains(bits.uperms) => {
                return Err(reg.fault(CapCause::UserDefViolation).into());
            }
            () => {}
        }

        let mut out = bits.unsealed();
        out.tag = true;
        self.set_creg(cd, out);
        Ok(())
    }

    /// `CCopyType`: `c[cs1]` with its cursor set to the object type of
    /// `c[cs2]`, or null with cursor `-1` if `c[cs2]` is unsealed.
    pub(super) fn exec_copy_type(&mut self, cd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let auth = self.creg(cs1);
        let src = self.creg(cs2);
        if !auth.tag {
            return Err(fault(CapCause::TagViolation, cs1));
        }
        if auth.is_sealed() {
            return Err(fault(CapCause::SealViolation, cs1));
        }
        if !src.is_sealed() {
            let mut out = Capability::null();
            out.set_cursor(u64::MAX);
            self.set_creg(cd, out);
            return Ok(());
        }
        let otype = u64::from(src.otype);
        if otype < auth.base() || u128::from(otype) >= auth.top() {
            return Err(fault(CapCause::LengthViolation, cs1));
        }
        let mut out = auth;
        out.set_cursor(otype);
        self.set_creg(cd, out);
        Ok(())
    }

    /// `CTestSubset`: 1 if `c[cs2]` has the same tag as the authority (DDC
    /// when `cs1` is 0), bounds inside it and a subset of its permissions.
    pub(super) fn exec_test_subset(&mut self, rd: usize, cs1: usize, cs2: usize) {
        let (sup, _) = self.creg_or_ddc(cs1);
        let sub = self.creg(cs2);
        let subset = sup.tag == sub.tag
            && sub.base() >= sup.base()
            && sub.top() <= sup.top()
            && sup.perms.contains(sub.perms)
            && sup.uperms.contains(sub.uperms);
        self.set_xreg(rd, u64::from(subset));
    }
}
