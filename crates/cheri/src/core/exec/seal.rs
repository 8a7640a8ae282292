//! Sealing and unsealing.
//!
//! The sealing authority's cursor is the object type. It must be in the
//! authority's bounds and no larger than `OTYPE_MAX`.

use super::{ExecContext, fault};
use crate::cap::{Capability, OTYPE_MAX, Permissions};
use crate::common::{CapCause, Trap};

/// Checks shared by `CSeal` and the sealing path of `CCSeal`, in priority
/// order. Returns the object type.
fn check_seal(cap: &Capability, cs1: usize, auth: &Capability, cs2: usize) -> Result<u32, Trap> {
    let otype = auth.cursor();
    match () {
        () if !cap.tag => Err(fault(CapCause::TagViolation, cs1)),
        () if !auth.tag => Err(fault(CapCause::TagViolation, cs2)),
        () if cap.is_sealed() => Err(fault(CapCause::SealViolation, cs1)),
        () if auth.is_sealed() => Err(fault(CapCause::SealViolation, cs2)),
        () if !auth.perms.contains(Permissions::SEAL) => {
            Err(fault(CapCause::PermitSealViolation, cs2))
        }
        () if !auth.in_bounds(otype, 1) => Err(fault(CapCause::LengthViolation, cs2)),
        () if otype > u64::from(OTYPE_MAX) => Err(fault(CapCause::LengthViolation, cs2)),
        () => Ok(otype as u32),
    }
}

impl ExecContext<'_> {
    /// `CSeal`: seals `c[cs1]` with the cursor of `c[cs2]`.
    pub(super) fn exec_seal(&mut self, cd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let cap = self.creg(cs1);
        let auth = self.creg(cs2);
        let otype = check_seal(&cap, cs1, &auth, cs2)?;
        self.set_creg(cd, cap.sealed_with(otype));
        Ok(())
    }

    /// `CCSeal`: as `CSeal`, but passes `c[cs1]` through unchanged when the
    /// authority is untagged or its cursor is all ones.
    pub(super) fn exec_cond_seal(&mut self, cd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let cap = self.creg(cs1);
        let auth = self.creg(cs2);
        if !cap.tag {
            return Err(fault(CapCause::TagViolation, cs1));
        }
        if !auth.tag || auth.cursor() == u64::MAX {
            self.set_creg(cd, cap);
            return Ok(());
        }
        let otype = check_seal(&cap, cs1, &auth, cs2)?;
        self.set_creg(cd, cap.sealed_with(otype));
        Ok(())
    }

    /// `CUnseal`: unseals `c[cs1]` with authority `c[cs2]`, whose cursor must
    /// equal the object type. The result keeps the global permission only if
    /// the authority has it.
    pub(super) fn exec_unseal(&mut self, cd: usize, cs1: usize, cs2: usize) -> Result<(), Trap> {
        let cap = self.creg(cs1);
        let auth = self.creg(cs2);
        let otype = auth.cursor();
        match () {
            () if !cap.tag => return Err(fault(CapCause::TagViolation, cs1)),
            () if !auth.tag => return Err(fault(CapCause::TagViolation, cs2)),
            () if !cap.is_sealed() => return Err(fault(CapCause::SealViolation, cs1)),
            () if auth.is_sealed() => return Err(fault(CapCause::SealViolation, cs2)),
            () if otype != u64::from(cap.otype) => {
                return Err(fault(CapCause::TypeViolation, cs2));
            }
            () if !auth.perms.contains(Permissions::UNSEAL) => {
                return Err(fault(CapCause::PermitUnsealViolation, cs2));
            }
            () if !auth.in_bounds(otype, 1) => return Err(fault(CapCause::LengthViolation, cs2)),
            () => {}
        }

        let mut out = cap.unsealed();
        if !auth.perms.contains(Permissions::GLOBAL) {
            out.perms.remove(Permissions::GLOBAL);
        }
        self.set_creg(cd, out);
        Ok(())
    }
}
