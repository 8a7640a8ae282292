//! Bounds narrowing: `CSetBounds`, `CSetBoundsExact`, `CSetBoundsImm`.

use super::{ExecContext, fault};
use crate::common::{CapCause, Trap};

impl ExecContext<'_> {
    /// Narrows `c[cs1]` to `[cursor, cursor + len)`.
    ///
    /// Faults tag, seal, then length if the cursor is below base or the new
    /// top is above top. Bounds that cannot be encoded are rounded outward;
    /// with `exact` that is an inexact-bounds fault instead.
    pub(super) fn exec_set_bounds(
        &mut self,
        cd: usize,
        cs1: usize,
        len: u64,
        exact: bool,
    ) -> Result<(), Trap> {
        let cap = self.creg(cs1);
        let new_base = cap.cursor();
        let new_top = u128::from(new_base) + u128::from(len);

        match () {
            () if !cap.tag => return Err(fault(CapCause::TagViolation, cs1)),
            () if cap.is_sealed() => return Err(fault(CapCause::SealViolation, cs1)),
            () if new_base < cap.base() => return Err(fault(CapCause::LengthViolation, cs1)),
            () if new_top > cap.top() => return Err(fault(CapCause::LengthViolation, cs1)),
            () => {}
        }

        let mut out = cap;
        let was_exact = out.set_bounds(new_base, new_top);
        if exact && !was_exact {
            return Err(fault(CapCause::InexactBounds, cs1));
        }
        self.set_creg(cd, out);
        Ok(())
    }
}
