//! Integer projections of capabilities.

use super::ExecContext;
use crate::cap::{representable_alignment_mask, representable_length};
use crate::isa::xcheri::InspectOp;

impl ExecContext<'_> {
    /// `CGet*`, `CRRL` and `CRAM`. None of them can fault.
    pub(super) fn exec_inspect(&mut self, op: InspectOp, rd: usize, cs1: usize) {
        let cap = self.creg(cs1);
        let val = match op {
            InspectOp::Perm => cap.perm_bits(),
            InspectOp::Type => {
                if cap.is_sealed() {
                    u64::from(cap.otype)
                } else {
                    u64::MAX
                }
            }
            InspectOp::Base => cap.base(),
            InspectOp::Len => u64::try_from(cap.length()).unwrap_or(u64::MAX),
            InspectOp::Tag => u64::from(cap.tag),
            InspectOp::Sealed => u64::from(cap.is_sealed()),
            InspectOp::Offset => cap.offset(),
            InspectOp::Flags => u64::from(cap.flags),
            InspectOp::Addr => cap.cursor(),
            InspectOp::RoundLength => representable_length(self.xreg(cs1)),
            InspectOp::AlignMask => representable_alignment_mask(self.xreg(cs1)),
        };
        self.set_xreg(rd, val);
    }
}
