//! Debugger-facing register lookup.
//!
//! Names accepted: `c0`-`c31`, the ABI names (`cnull`, `cra`, `csp`, ...)
//! and the special register names (`pcc`, `ddc`, `mtcc`, ...).

use std::fmt::Write;

use super::Hart;
use crate::cap::Capability;
use crate::core::arch::cap_regs::{CAP_REG_NAMES, CapRegisterFile};
use crate::core::arch::scr::ScrIndex;

impl Hart {
    /// Looks up a general or special capability register by name.
    pub fn cap_by_name(&self, name: &str) -> Option<Capability> {
        let name = name.trim().to_ascii_lowercase();
        CapRegisterFile::index_of(&name)
            .map(|idx| self.cregs.read(idx))
            .or_else(|| ScrIndex::from_name(&name).map(|scr| self.read_scr(scr)))
    }

    /// Formats a register as `name: v:.. f:.. p:.. b:.. l:.. c:.. t:..`.
    pub fn format_cap_reg(&self, name: &str) -> Option<String> {
        self.cap_by_name(name).map(|cap| format!("{}: {cap}", name.trim()))
    }

    /// Dumps every general capability register followed by the special ones.
    pub fn dump_cap_regs(&self) -> String {
        let mut out = String::new();
        for (idx, name) in CAP_REG_NAMES.iter().enumerate() {
            let _ = writeln!(out, "{name:>9}: {}", self.cregs.read(idx));
        }
        for scr in ScrIndex::ALL {
            let _ = writeln!(out, "{:>9}: {}", scr.name(), self.read_scr(scr));
        }
        out
    }
}
