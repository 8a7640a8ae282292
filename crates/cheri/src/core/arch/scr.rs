//! Special capability registers.
//!
//! This module defines:
//! 1. **Indices:** The architectural SCR numbers addressed by `cspecialrw`.
//! 2. **Access Table:** Per-register existence, read-only, privilege and
//!    access-system-registers requirements.
//! 3. **Storage:** `ScrFile`, the raw capability slots. For the five coupled
//!    registers (PCC, STCC, SEPCC, MTCC, MEPCC) the slot holds only metadata;
//!    the cursor lives in the scalar register and is composed by the `Hart`.

use super::mode::PrivilegeMode;
use crate::cap::Capability;

/// Special capability register number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScrIndex {
    /// Program counter capability.
    Pcc = 0,
    /// Default data capability.
    Ddc = 1,
    /// User trap code capability.
    Utcc = 4,
    /// User trap data capability.
    Utdc = 5,
    /// User scratch capability.
    UScratchC = 6,
    /// User exception PC capability.
    Uepcc = 7,
    /// Supervisor trap code capability, coupled with `stvec`.
    Stcc = 12,
    /// Supervisor trap data capability.
    Stdc = 13,
    /// Supervisor scratch capability.
    SScratchC = 14,
    /// Supervisor exception PC capability, coupled with `sepc`.
    Sepcc = 15,
    /// Machine trap code capability, coupled with `mtvec`.
    Mtcc = 28,
    /// Machine trap data capability.
    Mtdc = 29,
    /// Machine scratch capability.
    MScratchC = 30,
    /// Machine exception PC capability, coupled with `mepc`.
    Mepcc = 31,
}

/// Access requirements of a special capability register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrAccess {
    /// Writes through `cspecialrw` are illegal.
    pub read_only: bool,
    /// Minimum privilege mode.
    pub privilege: PrivilegeMode,
    /// PCC must carry the access-system-registers permission.
    pub needs_asr: bool,
}

impl ScrIndex {
    /// Every defined SCR, in index order.
    pub const ALL: [Self; 14] = [
        Self::Pcc,
        Self::Ddc,
        Self::Utcc,
        Self::Utdc,
        Self::UScratchC,
        Self::Uepcc,
        Self::Stcc,
        Self::Stdc,
        Self::SScratchC,
        Self::Sepcc,
        Self::Mtcc,
        Self::Mtdc,
        Self::MScratchC,
        Self::Mepcc,
    ];

    /// Looks up an SCR by number; undefined numbers return `None`.
    pub fn from_u8(idx: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| *s as u8 == idx)
    }

    /// Returns the architectural number.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the lower-case register name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pcc => "pcc",
            Self::Ddc => "ddc",
            Self::Utcc => "utcc",
            Self::Utdc => "utdc",
            Self::UScratchC => "uscratchc",
            Self::Uepcc => "uepcc",
            Self::Stcc => "stcc",
            Self::Stdc => "stdc",
            Self::SScratchC => "sscratchc",
            Self::Sepcc => "sepcc",
            Self::Mtcc => "mtcc",
            Self::Mtdc => "mtdc",
            Self::MScratchC => "mscratchc",
            Self::Mepcc => "mepcc",
        }
    }

    /// Looks up an SCR by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Returns the `cspecialrw` access requirements.
    pub const fn access(self) -> ScrAccess {
        let privilege = match self {
            Self::Pcc | Self::Ddc | Self::Utcc | Self::Utdc | Self::UScratchC | Self::Uepcc => {
                PrivilegeMode::User
            }
            Self::Stcc | Self::Stdc | Self::SScratchC | Self::Sepcc => PrivilegeMode::Supervisor,
            Self::Mtcc | Self::Mtdc | Self::MScratchC | Self::Mepcc => PrivilegeMode::Machine,
        };
        ScrAccess {
            read_only: matches!(self, Self::Pcc),
            privilege,
            needs_asr: !matches!(self, Self::Pcc | Self::Ddc),
        }
    }

    /// True if the cursor of this register is held by a scalar register.
    pub const fn is_coupled(self) -> bool {
        matches!(
            self,
            Self::Pcc | Self::Stcc | Self::Sepcc | Self::Mtcc | Self::Mepcc
        )
    }

    /// True if the register is one of the per-mode trap vector capabilities.
    pub const fn is_trap_vector(self) -> bool {
        matches!(self, Self::Utcc | Self::Stcc | Self::Mtcc)
    }

    /// True if the register is one of the per-mode exception PC capabilities.
    pub const fn is_epc(self) -> bool {
        matches!(self, Self::Uepcc | Self::Sepcc | Self::Mepcc)
    }
}

/// Raw special capability register slots.
#[derive(Debug, Clone)]
pub struct ScrFile {
    slots: [Capability; 32],
}

impl Default for ScrFile {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScrFile {
    /// Creates the file in its reset state.
    pub fn new(ddc_almighty: bool) -> Self {
        let mut file = Self {
            slots: [Capability::null(); 32],
        };
        file.reset(ddc_almighty);
        file
    }

    /// Restores reset values: PCC, the trap vectors and the exception PCs are
    /// almighty; DDC is almighty if `ddc_almighty`; everything else is null.
    pub fn reset(&mut self, ddc_almighty: bool) {
        for scr in ScrIndex::ALL {
            let almighty = match scr {
                ScrIndex::Pcc => true,
                ScrIndex::Ddc => ddc_almighty,
                other => other.is_trap_vector() || other.is_epc(),
            };
            self.slots[scr as usize] = if almighty {
                Capability::almighty()
            } else {
                Capability::null()
            };
        }
    }

    /// Returns the stored slot. For coupled registers the cursor is stale.
    #[inline]
    pub fn raw(&self, scr: ScrIndex) -> Capability {
        self.slots[scr as usize]
    }

    /// Replaces the stored slot.
    #[inline]
    pub fn set_raw(&mut self, scr: ScrIndex, cap: Capability) {
        self.slots[scr as usize] = cap;
    }
}
