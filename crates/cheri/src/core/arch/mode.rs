//! RISC-V Privilege Modes.
//!
//! Special capability registers are banked per privilege level; `cspecialrw`
//! compares the slot's level against the current mode.

use std::fmt;

/// RISC-V privilege mode levels, ordered by privilege.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrivilegeMode {
    /// User mode (U-mode).
    User = 0,

    /// Supervisor mode (S-mode).
    Supervisor = 1,

    /// Machine mode (M-mode).
    Machine = 3,
}

impl PrivilegeMode {
    /// Converts an `mstatus.MPP` style encoding; reserved value 2 maps to Machine.
    pub const fn from_u8(val: u8) -> Self {
        match val {
            0 => Self::User,
            1 => Self::Supervisor,
            _ => Self::Machine,
        }
    }

    /// Returns the two-bit encoding.
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the privilege mode.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Machine => "Machine",
        }
    }
}

impl fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
