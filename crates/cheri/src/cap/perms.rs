//! Capability permission bitsets.
//!
//! Hardware permissions occupy 12 bits, user (software-defined) permissions 4
//! bits. Bit positions match the in-memory encoding and the `cgetperm`
//! result layout.

use bitflags::bitflags;

bitflags! {
    /// Architectural permissions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Permissions: u16 {
        /// The capability may be stored through a capability without store-local.
        const GLOBAL = 1 << 0;
        /// Instruction fetch and jump targets.
        const EXECUTE = 1 << 1;
        /// Scalar loads.
        const LOAD = 1 << 2;
        /// Scalar stores.
        const STORE = 1 << 3;
        /// Loads that may return a tagged capability.
        const LOAD_CAP = 1 << 4;
        /// Stores of capabilities.
        const STORE_CAP = 1 << 5;
        /// Stores of capabilities lacking `GLOBAL`.
        const STORE_LOCAL_CAP = 1 << 6;
        /// Sealing with the cursor as object type.
        const SEAL = 1 << 7;
        /// Use as an operand of `ccall`.
        const CCALL = 1 << 8;
        /// Unsealing with the cursor as object type.
        const UNSEAL = 1 << 9;
        /// Access to privileged special capability registers when held by PCC.
        const ACCESS_SYS_REGS = 1 << 10;
        /// Setting the compartment ID.
        const SET_CID = 1 << 11;
    }
}

bitflags! {
    /// Software-defined permissions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct UserPerms: u8 {
        /// Software permission 0.
        const SW0 = 1 << 0;
        /// Software permission 1.
        const SW1 = 1 << 1;
        /// Software permission 2.
        const SW2 = 1 << 2;
        /// Software permission 3.
        const SW3 = 1 << 3;
    }
}

/// Number of architectural permission bits.
pub const PERM_BITS: u32 = 12;

/// Number of user permission bits.
pub const USER_PERM_BITS: u32 = 4;

