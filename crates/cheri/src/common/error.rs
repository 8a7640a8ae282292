//! Trap and capability fault definitions.
//!
//! This module defines the one error channel the capability extension has:
//! 1. **Trap Representation:** Every synchronous exception an instruction can raise.
//! 2. **Capability Causes:** The closed enumeration of CHERI exception cause codes.
//! 3. **Fault Encoding:** `(cause << 8) | register_index` as written to the cause register.

use std::fmt;

use thiserror::Error;

use super::constants::SCR_INDEX_FLAG;

/// CHERI capability exception cause codes.
///
/// The discriminant is the architectural code written to bits `[15:8]` of the
/// capability cause register. Codes not listed here are reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CapCause {
    /// No exception; the reset value of the cause register.
    None = 0x00,
    /// Access or derived bounds fall outside the authorizing capability.
    LengthViolation = 0x01,
    /// The authorizing capability is not tagged.
    TagViolation = 0x02,
    /// The capability is sealed (or must be sealed and is not).
    SealViolation = 0x03,
    /// Object types of a sealed pair or an unseal authority do not match.
    TypeViolation = 0x04,
    /// Software trap for `CCall` in the trapping calling convention.
    CallTrap = 0x05,
    /// Software trap for `CReturn`.
    ReturnTrap = 0x06,
    /// Trusted system stack underflow.
    TssUnderflow = 0x07,
    /// A user-defined (software) permission is missing.
    UserDefViolation = 0x08,
    /// The TLB forbids storing capabilities to this page.
    TlbNoStoreCap = 0x09,
    /// `CSetBoundsExact` could not represent the requested bounds.
    InexactBounds = 0x0a,
    /// Base of the requested bounds is not suitably aligned.
    UnalignedBase = 0x0b,
    /// The global permission is missing.
    GlobalViolation = 0x10,
    /// The execute permission is missing (or present where forbidden).
    PermitExecuteViolation = 0x11,
    /// The load permission is missing.
    PermitLoadViolation = 0x12,
    /// The store permission is missing.
    PermitStoreViolation = 0x13,
    /// The load-capability permission is missing.
    PermitLoadCapViolation = 0x14,
    /// The store-capability permission is missing.
    PermitStoreCapViolation = 0x15,
    /// Storing a local capability without the store-local permission.
    PermitStoreLocalCapViolation = 0x16,
    /// The seal permission is missing.
    PermitSealViolation = 0x17,
    /// Special register access without access-system-registers on PCC.
    AccessSystemRegsViolation = 0x18,
    /// The ccall permission is missing.
    PermitCCallViolation = 0x19,
    /// Access to the invoked data capability register was attempted.
    AccessCCallIdcViolation = 0x1a,
    /// The unseal permission is missing.
    PermitUnsealViolation = 0x1b,
    /// The set-compartment-ID permission is missing.
    PermitSetCidViolation = 0x1c,
}

impl CapCause {
    /// Every defined cause, in code order.
    pub const ALL: [Self; 25] = [
        Self::None,
        Self::LengthViolation,
        Self::TagViolation,
        Self::SealViolation,
        Self::TypeViolation,
        Self::CallTrap,
        Self::ReturnTrap,
        Self::TssUnderflow,
        Self::UserDefViolation,
        Self::TlbNoStoreCap,
        Self::InexactBounds,
        Self::UnalignedBase,
        Self::GlobalViolation,
        Self::PermitExecuteViolation,
        Self::PermitLoadViolation,
        Self::PermitStoreViolation,
        Self::PermitLoadCapViolation,
        Self::PermitStoreCapViolation,
        Self::PermitStoreLocalCapViolation,
        Self::PermitSealViolation,
        Self::AccessSystemRegsViolation,
        Self::PermitCCallViolation,
        Self::AccessCCallIdcViolation,
        Self::PermitUnsealViolation,
        Self::PermitSetCidViolation,
    ];

    /// Returns the architectural cause code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a cause by its architectural code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Returns the mnemonic used in trace output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LengthViolation => "length violation",
            Self::TagViolation => "tag violation",
            Self::SealViolation => "seal violation",
            Self::TypeViolation => "type violation",
            Self::CallTrap => "call trap",
            Self::ReturnTrap => "return trap",
            Self::TssUnderflow => "trusted stack underflow",
            Self::UserDefViolation => "user-defined permission violation",
            Self::TlbNoStoreCap => "TLB prohibits store capability",
            Self::InexactBounds => "bounds cannot be represented exactly",
            Self::UnalignedBase => "unaligned base",
            Self::GlobalViolation => "global violation",
            Self::PermitExecuteViolation => "permit execute violation",
            Self::PermitLoadViolation => "permit load violation",
            Self::PermitStoreViolation => "permit store violation",
            Self::PermitLoadCapViolation => "permit load capability violation",
            Self::PermitStoreCapViolation => "permit store capability violation",
            Self::PermitStoreLocalCapViolation => "permit store local capability violation",
            Self::PermitSealViolation => "permit seal violation",
            Self::AccessSystemRegsViolation => "access system registers violation",
            Self::PermitCCallViolation => "permit ccall violation",
            Self::AccessCCallIdcViolation => "access ccall IDC violation",
            Self::PermitUnsealViolation => "permit unseal violation",
            Self::PermitSetCidViolation => "permit set CID violation",
        }
    }
}

impl fmt::Display for CapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A capability fault: the cause and the register that caused it.
///
/// `reg` is a general capability register index (0-31), or a special
/// capability register index with bit 5 set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CapFault {
    /// The violated precondition.
    pub cause: CapCause,
    /// Register index as reported in the cause register.
    pub reg: u8,
}

impl CapFault {
    /// Creates a fault blamed on general capability register `reg`.
    #[inline]
    pub const fn new(cause: CapCause, reg: usize) -> Self {
        Self {
            cause,
            reg: (reg & 0x1f) as u8,
        }
    }

    /// Creates a fault blamed on special capability register `scr`.
    #[inline]
    pub const fn scr(cause: CapCause, scr: u8) -> Self {
        Self {
            cause,
            reg: SCR_INDEX_FLAG | (scr & 0x1f),
        }
    }

    /// Returns true if the blamed register is a special capability register.
    #[inline]
    pub const fn is_scr(&self) -> bool {
        self.reg & SCR_INDEX_FLAG != 0
    }

    /// Encodes the fault as written to the capability cause register.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvsim_cheri::common::{CapCause, CapFault};
    ///
    /// assert_eq!(CapFault::new(CapCause::TagViolation, 5).ccsr_bits(), 0x0205);
    /// assert_eq!(CapFault::scr(CapCause::LengthViolation, 1).ccsr_bits(), 0x0121);
    /// ```
    #[inline]
    pub const fn ccsr_bits(&self) -> u64 {
        ((self.cause.code() as u64) << 8) | self.reg as u64
    }

    /// Decodes a cause-register value; returns `None` for reserved cause codes.
    pub fn from_ccsr_bits(bits: u64) -> Option<Self> {
        let cause = CapCause::from_code(((bits >> 8) & 0xff) as u8)?;
        Some(Self {
            cause,
            reg: (bits & 0x3f) as u8,
        })
    }
}

impl fmt::Display for CapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scr() {
            write!(f, "{} (scr {})", self.cause, self.reg & 0x1f)
        } else {
            write!(f, "{} (c{})", self.cause, self.reg)
        }
    }
}

/// Synchronous traps raised by capability instructions and the check engine.
///
/// Address-carrying variants hold the faulting virtual address; the
/// translator raises the access and page fault variants before any capability
/// state is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Jump target not aligned to the minimum instruction size.
    #[error("InstructionAddressMisaligned({0:#x})")]
    InstructionAddressMisaligned(u64),

    /// Instruction fetch outside backed memory.
    #[error("InstructionAccessFault({0:#x})")]
    InstructionAccessFault(u64),

    /// Unknown encoding, unknown special register, or insufficient privilege.
    /// The associated value is the instruction encoding.
    #[error("IllegalInstruction({0:#x})")]
    IllegalInstruction(u32),

    /// Misaligned load (capability loads must be granule aligned).
    #[error("LoadAddressMisaligned({0:#x})")]
    LoadAddressMisaligned(u64),

    /// Load outside backed memory.
    #[error("LoadAccessFault({0:#x})")]
    LoadAccessFault(u64),

    /// Misaligned store (capability stores must be granule aligned).
    #[error("StoreAddressMisaligned({0:#x})")]
    StoreAddressMisaligned(u64),

    /// Store outside backed memory.
    #[error("StoreAccessFault({0:#x})")]
    StoreAccessFault(u64),

    /// Instruction fetch page fault from the translator.
    #[error("InstructionPageFault({0:#x})")]
    InstructionPageFault(u64),

    /// Load page fault from the translator.
    #[error("LoadPageFault({0:#x})")]
    LoadPageFault(u64),

    /// Store page fault from the translator.
    #[error("StorePageFault({0:#x})")]
    StorePageFault(u64),

    /// A capability precondition failed.
    #[error("CapabilityFault({0})")]
    Capability(CapFault),
}

impl Trap {
    /// Returns the capability fault if this is one.
    #[inline]
    pub const fn cap_fault(&self) -> Option<CapFault> {
        match self {
            Self::Capability(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<CapFault> for Trap {
    #[inline]
    fn from(fault: CapFault) -> Self {
        Self::Capability(fault)
    }
}
