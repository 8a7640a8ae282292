//! Capability Check Engine.
//!
//! This module centralizes authorization of memory accesses through a
//! capability. It performs the following:
//! 1. **Precondition Checks:** Tag, seal and permission checks in a fixed
//!    priority order; the first failing condition is the reported fault.
//! 2. **Bounds Check:** The accessed range must lie inside `[base, top)`,
//!    computed without overflow.
//! 3. **Translation:** An authorized virtual address is handed to the
//!    external translator, which may raise its own page or access fault.
//! 4. **Instruction Fetch:** Per-granule checks of PCC for fetches.

use bitflags::bitflags;
use tracing::trace;

use crate::cap::{Capability, Permissions};
use crate::common::constants::{MIN_INSTRUCTION_BYTES, SCR_INDEX_FLAG};
use crate::common::{AccessType, CapCause, CapFault, PhysAddr, Trap, VirtAddr};
use crate::core::arch::scr::ScrIndex;
use crate::soc::traits::MemoryPort;

bitflags! {
    /// Kind of access being authorized.
    ///
    /// Exactly one of {`LOAD`/`STORE`, `EXECUTE`} is set. `CAP` marks a
    /// capability-width access and never combines with `EXECUTE`;
    /// `STORE_LOCAL` requires `CAP | STORE`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// Data read.
        const LOAD = 1 << 0;
        /// Data write.
        const STORE = 1 << 1;
        /// Instruction fetch.
        const EXECUTE = 1 << 2;
        /// The data is a capability.
        const CAP = 1 << 3;
        /// The stored capability lacks the global permission.
        const STORE_LOCAL = 1 << 4;
    }
}

impl Access {
    /// Returns the translator access kind.
    pub const fn access_type(self) -> AccessType {
        if self.contains(Self::EXECUTE) {
            AccessType::Fetch
        } else if self.contains(Self::STORE) {
            AccessType::Write
        } else {
            AccessType::Read
        }
    }
}

/// The register an authorizing capability was read from, in cause-register
/// encoding: general registers `0-31`, special registers with bit 5 set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthReg(u8);

impl AuthReg {
    /// The program counter capability.
    pub const PCC: Self = Self::scr(ScrIndex::Pcc);

    /// The default data capability.
    pub const DDC: Self = Self::scr(ScrIndex::Ddc);

    /// General capability register `idx`.
    #[inline]
    pub const fn gpr(idx: usize) -> Self {
        Self((idx & 0x1f) as u8)
    }

    /// Special capability register `scr`.
    #[inline]
    pub const fn scr(scr: ScrIndex) -> Self {
        Self(SCR_INDEX_FLAG | scr.index())
    }

    /// Returns the cause-register encoding.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a fault blamed on this register.
    #[inline]
    pub const fn fault(self, cause: CapCause) -> CapFault {
        CapFault {
            cause,
            reg: self.0,
        }
    }
}

/// Checks an access of `len` bytes at `auth.cursor() + offset`.
///
/// Faults, in priority order: tag, seal, load/store/execute permission,
/// load/store capability permission, store-local permission, bounds.
/// Returns the checked virtual address.
///
/// # Errors
///
/// The first violated condition, blamed on `reg`.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::cap::Capability;
/// use rvsim_cheri::common::CapCause;
/// use rvsim_cheri::core::units::{Access, AuthReg, check_access};
///
/// let fault = check_access(&Capability::null(), AuthReg::gpr(3), 0, 8, Access::LOAD).unwrap_err();
/// assert_eq!(fault.cause, CapCause::TagViolation);
/// assert_eq!(fault.reg, 3);
/// ```
pub fn check_access(
    auth: &Capability,
    reg: AuthReg,
    offset: u64,
    len: u64,
    access: Access,
) -> Result<VirtAddr, CapFault> {
    debug_assert!(
        access.contains(Access::EXECUTE) != access.intersects(Access::LOAD | Access::STORE),
        "exactly one of load/store and execute: {access:?}"
    );
    debug_assert!(
        !access.contains(Access::EXECUTE | Access::CAP),
        "capability-width fetch: {access:?}"
    );
    debug_assert!(
        !access.contains(Access::STORE_LOCAL) || access.contains(Access::CAP | Access::STORE),
        "store-local without capability store: {access:?}"
    );

    let addr = auth.cursor().wrapping_add(offset);
    let perms = auth.perms;
    let cap_load = access.contains(Access::CAP | Access::LOAD);
    let cap_store = access.contains(Access::CAP | Access::STORE);

    let cause = match () {
        () if !auth.tag => CapCause::TagViolation,
        () if auth.is_sealed() => CapCause::SealViolation,
        () if access.contains(Access::LOAD) && !perms.contains(Permissions::LOAD) => {
            CapCause::PermitLoadViolation
        }
        () if access.contains(Access::STORE) && !perms.contains(Permissions::STORE) => {
            CapCause::PermitStoreViolation
        }
        () if access.contains(Access::EXECUTE) && !perms.contains(Permissions::EXECUTE) => {
            CapCause::PermitExecuteViolation
        }
        () if cap_load && !perms.contains(Permissions::LOAD_CAP) => {
            CapCause::PermitLoadCapViolation
        }
        () if cap_store && !perms.contains(Permissions::STORE_CAP) => {
            CapCause::PermitStoreCapViolation
        }
        () if access.contains(Access::STORE_LOCAL)
            && !perms.contains(Permissions::STORE_LOCAL_CAP) =>
        {
            CapCause::PermitStoreLocalCapViolation
        }
        () if !auth.in_bounds(addr, len) => CapCause::LengthViolation,
        () => return Ok(VirtAddr(addr)),
    };
    Err(reg.fault(cause))
}

/// Bounds-only check for the later granules of a multi-granule fetch.
fn check_fetch_bounds(pcc: &Capability, addr: u64) -> Result<(), CapFault> {
    if pcc.in_bounds(addr, MIN_INSTRUCTION_BYTES) {
        Ok(())
    } else {
        Err(AuthReg::PCC.fault(CapCause::LengthViolation))
    }
}

/// The check engine as instantiated in a hart.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapCheckUnit {
    /// Emit a `trace` event for every successful authorization.
    pub trace: bool,
}

impl CapCheckUnit {
    /// Creates a check unit. The `always-trace` feature forces tracing on.
    pub const fn new(trace: bool) -> Self {
        Self {
            trace: trace || cfg!(feature = "always-trace"),
        }
    }

    /// Runs `check_access` and traces the outcome when enabled.
    ///
    /// # Errors
    ///
    /// The capability fault from `check_access`.
    pub fn check(
        &self,
        auth: &Capability,
        reg: AuthReg,
        offset: u64,
        len: u64,
        access: Access,
    ) -> Result<VirtAddr, CapFault> {
        let vaddr = check_access(auth, reg, offset, len, access)?;
        if self.trace {
            trace!(
                reg = reg.bits(),
                vaddr = vaddr.val(),
                len,
                access = ?access,
                "capability access authorized"
            );
        }
        Ok(vaddr)
    }

    /// Checks an access and translates the authorized address.
    ///
    /// Capability faults are raised before the translator is consulted, so
    /// a faulting access never reaches the memory port.
    ///
    /// # Errors
    ///
    /// A capability fault, or the translator's page or access fault.
    pub fn authorize(
        &self,
        port: &mut dyn MemoryPort,
        auth: &Capability,
        reg: AuthReg,
        offset: u64,
        len: u64,
        access: Access,
    ) -> Result<PhysAddr, Trap> {
        let vaddr = self.check(auth, reg, offset, len, access)?;
        port.translate(vaddr, len, access.access_type())
    }

    /// Authorizes the fetch granule at `addr` of an instruction starting at
    /// `start`, against PCC.
    ///
    /// The first granule gets the full execute check; later granules of the
    /// same instruction only need to be in bounds.
    ///
    /// # Errors
    ///
    /// A capability fault blamed on PCC.
    pub fn check_ifetch_granule(
        &self,
        pcc: &Capability,
        start: u64,
        addr: u64,
    ) -> Result<(), CapFault> {
        if addr == start {
            let offset = addr.wrapping_sub(pcc.cursor());
            let _ = self.check(pcc, AuthReg::PCC, offset, MIN_INSTRUCTION_BYTES, Access::EXECUTE)?;
            Ok(())
        } else {
            check_fetch_bounds(pcc, addr)
        }
    }
}
