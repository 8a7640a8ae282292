//! Physical and Virtual Address types.
//!
//! Capability checks run on virtual addresses (cursor plus offset); tag memory
//! and the scalar memory collaborator are indexed by physical addresses. The
//! two newtypes keep the check engine from handing an untranslated address to
//! tag memory by accident.

use super::constants::GRANULE_SHIFT;

/// A virtual address produced by capability arithmetic.
///
/// Virtual addresses must be translated through the external translator
/// before they reach memory or tag memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address returned by the translator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the index of the tag granule containing this address.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvsim_cheri::common::PhysAddr;
    ///
    /// assert_eq!(PhysAddr::new(0x8000_0010).granule(), 0x0800_0001);
    /// assert_eq!(PhysAddr::new(0x8000_001f).granule(), 0x0800_0001);
    /// ```
    #[inline(always)]
    pub const fn granule(&self) -> u64 {
        self.0 >> GRANULE_SHIFT
    }

    /// Returns the address offset by `delta` bytes, wrapping at 2^64.
    #[inline(always)]
    pub const fn offset(&self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }

    /// Returns true if the address is aligned to a capability granule.
    #[inline(always)]
    pub const fn is_granule_aligned(&self) -> bool {
        self.0 & ((1 << GRANULE_SHIFT) - 1) == 0
    }
}
